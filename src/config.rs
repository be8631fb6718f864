//! Configuration, built from environment variables.

use std::path::PathBuf;

use secrecy::SecretString;

use crate::error::ConfigError;

const ENV_SPREADSHEET_ID: &str = "RESOLUTIONS_SPREADSHEET_ID";
const ENV_CREDENTIALS_FILE: &str = "RESOLUTIONS_CREDENTIALS_FILE";
const ENV_SPARKPOST_API_KEY: &str = "SPARKPOST_API_KEY";
const ENV_CAMPAIGN_ID: &str = "RESOLUTIONS_CAMPAIGN_ID";
const ENV_SCHEDULE_TAB: &str = "RESOLUTIONS_SCHEDULE_TAB";
const ENV_ROSTER_TAB: &str = "RESOLUTIONS_ROSTER_TAB";
const ENV_MESSAGES_TAB: &str = "RESOLUTIONS_MESSAGES_TAB";

/// Worksheet names inside the campaign spreadsheet.
#[derive(Debug, Clone)]
pub struct TabNames {
    pub schedule: String,
    pub roster: String,
    pub messages: String,
}

impl Default for TabNames {
    fn default() -> Self {
        Self {
            schedule: "dates".into(),
            roster: "resolutions".into(),
            messages: "messages".into(),
        }
    }
}

/// Full mailer configuration.
#[derive(Debug, Clone)]
pub struct MailerConfig {
    pub spreadsheet_id: String,
    pub credentials_file: PathBuf,
    pub sparkpost_api_key: SecretString,
    pub campaign_id: String,
    pub tabs: TabNames,
}

impl MailerConfig {
    /// Build config from environment variables. The spreadsheet id, the
    /// service-account key file, and the provider API key are required.
    pub fn from_env() -> Result<Self, ConfigError> {
        let spreadsheet_id = require(ENV_SPREADSHEET_ID)?;
        let credentials_file = PathBuf::from(require(ENV_CREDENTIALS_FILE)?);
        let sparkpost_api_key = SecretString::from(require(ENV_SPARKPOST_API_KEY)?);

        let campaign_id =
            std::env::var(ENV_CAMPAIGN_ID).unwrap_or_else(|_| "resolutions".to_string());

        let defaults = TabNames::default();
        let tabs = TabNames {
            schedule: std::env::var(ENV_SCHEDULE_TAB).unwrap_or(defaults.schedule),
            roster: std::env::var(ENV_ROSTER_TAB).unwrap_or(defaults.roster),
            messages: std::env::var(ENV_MESSAGES_TAB).unwrap_or(defaults.messages),
        };

        Ok(Self {
            spreadsheet_id,
            credentials_file,
            sparkpost_api_key,
            campaign_id,
            tabs,
        })
    }
}

fn require(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

// ── Tests ───────────────────────────────────────────────────────────
