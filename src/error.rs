//! Error types for the resolutions mailer.

use chrono::NaiveDate;

/// Top-level error type for a mailer run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("Spreadsheet error: {0}")]
    Store(#[from] StoreError),

    #[error("Transmission error: {0}")]
    Transmit(#[from] TransmitError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Campaign schedule errors. All of these are fatal: they are raised before
/// any recipient is contacted, so a failed run leaves the roster untouched.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("Schedule has not started yet (first campaign begins {starts})")]
    NotStarted { starts: NaiveDate },

    #[error("No active campaign: every scheduled window has closed")]
    NoActiveCampaign,

    #[error("Invalid date {value:?} in schedule row {row}: {message}")]
    InvalidDate {
        value: String,
        row: u32,
        message: String,
    },

    #[error("Invalid send index {value:?} in schedule row {row}")]
    InvalidSendIndex { value: String, row: u32 },
}

/// Tabular store (spreadsheet) errors. These propagate and terminate the
/// run; cell writes already committed stay as-is.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Credential error: {0}")]
    Credentials(String),

    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    #[error("Spreadsheet request failed: {0}")]
    Http(String),

    #[error("Spreadsheet returned {status} for {range}: {body}")]
    Api {
        status: u16,
        range: String,
        body: String,
    },

    #[error("Unexpected response shape from spreadsheet: {0}")]
    Decode(String),
}

/// Transmission provider errors. The dispatch engine absorbs these
/// per-recipient; they never abort the batch on their own.
#[derive(Debug, thiserror::Error)]
pub enum TransmitError {
    #[error("Transmission request failed: {0}")]
    Http(String),

    #[error("Unexpected response from transmission provider: {0}")]
    Decode(String),
}

/// Result type alias for the mailer.
pub type Result<T> = std::result::Result<T, Error>;
