use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use resolutions::config::MailerConfig;
use resolutions::run::run_campaign;
use resolutions::schedule::parse_sheet_date;
use resolutions::store::GoogleSheetsStore;
use resolutions::store::auth::ServiceAccountKey;
use resolutions::transmit::SparkPostClient;

#[derive(Parser)]
#[command(
    name = "resolutions",
    version,
    about = "Campaign mailer for the resolutions spreadsheet"
)]
struct Cli {
    /// Override the current date (MM/DD/YYYY) for scheduling decisions
    #[arg(long)]
    now: Option<String>,

    /// Directory for the persistent log file
    #[arg(long, default_value = ".")]
    log_dir: PathBuf,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Console gets debug detail; the log file keeps info and above.
    let file_appender = tracing_appender::rolling::never(&cli.log_dir, "resolutions.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("debug")),
                ),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_filter(LevelFilter::INFO),
        )
        .init();

    let code = run(&cli).await;

    // Flush the file sink before exiting.
    drop(guard);
    std::process::exit(code);
}

async fn run(cli: &Cli) -> i32 {
    let now = match cli.now.as_deref() {
        Some(value) => match parse_sheet_date(value) {
            Ok(date) => date,
            Err(e) => {
                tracing::error!("Invalid --now {value:?}: {e}");
                return 1;
            }
        },
        None => chrono::Local::now().date_naive(),
    };

    let config = match MailerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            return 1;
        }
    };

    let credentials = match ServiceAccountKey::from_file(&config.credentials_file) {
        Ok(key) => key,
        Err(e) => {
            tracing::error!("{e}");
            return 1;
        }
    };
    let store = GoogleSheetsStore::open_by_key(credentials, config.spreadsheet_id.as_str());
    let transmitter = SparkPostClient::new(config.sparkpost_api_key.clone());

    match run_campaign(&store, &transmitter, &config.tabs, &config.campaign_id, now).await {
        Ok(_) => 0,
        Err(e) => {
            tracing::error!("{e}");
            1
        }
    }
}
