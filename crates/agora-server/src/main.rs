//! Agora member service binary.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `agora-config.yaml` (defaults if absent)
//! 2. Initialize structured logging (tracing)
//! 3. Seed the database with member types
//! 4. Serve the HTTP API until `Ctrl-C`

mod config;
mod error;

use std::path::Path;
use std::sync::Arc;

use agora_api::AppState;
use agora_store::Database;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, LogFormat, LoggingConfig};
use crate::error::AppError;

/// Default location of the configuration file.
const CONFIG_PATH: &str = "agora-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, logging setup or the server fails.
#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Load configuration. Logging is not up yet, so report the source
    //    once the subscriber exists.
    let (config, from_file) = load_config(Path::new(CONFIG_PATH))?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging)?;
    info!(
        config_file = from_file,
        host = %config.server.host,
        port = config.server.port,
        "agora-server starting"
    );

    // 3. Seed the database.
    let db = Database::new(config.seed_member_types());
    info!(member_types = db.member_types.len(), "Database seeded");

    // 4. Serve.
    let state = Arc::new(AppState::new(db));
    agora_api::start_server(&config.server, state).await?;

    info!("agora-server shutdown complete");
    Ok(())
}

/// Load configuration from `path`, or defaults plus environment overrides
/// when the file does not exist.
///
/// Returns the configuration and whether it came from the file.
fn load_config(path: &Path) -> Result<(AppConfig, bool), AppError> {
    if path.exists() {
        Ok((AppConfig::from_file(path)?, true))
    } else {
        let mut config = AppConfig::default();
        config.apply_env_overrides(|var| std::env::var(var).ok())?;
        Ok((config, false))
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(logging: &LoggingConfig) -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let installed = match logging.format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| AppError::Logging {
        message: e.to_string(),
    })
}
