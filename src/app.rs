use crate::infrastructure::config::AppConfig;
use crate::interfaces::http::{self, AppState};

/// Bootstrap and run the analysis service until shutdown
pub async fn run() -> std::io::Result<()> {
    let _ = dotenvy::dotenv();

    let config = AppConfig::load()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(config.log_filter.as_str())
        .try_init();

    tracing::info!(host = %config.host, port = config.port, "Starting analysis service");

    let state = AppState::new(&config);
    http::start_server(&config, state)?.await
}
