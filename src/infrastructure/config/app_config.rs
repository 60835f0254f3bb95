// ============================================================
// APPLICATION CONFIGURATION
// ============================================================
// Layered config: defaults, optional TOML file, environment overrides

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};

/// Runtime configuration for the analysis service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Bind address for the HTTP API
    pub host: String,

    /// Bind port for the HTTP API
    pub port: u16,

    /// Default tracing filter (overridable with RUST_LOG semantics)
    pub log_filter: String,

    /// Hard ceiling on imported rows; larger files are rejected
    pub max_import_rows: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            log_filter: "info".to_string(),
            max_import_rows: 500_000,
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, `datalab.toml`, and
    /// `DATALAB_`-prefixed environment variables (highest precedence)
    pub fn load() -> Result<Self> {
        let config: AppConfig = Figment::new()
            .merge(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file("datalab.toml"))
            .merge(Env::prefixed("DATALAB_"))
            .extract()
            .map_err(|e| AppError::Internal(format!("Failed to load configuration: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(AppError::ValidationError(
                "host must not be empty".to_string(),
            ));
        }
        if self.max_import_rows == 0 {
            return Err(AppError::ValidationError(
                "max_import_rows must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
