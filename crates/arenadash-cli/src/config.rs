//! CLI Configuration
//!
//! Supports config files and environment variables:
//!
//! ```text
//! --config <path>         explicit file (optional)
//! config/default.*        shipped defaults (optional)
//! config/local.*          local overrides (optional)
//! ARENADASH__SECTION__KEY environment overrides
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};

use arenadash_rounds::ScheduleConfig;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Phase schedule
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json, pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl AppConfig {
    /// Load configuration from environment and optional config file
    pub fn load(config_path: Option<&str>) -> anyhow::Result<Self> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let mut builder = config::Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        builder = builder
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("ARENADASH")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build().context("failed to read configuration")?;

        config
            .try_deserialize()
            .context("invalid configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.schedule.total_blocks(), 3000);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_partial_sections() {
        let config: AppConfig =
            serde_json::from_str(r#"{"schedule":{"betting_blocks":50},"logging":{"format":"json"}}"#).unwrap();

        assert_eq!(config.schedule.betting_blocks, 50);
        assert_eq!(config.schedule.trading_blocks, 1000);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, "json");
    }
}
