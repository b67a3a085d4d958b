use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::error::{AppError, Result};

pub const CONFIG_FILE: &str = "Sweeper.toml";
pub const ENV_PREFIX: &str = "SWEEPER_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SweeperConfig {
    pub host: String,
    #[validate(range(min = 1))]
    pub port: u16,
    /// Rows shown in the preview of each decoded file
    #[validate(range(min = 1))]
    pub preview_rows: usize,
    #[validate(range(min = 1))]
    pub max_upload_bytes: usize,
    pub log_filter: String,
    #[validate(range(min = 1))]
    pub max_log_entries: usize,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            preview_rows: 5,
            max_upload_bytes: 200 * 1024 * 1024,
            log_filter: "info".to_string(),
            max_log_entries: 100,
        }
    }
}

pub struct ConfigService;

impl ConfigService {
    /// Defaults, then `Sweeper.toml`, then `SWEEPER_*` environment variables
    pub fn load() -> Result<SweeperConfig> {
        let _ = dotenvy::dotenv();
        Self::from_figment(
            Figment::from(Serialized::defaults(SweeperConfig::default()))
                .merge(Toml::file(CONFIG_FILE))
                .merge(Env::prefixed(ENV_PREFIX)),
        )
    }

    pub fn from_figment(figment: Figment) -> Result<SweeperConfig> {
        let config: SweeperConfig = figment
            .extract()
            .map_err(|e| AppError::ValidationError(format!("Invalid configuration: {}", e)))?;

        config
            .validate()
            .map_err(|e| AppError::ValidationError(format!("Invalid configuration: {}", e)))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Figment {
        Figment::from(Serialized::defaults(SweeperConfig::default()))
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = ConfigService::from_figment(defaults()).unwrap();
        assert_eq!(config, SweeperConfig::default());
        assert_eq!(config.port, 3001);
        assert_eq!(config.preview_rows, 5);
    }

    #[test]
    fn test_toml_overrides() {
        let figment = defaults().merge(Toml::string("port = 8080\npreview_rows = 10\n"));
        let config = ConfigService::from_figment(figment).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.preview_rows, 10);
        assert_eq!(config.host, "127.0.0.1");
    }

    #[test]
    fn test_zero_preview_rows_rejected() {
        let figment = defaults().merge(Toml::string("preview_rows = 0\n"));
        let result = ConfigService::from_figment(figment);
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_wrong_type_rejected() {
        let figment = defaults().merge(Toml::string("port = \"high\"\n"));
        assert!(ConfigService::from_figment(figment).is_err());
    }
}
