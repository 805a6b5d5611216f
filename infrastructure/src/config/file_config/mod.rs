//! Raw TOML configuration data types
//!
//! These structs mirror the config file layout. Missing sections and
//! fields fall back to built-in defaults.

mod gateway;
mod output;
mod store;
mod variants;

pub use gateway::{DEFAULT_API_KEY_ENV, FileGatewayConfig};
pub use output::{DEFAULT_POLL_INTERVAL_MS, FileOutputConfig, FileOutputFormat};
pub use store::FileStoreConfig;
pub use variants::{FileVariantConfig, FileVariantsConfig};

use govmind_domain::Variant;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigValidationError {
    #[error("variants.{variant}.timeout_seconds cannot be 0")]
    InvalidTimeout { variant: Variant },

    #[error("variants.{variant}.max_tokens cannot be 0")]
    InvalidMaxTokens { variant: Variant },

    #[error("variants.{variant}.temperature must be within [0, 2], got {value}")]
    InvalidTemperature { variant: Variant, value: f64 },

    #[error("gateway.model cannot be empty")]
    EmptyModelName,

    #[error("gateway.endpoint cannot be empty")]
    EmptyEndpoint,

    #[error("output.poll_interval_ms cannot be 0")]
    InvalidPollInterval,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub gateway: FileGatewayConfig,
    pub variants: FileVariantsConfig,
    pub store: FileStoreConfig,
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the configuration, stopping at the first problem.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.gateway.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }
        if self.gateway.endpoint.trim().is_empty() {
            return Err(ConfigValidationError::EmptyEndpoint);
        }

        let profiles = self.variants.to_profiles();
        for variant in Variant::ALL {
            let profile = profiles.get(variant);
            if profile.timeout_seconds == 0 {
                return Err(ConfigValidationError::InvalidTimeout { variant });
            }
            if profile.max_tokens == 0 {
                return Err(ConfigValidationError::InvalidMaxTokens { variant });
            }
            if !(0.0..=2.0).contains(&profile.temperature) {
                return Err(ConfigValidationError::InvalidTemperature {
                    variant,
                    value: profile.temperature,
                });
            }
        }

        if self.output.poll_interval_ms == 0 {
            return Err(ConfigValidationError::InvalidPollInterval);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use govmind_domain::OutputFormat;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[gateway]
endpoint = "http://localhost:8080/v1/chat/completions"
model = "local-model"
api_key_env = "LOCAL_KEY"

[variants.analyze]
temperature = 0.1
max_tokens = 1000
timeout_seconds = 20

[store]
path = "/tmp/govmind/proposals.json"

[output]
format = "full"
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.gateway.model, "local-model");
        assert_eq!(config.gateway.api_key_env, "LOCAL_KEY");
        assert_eq!(config.variants.analyze.max_tokens, Some(1000));
        assert_eq!(config.output.format, Some(OutputFormat::Full));
        assert!(!config.output.color);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[gateway]
model = "deepseek-reasoner"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.gateway.model, "deepseek-reasoner");
        assert_eq!(config.gateway.api_key_env, DEFAULT_API_KEY_ENV);
        assert!(config.output.color);
        assert!(config.store.path.is_none());
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(FileConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = FileConfig::default();
        config.variants.draft.timeout_seconds = Some(0);
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidTimeout {
                variant: Variant::Draft
            })
        );
    }

    #[test]
    fn test_validate_zero_max_tokens() {
        let mut config = FileConfig::default();
        config.variants.debate.max_tokens = Some(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidMaxTokens { .. })
        ));
    }

    #[test]
    fn test_validate_temperature_range() {
        let mut config = FileConfig::default();
        config.variants.analyze.temperature = Some(2.5);
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidTemperature { value, .. }) if value == 2.5
        ));

        config.variants.analyze.temperature = Some(2.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_model() {
        let mut config = FileConfig::default();
        config.gateway.model = "  ".to_string();
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyModelName));
    }
}
