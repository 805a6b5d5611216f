//! Model endpoint configuration from TOML (`[gateway]` section)

use crate::completion::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_KEY_ENV: &str = "DEEPSEEK_API_KEY";

/// Raw gateway configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGatewayConfig {
    /// Chat-completions URL
    pub endpoint: String,
    pub model: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
}

impl Default for FileGatewayConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
        }
    }
}

impl FileGatewayConfig {
    /// Read the API key from the configured environment variable.
    ///
    /// The key itself never lives in a config file.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_defaults() {
        let config = FileGatewayConfig::default();
        assert_eq!(config.model, "deepseek-chat");
        assert_eq!(config.api_key_env, "DEEPSEEK_API_KEY");
    }

    #[test]
    fn test_missing_env_var_means_no_key() {
        let config = FileGatewayConfig {
            api_key_env: "GOVMIND_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..Default::default()
        };
        assert!(config.api_key().is_none());
    }
}
