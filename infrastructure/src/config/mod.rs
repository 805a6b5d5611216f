//! Configuration file loading for govmind
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `GOVMIND_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./govmind.toml` or `./.govmind.toml`
//! 4. Global: `$XDG_CONFIG_HOME/govmind/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_API_KEY_ENV, DEFAULT_POLL_INTERVAL_MS, FileConfig,
    FileGatewayConfig, FileOutputConfig, FileOutputFormat, FileStoreConfig, FileVariantConfig,
    FileVariantsConfig,
};
pub use loader::ConfigLoader;
