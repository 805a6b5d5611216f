//! Output configuration from TOML (`[output]` section)

use govmind_domain::OutputFormat;
use serde::{Deserialize, Serialize};

pub use govmind_domain::OutputFormat as FileOutputFormat;

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 3000;

/// Raw output configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Output format; `--output` overrides it
    pub format: Option<OutputFormat>,
    /// Enable colored terminal output
    pub color: bool,
    /// How often the analysis panel re-reads the store
    pub poll_interval_ms: u64,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}
