//! Persistence locations from TOML (`[store]` section)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "govmind";
const PROPOSALS_FILE: &str = "proposals.json";
const EVENT_LOG_FILE: &str = "analysis.jsonl";

/// Raw store configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStoreConfig {
    /// Proposal records file; defaults under the platform data directory
    pub path: Option<PathBuf>,
    /// JSONL analysis event log; defaults next to the records file
    pub event_log: Option<PathBuf>,
}

impl FileStoreConfig {
    pub fn proposals_path(&self) -> PathBuf {
        self.path
            .as_deref()
            .map(expand_home)
            .unwrap_or_else(|| data_dir().join(PROPOSALS_FILE))
    }

    pub fn event_log_path(&self) -> PathBuf {
        if let Some(path) = self.event_log.as_deref() {
            return expand_home(path);
        }
        self.proposals_path()
            .parent()
            .map(|dir| dir.join(EVENT_LOG_FILE))
            .unwrap_or_else(|| PathBuf::from(EVENT_LOG_FILE))
    }
}

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(".govmind"))
}

/// Resolve a leading `~/` against the home directory.
fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
