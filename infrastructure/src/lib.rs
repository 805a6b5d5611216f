//! Infrastructure layer for govmind
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration file loading.

pub mod completion;
pub mod config;
pub mod logging;
pub mod storage;

// Re-export commonly used types
pub use completion::ChatCompletionGateway;
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileGatewayConfig, FileOutputConfig,
    FileOutputFormat, FileStoreConfig, FileVariantsConfig,
};
pub use logging::JsonlAnalysisLogger;
pub use storage::{InMemoryProposalRepository, JsonFileProposalRepository};
