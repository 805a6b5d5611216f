//! Logging infrastructure: structured analysis event logging.
//!
//! Provides [`JsonlAnalysisLogger`], a JSONL file writer that implements
//! the [`AnalysisEventLogger`](govmind_application::AnalysisEventLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlAnalysisLogger;
