//! Presentation layer for govmind
//!
//! This crate contains the CLI definition, the analysis panel (state
//! selection and store polling), output formatters and progress reporters.

pub mod cli;
pub mod output;
pub mod panel;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use output::formatter::{OutputFormatter, formatter_for};
pub use output::json::JsonFormatter;
pub use panel::{Affordance, AnalysisPoller, PanelState, ProposalStatusSource};
pub use progress::reporter::{ProgressReporter, SimpleProgress};
