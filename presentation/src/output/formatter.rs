//! Output formatter trait

use crate::output::{console::ConsoleFormatter, json::JsonFormatter};
use crate::panel::PanelState;
use govmind_domain::{
    AnalysisResult, CommitteeSuggestion, DebateResult, DraftResult, OutputFormat, ProposalId,
    ProposalRecord,
};

/// Renders command results for the terminal
pub trait OutputFormatter {
    /// Panel state of one proposal
    fn panel(&self, id: &ProposalId, state: &PanelState) -> String;

    fn analysis(&self, id: &ProposalId, analysis: &AnalysisResult) -> String;

    fn draft(&self, draft: &DraftResult) -> String;

    fn committee_suggestion(&self, suggestion: &CommitteeSuggestion) -> String;

    fn debate(&self, debate: &DebateResult) -> String;

    /// Tracked proposals, in the order given
    fn proposals(&self, records: &[ProposalRecord]) -> String;
}

pub fn formatter_for(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Full => Box::new(ConsoleFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}
