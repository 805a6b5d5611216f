//! Progress notification port
//!
//! Defines the interface for reporting progress of analysis and assist
//! requests.

use govmind_domain::{ProposalId, ProposalStatus, Variant};

/// Why an analysis was dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisTrigger {
    /// First analysis after submission
    Initial,
    /// Explicit user retry
    Retry,
}

impl AnalysisTrigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisTrigger::Initial => "initial",
            AnalysisTrigger::Retry => "retry",
        }
    }
}

impl std::fmt::Display for AnalysisTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Callback for progress updates
///
/// Implementations live in the presentation layer.
pub trait AnalysisProgressNotifier: Send + Sync {
    /// Called when a record enters `Analyzing`
    fn on_analysis_start(&self, id: &ProposalId, trigger: AnalysisTrigger);

    /// Called when an attempt settles (`Analyzed` or `Failed`)
    fn on_analysis_complete(&self, id: &ProposalId, status: ProposalStatus);

    /// Called before a model request is sent
    fn on_request_start(&self, _variant: Variant) {}

    /// Called after a model request returns
    fn on_request_complete(&self, _variant: Variant, _success: bool) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl AnalysisProgressNotifier for NoProgress {
    fn on_analysis_start(&self, _id: &ProposalId, _trigger: AnalysisTrigger) {}
    fn on_analysis_complete(&self, _id: &ProposalId, _status: ProposalStatus) {}
}
