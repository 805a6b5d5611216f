//! Analysis panel state selection
//!
//! The panel shows exactly one of five states, derived from nothing but the
//! store snapshot of a proposal.

use govmind_domain::{AnalysisResult, ProposalRecord, ProposalStatus};
use serde::Serialize;
use tracing::warn;

/// What the user can do from a given panel state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Affordance {
    /// Submit the proposal for analysis
    Analyze,
    /// Dispatch a fresh analysis attempt
    Retry,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "analysis", rename_all = "snake_case")]
pub enum PanelState {
    NotSubmitted,
    Pending,
    Analyzing,
    Analyzed(AnalysisResult),
    Failed,
}

impl PanelState {
    pub fn from_record(record: Option<&ProposalRecord>) -> Self {
        let Some(record) = record else {
            return PanelState::NotSubmitted;
        };

        match record.status {
            ProposalStatus::Pending => PanelState::Pending,
            ProposalStatus::Analyzing => PanelState::Analyzing,
            ProposalStatus::Failed => PanelState::Failed,
            ProposalStatus::Analyzed => match &record.analysis {
                Some(analysis) => PanelState::Analyzed(analysis.clone()),
                None => {
                    warn!(proposal_id = %record.id, "Analyzed record without analysis");
                    PanelState::Failed
                }
            },
        }
    }

    pub fn affordance(&self) -> Option<Affordance> {
        match self {
            PanelState::NotSubmitted => Some(Affordance::Analyze),
            PanelState::Failed => Some(Affordance::Retry),
            _ => None,
        }
    }

    /// `Analyzed` or `Failed`: nothing will change without user action.
    pub fn is_settled(&self) -> bool {
        matches!(self, PanelState::Analyzed(_) | PanelState::Failed)
    }

    /// Whether polling the store could still produce a different state.
    pub fn awaits_store(&self) -> bool {
        matches!(self, PanelState::Pending | PanelState::Analyzing)
    }

    pub fn label(&self) -> &'static str {
        match self {
            PanelState::NotSubmitted => "not submitted",
            PanelState::Pending => "waiting for analysis",
            PanelState::Analyzing => "analyzing",
            PanelState::Analyzed(_) => "analyzed",
            PanelState::Failed => "analysis failed",
        }
    }

    /// Same state, ignoring the analysis payload.
    pub fn same_kind(&self, other: &PanelState) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}
