//! JSON output for scripting

use crate::output::formatter::OutputFormatter;
use crate::panel::PanelState;
use govmind_domain::{
    AnalysisResult, CommitteeSuggestion, DebateResult, DraftResult, ProposalId, ProposalRecord,
};
use serde::Serialize;
use serde_json::json;

pub struct JsonFormatter;

impl JsonFormatter {
    fn pretty<T: Serialize + ?Sized>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    fn panel(&self, id: &ProposalId, state: &PanelState) -> String {
        let mut value = serde_json::to_value(state).unwrap_or_else(|_| json!({}));
        if let Some(map) = value.as_object_mut() {
            map.insert("proposal_id".into(), json!(id));
            map.insert("affordance".into(), json!(state.affordance()));
        }
        Self::pretty(&value)
    }

    fn analysis(&self, id: &ProposalId, analysis: &AnalysisResult) -> String {
        Self::pretty(&json!({ "proposal_id": id, "analysis": analysis }))
    }

    fn draft(&self, draft: &DraftResult) -> String {
        Self::pretty(draft)
    }

    fn committee_suggestion(&self, suggestion: &CommitteeSuggestion) -> String {
        Self::pretty(suggestion)
    }

    fn debate(&self, debate: &DebateResult) -> String {
        Self::pretty(debate)
    }

    fn proposals(&self, records: &[ProposalRecord]) -> String {
        let summaries: Vec<_> = records
            .iter()
            .map(|r| {
                json!({
                    "id": r.id,
                    "title": r.title,
                    "status": r.status,
                    "submitted_at": r.submitted_at,
                    "updated_at": r.updated_at,
                    "attempts": r.attempts,
                })
            })
            .collect();
        Self::pretty(&summaries)
    }
}
