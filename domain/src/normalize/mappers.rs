//! Per-variant projection of a parsed JSON object onto result types.
//!
//! Every mapper is total: any field that is missing or has the wrong shape
//! is replaced by its documented default.

use super::coerce::{identifier, object, score, text_list, text_or};
use crate::analysis::{
    AnalysisResult, CommitteeSuggestion, ComplexityBreakdown, DebatePersona, DebateResult,
    DraftResult, PersonaIcon,
};
use crate::proposal::Committee;
use serde_json::{Map, Value};

// ==================== Defaults ====================

pub const DEFAULT_SUMMARY: &str = "Analysis completed";
pub const DEFAULT_RISK: &str = "Standard proposal risks apply";
pub const DEFAULT_RECOMMENDATIONS: &str = "Follow standard DAO procedures";
pub const DEFAULT_EXPLANATION: &str = "Standard complexity assessment";
pub const DEFAULT_COMPARISON: &str = "Typical DAO proposal complexity";
pub const DEFAULT_IMPACT: &str = "Moderate impact expected";

pub const DEFAULT_DRAFT_TITLE: &str = "Untitled Proposal";
pub const DEFAULT_DRAFT_SUMMARY: &str = "No summary provided";
pub const DEFAULT_RATIONALE: &str = "No rationale provided";
pub const DEFAULT_SPECIFICATIONS: &str = "No specifications provided";
pub const DEFAULT_COMMITTEE_REASONING: &str = "No committee reasoning provided";

pub const FILLER_PERSONA_NAME: &str = "Community Member";
pub const DEFAULT_CORE_ARGUMENT: &str = "No argument provided";
pub const DEFAULT_OBJECTION: &str = "No specific objections raised";
pub const DEFAULT_SUGGESTION: &str = "No suggestion provided";

// ==================== Analyze ====================

pub fn analysis(map: &Map<String, Value>) -> AnalysisResult {
    let empty = Map::new();
    let breakdown = object(map, "complexity_breakdown", &empty);

    AnalysisResult {
        summary: text_or(map.get("summary"), DEFAULT_SUMMARY),
        risk_assessment: text_or(map.get("risk_assessment"), DEFAULT_RISK),
        recommendations: text_or(map.get("recommendations"), DEFAULT_RECOMMENDATIONS),
        complexity_score: score(map.get("complexity_score")),
        complexity_breakdown: ComplexityBreakdown {
            technical: score(breakdown.get("technical_complexity")),
            financial: score(breakdown.get("financial_complexity")),
            governance: score(breakdown.get("governance_complexity")),
            timeline: score(breakdown.get("timeline_complexity")),
            explanation: text_or(breakdown.get("explanation"), DEFAULT_EXPLANATION),
            comparison: text_or(breakdown.get("comparison"), DEFAULT_COMPARISON),
        },
        estimated_impact: text_or(map.get("estimated_impact"), DEFAULT_IMPACT),
    }
}

// ==================== Draft ====================

pub fn draft(map: &Map<String, Value>) -> DraftResult {
    DraftResult {
        title: text_or(map.get("title"), DEFAULT_DRAFT_TITLE),
        summary: text_or(map.get("summary"), DEFAULT_DRAFT_SUMMARY),
        rationale: text_or(map.get("rationale"), DEFAULT_RATIONALE),
        specifications: text_or(map.get("specifications"), DEFAULT_SPECIFICATIONS),
    }
}

/// Draft plus committee routing, resolved against the caller's committees.
///
/// An id that matches no committee is kept verbatim with `committee: None`.
pub fn committee_suggestion(
    map: &Map<String, Value>,
    committees: &[Committee],
) -> CommitteeSuggestion {
    let suggested_committee_id = identifier(map.get("suggested_committee_id"));
    let committee = suggested_committee_id
        .as_deref()
        .and_then(|id| Committee::find(committees, id))
        .cloned();

    CommitteeSuggestion {
        draft: draft(map),
        suggested_committee_id,
        committee_reasoning: text_or(
            map.get("committee_reasoning"),
            DEFAULT_COMMITTEE_REASONING,
        ),
        committee,
    }
}

// ==================== Debate ====================

/// Exactly four personas: extras are dropped, gaps are filled.
pub fn debate(map: &Map<String, Value>) -> DebateResult {
    let entries: &[Value] = match map.get("personas") {
        Some(Value::Array(items)) => items,
        _ => &[],
    };

    DebateResult {
        personas: std::array::from_fn(|i| entries.get(i).map_or_else(filler_persona, persona)),
    }
}

fn persona(value: &Value) -> DebatePersona {
    let Value::Object(map) = value else {
        return filler_persona();
    };

    let icon = map
        .get("icon")
        .and_then(Value::as_str)
        .and_then(PersonaIcon::from_tag)
        .unwrap_or_default();

    let mut objections = text_list(map.get("objections"));
    if objections.is_empty() {
        objections.push(DEFAULT_OBJECTION.to_string());
    }

    DebatePersona {
        name: text_or(map.get("name"), FILLER_PERSONA_NAME),
        icon,
        core_argument: text_or(map.get("core_argument"), DEFAULT_CORE_ARGUMENT),
        objections,
        actionable_suggestion: text_or(map.get("actionable_suggestion"), DEFAULT_SUGGESTION),
    }
}

pub fn filler_persona() -> DebatePersona {
    DebatePersona {
        name: FILLER_PERSONA_NAME.to_string(),
        icon: PersonaIcon::default(),
        core_argument: DEFAULT_CORE_ARGUMENT.to_string(),
        objections: vec![DEFAULT_OBJECTION.to_string()],
        actionable_suggestion: DEFAULT_SUGGESTION.to_string(),
    }
}
