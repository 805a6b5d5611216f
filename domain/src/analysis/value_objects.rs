//! Normalized model output types.
//!
//! Every type here is fully populated: the normalizer fills documented
//! defaults instead of leaving fields out, so none of these carry optional
//! narrative fields. Field names on the wire are the snake_case names the
//! prompts ask the model to emit.

use crate::proposal::committee::Committee;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of personas in every debate simulation
pub const PERSONA_COUNT: usize = 4;

/// Inclusive bounds for every complexity score
pub const SCORE_MIN: f64 = 1.0;
pub const SCORE_MAX: f64 = 10.0;

/// Per-dimension complexity scores plus the reasoning behind them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityBreakdown {
    /// How technically challenging implementation is
    #[serde(rename = "technical_complexity")]
    pub technical: f64,
    /// Budget size, funding mechanisms, tokenomics changes
    #[serde(rename = "financial_complexity")]
    pub financial: f64,
    /// Voting mechanisms, legal and regulatory implications
    #[serde(rename = "governance_complexity")]
    pub governance: f64,
    /// Dependencies, coordination requirements, milestones
    #[serde(rename = "timeline_complexity")]
    pub timeline: f64,
    pub explanation: String,
    pub comparison: String,
}

impl ComplexityBreakdown {
    /// Mean of the four dimension scores.
    pub fn average(&self) -> f64 {
        (self.technical + self.financial + self.governance + self.timeline) / 4.0
    }
}

/// Result of the "analyze" variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: String,
    /// Numbered-point prose
    pub risk_assessment: String,
    /// Numbered-point prose
    pub recommendations: String,
    pub complexity_score: f64,
    pub complexity_breakdown: ComplexityBreakdown,
    pub estimated_impact: String,
}

/// Result of the "draft" variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftResult {
    pub title: String,
    pub summary: String,
    pub rationale: String,
    pub specifications: String,
}

impl DraftResult {
    /// Render the draft as the markdown body of a proposal submission.
    pub fn to_proposal_body(&self) -> String {
        format!(
            "{}\n\n**Rationale:**\n{}\n\n**Specifications:**\n{}",
            self.summary, self.rationale, self.specifications
        )
    }
}

/// Result of the "draft with committee" variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitteeSuggestion {
    #[serde(flatten)]
    pub draft: DraftResult,
    /// Committee id the model picked, verbatim (may not exist)
    pub suggested_committee_id: Option<String>,
    pub committee_reasoning: String,
    /// The caller-supplied committee matching `suggested_committee_id`
    pub committee: Option<Committee>,
}

/// Icon tag for a debate persona
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonaIcon {
    DollarSign,
    Shield,
    Users,
    #[default]
    Lightbulb,
}

impl PersonaIcon {
    pub const ALL: [PersonaIcon; 4] = [
        PersonaIcon::DollarSign,
        PersonaIcon::Shield,
        PersonaIcon::Users,
        PersonaIcon::Lightbulb,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PersonaIcon::DollarSign => "dollarsign",
            PersonaIcon::Shield => "shield",
            PersonaIcon::Users => "users",
            PersonaIcon::Lightbulb => "lightbulb",
        }
    }

    /// Lenient tag lookup: case-insensitive, whitespace ignored.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let key: String = tag
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        Self::ALL.into_iter().find(|icon| icon.as_str() == key)
    }
}

impl fmt::Display for PersonaIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One simulated DAO member in a debate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebatePersona {
    pub name: String,
    pub icon: PersonaIcon,
    pub core_argument: String,
    /// Never empty
    pub objections: Vec<String>,
    pub actionable_suggestion: String,
}

/// Result of the debate simulation variant; always exactly four personas
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateResult {
    pub personas: [DebatePersona; PERSONA_COUNT],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakdown_wire_names() {
        let breakdown = ComplexityBreakdown {
            technical: 6.0,
            financial: 4.0,
            governance: 7.0,
            timeline: 5.0,
            explanation: "e".into(),
            comparison: "c".into(),
        };
        let value = serde_json::to_value(&breakdown).unwrap();
        assert_eq!(value["technical_complexity"], 6.0);
        assert_eq!(value["timeline_complexity"], 5.0);
        assert_eq!(breakdown.average(), 5.5);
    }

    #[test]
    fn test_icon_tags() {
        assert_eq!(PersonaIcon::from_tag("DollarSign"), Some(PersonaIcon::DollarSign));
        assert_eq!(PersonaIcon::from_tag(" dollar sign "), Some(PersonaIcon::DollarSign));
        assert_eq!(PersonaIcon::from_tag("SHIELD"), Some(PersonaIcon::Shield));
        assert_eq!(PersonaIcon::from_tag("rocket"), None);
        assert_eq!(PersonaIcon::default(), PersonaIcon::ALL[3]);
        assert_eq!(
            serde_json::to_string(&PersonaIcon::DollarSign).unwrap(),
            "\"dollarsign\""
        );
    }

    #[test]
    fn test_draft_body_layout() {
        let draft = DraftResult {
            title: "T".into(),
            summary: "S".into(),
            rationale: "R".into(),
            specifications: "X".into(),
        };
        assert_eq!(
            draft.to_proposal_body(),
            "S\n\n**Rationale:**\nR\n\n**Specifications:**\nX"
        );
    }

    #[test]
    fn test_committee_suggestion_flattens_draft() {
        let suggestion = CommitteeSuggestion {
            draft: DraftResult {
                title: "T".into(),
                summary: "S".into(),
                rationale: "R".into(),
                specifications: "X".into(),
            },
            suggested_committee_id: Some("2".into()),
            committee_reasoning: "fits".into(),
            committee: None,
        };
        let value = serde_json::to_value(&suggestion).unwrap();
        assert_eq!(value["title"], "T");
        assert_eq!(value["suggested_committee_id"], "2");
        assert!(value["committee"].is_null());
    }
}
