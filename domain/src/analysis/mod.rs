//! Analysis result domain
//!
//! Value objects produced by the response normalizer for each variant.

pub mod value_objects;

pub use value_objects::{
    AnalysisResult, CommitteeSuggestion, ComplexityBreakdown, DebatePersona, DebateResult,
    DraftResult, PERSONA_COUNT, PersonaIcon, SCORE_MAX, SCORE_MIN,
};
