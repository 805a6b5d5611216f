//! Response normalizer
//!
//! Turns raw model text into fully populated result values. All four
//! variants share one JSON extraction step and then project the parsed
//! object through a total, variant-specific mapper.
//!
//! | Step | Behaviour |
//! |------|-----------|
//! | Extract | trim, strip code fence, slice `{` .. `}`, parse |
//! | Scores | clamp to 1-10 when finite, otherwise 5.0 |
//! | Text | arrays joined with spaces, blanks replaced by defaults |
//! | Debate | exactly four personas |
//!
//! The only failure is [`ParseError`], when no JSON object can be found.

mod coerce;
mod extract;
pub mod mappers;

pub use coerce::NEUTRAL_SCORE;
pub use extract::{ParseError, extract_json_object};

use crate::analysis::{AnalysisResult, CommitteeSuggestion, DebateResult, DraftResult};
use crate::proposal::Committee;
use crate::variant::Variant;
use serde::Serialize;

/// Caller-supplied data some variants resolve against
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizeContext<'a> {
    pub committees: &'a [Committee],
}

impl<'a> NormalizeContext<'a> {
    pub fn with_committees(committees: &'a [Committee]) -> Self {
        Self { committees }
    }
}

/// A normalized model response, one shape per variant
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NormalizedResult {
    Analysis(AnalysisResult),
    Draft(DraftResult),
    CommitteeSuggestion(CommitteeSuggestion),
    Debate(DebateResult),
}

impl NormalizedResult {
    pub fn variant(&self) -> Variant {
        match self {
            NormalizedResult::Analysis(_) => Variant::Analyze,
            NormalizedResult::Draft(_) => Variant::Draft,
            NormalizedResult::CommitteeSuggestion(_) => Variant::DraftWithCommittee,
            NormalizedResult::Debate(_) => Variant::Debate,
        }
    }
}

/// Normalize raw model output for the given variant.
pub fn normalize(
    variant: Variant,
    raw: &str,
    ctx: &NormalizeContext<'_>,
) -> Result<NormalizedResult, ParseError> {
    let map = extract_json_object(raw)?;
    Ok(match variant {
        Variant::Analyze => NormalizedResult::Analysis(mappers::analysis(&map)),
        Variant::Draft => NormalizedResult::Draft(mappers::draft(&map)),
        Variant::DraftWithCommittee => NormalizedResult::CommitteeSuggestion(
            mappers::committee_suggestion(&map, ctx.committees),
        ),
        Variant::Debate => NormalizedResult::Debate(mappers::debate(&map)),
    })
}

/// Normalize an "analyze" response.
pub fn normalize_analysis(raw: &str) -> Result<AnalysisResult, ParseError> {
    Ok(mappers::analysis(&extract_json_object(raw)?))
}

/// Normalize a "draft" response.
pub fn normalize_draft(raw: &str) -> Result<DraftResult, ParseError> {
    Ok(mappers::draft(&extract_json_object(raw)?))
}

/// Normalize a "draft with committee" response.
pub fn normalize_committee_suggestion(
    raw: &str,
    committees: &[Committee],
) -> Result<CommitteeSuggestion, ParseError> {
    Ok(mappers::committee_suggestion(
        &extract_json_object(raw)?,
        committees,
    ))
}

/// Normalize a "debate" response.
pub fn normalize_debate(raw: &str) -> Result<DebateResult, ParseError> {
    Ok(mappers::debate(&extract_json_object(raw)?))
}
