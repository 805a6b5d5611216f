//! Request/response variants and their decoding profiles.
//!
//! Each variant pairs a prompt template with a normalization schema and a
//! fixed decoding configuration. Classification-like variants run cooler;
//! the debate simulation gets the largest token budget.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// The four supported AI request/response shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Structured analysis of a submitted proposal
    Analyze,
    /// Proposal draft from a one-line idea
    Draft,
    /// Proposal draft plus a committee routing suggestion
    DraftWithCommittee,
    /// Four-persona debate about a proposal
    Debate,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::Analyze,
        Variant::Draft,
        Variant::DraftWithCommittee,
        Variant::Debate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Analyze => "analyze",
            Variant::Draft => "draft",
            Variant::DraftWithCommittee => "draft_with_committee",
            Variant::Debate => "debate",
        }
    }

    /// Built-in decoding configuration for this variant.
    pub fn default_profile(&self) -> DecodingProfile {
        match self {
            Variant::Analyze => DecodingProfile::new(0.3, 2000, 60),
            Variant::Draft => DecodingProfile::new(0.7, 1500, 60),
            Variant::DraftWithCommittee => DecodingProfile::new(0.4, 1800, 60),
            Variant::Debate => DecodingProfile::new(0.8, 3500, 120),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "analyze" | "analysis" => Ok(Variant::Analyze),
            "draft" => Ok(Variant::Draft),
            "draft_with_committee" | "committee" => Ok(Variant::DraftWithCommittee),
            "debate" => Ok(Variant::Debate),
            _ => Err(format!("Unknown variant: {}", s)),
        }
    }
}

/// Decoding configuration sent with every completion request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecodingProfile {
    pub temperature: f64,
    pub max_tokens: u32,
    /// Upper bound on one gateway call
    pub timeout_seconds: u64,
}

impl DecodingProfile {
    pub fn new(temperature: f64, max_tokens: u32, timeout_seconds: u64) -> Self {
        Self {
            temperature,
            max_tokens,
            timeout_seconds,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
