//! Domain layer for govmind
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Variants
//!
//! Every AI interaction is one of four [`Variant`]s (analyze, draft, draft
//! with committee, debate). A variant fixes the prompt template, the result
//! schema and the [`DecodingProfile`] sent to the model.
//!
//! ## Pipeline
//!
//! - **Prompt Builder** ([`prompt`]): deterministic prompt text per variant
//! - **Response Normalizer** ([`normalize`]): raw model text to fully
//!   populated result values, clamping scores and filling defaults
//!
//! ## Proposal lifecycle
//!
//! A [`ProposalRecord`] moves `Pending → Analyzing → Analyzed | Failed`.
//! Both settled states can be re-entered; the `attempts` counter identifies
//! the in-flight analysis so late completions can be discarded.

pub mod analysis;
pub mod config;
pub mod core;
pub mod normalize;
pub mod prompt;
pub mod proposal;
pub mod variant;

// Re-export commonly used types
pub use analysis::{
    AnalysisResult, CommitteeSuggestion, ComplexityBreakdown, DebatePersona, DebateResult,
    DraftResult, PERSONA_COUNT, PersonaIcon,
};
pub use config::OutputFormat;
pub use core::{error::DomainError, proposal_id::ProposalId};
pub use normalize::{NormalizeContext, NormalizedResult, ParseError, normalize};
pub use prompt::{Prompt, PromptInputs, PromptTemplate, build_prompt};
pub use proposal::{
    Committee, ProposalRecord, ProposalStatus, ProposalSubmission, TransitionError,
};
pub use variant::{DecodingProfile, Variant};
