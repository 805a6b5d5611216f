//! Prompt domain
//!
//! Deterministic prompt construction for every variant. No I/O.

mod template;

pub use template::{DEBATE_ROSTER, NO_RESPONSIBILITIES, PromptInputs, PromptTemplate};

use crate::variant::Variant;

/// A fully built prompt, ready for the model gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub variant: Variant,
    pub system: &'static str,
    pub user: String,
}

/// Build the prompt for the given inputs.
pub fn build_prompt(inputs: &PromptInputs<'_>) -> Prompt {
    PromptTemplate::build(inputs)
}
