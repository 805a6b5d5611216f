//! Domain error types

use thiserror::Error;

/// Domain-level validation errors
///
/// These are raised before any state transition happens, so they are never
/// recoverable by retrying: the caller must fix the input first.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Proposal title cannot be empty")]
    EmptyTitle,

    #[error("Proposal description cannot be empty")]
    EmptyDescription,

    #[error("Proposal idea cannot be empty")]
    EmptyIdea,

    #[error("Proposal content cannot be empty")]
    EmptyContent,

    #[error("Invalid proposal id: {0}")]
    InvalidProposalId(String),
}

impl DomainError {
    /// Validation errors are never fixed by retrying the same input.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
