//! Proposal domain
//!
//! Records tracked by the analysis store, their lifecycle state machine and
//! the committee reference data used when drafting.

pub mod committee;
pub mod entities;
pub mod submission;

pub use committee::Committee;
pub use entities::{ProposalRecord, ProposalStatus, TransitionError};
pub use submission::ProposalSubmission;
