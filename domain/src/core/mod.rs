//! Core domain concepts shared across all subdomains.
//!
//! - [`proposal_id::ProposalId`]: opaque composite proposal identifier
//! - [`error::DomainError`]: input validation errors

pub mod error;
pub mod proposal_id;
pub mod string;
