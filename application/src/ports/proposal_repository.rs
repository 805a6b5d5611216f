//! Proposal repository port
//!
//! The backing map behind the analysis store. Implementations only need
//! atomic single-record operations: the store serializes transitions per id.

use async_trait::async_trait;
use govmind_domain::{ProposalId, ProposalRecord};
use thiserror::Error;

/// Errors raised by a repository implementation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Storage I/O error: {0}")]
    Io(String),

    #[error("Corrupt proposal store: {0}")]
    Corrupt(String),
}

#[async_trait]
pub trait ProposalRepository: Send + Sync {
    /// Snapshot of one record.
    async fn get(&self, id: &ProposalId) -> Result<Option<ProposalRecord>, RepositoryError>;

    /// Insert the record unless its id is taken. Returns `true` if inserted.
    async fn insert_if_absent(&self, record: ProposalRecord) -> Result<bool, RepositoryError>;

    /// Replace the record with the same id as one atomic write.
    async fn replace(&self, record: ProposalRecord) -> Result<(), RepositoryError>;

    /// Snapshot of every record, in no particular order.
    async fn list(&self) -> Result<Vec<ProposalRecord>, RepositoryError>;
}
