//! Proposal identifier value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Prefix used for ids generated without a DAO context
const LOCAL_PREFIX: &str = "local";

/// Globally unique proposal identifier (Value Object)
///
/// Usually a composite of the DAO identifier and the DAO-local proposal
/// number (`<dao-id>-<local-proposal-id>`), which keeps proposals from
/// different DAOs apart inside one analysis store. Callers must treat the
/// value as opaque: it is never split back into its parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProposalId(String);

impl ProposalId {
    /// Wrap an existing identifier.
    ///
    /// Surrounding whitespace is trimmed; an empty result is rejected.
    pub fn new(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidProposalId(raw));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Build the composite `<dao-id>-<local-proposal-id>` identifier.
    pub fn composite(dao_id: &str, local_id: impl fmt::Display) -> Result<Self, DomainError> {
        let dao_id = dao_id.trim();
        let local_id = local_id.to_string();
        let local_id = local_id.trim();
        if dao_id.is_empty() || local_id.is_empty() {
            return Err(DomainError::InvalidProposalId(format!(
                "{}-{}",
                dao_id, local_id
            )));
        }
        Ok(Self(format!("{}-{}", dao_id, local_id)))
    }

    /// Generate a fresh identifier for proposals submitted without one.
    pub fn generate() -> Self {
        Self(format!("{}-{}", LOCAL_PREFIX, uuid::Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProposalId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ProposalId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProposalId> for String {
    fn from(id: ProposalId) -> Self {
        id.0
    }
}
