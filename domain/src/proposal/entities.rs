//! Proposal record entity and its analysis state machine.
//!
//! ```text
//! submit ──► Pending ──► Analyzing ──┬──► Analyzed ──┐
//!                            ▲       └──► Failed ────┤
//!                            └───────────────────────┘  analyze / retry
//! ```
//!
//! Every transition returns a new record; the owning store swaps it in as
//! one replace. `id` and `submitted_at` never change after creation.

use super::submission::ProposalSubmission;
use crate::analysis::AnalysisResult;
use crate::core::proposal_id::ProposalId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Analysis status of a proposal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProposalStatus {
    Pending,
    Analyzing,
    Analyzed,
    Failed,
}

impl ProposalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalStatus::Pending => "Pending",
            ProposalStatus::Analyzing => "Analyzing",
            ProposalStatus::Analyzed => "Analyzed",
            ProposalStatus::Failed => "Failed",
        }
    }

    /// An analysis request is outstanding.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, ProposalStatus::Analyzing)
    }

    /// The last analysis attempt has finished (successfully or not).
    ///
    /// Neither state is final: both can be re-entered through analysis.
    pub fn is_settled(&self) -> bool {
        matches!(self, ProposalStatus::Analyzed | ProposalStatus::Failed)
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProposalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ProposalStatus::Pending),
            "analyzing" => Ok(ProposalStatus::Analyzing),
            "analyzed" => Ok(ProposalStatus::Analyzed),
            "failed" => Ok(ProposalStatus::Failed),
            _ => Err(format!("Unknown proposal status: {}", s)),
        }
    }
}

/// Rejected state transitions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Proposal {0} is already being analyzed")]
    AlreadyAnalyzing(ProposalId),

    #[error("Proposal {id} is not being analyzed (status: {status})")]
    NotAnalyzing { id: ProposalId, status: ProposalStatus },

    #[error("Stale analysis attempt {attempt} for proposal {id} (current attempt: {current})")]
    StaleAttempt {
        id: ProposalId,
        attempt: u64,
        current: u64,
    },
}

/// A proposal tracked by the analysis store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalRecord {
    pub id: ProposalId,
    pub title: String,
    pub description: String,
    pub status: ProposalStatus,
    /// Present only while `status` is `Analyzed`
    pub analysis: Option<AnalysisResult>,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Number of analysis dispatches; identifies the current attempt
    #[serde(default)]
    pub attempts: u64,
}

impl ProposalRecord {
    /// Create a fresh `Pending` record.
    pub fn new(id: ProposalId, submission: ProposalSubmission, now: DateTime<Utc>) -> Self {
        let (title, description) = submission.into_parts();
        Self {
            id,
            title,
            description,
            status: ProposalStatus::Pending,
            analysis: None,
            submitted_at: now,
            updated_at: now,
            attempts: 0,
        }
    }

    /// `Pending | Analyzed | Failed → Analyzing`, opening a new attempt.
    ///
    /// Any previous analysis is dropped so that `analysis` stays tied to the
    /// `Analyzed` state.
    pub fn start_analysis(&self, now: DateTime<Utc>) -> Result<Self, TransitionError> {
        if self.status.is_in_flight() {
            return Err(TransitionError::AlreadyAnalyzing(self.id.clone()));
        }
        Ok(Self {
            status: ProposalStatus::Analyzing,
            analysis: None,
            updated_at: now,
            attempts: self.attempts + 1,
            ..self.clone()
        })
    }

    /// `Analyzing → Analyzed` for the given attempt.
    pub fn complete(
        &self,
        attempt: u64,
        analysis: AnalysisResult,
        now: DateTime<Utc>,
    ) -> Result<Self, TransitionError> {
        self.check_attempt(attempt)?;
        Ok(Self {
            status: ProposalStatus::Analyzed,
            analysis: Some(analysis),
            updated_at: now,
            ..self.clone()
        })
    }

    /// `Analyzing → Failed` for the given attempt.
    pub fn fail(&self, attempt: u64, now: DateTime<Utc>) -> Result<Self, TransitionError> {
        self.check_attempt(attempt)?;
        Ok(Self {
            status: ProposalStatus::Failed,
            analysis: None,
            updated_at: now,
            ..self.clone()
        })
    }

    fn check_attempt(&self, attempt: u64) -> Result<(), TransitionError> {
        if !self.status.is_in_flight() {
            return Err(TransitionError::NotAnalyzing {
                id: self.id.clone(),
                status: self.status,
            });
        }
        if attempt != self.attempts {
            return Err(TransitionError::StaleAttempt {
                id: self.id.clone(),
                attempt,
                current: self.attempts,
            });
        }
        Ok(())
    }
}
