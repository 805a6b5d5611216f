//! Draft Proposal use case
//!
//! Turns a one-line idea into a full proposal draft, optionally routed to
//! one of the caller's committees. Stateless: nothing is stored.

use crate::config::VariantProfiles;
use crate::ports::analysis_events::{AnalysisEvent, AnalysisEventLogger, NoEventLogger};
use crate::ports::model_gateway::{GatewayError, ModelGateway};
use crate::ports::progress::{AnalysisProgressNotifier, NoProgress};
use crate::use_cases::shared::request_completion;
use govmind_domain::core::string::has_content;
use govmind_domain::normalize::{normalize_committee_suggestion, normalize_draft};
use govmind_domain::{
    Committee, CommitteeSuggestion, DomainError, DraftResult, ParseError, PromptInputs, Variant,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors from the stateless assist entry points (draft and debate)
#[derive(Error, Debug)]
pub enum AssistError {
    #[error("Invalid input: {0}")]
    Validation(#[from] DomainError),

    #[error("Model request failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl AssistError {
    /// Gateway and parse failures belong to one completion; validation
    /// failures need different input.
    pub fn is_retryable(&self) -> bool {
        match self {
            AssistError::Validation(_) => false,
            AssistError::Gateway(e) => e.is_retryable(),
            AssistError::Parse(e) => e.is_retryable(),
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            AssistError::Validation(_) => "validation",
            AssistError::Gateway(e) => e.kind(),
            AssistError::Parse(_) => "parse",
        }
    }
}

/// Record an assist request's outcome in the event log.
pub(crate) fn log_assist<T>(
    events: &dyn AnalysisEventLogger,
    variant: Variant,
    result: &Result<T, AssistError>,
) {
    match result {
        Ok(_) => {
            info!(variant = %variant, "Assist request completed");
            events.log(AnalysisEvent::new(
                "assist_completed",
                json!({ "variant": variant.as_str() }),
            ));
        }
        Err(e) => {
            warn!(variant = %variant, error = %e, "Assist request failed");
            events.log(AnalysisEvent::new(
                "assist_failed",
                json!({
                    "variant": variant.as_str(),
                    "kind": e.kind(),
                    "error": e.to_string(),
                }),
            ));
        }
    }
}

/// Use case for drafting proposals from ideas
pub struct DraftProposalUseCase<G: ModelGateway + 'static> {
    gateway: Arc<G>,
    profiles: VariantProfiles,
    events: Arc<dyn AnalysisEventLogger>,
    progress: Arc<dyn AnalysisProgressNotifier>,
}

impl<G: ModelGateway + 'static> DraftProposalUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            profiles: VariantProfiles::default(),
            events: Arc::new(NoEventLogger),
            progress: Arc::new(NoProgress),
        }
    }

    pub fn with_profiles(mut self, profiles: VariantProfiles) -> Self {
        self.profiles = profiles;
        self
    }

    pub fn with_event_logger(mut self, events: Arc<dyn AnalysisEventLogger>) -> Self {
        self.events = events;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn AnalysisProgressNotifier>) -> Self {
        self.progress = progress;
        self
    }

    /// Draft a proposal from an idea.
    pub async fn draft(&self, idea: &str) -> Result<DraftResult, AssistError> {
        let result = self.draft_inner(idea).await;
        log_assist(self.events.as_ref(), Variant::Draft, &result);
        result
    }

    /// Draft a proposal and suggest which committee should review it.
    pub async fn draft_with_committees(
        &self,
        idea: &str,
        committees: &[Committee],
    ) -> Result<CommitteeSuggestion, AssistError> {
        let result = self.draft_with_committees_inner(idea, committees).await;
        log_assist(self.events.as_ref(), Variant::DraftWithCommittee, &result);
        result
    }

    async fn draft_inner(&self, idea: &str) -> Result<DraftResult, AssistError> {
        if !has_content(idea) {
            return Err(DomainError::EmptyIdea.into());
        }

        let raw = request_completion(
            self.gateway.as_ref(),
            &self.profiles,
            &PromptInputs::Draft { idea: idea.trim() },
            self.progress.as_ref(),
        )
        .await?;

        Ok(normalize_draft(&raw)?)
    }

    async fn draft_with_committees_inner(
        &self,
        idea: &str,
        committees: &[Committee],
    ) -> Result<CommitteeSuggestion, AssistError> {
        if !has_content(idea) {
            return Err(DomainError::EmptyIdea.into());
        }

        let raw = request_completion(
            self.gateway.as_ref(),
            &self.profiles,
            &PromptInputs::DraftWithCommittee {
                idea: idea.trim(),
                committees,
            },
            self.progress.as_ref(),
        )
        .await?;

        let suggestion = normalize_committee_suggestion(&raw, committees)?;
        if suggestion.suggested_committee_id.is_some() && suggestion.committee.is_none() {
            warn!(
                committee_id = ?suggestion.suggested_committee_id,
                "Model suggested a committee that is not in the provided list"
            );
        }
        Ok(suggestion)
    }
}
