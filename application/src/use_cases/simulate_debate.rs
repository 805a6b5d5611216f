//! Simulate Debate use case
//!
//! Runs a four-persona governance debate about a proposal before it is
//! submitted.

use crate::config::VariantProfiles;
use crate::ports::analysis_events::{AnalysisEventLogger, NoEventLogger};
use crate::ports::model_gateway::ModelGateway;
use crate::ports::progress::{AnalysisProgressNotifier, NoProgress};
use crate::use_cases::draft_proposal::{AssistError, log_assist};
use crate::use_cases::shared::request_completion;
use govmind_domain::core::string::has_content;
use govmind_domain::normalize::normalize_debate;
use govmind_domain::{DebateResult, DomainError, PromptInputs, Variant};
use std::sync::Arc;

/// Use case for simulating a debate
pub struct SimulateDebateUseCase<G: ModelGateway + 'static> {
    gateway: Arc<G>,
    profiles: VariantProfiles,
    events: Arc<dyn AnalysisEventLogger>,
    progress: Arc<dyn AnalysisProgressNotifier>,
}

impl<G: ModelGateway + 'static> SimulateDebateUseCase<G> {
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

    pub async fn execute(&self, title: &str, content: &str) -> Result<DebateResult, AssistError> {
        let result = self.execute_inner(title, content).await;
        log_assist(self.events.as_ref(), Variant::Debate, &result);
        result
    }

    async fn execute_inner(&self, title: &str, content: &str) -> Result<DebateResult, AssistError> {
        if !has_content(title) {
            return Err(DomainError::EmptyTitle.into());
        }
        if !has_content(content) {
            return Err(DomainError::EmptyContent.into());
        }

        let raw = request_completion(
            self.gateway.as_ref(),
            &self.profiles,
            &PromptInputs::Debate {
                title: title.trim(),
                content: content.trim(),
            },
            self.progress.as_ref(),
        )
        .await?;

        Ok(normalize_debate(&raw)?)
    }
}
