//! Proposal copilot facade
//!
//! The caller-facing entry points. Analysis goes through the lifecycle
//! store and is observed by polling; drafting and debate return their
//! results directly.

use crate::config::VariantProfiles;
use crate::ports::analysis_events::{AnalysisEventLogger, NoEventLogger};
use crate::ports::model_gateway::ModelGateway;
use crate::ports::progress::{AnalysisProgressNotifier, AnalysisTrigger, NoProgress};
use crate::ports::proposal_repository::ProposalRepository;
use crate::use_cases::analysis_store::{Dispatch, LookupError, ProposalAnalysisStore, StoreError};
use crate::use_cases::draft_proposal::{AssistError, DraftProposalUseCase};
use crate::use_cases::simulate_debate::SimulateDebateUseCase;
use govmind_domain::{
    AnalysisResult, Committee, CommitteeSuggestion, DebateResult, DraftResult, ProposalId,
    ProposalRecord, ProposalStatus, ProposalSubmission,
};
use std::sync::Arc;
use tracing::debug;

pub struct ProposalCopilot<G: ModelGateway + 'static, R: ProposalRepository + 'static> {
    store: ProposalAnalysisStore<G, R>,
    drafting: DraftProposalUseCase<G>,
    debate: SimulateDebateUseCase<G>,
}

impl<G: ModelGateway + 'static, R: ProposalRepository + 'static> ProposalCopilot<G, R> {
    pub fn new(gateway: Arc<G>, repository: Arc<R>) -> Self {
        Self::with_components(
            gateway,
            repository,
            VariantProfiles::default(),
            Arc::new(NoEventLogger),
            Arc::new(NoProgress),
        )
    }

    /// Wire every use case with the same profiles, event log and progress sink.
    pub fn with_components(
        gateway: Arc<G>,
        repository: Arc<R>,
        profiles: VariantProfiles,
        events: Arc<dyn AnalysisEventLogger>,
        progress: Arc<dyn AnalysisProgressNotifier>,
    ) -> Self {
        let store = ProposalAnalysisStore::new(Arc::clone(&gateway), repository)
            .with_profiles(profiles.clone())
            .with_event_logger(Arc::clone(&events))
            .with_progress(Arc::clone(&progress));
        let drafting = DraftProposalUseCase::new(Arc::clone(&gateway))
            .with_profiles(profiles.clone())
            .with_event_logger(Arc::clone(&events))
            .with_progress(Arc::clone(&progress));
        let debate = SimulateDebateUseCase::new(gateway)
            .with_profiles(profiles)
            .with_event_logger(events)
            .with_progress(progress);

        Self {
            store,
            drafting,
            debate,
        }
    }

    pub fn store(&self) -> &ProposalAnalysisStore<G, R> {
        &self.store
    }

    // ==================== Analysis ====================

    /// Submit a proposal and dispatch its analysis in the background.
    ///
    /// Validation happens before any record is touched. For an id that
    /// already exists the stored title and description win; analysis is
    /// dispatched unless the record is already `Analyzed`.
    pub async fn submit_and_analyze(
        &self,
        title: &str,
        description: &str,
        id: Option<ProposalId>,
    ) -> Result<ProposalId, StoreError> {
        let submission = ProposalSubmission::try_new(title, description)?;
        let submitted = self.store.submit(id, submission).await?;

        if !submitted.created
            && self.store.status(&submitted.id).await? == Some(ProposalStatus::Analyzed)
        {
            debug!(proposal_id = %submitted.id, "Already analyzed; not dispatching");
            return Ok(submitted.id);
        }

        self.store
            .analyze_in_background(&submitted.id, AnalysisTrigger::Initial)
            .await?;
        Ok(submitted.id)
    }

    /// Dispatch a fresh analysis attempt in the background.
    pub async fn retry(&self, id: &ProposalId) -> Result<Dispatch, StoreError> {
        self.store
            .analyze_in_background(id, AnalysisTrigger::Retry)
            .await
    }

    pub async fn get_analysis(&self, id: &ProposalId) -> Result<AnalysisResult, LookupError> {
        self.store.get_analysis(id).await
    }

    pub async fn status(&self, id: &ProposalId) -> Result<Option<ProposalRecord>, StoreError> {
        self.store.get(id).await
    }

    pub async fn list(&self) -> Result<Vec<ProposalRecord>, StoreError> {
        self.store.list().await
    }

    // ==================== Assist ====================

    pub async fn draft_proposal(&self, idea: &str) -> Result<DraftResult, AssistError> {
        self.drafting.draft(idea).await
    }

    pub async fn draft_proposal_with_committees(
        &self,
        idea: &str,
        committees: &[Committee],
    ) -> Result<CommitteeSuggestion, AssistError> {
        self.drafting.draft_with_committees(idea, committees).await
    }

    pub async fn run_debate_simulation(
        &self,
        title: &str,
        content: &str,
    ) -> Result<DebateResult, AssistError> {
        self.debate.execute(title, content).await
    }
}
