//! Analysis lifecycle store
//!
//! Owns every [`ProposalRecord`] and drives its status machine. All
//! transitions for one id are serialized by a per-id async mutex; the model
//! call itself runs outside that lock. Each dispatch bumps the record's
//! `attempts` counter, and a result is only written back while that counter
//! still matches, so an abandoned call can never overwrite a newer state.

use crate::config::VariantProfiles;
use crate::ports::analysis_events::{AnalysisEvent, AnalysisEventLogger, NoEventLogger};
use crate::ports::model_gateway::ModelGateway;
use crate::ports::progress::{AnalysisProgressNotifier, AnalysisTrigger, NoProgress};
use crate::ports::proposal_repository::{ProposalRepository, RepositoryError};
use crate::use_cases::shared::request_completion;
use chrono::Utc;
use govmind_domain::core::string::truncate;
use govmind_domain::normalize::normalize_analysis;
use govmind_domain::{
    AnalysisResult, DomainError, PromptInputs, ProposalId, ProposalRecord, ProposalStatus,
    ProposalSubmission,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Maximum raw-response excerpt kept in failure events
const RAW_EXCERPT_LEN: usize = 500;

/// Errors from store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Proposal not found: {0}")]
    NotFound(ProposalId),

    #[error("Invalid input: {0}")]
    Validation(#[from] DomainError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Errors from [`ProposalAnalysisStore::get_analysis`]
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Proposal not found: {0}")]
    NotFound(ProposalId),

    #[error("Proposal {id} has no analysis yet (status: {status})")]
    NotAnalyzed {
        id: ProposalId,
        status: ProposalStatus,
    },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Result of a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitted {
    pub id: ProposalId,
    /// `false` when the id already existed and the call was a no-op
    pub created: bool,
}

/// Result of an awaited analysis
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyzeOutcome {
    Analyzed(AnalysisResult),
    /// The attempt failed; details went to the logs only
    Failed,
    /// Another analysis was already in flight; no model call was made
    AlreadyAnalyzing,
    /// The record moved on to a newer attempt; this result was discarded
    Superseded,
}

/// Result of a background dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Started { attempt: u64 },
    AlreadyAnalyzing,
}

/// A record claimed for analysis (status already `Analyzing`)
struct Claim {
    record: ProposalRecord,
    trigger: AnalysisTrigger,
}

/// Why an attempt failed
struct FailureDetail {
    kind: &'static str,
    message: String,
    raw_excerpt: Option<String>,
}

/// The analysis lifecycle store
///
/// Cheap to clone; clones share the repository and the lock table.
pub struct ProposalAnalysisStore<G: ModelGateway + 'static, R: ProposalRepository + 'static> {
    gateway: Arc<G>,
    repository: Arc<R>,
    profiles: VariantProfiles,
    events: Arc<dyn AnalysisEventLogger>,
    progress: Arc<dyn AnalysisProgressNotifier>,
    locks: Arc<Mutex<HashMap<ProposalId, Arc<Mutex<()>>>>>,
}

impl<G: ModelGateway + 'static, R: ProposalRepository + 'static> Clone
    for ProposalAnalysisStore<G, R>
{
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            repository: Arc::clone(&self.repository),
            profiles: self.profiles.clone(),
            events: Arc::clone(&self.events),
            progress: Arc::clone(&self.progress),
            locks: Arc::clone(&self.locks),
        }
    }
}

impl<G: ModelGateway + 'static, R: ProposalRepository + 'static> ProposalAnalysisStore<G, R> {
    pub fn new(gateway: Arc<G>, repository: Arc<R>) -> Self {
        Self {
            gateway,
            repository,
            profiles: VariantProfiles::default(),
            events: Arc::new(NoEventLogger),
            progress: Arc::new(NoProgress),
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    // ==================== Builder Methods ====================

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

    // ==================== Writes ====================

    /// Create a `Pending` record unless the id already exists.
    ///
    /// An existing record is never overwritten. Without an id, a fresh
    /// opaque `local-<uuid>` id is generated.
    pub async fn submit(
        &self,
        id: Option<ProposalId>,
        submission: ProposalSubmission,
    ) -> Result<Submitted, StoreError> {
        let id = id.unwrap_or_else(ProposalId::generate);
        let record = ProposalRecord::new(id.clone(), submission, Utc::now());
        let created = self.repository.insert_if_absent(record).await?;

        if created {
            info!(proposal_id = %id, "Proposal submitted");
            self.events.log(AnalysisEvent::new(
                "proposal_submitted",
                json!({ "proposal_id": id.as_str() }),
            ));
        } else {
            debug!(proposal_id = %id, "Proposal already exists; submission ignored");
        }

        Ok(Submitted { id, created })
    }

    /// Analyze the record and wait for the attempt to settle.
    pub async fn analyze(&self, id: &ProposalId) -> Result<AnalyzeOutcome, StoreError> {
        self.run(id, AnalysisTrigger::Initial).await
    }

    /// Same state machine as [`analyze`](Self::analyze), labelled as a retry.
    ///
    /// Allowed from `Pending`, `Failed` and `Analyzed` (forcing a fresh
    /// analysis); coalesced while `Analyzing`.
    pub async fn retry(&self, id: &ProposalId) -> Result<AnalyzeOutcome, StoreError> {
        self.run(id, AnalysisTrigger::Retry).await
    }

    /// Claim the record now and run the model call on a spawned task.
    ///
    /// When this returns `Dispatch::Started`, the record is already
    /// `Analyzing`, so an immediate second call is coalesced.
    pub async fn analyze_in_background(
        &self,
        id: &ProposalId,
        trigger: AnalysisTrigger,
    ) -> Result<Dispatch, StoreError> {
        let Some(claim) = self.claim(id, trigger).await? else {
            return Ok(Dispatch::AlreadyAnalyzing);
        };

        let attempt = claim.record.attempts;
        let store = self.clone();
        tokio::spawn(async move {
            let id = claim.record.id.clone();
            if let Err(e) = store.execute(claim).await {
                warn!(proposal_id = %id, attempt, error = %e, "Failed to record analysis outcome");
            }
        });

        Ok(Dispatch::Started { attempt })
    }

    /// Move records stuck in `Analyzing` for longer than `max_age` to `Failed`.
    ///
    /// A record can only be stuck when the process that claimed it died
    /// mid-call. Returns the ids that were recovered.
    pub async fn recover_interrupted(
        &self,
        max_age: Duration,
    ) -> Result<Vec<ProposalId>, StoreError> {
        let mut recovered = Vec::new();

        for snapshot in self.repository.list().await? {
            if !snapshot.status.is_in_flight() {
                continue;
            }

            let lock = self.lock_for(&snapshot.id).await;
            let result = {
                let _guard = lock.lock().await;
                self.recover_locked(&snapshot.id, max_age).await
            };
            self.release_lock(&snapshot.id, lock).await;

            if let Some(id) = result? {
                recovered.push(id);
            }
        }

        Ok(recovered)
    }

    // ==================== Reads ====================

    pub async fn get(&self, id: &ProposalId) -> Result<Option<ProposalRecord>, StoreError> {
        Ok(self.repository.get(id).await?)
    }

    pub async fn status(&self, id: &ProposalId) -> Result<Option<ProposalStatus>, StoreError> {
        Ok(self.repository.get(id).await?.map(|r| r.status))
    }

    /// Every record, newest submission first.
    pub async fn list(&self) -> Result<Vec<ProposalRecord>, StoreError> {
        let mut records = self.repository.list().await?;
        records.sort_by(|a, b| {
            b.submitted_at
                .cmp(&a.submitted_at)
                .then_with(|| a.id.as_str().cmp(b.id.as_str()))
        });
        Ok(records)
    }

    /// The analysis of an `Analyzed` record.
    pub async fn get_analysis(&self, id: &ProposalId) -> Result<AnalysisResult, LookupError> {
        let record = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| LookupError::NotFound(id.clone()))?;

        match (record.status, record.analysis) {
            (ProposalStatus::Analyzed, Some(analysis)) => Ok(analysis),
            (status, _) => Err(LookupError::NotAnalyzed {
                id: record.id,
                status,
            }),
        }
    }

    // ==================== Internals ====================

    async fn run(
        &self,
        id: &ProposalId,
        trigger: AnalysisTrigger,
    ) -> Result<AnalyzeOutcome, StoreError> {
        match self.claim(id, trigger).await? {
            Some(claim) => self.execute(claim).await,
            None => Ok(AnalyzeOutcome::AlreadyAnalyzing),
        }
    }

    async fn lock_for(&self, id: &ProposalId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        Arc::clone(locks.entry(id.clone()).or_default())
    }

    /// Drop our handle on the id lock and prune the entry once unused.
    ///
    /// Handles are only cloned out of the table while it is locked, so a
    /// count of one here means no task holds or awaits this lock.
    async fn release_lock(&self, id: &ProposalId, lock: Arc<Mutex<()>>) {
        drop(lock);
        let mut locks = self.locks.lock().await;
        if locks
            .get(id)
            .is_some_and(|entry| Arc::strong_count(entry) == 1)
        {
            locks.remove(id);
        }
    }

    /// `Analyzing → Failed` for one stale record. Caller holds the id lock.
    async fn recover_locked(
        &self,
        id: &ProposalId,
        max_age: Duration,
    ) -> Result<Option<ProposalId>, StoreError> {
        let Some(current) = self.repository.get(id).await? else {
            return Ok(None);
        };
        let now = Utc::now();
        let age = (now - current.updated_at).to_std().unwrap_or_default();
        if !current.status.is_in_flight() || age < max_age {
            return Ok(None);
        }

        let Ok(failed) = current.fail(current.attempts, now) else {
            return Ok(None);
        };
        self.repository.replace(failed).await?;

        warn!(
            proposal_id = %current.id,
            attempt = current.attempts,
            age_secs = age.as_secs(),
            "Recovered interrupted analysis"
        );
        self.events.log(AnalysisEvent::new(
            "analysis_interrupted",
            json!({
                "proposal_id": current.id.as_str(),
                "attempt": current.attempts,
                "age_secs": age.as_secs(),
            }),
        ));
        Ok(Some(current.id))
    }

    /// `* → Analyzing` under the id lock. `None` when already in flight.
    async fn claim(
        &self,
        id: &ProposalId,
        trigger: AnalysisTrigger,
    ) -> Result<Option<Claim>, StoreError> {
        let lock = self.lock_for(id).await;
        let result = {
            let _guard = lock.lock().await;
            self.claim_locked(id, trigger).await
        };
        self.release_lock(id, lock).await;
        result
    }

    async fn claim_locked(
        &self,
        id: &ProposalId,
        trigger: AnalysisTrigger,
    ) -> Result<Option<Claim>, StoreError> {
        let current = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        let analyzing = match current.start_analysis(Utc::now()) {
            Ok(record) => record,
            Err(e) => {
                info!(proposal_id = %id, trigger = %trigger, reason = %e, "Analysis request coalesced");
                self.events.log(AnalysisEvent::new(
                    "analysis_coalesced",
                    json!({
                        "proposal_id": id.as_str(),
                        "attempt": current.attempts,
                        "trigger": trigger.as_str(),
                    }),
                ));
                return Ok(None);
            }
        };

        self.repository.replace(analyzing.clone()).await?;

        info!(proposal_id = %id, attempt = analyzing.attempts, trigger = %trigger, "Analysis started");
        self.events.log(AnalysisEvent::new(
            "analysis_started",
            json!({
                "proposal_id": id.as_str(),
                "attempt": analyzing.attempts,
                "trigger": trigger.as_str(),
            }),
        ));
        self.progress.on_analysis_start(id, trigger);

        Ok(Some(Claim {
            record: analyzing,
            trigger,
        }))
    }

    /// Builder → gateway → normalizer, then settle. Runs without the id lock.
    async fn execute(&self, claim: Claim) -> Result<AnalyzeOutcome, StoreError> {
        let Claim { record, trigger } = claim;
        let inputs = PromptInputs::Analyze {
            title: &record.title,
            description: &record.description,
        };

        let outcome = match request_completion(
            self.gateway.as_ref(),
            &self.profiles,
            &inputs,
            self.progress.as_ref(),
        )
        .await
        {
            Ok(raw) => normalize_analysis(&raw).map_err(|e| FailureDetail {
                kind: "parse",
                message: e.to_string(),
                raw_excerpt: Some(truncate(&e.raw, RAW_EXCERPT_LEN)),
            }),
            Err(e) => Err(FailureDetail {
                kind: e.kind(),
                message: e.to_string(),
                raw_excerpt: None,
            }),
        };

        debug!(proposal_id = %record.id, trigger = %trigger, success = outcome.is_ok(), "Model call settled");
        self.settle(&record.id, record.attempts, outcome).await
    }

    /// `Analyzing → Analyzed | Failed` under the id lock, if `attempt` is current.
    async fn settle(
        &self,
        id: &ProposalId,
        attempt: u64,
        outcome: Result<AnalysisResult, FailureDetail>,
    ) -> Result<AnalyzeOutcome, StoreError> {
        let lock = self.lock_for(id).await;
        let result = {
            let _guard = lock.lock().await;
            self.settle_locked(id, attempt, outcome).await
        };
        self.release_lock(id, lock).await;
        result
    }

    async fn settle_locked(
        &self,
        id: &ProposalId,
        attempt: u64,
        outcome: Result<AnalysisResult, FailureDetail>,
    ) -> Result<AnalyzeOutcome, StoreError> {
        let current = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        let now = Utc::now();
        let transition = match &outcome {
            Ok(analysis) => current.complete(attempt, analysis.clone(), now),
            Err(_) => current.fail(attempt, now),
        };
        let next = match transition {
            Ok(record) => record,
            Err(e) => {
                warn!(proposal_id = %id, attempt, error = %e, "Discarding stale analysis result");
                self.events.log(AnalysisEvent::new(
                    "analysis_discarded",
                    json!({
                        "proposal_id": id.as_str(),
                        "attempt": attempt,
                        "current_attempt": current.attempts,
                    }),
                ));
                return Ok(AnalyzeOutcome::Superseded);
            }
        };

        let outcome = match self.repository.replace(next).await {
            Ok(()) => outcome,
            Err(e) => {
                // The record must not stay Analyzing; fall back to Failed
                warn!(proposal_id = %id, attempt, error = %e, "Failed to store analysis outcome");
                let Ok(failed) = current.fail(attempt, Utc::now()) else {
                    return Err(e.into());
                };
                if let Err(fallback) = self.repository.replace(failed).await {
                    warn!(proposal_id = %id, attempt, error = %fallback, "Failed to mark analysis failed");
                    return Err(e.into());
                }
                Err(FailureDetail {
                    kind: "store",
                    message: e.to_string(),
                    raw_excerpt: None,
                })
            }
        };

        match outcome {
            Ok(analysis) => {
                info!(
                    proposal_id = %id,
                    attempt,
                    complexity = analysis.complexity_score,
                    "Proposal analyzed"
                );
                self.events.log(AnalysisEvent::new(
                    "analysis_completed",
                    json!({
                        "proposal_id": id.as_str(),
                        "attempt": attempt,
                        "complexity_score": analysis.complexity_score,
                    }),
                ));
                self.progress
                    .on_analysis_complete(id, ProposalStatus::Analyzed);
                Ok(AnalyzeOutcome::Analyzed(analysis))
            }
            Err(detail) => {
                warn!(
                    proposal_id = %id,
                    attempt,
                    kind = detail.kind,
                    error = %detail.message,
                    "Proposal analysis failed"
                );
                self.events.log(AnalysisEvent::new(
                    "analysis_failed",
                    json!({
                        "proposal_id": id.as_str(),
                        "attempt": attempt,
                        "kind": detail.kind,
                        "error": detail.message,
                        "raw_excerpt": detail.raw_excerpt,
                    }),
                ));
                self.progress.on_analysis_complete(id, ProposalStatus::Failed);
                Ok(AnalyzeOutcome::Failed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::model_gateway::GatewayError;
    use crate::use_cases::test_support::{
        MemoryRepository, RecordingEvents, ScriptedGateway, analysis_json,
    };
    use govmind_domain::{DecodingProfile, Variant};

    fn store(
        gateway: ScriptedGateway,
    ) -> (
        ProposalAnalysisStore<ScriptedGateway, MemoryRepository>,
        Arc<ScriptedGateway>,
        Arc<RecordingEvents>,
    ) {
        let gateway = Arc::new(gateway);
        let events = Arc::new(RecordingEvents::default());
        let store = ProposalAnalysisStore::new(Arc::clone(&gateway), Arc::new(MemoryRepository::default()))
            .with_event_logger(events.clone());
        (store, gateway, events)
    }

    fn submission(title: &str) -> ProposalSubmission {
        ProposalSubmission::try_new(title, "Description").unwrap()
    }

    fn id(raw: &str) -> ProposalId {
        ProposalId::new(raw).unwrap()
    }

    async fn wait_for_calls(gateway: &ScriptedGateway, n: usize) {
        while gateway.call_count() < n {
            tokio::task::yield_now().await;
        }
    }

    // ==================== Submit ====================

    #[tokio::test]
    async fn test_submit_is_idempotent() {
        let (store, _, _) = store(ScriptedGateway::new(vec![]));

        let first = store.submit(Some(id("dao-1")), submission("First")).await.unwrap();
        let second = store.submit(Some(id("dao-1")), submission("Second")).await.unwrap();

        assert!(first.created);
        assert!(!second.created);
        let record = store.get(&id("dao-1")).await.unwrap().unwrap();
        assert_eq!(record.title, "First");
        assert_eq!(record.status, ProposalStatus::Pending);
    }

    #[tokio::test]
    async fn test_submit_without_id_generates_one() {
        let (store, _, _) = store(ScriptedGateway::new(vec![]));
        let submitted = store.submit(None, submission("T")).await.unwrap();
        assert!(submitted.id.as_str().starts_with("local-"));
        assert!(store.get(&submitted.id).await.unwrap().is_some());
    }

    // ==================== Analyze ====================

    #[tokio::test]
    async fn test_analyze_success() {
        let (store, gateway, events) = store(ScriptedGateway::new(vec![Ok(analysis_json(6.0))]));
        store.submit(Some(id("dao-1")), submission("T")).await.unwrap();

        let outcome = store.analyze(&id("dao-1")).await.unwrap();
        let AnalyzeOutcome::Analyzed(analysis) = outcome else {
            panic!("expected Analyzed, got {:?}", outcome);
        };
        assert_eq!(analysis.complexity_score, 6.0);

        let record = store.get(&id("dao-1")).await.unwrap().unwrap();
        assert_eq!(record.status, ProposalStatus::Analyzed);
        assert_eq!(record.analysis, Some(analysis));
        assert_eq!(record.attempts, 1);

        let requests = gateway.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].variant(), Variant::Analyze);
        assert_eq!(requests[0].profile, Variant::Analyze.default_profile());
        assert!(requests[0].prompt.user.contains("Proposal Title: T"));
        assert_eq!(
            events.types(),
            vec!["proposal_submitted", "analysis_started", "analysis_completed"]
        );
    }

    #[tokio::test]
    async fn test_gateway_error_marks_failed_then_retry_recovers() {
        let (store, _, events) = store(ScriptedGateway::new(vec![
            Err(GatewayError::Http {
                status: 500,
                body: "boom".into(),
            }),
            Ok(analysis_json(3.0)),
        ]));
        store.submit(Some(id("dao-1")), submission("T")).await.unwrap();

        assert_eq!(store.analyze(&id("dao-1")).await.unwrap(), AnalyzeOutcome::Failed);
        let failed = store.get(&id("dao-1")).await.unwrap().unwrap();
        assert_eq!(failed.status, ProposalStatus::Failed);
        assert!(failed.analysis.is_none());
        assert!(events.types().contains(&"analysis_failed"));

        let outcome = store.retry(&id("dao-1")).await.unwrap();
        assert!(matches!(outcome, AnalyzeOutcome::Analyzed(_)));
        assert_eq!(store.get(&id("dao-1")).await.unwrap().unwrap().attempts, 2);
    }

    #[tokio::test]
    async fn test_unparseable_response_marks_failed() {
        let (store, _, events) =
            store(ScriptedGateway::new(vec![Ok("I'm sorry, I can't do that.".into())]));
        store.submit(Some(id("dao-1")), submission("T")).await.unwrap();

        assert_eq!(store.analyze(&id("dao-1")).await.unwrap(), AnalyzeOutcome::Failed);
        let failure = events.last_payload("analysis_failed").unwrap();
        assert_eq!(failure["kind"], "parse");
        assert_eq!(failure["raw_excerpt"], "I'm sorry, I can't do that.");
    }

    #[tokio::test]
    async fn test_analyze_unknown_id() {
        let (store, gateway, _) = store(ScriptedGateway::new(vec![]));
        let err = store.analyze(&id("missing")).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_retry_allowed_from_analyzed() {
        let (store, gateway, _) = store(ScriptedGateway::new(vec![
            Ok(analysis_json(2.0)),
            Ok(analysis_json(8.0)),
        ]));
        store.submit(Some(id("dao-1")), submission("T")).await.unwrap();
        store.analyze(&id("dao-1")).await.unwrap();

        let outcome = store.retry(&id("dao-1")).await.unwrap();
        let AnalyzeOutcome::Analyzed(analysis) = outcome else {
            panic!("expected Analyzed");
        };
        assert_eq!(analysis.complexity_score, 8.0);
        assert_eq!(gateway.call_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_marks_failed() {
        let gateway = ScriptedGateway::new(vec![Ok(analysis_json(5.0))])
            .with_delay(Duration::from_secs(600));
        let (store, _, events) = store(gateway);
        let store = store.with_profiles(
            VariantProfiles::default().with(Variant::Analyze, DecodingProfile::new(0.3, 2000, 5)),
        );
        store.submit(Some(id("dao-1")), submission("T")).await.unwrap();

        assert_eq!(store.analyze(&id("dao-1")).await.unwrap(), AnalyzeOutcome::Failed);
        assert_eq!(events.last_payload("analysis_failed").unwrap()["kind"], "timeout");
    }

    // ==================== Concurrency ====================

    #[tokio::test]
    async fn test_no_second_call_while_analyzing() {
        let gateway = ScriptedGateway::new(vec![Ok(analysis_json(5.0)), Ok(analysis_json(9.0))]).gated();
        let (store, gateway, _) = store(gateway);
        store.submit(Some(id("dao-1")), submission("T")).await.unwrap();

        let first = {
            let store = store.clone();
            tokio::spawn(async move { store.analyze(&id("dao-1")).await })
        };
        wait_for_calls(&gateway, 1).await;
        assert_eq!(
            store.status(&id("dao-1")).await.unwrap(),
            Some(ProposalStatus::Analyzing)
        );

        assert_eq!(
            store.analyze(&id("dao-1")).await.unwrap(),
            AnalyzeOutcome::AlreadyAnalyzing
        );
        assert_eq!(
            store.retry(&id("dao-1")).await.unwrap(),
            AnalyzeOutcome::AlreadyAnalyzing
        );
        assert_eq!(gateway.call_count(), 1);

        gateway.release();
        let outcome = first.await.unwrap().unwrap();
        assert!(matches!(outcome, AnalyzeOutcome::Analyzed(_)));
        assert_eq!(gateway.call_count(), 1);
    }

    #[tokio::test]
    async fn test_background_dispatch_then_immediate_retry_coalesces() {
        let gateway = ScriptedGateway::new(vec![Ok(analysis_json(5.0))]).gated();
        let (store, gateway, events) = store(gateway);
        store.submit(Some(id("dao-1")), submission("T")).await.unwrap();

        let dispatch = store
            .analyze_in_background(&id("dao-1"), AnalysisTrigger::Initial)
            .await
            .unwrap();
        assert_eq!(dispatch, Dispatch::Started { attempt: 1 });
        assert_eq!(
            store.retry(&id("dao-1")).await.unwrap(),
            AnalyzeOutcome::AlreadyAnalyzing
        );

        gateway.release();
        while store.status(&id("dao-1")).await.unwrap() != Some(ProposalStatus::Analyzed) {
            tokio::task::yield_now().await;
        }

        assert_eq!(gateway.call_count(), 1);
        let terminal_writes = events
            .types()
            .into_iter()
            .filter(|t| *t == "analysis_completed" || *t == "analysis_failed")
            .count();
        assert_eq!(terminal_writes, 1);
    }

    #[tokio::test]
    async fn test_stale_result_is_discarded() {
        let (store, _, events) = store(ScriptedGateway::new(vec![
            Ok(analysis_json(9.0)),
            Ok(analysis_json(1.0)),
        ]));
        store.submit(Some(id("dao-1")), submission("T")).await.unwrap();

        // Attempt 1 is claimed, then abandoned and recovered
        let claim = store
            .claim(&id("dao-1"), AnalysisTrigger::Initial)
            .await
            .unwrap()
            .unwrap();
        let recovered = store.recover_interrupted(Duration::ZERO).await.unwrap();
        assert_eq!(recovered, vec![id("dao-1")]);

        // Attempt 2 settles first
        let second = store.retry(&id("dao-1")).await.unwrap();
        assert!(matches!(second, AnalyzeOutcome::Analyzed(ref a) if a.complexity_score == 9.0));

        // The late attempt 1 must not overwrite it
        assert_eq!(store.execute(claim).await.unwrap(), AnalyzeOutcome::Superseded);
        let record = store.get(&id("dao-1")).await.unwrap().unwrap();
        assert_eq!(record.attempts, 2);
        assert_eq!(record.analysis.unwrap().complexity_score, 9.0);
        assert!(events.types().contains(&"analysis_discarded"));
    }

    #[tokio::test]
    async fn test_recover_ignores_fresh_and_settled_records() {
        let (store, _, _) = store(ScriptedGateway::new(vec![]));
        store.submit(Some(id("dao-1")), submission("T")).await.unwrap();
        store.submit(Some(id("dao-2")), submission("T")).await.unwrap();
        store
            .claim(&id("dao-2"), AnalysisTrigger::Initial)
            .await
            .unwrap();

        let recovered = store
            .recover_interrupted(Duration::from_secs(3600))
            .await
            .unwrap();
        assert!(recovered.is_empty());
        assert_eq!(
            store.status(&id("dao-2")).await.unwrap(),
            Some(ProposalStatus::Analyzing)
        );
    }

    // ==================== Reads ====================

    #[tokio::test]
    async fn test_list_newest_first() {
        let repository = Arc::new(MemoryRepository::default());
        let base = Utc::now();
        for (name, offset) in [("old", 0), ("new", 60), ("mid", 30)] {
            let record = ProposalRecord::new(
                id(name),
                submission(name),
                base + chrono::Duration::seconds(offset),
            );
            repository.insert_if_absent(record).await.unwrap();
        }
        let store = ProposalAnalysisStore::new(Arc::new(ScriptedGateway::new(vec![])), repository);

        let ids: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id.to_string())
            .collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
    }

    #[tokio::test]
    async fn test_get_analysis_lookup_errors() {
        let (store, _, _) = store(ScriptedGateway::new(vec![Ok(analysis_json(4.0))]));

        assert!(matches!(
            store.get_analysis(&id("dao-1")).await,
            Err(LookupError::NotFound(_))
        ));

        store.submit(Some(id("dao-1")), submission("T")).await.unwrap();
        assert!(matches!(
            store.get_analysis(&id("dao-1")).await,
            Err(LookupError::NotAnalyzed {
                status: ProposalStatus::Pending,
                ..
            })
        ));

        store.analyze(&id("dao-1")).await.unwrap();
        assert_eq!(
            store.get_analysis(&id("dao-1")).await.unwrap().complexity_score,
            4.0
        );
    }

    // ==================== Store write failures ====================

    #[tokio::test]
    async fn test_failed_outcome_write_marks_record_failed() {
        let gateway = Arc::new(ScriptedGateway::new(vec![Ok(analysis_json(6.0))]));
        let repository = Arc::new(MemoryRepository::default());
        let events = Arc::new(RecordingEvents::default());
        let store = ProposalAnalysisStore::new(gateway, Arc::clone(&repository))
            .with_event_logger(events.clone());
        store.submit(Some(id("dao-1")), submission("T")).await.unwrap();

        // Call 1 claims the record; call 2 writes the analysis
        repository.fail_replace_call(2);
        assert_eq!(store.analyze(&id("dao-1")).await.unwrap(), AnalyzeOutcome::Failed);

        let record = store.get(&id("dao-1")).await.unwrap().unwrap();
        assert_eq!(record.status, ProposalStatus::Failed);
        assert!(record.analysis.is_none());
        let failure = events.last_payload("analysis_failed").unwrap();
        assert_eq!(failure["kind"], "store");
    }

    #[tokio::test]
    async fn test_lock_table_is_pruned_after_settle() {
        let (store, _, _) = store(ScriptedGateway::new(vec![
            Ok(analysis_json(6.0)),
            Ok(analysis_json(7.0)),
        ]));
        for name in ["dao-1", "dao-2"] {
            store.submit(Some(id(name)), submission("T")).await.unwrap();
            store.analyze(&id(name)).await.unwrap();
        }
        store.recover_interrupted(Duration::ZERO).await.unwrap();

        assert!(store.locks.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_lock_entry_survives_while_contended() {
        let gateway = ScriptedGateway::new(vec![Ok(analysis_json(5.0))]).gated();
        let (store, gateway, _) = store(gateway);
        store.submit(Some(id("dao-1")), submission("T")).await.unwrap();

        let held = store.lock_for(&id("dao-1")).await;
        let analysis = {
            let store = store.clone();
            tokio::spawn(async move { store.analyze(&id("dao-1")).await })
        };
        tokio::task::yield_now().await;
        assert_eq!(store.locks.lock().await.len(), 1);

        store.release_lock(&id("dao-1"), held).await;
        wait_for_calls(&gateway, 1).await;
        gateway.release();
        assert!(matches!(
            analysis.await.unwrap().unwrap(),
            AnalyzeOutcome::Analyzed(_)
        ));
        assert!(store.locks.lock().await.is_empty());
    }
}
