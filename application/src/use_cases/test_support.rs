//! Fakes shared by the use case tests.

use crate::ports::analysis_events::{AnalysisEvent, AnalysisEventLogger};
use crate::ports::model_gateway::{CompletionRequest, GatewayError, ModelGateway};
use crate::ports::proposal_repository::{ProposalRepository, RepositoryError};
use async_trait::async_trait;
use govmind_domain::{ProposalId, ProposalRecord};
use serde_json::{Value, json};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Semaphore;

/// Gateway that replays a fixed script of responses.
pub(crate) struct ScriptedGateway {
    responses: Mutex<VecDeque<Result<String, GatewayError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
    calls: AtomicUsize,
    gate: Option<Semaphore>,
    delay: Option<Duration>,
}

impl ScriptedGateway {
    pub(crate) fn new(responses: Vec<Result<String, GatewayError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            gate: None,
            delay: None,
        }
    }

    /// Hold every call until [`release`](Self::release) is called.
    pub(crate) fn gated(mut self) -> Self {
        self.gate = Some(Semaphore::new(0));
        self
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Let one held call proceed.
    pub(crate) fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelGateway for ScriptedGateway {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        if let Some(gate) = &self.gate
            && let Ok(permit) = gate.acquire().await
        {
            permit.forget();
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::InvalidResponse("script exhausted".into())))
    }
}

/// Repository backed by a plain map.
#[derive(Default)]
pub(crate) struct MemoryRepository {
    records: tokio::sync::Mutex<HashMap<ProposalId, ProposalRecord>>,
    replace_calls: AtomicUsize,
    failing_replace: Mutex<Option<usize>>,
}

impl MemoryRepository {
    /// Make the `n`th call to `replace` (1-based) fail with an I/O error.
    pub(crate) fn fail_replace_call(&self, n: usize) {
        *self.failing_replace.lock().unwrap() = Some(n);
    }
}

#[async_trait]
impl ProposalRepository for MemoryRepository {
    async fn get(&self, id: &ProposalId) -> Result<Option<ProposalRecord>, RepositoryError> {
        Ok(self.records.lock().await.get(id).cloned())
    }

    async fn insert_if_absent(&self, record: ProposalRecord) -> Result<bool, RepositoryError> {
        let mut records = self.records.lock().await;
        if records.contains_key(&record.id) {
            return Ok(false);
        }
        records.insert(record.id.clone(), record);
        Ok(true)
    }

    async fn replace(&self, record: ProposalRecord) -> Result<(), RepositoryError> {
        let call = self.replace_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if *self.failing_replace.lock().unwrap() == Some(call) {
            return Err(RepositoryError::Io("disk full".into()));
        }
        self.records.lock().await.insert(record.id.clone(), record);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<ProposalRecord>, RepositoryError> {
        Ok(self.records.lock().await.values().cloned().collect())
    }
}

/// Event logger that keeps everything in memory.
#[derive(Default)]
pub(crate) struct RecordingEvents {
    events: Mutex<Vec<(&'static str, Value)>>,
}

impl RecordingEvents {
    pub(crate) fn types(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(|(t, _)| *t).collect()
    }

    pub(crate) fn last_payload(&self, event_type: &str) -> Option<Value> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(t, _)| *t == event_type)
            .map(|(_, payload)| payload.clone())
    }
}

impl AnalysisEventLogger for RecordingEvents {
    fn log(&self, event: AnalysisEvent) {
        self.events
            .lock()
            .unwrap()
            .push((event.event_type, event.payload));
    }
}

/// A conformant "analyze" response with every score set to `score`.
pub(crate) fn analysis_json(score: f64) -> String {
    json!({
        "summary": "Summary",
        "risk_assessment": "1. Risk",
        "recommendations": "1. Recommendation",
        "complexity_score": score,
        "complexity_breakdown": {
            "technical_complexity": score,
            "financial_complexity": score,
            "governance_complexity": score,
            "timeline_complexity": score,
            "explanation": "Explanation",
            "comparison": "Comparison"
        },
        "estimated_impact": "Impact"
    })
    .to_string()
}
