//! Store poller driving the analysis panel

use super::state::PanelState;
use async_trait::async_trait;
use govmind_application::{ModelGateway, ProposalCopilot, ProposalRepository, StoreError};
use govmind_domain::{ProposalId, ProposalRecord};
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

/// Read side of the analysis store, as seen by the panel
#[async_trait]
pub trait ProposalStatusSource: Send + Sync {
    async fn snapshot(&self, id: &ProposalId) -> Result<Option<ProposalRecord>, StoreError>;
}

#[async_trait]
impl<G, R> ProposalStatusSource for ProposalCopilot<G, R>
where
    G: ModelGateway + 'static,
    R: ProposalRepository + 'static,
{
    async fn snapshot(&self, id: &ProposalId) -> Result<Option<ProposalRecord>, StoreError> {
        self.status(id).await
    }
}

/// Re-reads a proposal on a fixed interval until the panel has nothing
/// left to wait for, or until the optional deadline passes.
pub struct AnalysisPoller {
    interval: Duration,
    deadline: Option<Duration>,
}

impl AnalysisPoller {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    /// Give up once `deadline` has elapsed and report the panel as failed.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn from_millis(interval_ms: u64) -> Self {
        Self::new(Duration::from_millis(interval_ms))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Poll `id` until its state no longer awaits the store.
    ///
    /// `on_change` sees the first state and every change of state after it.
    /// The first read happens immediately. Past the deadline, a state that
    /// still awaits the store is reported as [`PanelState::Failed`].
    pub async fn watch<S, F>(
        &self,
        source: &S,
        id: &ProposalId,
        mut on_change: F,
    ) -> Result<PanelState, StoreError>
    where
        S: ProposalStatusSource + ?Sized,
        F: FnMut(&PanelState),
    {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last: Option<PanelState> = None;
        let started = tokio::time::Instant::now();

        loop {
            ticker.tick().await;

            let record = source.snapshot(id).await?;
            let state = PanelState::from_record(record.as_ref());

            if last.as_ref().is_none_or(|prev| !prev.same_kind(&state)) {
                debug!(proposal_id = %id, state = state.label(), "Panel state changed");
                on_change(&state);
            }

            if !state.awaits_store() {
                return Ok(state);
            }
            if let Some(deadline) = self.deadline
                && started.elapsed() >= deadline
            {
                warn!(
                    proposal_id = %id,
                    state = state.label(),
                    waited_secs = deadline.as_secs(),
                    "Gave up waiting for analysis"
                );
                on_change(&PanelState::Failed);
                return Ok(PanelState::Failed);
            }
            last = Some(state);
        }
    }
}

impl Default for AnalysisPoller {
    fn default() -> Self {
        Self::from_millis(3000)
    }
}
