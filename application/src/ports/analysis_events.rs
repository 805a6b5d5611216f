//! Port for structured analysis event logging.
//!
//! Records every lifecycle transition of the analysis store (and every
//! assist request) as a machine-readable event. This is separate from
//! `tracing`: failure details that never reach the proposal record are
//! kept here.

use serde_json::Value;

/// A structured analysis event.
pub struct AnalysisEvent {
    /// Event type identifier (e.g. "analysis_started", "analysis_failed").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl AnalysisEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging analysis events.
///
/// `log` is synchronous and infallible; implementations swallow write errors.
pub trait AnalysisEventLogger: Send + Sync {
    fn log(&self, event: AnalysisEvent);
}

/// No-op implementation for tests and when event logging is disabled.
pub struct NoEventLogger;

impl AnalysisEventLogger for NoEventLogger {
    fn log(&self, _event: AnalysisEvent) {}
}
