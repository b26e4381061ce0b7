//! Structured interaction logging.
//!
//! Every component reports agent interactions through an injected
//! `EventLog` handle rather than a process-wide singleton. The handle
//! is fire-and-forget: implementations never return errors into the
//! caller's control flow.

use tracing::info;

/// Agent names used in event records.
pub mod agent {
    pub const CLASSIFIER: &str = "ClassifierAgent";
    pub const CONTROLLER: &str = "Controller";
    pub const FEEDBACK_HANDLER: &str = "FeedbackHandlerAgent";
    pub const QUERY_HANDLER: &str = "QueryHandlerAgent";
}

/// Sink for structured agent interaction events.
pub trait EventLog: Send + Sync {
    fn log_event(&self, agent: &str, input: &str, output: &str);
}

/// Production sink: emits through `tracing` at INFO level.
pub struct TracingEventLog;

impl EventLog for TracingEventLog {
    fn log_event(&self, agent: &str, input: &str, output: &str) {
        info!("[{agent}] INPUT: {input} | OUTPUT: {output}");
    }
}
