//! Intent handlers: feedback acknowledgement and query routing.

pub mod feedback;
pub mod query;

/// Shared degraded-mode reply when ticket persistence fails. Failures
/// never surface as raw errors; customers get an apologetic, actionable
/// sentence instead.
pub const TECHNICAL_DIFFICULTY_REPLY: &str =
    "We're sorry, we're experiencing a technical issue on our side right now. \
     Please try again in a few minutes.";
