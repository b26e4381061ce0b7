//! Intent labels and classification results.
//!
//! The classifier may only ever produce one of the three `Intent`
//! variants. Raw model output never crosses this boundary; anything
//! that cannot be normalized into a variant becomes `Query` with the
//! fallback flag set.

use serde::{Deserialize, Serialize};

/// Closed set of message intents the router dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    PositiveFeedback,
    NegativeFeedback,
    Query,
}

impl Intent {
    /// Canonical label token, as demanded from the model.
    pub fn canonical_label(&self) -> &'static str {
        match self {
            Intent::PositiveFeedback => "positive_feedback",
            Intent::NegativeFeedback => "negative_feedback",
            Intent::Query => "query",
        }
    }

    /// Exact match against a canonical label token.
    pub fn from_canonical_label(label: &str) -> Option<Self> {
        match label {
            "positive_feedback" => Some(Intent::PositiveFeedback),
            "negative_feedback" => Some(Intent::NegativeFeedback),
            "query" => Some(Intent::Query),
            _ => None,
        }
    }
}

/// Outcome of classifying one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub intent: Intent,
    /// True iff the model call failed or its output could not be
    /// normalized into a label. The intent is always `Query` then.
    pub fallback_used: bool,
}

impl Classification {
    pub fn accepted(intent: Intent) -> Self {
        Self {
            intent,
            fallback_used: false,
        }
    }

    /// The safe default: treat the message as an informational query.
    pub fn fallback() -> Self {
        Self {
            intent: Intent::Query,
            fallback_used: true,
        }
    }
}
