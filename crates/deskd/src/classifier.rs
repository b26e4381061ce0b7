//! Message intent classification with safe fallback.
//!
//! The model's free-text output is untrusted. It is normalized, matched
//! exactly against the canonical labels, then matched against an ordered
//! synonym table; anything else (including a failed model call) resolves
//! to `Query` with the fallback flag set. `Query` is the safe default
//! because its handler is the least destructive: it only ever opens an
//! informational ticket or asks a clarifying question.

use crate::prompts;
use desk_common::{Classification, Intent, TextGenerator};
use tracing::warn;

/// Synonym keywords, matched by substring against the normalized output.
///
/// Iteration order is part of the contract: the first keyword found in
/// the text wins, so output naming several cues ("praise despite the
/// problem") resolves to the earliest entry here.
const SYNONYMS: &[(&str, Intent)] = &[
    ("positive", Intent::PositiveFeedback),
    ("praise", Intent::PositiveFeedback),
    ("compliment", Intent::PositiveFeedback),
    ("negative", Intent::NegativeFeedback),
    ("complaint", Intent::NegativeFeedback),
    ("issue", Intent::NegativeFeedback),
    ("problem", Intent::NegativeFeedback),
    ("question", Intent::Query),
    ("inquiry", Intent::Query),
    ("request", Intent::Query),
];

/// Classify a message into one of the three intents.
///
/// Never fails: a transport error or unusable model output yields
/// `(Query, fallback_used = true)`.
pub fn classify(message: &str, llm: &dyn TextGenerator) -> Classification {
    let prompt = prompts::classifier_prompt(message);

    let raw = match llm.generate(&prompt) {
        Ok(text) => text,
        Err(err) => {
            warn!("classifier model call failed, falling back to query: {err}");
            return Classification::fallback();
        }
    };

    match parse_label(&raw) {
        Some(intent) => Classification::accepted(intent),
        None => Classification::fallback(),
    }
}

/// Normalize raw model output and resolve it to an intent, if possible.
fn parse_label(raw: &str) -> Option<Intent> {
    let normalized = normalize(raw);
    if normalized.is_empty() {
        return None;
    }

    if let Some(intent) = Intent::from_canonical_label(&normalized) {
        return Some(intent);
    }

    SYNONYMS
        .iter()
        .find(|(keyword, _)| normalized.contains(keyword))
        .map(|(_, intent)| *intent)
}

/// Trim, lowercase, delete punctuation and markdown noise, collapse
/// whitespace runs, and join with underscores so "negative feedback" and
/// "negative_feedback" are equivalent. Punctuation is removed, not
/// blanked, so a keyword split by a stray hyphen still reads as one word.
fn normalize(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let cleaned: String = lowered
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join("_")
}
