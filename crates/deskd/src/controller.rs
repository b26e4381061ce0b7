//! Orchestration: classify, log, dispatch, respond.
//!
//! One message is one linear pass; no state survives between calls and
//! no error escapes `handle_user_input`. Classifier failures are already
//! absorbed into the fallback label, and handler failures arrive here as
//! finished natural-language responses.

use crate::classifier;
use crate::handlers::{feedback, query};
use crate::store::TicketStore;
use desk_common::events::agent;
use desk_common::{EventLog, Intent, TextGenerator};

/// Sequences classification and handler dispatch for inbound messages.
///
/// All collaborators are injected at construction; the hosting process
/// owns their lifecycle.
pub struct Controller {
    llm: Box<dyn TextGenerator>,
    store: TicketStore,
    log: Box<dyn EventLog>,
}

impl Controller {
    pub fn new(llm: Box<dyn TextGenerator>, store: TicketStore, log: Box<dyn EventLog>) -> Self {
        Self { llm, store, log }
    }

    /// Entry point consumed by the presentation layer. Always returns a
    /// user-facing response string, never an error.
    pub fn handle_user_input(&self, message: &str, customer_name: &str) -> String {
        let classification = classifier::classify(message, self.llm.as_ref());

        self.log.log_event(
            agent::CLASSIFIER,
            message,
            &format!(
                "label={}, fallback_used={}",
                classification.intent.canonical_label(),
                classification.fallback_used
            ),
        );

        if classification.fallback_used {
            self.log.log_event(
                agent::CONTROLLER,
                message,
                "Fallback applied: treating input as 'query'",
            );
        }

        let response = match classification.intent {
            Intent::PositiveFeedback => {
                feedback::handle_positive(message, customer_name, self.log.as_ref())
            }
            Intent::NegativeFeedback => {
                feedback::handle_negative(message, &self.store, self.log.as_ref())
            }
            Intent::Query => query::handle_query(message, &self.store, self.log.as_ref()),
        };

        self.log.log_event(agent::CONTROLLER, message, &response);
        response
    }
}
