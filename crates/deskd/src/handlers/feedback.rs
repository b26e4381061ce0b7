//! Feedback handling.
//!
//! Positive feedback is acknowledged with text only. Negative feedback
//! opens a support ticket through the collision-safe protocol; if that
//! protocol fails, the customer gets the degraded-mode reply and the
//! failure is logged; a ticket number is never fabricated.

use crate::handlers::TECHNICAL_DIFFICULTY_REPLY;
use crate::store::TicketStore;
use desk_common::events::agent;
use desk_common::EventLog;
use tracing::error;

/// Thank the customer. No side effects beyond logging.
pub fn handle_positive(message: &str, customer_name: &str, log: &dyn EventLog) -> String {
    let response = format!(
        "Thank you for your kind words, {customer_name}! We're delighted to assist you."
    );
    log.log_event(
        agent::FEEDBACK_HANDLER,
        message,
        "Positive feedback acknowledged",
    );
    response
}

/// Open a ticket for the complaint and apologize with its number, or
/// degrade gracefully when the store lets us down.
pub fn handle_negative(message: &str, store: &TicketStore, log: &dyn EventLog) -> String {
    match store.create_ticket(message) {
        Ok(ticket_number) => {
            let response = format!(
                "We apologize for the inconvenience. A new ticket #{ticket_number} \
                 has been generated, and our team will follow up shortly."
            );
            log.log_event(
                agent::FEEDBACK_HANDLER,
                message,
                &format!("Negative feedback logged with ticket #{ticket_number}"),
            );
            response
        }
        Err(err) => {
            error!("ticket creation failed for negative feedback: {err}");
            log.log_event(agent::FEEDBACK_HANDLER, message, "Ticket creation failed");
            TECHNICAL_DIFFICULTY_REPLY.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;
    use tempfile::tempdir;

    struct NullLog;

    impl EventLog for NullLog {
        fn log_event(&self, _agent: &str, _input: &str, _output: &str) {}
    }

    #[test]
    fn positive_feedback_is_personalized_and_storeless() {
        let response = handle_positive("thanks so much!", "Dana", &NullLog);
        assert!(response.contains("Dana"));
        assert!(response.contains("Thank you"));
    }

    #[test]
    fn negative_feedback_creates_an_open_ticket() {
        let store = TicketStore::open_in_memory().unwrap();
        let response = handle_negative("my card is broken again", &store, &NullLog);

        let number: u32 = response
            .split('#')
            .nth(1)
            .and_then(|rest| rest.split_whitespace().next())
            .and_then(|token| token.parse().ok())
            .expect("response should embed a ticket number");
        assert_eq!(store.ticket_status(number).unwrap(), Some("Open".to_string()));
    }

    #[test]
    fn store_failure_degrades_without_a_ticket_number() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tickets.db");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute(
                "CREATE TABLE support_tickets (ticket_number INTEGER PRIMARY KEY)",
                [],
            )
            .unwrap();
        }
        let store = TicketStore::open(&path).unwrap();

        let response = handle_negative("everything is broken", &store, &NullLog);
        assert_eq!(response, TECHNICAL_DIFFICULTY_REPLY);
        assert!(!response.contains('#'));
    }
}
