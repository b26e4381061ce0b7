//! Query handling.
//!
//! Queries are resolved in a fixed precedence order, first match wins:
//! greeting, status lookup by embedded ticket number, bare ticket
//! reference without a number, then generic query (which opens a new
//! informational ticket). A greeting containing a ticket number is still
//! a greeting; a number beats a bare keyword; and only messages matching
//! none of the first three categories ever reach the store's insert path.

use crate::handlers::TECHNICAL_DIFFICULTY_REPLY;
use crate::store::TicketStore;
use desk_common::events::agent;
use desk_common::EventLog;
use regex::Regex;
use std::sync::LazyLock;
use tracing::error;

/// First fixed-width 6-digit token in the message, if any.
static TICKET_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{6})\b").unwrap());

/// Conversational fillers that must never open a ticket.
const GREETINGS: &[&str] = &[
    "hello",
    "hi",
    "hey",
    "good morning",
    "good afternoon",
    "good evening",
    "thanks",
    "thank you",
    "ok",
    "okay",
];

/// Keywords that signal a ticket-related request lacking its number.
const TICKET_KEYWORDS: &[&str] = &["ticket", "status", "issue", "complaint", "request", "case"];

/// Route an informational query to a response, creating a ticket only on
/// the generic path.
pub fn handle_query(message: &str, store: &TicketStore, log: &dyn EventLog) -> String {
    let trimmed_lower = message.trim().to_lowercase();

    // 1. Greeting / small talk
    if GREETINGS.contains(&trimmed_lower.as_str()) {
        log.log_event(
            agent::QUERY_HANDLER,
            message,
            "Greeting detected, no ticket created",
        );
        return "Hello! How can I assist you today?".to_string();
    }

    // 2. Ticket number present: status lookup
    if let Some(ticket_number) = extract_ticket_number(message) {
        let response = match store.ticket_status(ticket_number) {
            Ok(Some(status)) => {
                format!("Your ticket #{ticket_number} is currently marked as: {status}.")
            }
            Ok(None) => format!(
                "We could not find a ticket with number #{ticket_number}. \
                 Please double-check the number and try again."
            ),
            Err(err) => {
                error!("status lookup failed for ticket #{ticket_number}: {err}");
                TECHNICAL_DIFFICULTY_REPLY.to_string()
            }
        };
        log.log_event(agent::QUERY_HANDLER, message, &response);
        return response;
    }

    // 3. Ticket reference without a number
    if TICKET_KEYWORDS
        .iter()
        .any(|keyword| trimmed_lower.contains(keyword))
    {
        log.log_event(
            agent::QUERY_HANDLER,
            message,
            "Ticket reference without ticket number",
        );
        return "I can help with that. Please provide your ticket number so \
                I can check the status for you."
            .to_string();
    }

    // 4. Generic informational query: open a new ticket
    match store.create_ticket(message) {
        Ok(ticket_number) => {
            let response = format!(
                "Thank you for reaching out. I've created a support ticket \
                 #{ticket_number} so our team can get back to you with the \
                 information you requested."
            );
            log.log_event(
                agent::QUERY_HANDLER,
                message,
                &format!("General query logged with ticket #{ticket_number}"),
            );
            response
        }
        Err(err) => {
            error!("ticket creation failed for general query: {err}");
            log.log_event(agent::QUERY_HANDLER, message, "Ticket creation failed");
            TECHNICAL_DIFFICULTY_REPLY.to_string()
        }
    }
}

/// First-match scan for a 6-digit ticket identifier.
pub(crate) fn extract_ticket_number(message: &str) -> Option<u32> {
    TICKET_NUMBER_RE
        .captures(message)
        .and_then(|captures| captures.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
