//! Support ticket types and the ticket-number space.
//!
//! Ticket numbers are drawn uniformly from a fixed-width 6-digit space.
//! The width is a user-facing contract: customers quote these numbers
//! back and the query handler extracts them with a 6-digit scan, so the
//! space must not change shape.

use serde::{Deserialize, Serialize};

/// Smallest valid ticket number (inclusive).
pub const TICKET_NUMBER_MIN: u32 = 100_000;
/// Largest valid ticket number (inclusive).
pub const TICKET_NUMBER_MAX: u32 = 999_999;
/// Bound on random draws when allocating a new ticket number.
pub const TICKET_CREATE_ATTEMPTS: u32 = 5;

/// Lifecycle status of a ticket. This core only ever writes `Open`;
/// closing is the business of the (out of scope) admin surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketStatus {
    Open,
    Closed,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "Open",
            TicketStatus::Closed => "Closed",
        }
    }
}

/// A persisted unresolved-issue record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub ticket_number: u32,
    pub issue_description: String,
    pub status: TicketStatus,
}
