//! Shared types and abstractions for the support desk service.
//!
//! Everything here is consumed by `deskd`: the closed set of intent
//! labels, ticket types and the number-space constants, the text
//! generation abstraction with its HTTP backend, the structured event
//! log, and configuration.

pub mod config;
pub mod events;
pub mod intent;
pub mod llm;
pub mod ticket;

pub use config::DeskConfig;
pub use events::{EventLog, TracingEventLog};
pub use intent::{Classification, Intent};
pub use llm::{GenerationError, HttpOpenAiBackend, LlmConfig, TextGenerator};
pub use ticket::{
    Ticket, TicketStatus, TICKET_CREATE_ATTEMPTS, TICKET_NUMBER_MAX, TICKET_NUMBER_MIN,
};
