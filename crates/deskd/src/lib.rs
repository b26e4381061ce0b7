//! Support desk intent router.
//!
//! One inbound customer message goes through a single linear pass:
//! classify with the model (falling back to `Query` on anything
//! untrustworthy), dispatch to the feedback or query handler, and return
//! a natural-language response. Handlers persist support tickets through
//! the collision-safe creation protocol in [`store`].

pub mod classifier;
pub mod controller;
pub mod handlers;
pub mod prompts;
pub mod store;

pub use controller::Controller;
pub use store::{CreateTicketError, StoreError, TicketInsert, TicketStore};
