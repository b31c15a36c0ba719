//! Application layer for pictoboard.
//!
//! This crate provides the owned session-state object and the use cases
//! coordinating the domain core with the infrastructure layer: search and
//! upload result panes with stale-result discard, the caption editor flow,
//! the selected entry, and sentence assembly for the compose view.

pub mod compose;
pub mod session;

pub use session::results::{RequestTicket, ResultPane};
pub use session::{BoardSession, EntryEditor};
