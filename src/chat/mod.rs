//! Follow-up chat over a previously generated report.
//!
//! One external call per turn: the caller round-trips the whole history,
//! user-authored entries are sanitized, and the system instruction carries a
//! bounded topic→link table plus the prior report's summary as read-only
//! context.

pub mod handler;
pub mod sanitize;
pub mod topics;

pub use handler::{answer, ChatError, ChatMessage, ChatRole};
