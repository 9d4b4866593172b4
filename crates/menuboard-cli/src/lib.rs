//! Menuboard command-line tools.
//!
//! Replays recorded editing sessions through the core and reports the
//! resulting element views.

pub mod session;

pub use session::{Report, Session, SessionEvent};
