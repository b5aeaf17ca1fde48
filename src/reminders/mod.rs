//! Reminder tracking
//!
//! Dated reminders with a completion flag, listed by status relative to the
//! current time.

pub mod handler;
pub mod store;
pub mod types;

pub use handler::{reminders_router, RemindersState};
pub use store::ReminderStore;
pub use types::{Priority, Reminder, ReminderStats, ReminderType, StatusFilter};
