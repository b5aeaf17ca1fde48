//! Lecture summaries
//!
//! Generates summaries and key points from lecture text and keeps them in
//! an in-memory store.

pub mod handler;
pub mod store;
pub mod types;

pub use handler::{summaries_router, SummariesState};
pub use store::SummaryStore;
pub use types::{CreateSummaryRequest, FileAttachment, LectureSummary};
