//! Chat assistant
//!
//! Answers student messages through the optional upstream generator with the
//! rule engine as a guaranteed fallback.

pub mod handler;
pub mod service;
pub mod types;

pub use handler::{chat_router, ChatState};
pub use service::{ChatReply, ChatService};
pub use types::{ChatMessage, ChatRequest, ChatRole};
