//! Classmate - educational assistant service
//!
//! Classmate answers student questions, condenses lecture text into a
//! summary with key points, and tracks dated reminders. Answers come from an
//! ordered keyword rule table; an optional hosted text-generation model is
//! tried first when a credential is configured, and any failure there falls
//! through to the rules.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        HTTP API (axum)                        │
//! │   /api/chat        /api/summaries        /api/reminders       │
//! └──────┬──────────────────┬────────────────────────┬───────────┘
//!        │                  │                        │
//! ┌──────▼───────┐   ┌──────▼────────┐       ┌───────▼────────┐
//! │ ChatService  │   │ SummaryStore  │       │ ReminderStore  │
//! │              │   └──────┬────────┘       └────────────────┘
//! │ 1. upstream ─┼──► TextGenerator (timeout, cancellable)
//! │ 2. rules     │          │
//! └──────┬───────┘          │
//!        │                  │
//! ┌──────▼──────────────────▼────────────────────────────────────┐
//! │                        Response engine                        │
//! │  ResponseSelector    SummaryExtractor    Initializer (once)   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`engine`]: rule table, response selection, summarization, warm-up
//! - [`upstream`]: optional remote text generation
//! - [`chat`]: two-stage chat answering and its endpoint
//! - [`summaries`]: lecture summary generation and storage
//! - [`reminders`]: reminder tracking
//! - [`api`]: merged router and response envelope
//! - [`server`]: server lifecycle
//! - [`config`]: configuration management

pub mod api;
pub mod chat;
pub mod config;
pub mod engine;
pub mod error;
pub mod reminders;
pub mod server;
pub mod summaries;
pub mod upstream;

pub use config::ClassmateConfig;
pub use error::{Error, Result};
