//! Rule-based response engine
//!
//! Provides response selection over an ordered keyword rule table, heuristic
//! lecture summarization, and the one-shot warm-up shared by both.

pub mod init;
pub mod rules;
pub mod selector;
pub mod summarizer;

pub use init::{InitState, Initializer, SimulatedWarmup, Warmup};
pub use rules::{default_rules, Rule, Trigger, DEFAULT_FALLBACKS};
pub use selector::{ResponseSelector, Selection};
pub use summarizer::{split_sentences, SummaryExtractor, SummaryResult};
