//! Upstream text generation
//!
//! An optional remote model that may answer chat queries before the local
//! rule engine does. Any failure here is recoverable: callers fall back to
//! the rule-based selector.

pub mod huggingface;

pub use huggingface::HuggingFaceClient;

use crate::error::Result;
use async_trait::async_trait;

/// Source label reported when the local engine produced the answer
pub const SIMULATED_SOURCE: &str = "simulated";

/// Remote text generator
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate an answer for a student message. Returns non-empty text.
    async fn generate(&self, message: &str) -> Result<String>;

    /// Label identifying this generator in responses
    fn source(&self) -> &str;
}
