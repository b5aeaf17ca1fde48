//! Hugging Face inference API client

use super::TextGenerator;
use crate::config::UpstreamConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Source label reported for answers produced by this client
pub const HUGGINGFACE_SOURCE: &str = "huggingface-gpt2";

#[derive(Debug, Serialize)]
struct InferenceRequest {
    inputs: String,
    parameters: InferenceParameters,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    max_new_tokens: u32,
    temperature: f32,
    return_full_text: bool,
}

/// Inference responses arrive either as a list of generations or a single one
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Many(Vec<Generation>),
    One(Generation),
}

#[derive(Debug, Deserialize)]
struct Generation {
    #[serde(default)]
    generated_text: Option<String>,
}

impl InferenceResponse {
    fn into_text(self) -> Option<String> {
        let generation = match self {
            InferenceResponse::Many(list) => list.into_iter().next()?,
            InferenceResponse::One(single) => single,
        };
        generation
            .generated_text
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    }
}

/// Client for the hosted text-generation endpoint
pub struct HuggingFaceClient {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    max_new_tokens: u32,
    temperature: f32,
}

impl HuggingFaceClient {
    /// Create a client with an explicit credential
    pub fn new(config: &UpstreamConfig, api_key: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint: format!(
                "{}/models/{}",
                config.base_url.trim_end_matches('/'),
                config.model
            ),
            max_new_tokens: config.max_new_tokens,
            temperature: config.temperature,
        })
    }

    /// Create a client when the configured credential is present in the
    /// environment, `None` otherwise
    pub fn from_config(config: &UpstreamConfig) -> Result<Option<Self>> {
        match config.api_key() {
            Some(key) => Self::new(config, key).map(Some),
            None => Ok(None),
        }
    }

    /// Endpoint the client posts to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_prompt(message: &str) -> String {
        format!(
            "Educational Assistant: I'll help answer your question.\n\nStudent: {}\n\nEducational Assistant:",
            message
        )
    }
}

#[async_trait]
impl TextGenerator for HuggingFaceClient {
    async fn generate(&self, message: &str) -> Result<String> {
        let payload = InferenceRequest {
            inputs: Self::build_prompt(message),
            parameters: InferenceParameters {
                max_new_tokens: self.max_new_tokens,
                temperature: self.temperature,
                return_full_text: false,
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Timeout(format!("Inference request timed out: {}", e))
                } else {
                    Error::Upstream(format!("Inference request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!(
                "Inference API returned {}: {}",
                status, body
            )));
        }

        let parsed: InferenceResponse = response
            .json()
            .await
            .map_err(|e| Error::Upstream(format!("Failed to parse inference response: {}", e)))?;

        parsed
            .into_text()
            .ok_or_else(|| Error::Upstream("Inference API returned no text".to_string()))
    }

    fn source(&self) -> &str {
        HUGGINGFACE_SOURCE
    }
}
