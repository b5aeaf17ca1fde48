//! Two-stage chat answering
//!
//! Stage one asks the upstream generator, bounded by a timeout and the
//! caller's cancellation token. Any stage-one failure is logged and dropped;
//! stage two, the local rule engine, always produces an answer.

use crate::config::ClassmateConfig;
use crate::engine::{Initializer, ResponseSelector};
use crate::error::{Error, Result};
use crate::upstream::{HuggingFaceClient, TextGenerator, SIMULATED_SOURCE};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Answer produced for one chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    /// Answer text, never empty
    pub content: String,
    /// Which path produced `content`
    pub source: String,
    /// Rule that fired on the local path
    pub rule: Option<String>,
}

/// Chat answering service
pub struct ChatService {
    selector: ResponseSelector,
    generator: Option<Arc<dyn TextGenerator>>,
    initializer: Arc<Initializer>,
    rng: Mutex<StdRng>,
    upstream_timeout: Duration,
}

impl ChatService {
    pub fn new(
        selector: ResponseSelector,
        generator: Option<Arc<dyn TextGenerator>>,
        initializer: Arc<Initializer>,
        rng: StdRng,
        upstream_timeout: Duration,
    ) -> Self {
        Self {
            selector,
            generator,
            initializer,
            rng: Mutex::new(rng),
            upstream_timeout,
        }
    }

    /// Build the service from configuration.
    ///
    /// The upstream generator is enabled only when its credential is present
    /// in the environment.
    pub fn from_config(config: &ClassmateConfig, initializer: Arc<Initializer>) -> Result<Self> {
        let generator = HuggingFaceClient::from_config(&config.upstream)?
            .map(|client| Arc::new(client) as Arc<dyn TextGenerator>);

        if generator.is_some() {
            tracing::info!(model = %config.upstream.model, "Upstream text generation enabled");
        } else {
            tracing::info!("No upstream credential found, using rule-based responses");
        }

        let rng = match config.engine.fallback_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self::new(
            ResponseSelector::default(),
            generator,
            initializer,
            rng,
            config.upstream.timeout(),
        ))
    }

    /// Whether an upstream generator is configured
    pub fn has_upstream(&self) -> bool {
        self.generator.is_some()
    }

    /// Answer a message. Never fails.
    pub async fn respond(&self, message: &str) -> ChatReply {
        self.respond_with_cancel(message, &CancellationToken::new())
            .await
    }

    /// Answer a message, abandoning the upstream stage if `cancel` fires
    pub async fn respond_with_cancel(
        &self,
        message: &str,
        cancel: &CancellationToken,
    ) -> ChatReply {
        if let Err(e) = self.initializer.ensure_ready().await {
            tracing::warn!("Engine warm-up failed, continuing with rule engine: {}", e);
        }

        if let Some(generator) = &self.generator {
            match self.generate_upstream(generator.as_ref(), message, cancel).await {
                Ok(content) => {
                    return ChatReply {
                        content,
                        source: generator.source().to_string(),
                        rule: None,
                    };
                }
                Err(e) => {
                    tracing::warn!(
                        source = generator.source(),
                        "Upstream generation failed, falling back: {}",
                        e
                    );
                }
            }
        }

        self.respond_locally(message)
    }

    /// Stage two only
    pub fn respond_locally(&self, message: &str) -> ChatReply {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        let selection = self.selector.select(message, &mut *rng);

        match selection.rule {
            Some(rule) => tracing::debug!(rule, "Rule matched"),
            None => tracing::debug!("No rule matched, using fallback prompt"),
        }

        ChatReply {
            content: selection.response.to_string(),
            source: SIMULATED_SOURCE.to_string(),
            rule: selection.rule.map(str::to_string),
        }
    }

    async fn generate_upstream(
        &self,
        generator: &dyn TextGenerator,
        message: &str,
        cancel: &CancellationToken,
    ) -> Result<String> {
        let text = tokio::select! {
            _ = cancel.cancelled() => {
                return Err(Error::Upstream("request cancelled".to_string()));
            }
            result = tokio::time::timeout(self.upstream_timeout, generator.generate(message)) => result??,
        };

        if text.trim().is_empty() {
            return Err(Error::Upstream("empty generation".to_string()));
        }
        Ok(text)
    }
}
