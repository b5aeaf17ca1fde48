//! One-shot engine initialization
//!
//! The engine pays a warm-up cost once per process. Concurrent callers share
//! a single in-flight warm-up: the first caller runs it while the rest wait on
//! the gate and observe `Ready` afterwards. A failed warm-up leaves the state
//! `Uninitialized` so the next caller retries.

use crate::error::{Error, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

/// Engine lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitState {
    /// Warm-up has not run yet
    Uninitialized,
    /// Warm-up is in progress
    Initializing,
    /// Engine is ready to serve
    Ready,
}

/// Warm-up routine run once before the engine serves requests
#[async_trait]
pub trait Warmup: Send + Sync {
    /// Perform the warm-up
    async fn warm_up(&self) -> Result<()>;
}

/// Warm-up that simply waits for a fixed delay
#[derive(Debug, Clone)]
pub struct SimulatedWarmup {
    delay: Duration,
}

impl SimulatedWarmup {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Warmup for SimulatedWarmup {
    async fn warm_up(&self) -> Result<()> {
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

/// Single-flight engine initializer
pub struct Initializer {
    state: RwLock<InitState>,
    gate: Mutex<()>,
    warmup: Arc<dyn Warmup>,
}

impl Initializer {
    pub fn new(warmup: Arc<dyn Warmup>) -> Self {
        Self {
            state: RwLock::new(InitState::Uninitialized),
            gate: Mutex::new(()),
            warmup,
        }
    }

    /// Initializer backed by a [`SimulatedWarmup`]
    pub fn simulated(delay: Duration) -> Self {
        Self::new(Arc::new(SimulatedWarmup::new(delay)))
    }

    /// Current lifecycle state
    pub async fn state(&self) -> InitState {
        *self.state.read().await
    }

    /// Whether the warm-up has completed
    pub async fn is_ready(&self) -> bool {
        self.state().await == InitState::Ready
    }

    /// Run the warm-up if it has not completed yet.
    ///
    /// Returns immediately once the engine is `Ready`.
    pub async fn ensure_ready(&self) -> Result<()> {
        if self.is_ready().await {
            return Ok(());
        }

        let _gate = self.gate.lock().await;

        // Another caller may have finished while we waited on the gate
        if self.is_ready().await {
            return Ok(());
        }

        *self.state.write().await = InitState::Initializing;
        tracing::debug!("Warming up response engine");

        match self.warmup.warm_up().await {
            Ok(()) => {
                *self.state.write().await = InitState::Ready;
                tracing::info!("Response engine ready");
                Ok(())
            }
            Err(e) => {
                *self.state.write().await = InitState::Uninitialized;
                tracing::warn!("Response engine warm-up failed: {}", e);
                Err(Error::Init(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingWarmup {
        runs: AtomicUsize,
        fail_first: bool,
    }

    impl CountingWarmup {
        fn new(fail_first: bool) -> Self {
            Self {
                runs: AtomicUsize::new(0),
                fail_first,
            }
        }
    }

    #[async_trait]
    impl Warmup for CountingWarmup {
        async fn warm_up(&self) -> Result<()> {
            let run = self.runs.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            if self.fail_first && run == 0 {
                return Err(Error::Internal("cold start".to_string()));
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_starts_uninitialized() {
        let init = Initializer::simulated(Duration::ZERO);
        assert_eq!(init.state().await, InitState::Uninitialized);
        init.ensure_ready().await.unwrap();
        assert_eq!(init.state().await, InitState::Ready);
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_warmup() {
        let warmup = Arc::new(CountingWarmup::new(false));
        let init = Arc::new(Initializer::new(warmup.clone()));

        let calls = (0..16).map(|_| {
            let init = init.clone();
            async move { init.ensure_ready().await }
        });
        let results = futures::future::join_all(calls).await;

        assert!(results.iter().all(|r| r.is_ok()));
        assert_eq!(warmup.runs.load(Ordering::SeqCst), 1);
        assert!(init.is_ready().await);
    }

    #[tokio::test]
    async fn test_spawned_callers_share_one_warmup() {
        let warmup = Arc::new(CountingWarmup::new(false));
        let init = Arc::new(Initializer::new(warmup.clone()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let init = init.clone();
                tokio::spawn(async move { init.ensure_ready().await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(warmup.runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_ready_is_not_rerun() {
        let warmup = Arc::new(CountingWarmup::new(false));
        let init = Initializer::new(warmup.clone());
        init.ensure_ready().await.unwrap();
        init.ensure_ready().await.unwrap();
        assert_eq!(warmup.runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_reverts_and_retries() {
        let warmup = Arc::new(CountingWarmup::new(true));
        let init = Initializer::new(warmup.clone());

        let err = init.ensure_ready().await.unwrap_err();
        assert!(matches!(err, Error::Init(_)));
        assert_eq!(init.state().await, InitState::Uninitialized);

        init.ensure_ready().await.unwrap();
        assert_eq!(init.state().await, InitState::Ready);
        assert_eq!(warmup.runs.load(Ordering::SeqCst), 2);
    }
}
