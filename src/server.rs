//! HTTP server lifecycle

use crate::api::{build_app, AppState};
use crate::config::ClassmateConfig;
use crate::error::{Error, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Server state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    /// Not started
    Stopped,
    /// Binding the listener
    Starting,
    /// Serving requests
    Running,
    /// Draining in-flight requests
    ShuttingDown,
}

/// Classmate HTTP server
pub struct Server {
    config: ClassmateConfig,
    app_state: AppState,
    state: Arc<RwLock<ServerState>>,
    local_addr: RwLock<Option<SocketAddr>>,
    shutdown: Mutex<Option<CancellationToken>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl Server {
    /// Create a new server from configuration
    pub fn new(config: ClassmateConfig) -> Result<Self> {
        let app_state = AppState::from_config(&config)?;
        Ok(Self {
            config,
            app_state,
            state: Arc::new(RwLock::new(ServerState::Stopped)),
            local_addr: RwLock::new(None),
            shutdown: Mutex::new(None),
            task: Mutex::new(None),
        })
    }

    /// Get the current state
    pub async fn state(&self) -> ServerState {
        *self.state.read().await
    }

    /// Address the listener is bound to while running
    pub async fn local_addr(&self) -> Option<SocketAddr> {
        *self.local_addr.read().await
    }

    /// Configuration the server was built with
    pub fn config(&self) -> &ClassmateConfig {
        &self.config
    }

    /// Start serving
    pub async fn start(&self) -> Result<()> {
        let mut state = self.state.write().await;
        if *state != ServerState::Stopped {
            return Err(Error::Server("Server already running".to_string()));
        }
        *state = ServerState::Starting;
        drop(state);

        let addr = format!("{}:{}", self.config.server.host, self.config.server.port);
        let listener = match tokio::net::TcpListener::bind(&addr).await {
            Ok(listener) => listener,
            Err(e) => {
                *self.state.write().await = ServerState::Stopped;
                return Err(Error::Server(format!("Failed to bind {}: {}", addr, e)));
            }
        };
        let bound = listener.local_addr()?;

        let token = CancellationToken::new();
        let mut app_state = self.app_state.clone();
        app_state.shutdown = token.clone();
        let app = build_app(app_state, &self.config.server.cors_origins);

        // Pay the warm-up before the first request arrives
        let initializer = self.app_state.initializer.clone();
        tokio::spawn(async move {
            if let Err(e) = initializer.ensure_ready().await {
                tracing::warn!("Engine warm-up failed: {}", e);
            }
        });

        let graceful = token.clone();
        let task = tokio::spawn(async move {
            let result = axum::serve(listener, app)
                .with_graceful_shutdown(async move { graceful.cancelled().await })
                .await;
            if let Err(e) = result {
                tracing::error!("HTTP server error: {}", e);
            }
        });

        *self.shutdown.lock().await = Some(token);
        *self.task.lock().await = Some(task);
        *self.local_addr.write().await = Some(bound);
        *self.state.write().await = ServerState::Running;

        tracing::info!("Classmate listening on {}", bound);
        Ok(())
    }

    /// Stop serving, abandoning in-flight upstream calls
    pub async fn stop(&self) -> Result<()> {
        let mut state = self.state.write().await;
        if *state != ServerState::Running {
            return Ok(());
        }
        *state = ServerState::ShuttingDown;
        drop(state);

        tracing::info!("Stopping Classmate server");

        if let Some(token) = self.shutdown.lock().await.take() {
            token.cancel();
        }
        if let Some(task) = self.task.lock().await.take() {
            if let Err(e) = task.await {
                tracing::warn!("Server task ended abnormally: {}", e);
            }
        }

        *self.local_addr.write().await = None;
        *self.state.write().await = ServerState::Stopped;

        tracing::info!("Classmate server stopped");
        Ok(())
    }
}

/// Builder for Server
pub struct ServerBuilder {
    config: ClassmateConfig,
}

impl ServerBuilder {
    /// Create a new builder with default config
    pub fn new() -> Self {
        Self {
            config: ClassmateConfig::default(),
        }
    }

    /// Set the configuration
    pub fn config(mut self, config: ClassmateConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the bind host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.server.host = host.into();
        self
    }

    /// Set the bind port
    pub fn port(mut self, port: u16) -> Self {
        self.config.server.port = port;
        self
    }

    /// Build the server
    pub fn build(self) -> Result<Server> {
        Server::new(self.config)
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
