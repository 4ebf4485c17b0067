//! Lazily started snapshot server.
//!
//! The server is requested every time the client backend connects, which
//! can happen many times per process. Only the first request binds; the
//! rest are no-ops.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{error, info};

use super::handlers::AppState;
use super::router::{bind, serve_on, ServerConfig, STATE_PATH};
use crate::error::BridgeError;
use crate::state::StateStore;

/// Lifecycle of the snapshot server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerPhase {
    NotStarted,
    Starting,
    Running(SocketAddr),
    Failed(String),
}

impl ServerPhase {
    /// Whether startup has finished one way or the other.
    pub fn is_settled(&self) -> bool {
        matches!(self, ServerPhase::Running(_) | ServerPhase::Failed(_))
    }
}

/// HTTP server exposing the shared snapshot at `/state`.
pub struct SnapshotServer {
    config: ServerConfig,
    store: Arc<StateStore>,
    started: AtomicBool,
    phase: watch::Sender<ServerPhase>,
}

impl SnapshotServer {
    pub fn new(config: ServerConfig, store: Arc<StateStore>) -> Self {
        let (phase, _) = watch::channel(ServerPhase::NotStarted);
        Self {
            config,
            store,
            started: AtomicBool::new(false),
            phase,
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Start serving unless a previous call already did.
    ///
    /// Returns `true` for the one call that initiated startup. Binding and
    /// serving happen on a spawned task, so this never blocks and must be
    /// called from within a tokio runtime.
    pub fn ensure_started(self: &Arc<Self>) -> bool {
        if self
            .started
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }

        self.phase.send_replace(ServerPhase::Starting);

        let server = Arc::clone(self);
        tokio::spawn(async move { server.run().await });
        true
    }

    async fn run(&self) {
        let listener = match bind(&self.config).await {
            Ok(listener) => listener,
            Err(e) => {
                error!("Snapshot server failed to start: {}", e);
                self.phase.send_replace(ServerPhase::Failed(e.to_string()));
                return;
            }
        };

        // Port 0 resolves to an ephemeral port only after binding.
        let addr = match listener.local_addr() {
            Ok(addr) => addr,
            Err(e) => {
                error!("Snapshot server has no local address: {}", e);
                self.phase.send_replace(ServerPhase::Failed(e.to_string()));
                return;
            }
        };

        info!("Snapshot server listening on http://{}{}", addr, STATE_PATH);
        self.phase.send_replace(ServerPhase::Running(addr));

        if let Err(e) = serve_on(listener, AppState::new(Arc::clone(&self.store))).await {
            error!("Snapshot server stopped: {}", e);
            self.phase.send_replace(ServerPhase::Failed(e.to_string()));
        }
    }

    /// Whether startup has been requested by any caller.
    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::Acquire)
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> ServerPhase {
        self.phase.borrow().clone()
    }

    /// Address the server is listening on, once running.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        match *self.phase.borrow() {
            ServerPhase::Running(addr) => Some(addr),
            _ => None,
        }
    }

    /// Wait until the server is running or has failed.
    ///
    /// Never resolves if startup was not requested.
    pub async fn wait_until_settled(&self) -> ServerPhase {
        self.wait_for(ServerPhase::is_settled).await
    }

    /// Resolve once the server has failed, yielding the reason.
    pub async fn failure(&self) -> BridgeError {
        match self
            .wait_for(|phase| matches!(phase, ServerPhase::Failed(_)))
            .await
        {
            ServerPhase::Failed(reason) => BridgeError::Server(reason),
            other => BridgeError::Server(format!("unexpected phase {:?}", other)),
        }
    }

    async fn wait_for(&self, predicate: impl FnMut(&ServerPhase) -> bool) -> ServerPhase {
        let mut rx = self.phase.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait.
        let phase = match rx.wait_for(predicate).await {
            Ok(phase) => phase.clone(),
            Err(_) => self.phase(),
        };
        phase
    }
}
