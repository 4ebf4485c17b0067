//! Callback interface of the protocol client and the ingestor behind it.

use std::sync::Arc;

use tracing::{debug, info};

use super::event::{ConnectionHandle, SessionEvent, CHAMP_SELECT_SESSION_URI};
use super::payload::ChampSelectSession;
use crate::api::SnapshotServer;
use crate::state::{Mutation, StateStore};

/// Callbacks a protocol client invokes as its connection and events change.
///
/// Implementations must return promptly; they run on the client's own
/// dispatch loop.
pub trait SessionEventHandler: Send + Sync {
    /// The client completed a handshake with the backend.
    fn on_ready(&self, connection: &ConnectionHandle);

    /// The client lost its backend connection.
    fn on_close(&self, connection: &ConnectionHandle);

    /// The backend pushed an API event.
    fn on_session_event(&self, connection: &ConnectionHandle, event: &SessionEvent);
}

/// Turns protocol-client callbacks into snapshot mutations.
pub struct EventIngestor {
    store: Arc<StateStore>,
    server: Arc<SnapshotServer>,
}

impl EventIngestor {
    pub fn new(store: Arc<StateStore>, server: Arc<SnapshotServer>) -> Self {
        Self { store, server }
    }

    pub fn store(&self) -> &Arc<StateStore> {
        &self.store
    }
}

impl SessionEventHandler for EventIngestor {
    fn on_ready(&self, connection: &ConnectionHandle) {
        self.store.apply(Mutation::SetConnected(true));
        info!(%connection, "Connected to client backend");

        if self.server.ensure_started() {
            debug!("Snapshot server startup requested");
        }
    }

    fn on_close(&self, connection: &ConnectionHandle) {
        self.store.apply(Mutation::SetConnected(false));
        info!(%connection, "Client backend connection closed");
    }

    fn on_session_event(&self, connection: &ConnectionHandle, event: &SessionEvent) {
        if event.uri != CHAMP_SELECT_SESSION_URI || !event.kind.carries_session() {
            debug!(%connection, uri = %event.uri, kind = ?event.kind, "Ignoring event");
            return;
        }

        let session = ChampSelectSession::from_value(&event.data);
        let local_found = session.local_player().is_some();
        self.store.apply_all(session.mutations());

        debug!(
            %connection,
            kind = ?event.kind,
            local_found,
            enemies = session.their_team.len(),
            "Applied champion-select session"
        );
    }
}
