//! Events delivered by the protocol client.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

/// Endpoint whose events describe the champion-select session.
pub const CHAMP_SELECT_SESSION_URI: &str = "/lol-champ-select/v1/session";

/// Opaque handle identifying one connection of the protocol client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionHandle {
    /// Monotonic connection number, starting at 1 for the first handshake.
    pub id: u64,
    /// Where the connection's events come from.
    pub source: String,
}

impl ConnectionHandle {
    pub fn new(id: u64, source: impl Into<String>) -> Self {
        Self {
            id,
            source: source.into(),
        }
    }
}

impl fmt::Display for ConnectionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}@{}", self.id, self.source)
    }
}

/// Kind of change an API event reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum EventKind {
    #[serde(alias = "CREATE", alias = "create")]
    Create,
    #[serde(alias = "UPDATE", alias = "update")]
    Update,
    #[serde(alias = "DELETE", alias = "delete")]
    Delete,
}

impl EventKind {
    /// Whether this kind carries a session body worth ingesting.
    pub fn carries_session(&self) -> bool {
        matches!(self, EventKind::Create | EventKind::Update)
    }
}

/// A named API event with its JSON payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SessionEvent {
    pub uri: String,
    #[serde(rename = "eventType")]
    pub kind: EventKind,
    #[serde(default)]
    pub data: Value,
}

impl SessionEvent {
    pub fn new(uri: impl Into<String>, kind: EventKind, data: Value) -> Self {
        Self {
            uri: uri.into(),
            kind,
            data,
        }
    }

    /// Shorthand for an update of the champion-select session.
    pub fn champ_select_update(data: Value) -> Self {
        Self::new(CHAMP_SELECT_SESSION_URI, EventKind::Update, data)
    }
}
