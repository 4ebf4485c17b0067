//! # lcu-bridge
//!
//! Bridges the game client's push-based champion-select events to a
//! pull-based HTTP snapshot for overlays.
//!
//! A protocol client reports connection lifecycle and session events
//! through [`SessionEventHandler`]. The [`EventIngestor`] folds them into
//! the single shared [`SessionSnapshot`] held by a [`StateStore`], and the
//! [`SnapshotServer`] serves that snapshot at `GET /state`, starting on the
//! first successful connection.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use lcu_bridge::api::{ServerConfig, SnapshotServer};
//! use lcu_bridge::ingest::{EventFeed, FeedSource};
//! use lcu_bridge::{EventIngestor, StateStore};
//!
//! #[tokio::main]
//! async fn main() -> lcu_bridge::Result<()> {
//!     lcu_bridge::logging::try_init().ok();
//!
//!     let store = Arc::new(StateStore::new());
//!     let server = Arc::new(SnapshotServer::new(ServerConfig::default(), Arc::clone(&store)));
//!     let ingestor = EventIngestor::new(store, server);
//!
//!     let feed = EventFeed::open(&FeedSource::Stdin).await?;
//!     feed.run(&ingestor).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod ingest;
pub mod logging;
pub mod state;

// Re-export commonly used types
pub use api::{ServerConfig, ServerPhase, SnapshotServer};
pub use error::{BridgeError, Result};
pub use ingest::{
    ChampSelectSession, ConnectionHandle, EventIngestor, SessionEvent, SessionEventHandler,
};
pub use state::{Mutation, SessionSnapshot, StateStore};
