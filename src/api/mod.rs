//! API layer for lcu-bridge.
//!
//! Serves the shared session snapshot to pollers over HTTP.
//!
//! ## Endpoints
//!
//! - `GET /state` - Current session snapshot as JSON, with
//!   `Access-Control-Allow-Origin: *`
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use lcu_bridge::api::{ServerConfig, SnapshotServer};
//! use lcu_bridge::StateStore;
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = Arc::new(StateStore::new());
//!     let server = Arc::new(SnapshotServer::new(ServerConfig::default(), store));
//!     server.ensure_started();
//!     println!("{:?}", server.wait_until_settled().await);
//! }
//! ```

pub mod handlers;
pub mod router;
pub mod server;

// Re-export commonly used types
pub use handlers::AppState;
pub use router::{bind, create_router, serve_on, ServerConfig, STATE_PATH};
pub use server::{ServerPhase, SnapshotServer};
