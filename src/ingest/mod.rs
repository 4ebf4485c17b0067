//! Event ingestion.
//!
//! The protocol client reports connection lifecycle and API events through
//! the [`SessionEventHandler`] interface. [`EventIngestor`] implements it by
//! deriving snapshot mutations, and [`EventFeed`] is the line-based client
//! the binary uses to deliver those callbacks.

mod event;
mod feed;
mod handler;
mod payload;

pub use event::{ConnectionHandle, EventKind, SessionEvent, CHAMP_SELECT_SESSION_URI};
pub use feed::{EventFeed, FeedMessage, FeedSource, FeedStats};
pub use handler::{EventIngestor, SessionEventHandler};
pub use payload::{ChampSelectSession, TeamMember};
