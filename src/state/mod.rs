//! Shared session state.
//!
//! Holds the one [`SessionSnapshot`] the process serves and the
//! [`StateStore`] that guards it between the event ingestor and the HTTP
//! handlers.

mod snapshot;
mod store;

pub use snapshot::{LocalSelection, Mutation, SessionSnapshot, DEFAULT_GUIDE_TEXT, UNKNOWN_ROLE};
pub use store::StateStore;
