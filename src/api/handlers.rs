//! REST API handlers.

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::state::{SessionSnapshot, StateStore};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<StateStore>,
}

impl AppState {
    pub fn new(store: Arc<StateStore>) -> Self {
        Self { store }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(StateStore::new()))
    }
}

/// Current session snapshot.
pub async fn get_state(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.store.read())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Mutation;

    #[tokio::test]
    async fn test_get_state_defaults() {
        let Json(snapshot) = get_state(State(AppState::default())).await;
        assert_eq!(snapshot, SessionSnapshot::default());
    }

    #[tokio::test]
    async fn test_get_state_reflects_store() {
        let state = AppState::default();
        state.store.apply(Mutation::SetConnected(true));
        state.store.apply(Mutation::ReplaceEnemies(vec![1, 2, 3]));

        let Json(snapshot) = get_state(State(state.clone())).await;
        assert!(snapshot.is_connected);
        assert_eq!(snapshot.enemy_ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_get_state_does_not_mutate() {
        let state = AppState::default();
        let before = state.store.read();
        let _ = get_state(State(state.clone())).await;
        let _ = get_state(State(state.clone())).await;
        assert_eq!(state.store.read(), before);
    }
}
