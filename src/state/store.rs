//! Shared snapshot storage.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{Mutation, SessionSnapshot};

/// Thread-safe holder of the single live snapshot.
///
/// One writer (the event ingestor) and any number of readers (HTTP
/// requests) share it through an `Arc`. Every `apply*` call takes the write
/// lock exactly once, so a reader sees either all or none of its mutations.
pub struct StateStore {
    snapshot: RwLock<SessionSnapshot>,
}

impl StateStore {
    /// Create a store holding the default snapshot.
    pub fn new() -> Self {
        Self::with_snapshot(SessionSnapshot::default())
    }

    /// Create a store seeded with the given snapshot.
    pub fn with_snapshot(snapshot: SessionSnapshot) -> Self {
        Self {
            snapshot: RwLock::new(snapshot),
        }
    }

    /// Get a consistent copy of the current snapshot.
    pub fn read(&self) -> SessionSnapshot {
        self.read_guard().clone()
    }

    /// Apply one mutation.
    pub fn apply(&self, mutation: Mutation) {
        self.write_guard().apply(mutation);
    }

    /// Apply several mutations as one indivisible update.
    pub fn apply_all<I>(&self, mutations: I)
    where
        I: IntoIterator<Item = Mutation>,
    {
        let mut snapshot = self.write_guard();
        for mutation in mutations {
            snapshot.apply(mutation);
        }
    }

    /// Current backend reachability.
    pub fn is_connected(&self) -> bool {
        self.read_guard().is_connected
    }

    // Mutations never panic mid-update, so a poisoned lock still holds a
    // whole snapshot.
    fn read_guard(&self) -> RwLockReadGuard<'_, SessionSnapshot> {
        self.snapshot.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, SessionSnapshot> {
        self.snapshot.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::LocalSelection;
    use std::sync::Arc;
    use std::thread;

    fn local(champion_id: u64) -> Mutation {
        Mutation::MergeLocal(LocalSelection {
            champion_id,
            pick_intent_id: champion_id,
            role: "JUNGLE".into(),
        })
    }

    #[test]
    fn test_read_defaults() {
        let store = StateStore::new();
        assert_eq!(store.read(), SessionSnapshot::default());
        assert!(!store.is_connected());
    }

    #[test]
    fn test_apply_connected() {
        let store = StateStore::new();
        store.apply(Mutation::SetConnected(true));
        assert!(store.is_connected());
        store.apply(Mutation::SetConnected(false));
        assert!(!store.is_connected());
    }

    #[test]
    fn test_apply_all() {
        let store = StateStore::new();
        store.apply_all([local(64), Mutation::ReplaceEnemies(vec![1, 2])]);

        let snapshot = store.read();
        assert_eq!(snapshot.my_champion_id, 64);
        assert_eq!(snapshot.enemy_ids, vec![1, 2]);
        assert_eq!(snapshot.assigned_role, "JUNGLE");
    }

    #[test]
    fn test_read_is_a_copy() {
        let store = StateStore::new();
        let before = store.read();
        store.apply(Mutation::ReplaceEnemies(vec![5]));
        assert!(before.enemy_ids.is_empty());
        assert_eq!(store.read().enemy_ids, vec![5]);
    }

    #[test]
    fn test_concurrent_readers_never_see_torn_update() {
        let store = Arc::new(StateStore::new());
        store.apply_all([local(0), Mutation::ReplaceEnemies(vec![0, 0])]);

        let writer = {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for k in 1..=2000u64 {
                    store.apply_all([local(k), Mutation::ReplaceEnemies(vec![k, k])]);
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..2000 {
                        let snapshot = store.read();
                        assert_eq!(snapshot.enemy_ids, vec![snapshot.my_champion_id; 2]);
                        assert_eq!(snapshot.my_pick_intent_id, snapshot.my_champion_id);
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }

        assert_eq!(store.read().my_champion_id, 2000);
    }

    #[test]
    fn test_concurrent_writers() {
        let store = Arc::new(StateStore::new());
        let handles: Vec<_> = (0..16u64)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    store.apply_all([local(i), Mutation::ReplaceEnemies(vec![i; 5])]);
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = store.read();
        assert_eq!(snapshot.enemy_ids, vec![snapshot.my_champion_id; 5]);
    }
}
