//! The session snapshot served to pollers.

use serde::Serialize;

/// Role reported when the local player has no assigned position.
pub const UNKNOWN_ROLE: &str = "UNKNOWN";

/// Guide text shown until the first update arrives.
pub const DEFAULT_GUIDE_TEXT: &str = "等待游戏连接...";

/// Current champion-select status as seen by the overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// Whether the client backend is reachable.
    pub is_connected: bool,
    /// Locked champion of the local player, 0 when none.
    pub my_champion_id: u64,
    /// Hovered champion of the local player, 0 when none.
    pub my_pick_intent_id: u64,
    /// Locked champions of the opposing team in reported order, 0 = unknown.
    pub enemy_ids: Vec<u64>,
    /// Assigned position of the local player.
    pub assigned_role: String,
    /// Free-text status line for the overlay.
    pub guide_text: String,
}

impl SessionSnapshot {
    /// Create a snapshot with default values and the given guide text.
    pub fn with_guide_text(guide_text: impl Into<String>) -> Self {
        Self {
            guide_text: guide_text.into(),
            ..Self::default()
        }
    }

    /// Apply a single mutation in place.
    pub fn apply(&mut self, mutation: Mutation) {
        match mutation {
            Mutation::SetConnected(connected) => {
                self.is_connected = connected;
            }
            Mutation::MergeLocal(local) => {
                self.my_champion_id = local.champion_id;
                self.my_pick_intent_id = local.pick_intent_id;
                self.assigned_role = local.role;
            }
            Mutation::ReplaceEnemies(ids) => {
                self.enemy_ids = ids;
            }
        }
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            is_connected: false,
            my_champion_id: 0,
            my_pick_intent_id: 0,
            enemy_ids: Vec::new(),
            assigned_role: UNKNOWN_ROLE.to_string(),
            guide_text: DEFAULT_GUIDE_TEXT.to_string(),
        }
    }
}

/// The local player's selection as reported by the latest session event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalSelection {
    pub champion_id: u64,
    pub pick_intent_id: u64,
    pub role: String,
}

/// A change to the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Flip backend reachability.
    SetConnected(bool),
    /// Overwrite the three local-player fields.
    MergeLocal(LocalSelection),
    /// Replace the opposing roster wholesale.
    ReplaceEnemies(Vec<u64>),
}
