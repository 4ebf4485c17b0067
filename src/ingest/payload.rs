//! Lenient reading of champion-select session payloads.
//!
//! Payloads arrive from an external client and may be partial or oddly
//! shaped. Nothing here fails: absent or mistyped numbers read as 0, absent
//! sequences read as empty, and a missing local-player match simply yields
//! no local selection.

use serde_json::Value;

use crate::state::{LocalSelection, Mutation, UNKNOWN_ROLE};

/// One entry of the local player's own roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamMember {
    pub cell_id: Option<i64>,
    pub champion_id: u64,
    pub champion_pick_intent: u64,
    pub assigned_position: Option<String>,
}

impl TeamMember {
    fn from_value(value: &Value) -> Self {
        Self {
            cell_id: value.get("cellId").and_then(Value::as_i64),
            champion_id: id_field(value, "championId"),
            champion_pick_intent: id_field(value, "championPickIntent"),
            assigned_position: value
                .get("assignedPosition")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        }
    }

    /// The selection this entry reports for the local player.
    pub fn selection(&self) -> LocalSelection {
        LocalSelection {
            champion_id: self.champion_id,
            pick_intent_id: self.champion_pick_intent,
            role: self
                .assigned_position
                .clone()
                .unwrap_or_else(|| UNKNOWN_ROLE.to_string()),
        }
    }
}

/// The parts of a champion-select session the bridge cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChampSelectSession {
    pub local_player_cell_id: Option<i64>,
    pub my_team: Vec<TeamMember>,
    /// Locked champion per opposing slot, in reported order.
    pub their_team: Vec<u64>,
}

impl ChampSelectSession {
    /// Read a session from an arbitrary JSON value.
    pub fn from_value(value: &Value) -> Self {
        Self {
            local_player_cell_id: value.get("localPlayerCellId").and_then(Value::as_i64),
            my_team: array_field(value, "myTeam")
                .map(TeamMember::from_value)
                .collect(),
            their_team: array_field(value, "theirTeam")
                .map(|member| id_field(member, "championId"))
                .collect(),
        }
    }

    /// The own-roster entry whose cell matches the local player, if any.
    pub fn local_player(&self) -> Option<&TeamMember> {
        let cell_id = self.local_player_cell_id?;
        self.my_team
            .iter()
            .find(|member| member.cell_id == Some(cell_id))
    }

    /// Mutations this session implies, to be applied together.
    ///
    /// The enemy roster is always replaced; the local selection only when
    /// the local player was found.
    pub fn mutations(&self) -> Vec<Mutation> {
        let mut mutations = Vec::with_capacity(2);
        if let Some(member) = self.local_player() {
            mutations.push(Mutation::MergeLocal(member.selection()));
        }
        mutations.push(Mutation::ReplaceEnemies(self.their_team.clone()));
        mutations
    }
}

fn id_field(value: &Value, key: &str) -> u64 {
    value.get(key).and_then(Value::as_u64).unwrap_or(0)
}

fn array_field<'a>(value: &'a Value, key: &str) -> impl Iterator<Item = &'a Value> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter())
        .into_iter()
        .flatten()
}
