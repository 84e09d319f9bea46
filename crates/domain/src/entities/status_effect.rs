//! Status effect entity - a condition on a character with an optional
//! round-based duration.

use serde::{Deserialize, Serialize};

use crate::ids::{CharacterId, GameId, StatusEffectId};

/// A condition applied to a character.
///
/// `duration_rounds` counts combat rounds, an opaque caller-supplied unit
/// decoupled from calendar time. `None` means the effect does not expire on
/// its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEffect {
    pub id: StatusEffectId,
    pub game_id: GameId,
    pub character_id: CharacterId,
    pub name: String,
    pub description: Option<String>,
    pub duration_rounds: Option<i64>,
}

impl StatusEffect {
    pub fn new(game_id: GameId, character_id: CharacterId, name: impl Into<String>) -> Self {
        Self {
            id: StatusEffectId::new(),
            game_id,
            character_id,
            name: name.into(),
            description: None,
            duration_rounds: None,
        }
    }

    pub fn with_duration(mut self, rounds: i64) -> Self {
        self.duration_rounds = Some(rounds);
        self
    }
}

/// Report from a status-effect duration tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEffectTickResult {
    /// Effects whose duration reached zero and were removed.
    pub expired: Vec<StatusEffect>,
    /// Effects still active, with decremented durations.
    pub remaining: Vec<StatusEffect>,
}
