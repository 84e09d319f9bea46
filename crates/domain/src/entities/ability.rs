//! Ability entity - a character ability with a round-based cooldown.

use serde::{Deserialize, Serialize};

use crate::ids::{AbilityId, CharacterId, GameId};

/// A usable ability scoped to a game.
///
/// `current_cooldown` counts rounds until the ability is usable again; it is
/// floored at zero, never removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ability {
    pub id: AbilityId,
    pub game_id: GameId,
    pub character_id: CharacterId,
    pub name: String,
    pub cooldown_max: i64,
    pub current_cooldown: i64,
}

impl Ability {
    pub fn new(
        game_id: GameId,
        character_id: CharacterId,
        name: impl Into<String>,
        cooldown_max: i64,
    ) -> Self {
        Self {
            id: AbilityId::new(),
            game_id,
            character_id,
            name: name.into(),
            cooldown_max,
            current_cooldown: 0,
        }
    }

    pub fn on_cooldown(mut self) -> Self {
        self.current_cooldown = self.cooldown_max;
        self
    }

    pub fn is_ready(&self) -> bool {
        self.current_cooldown == 0
    }
}

/// Report from an ability cooldown tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CooldownTickResult {
    /// Abilities whose cooldown reached zero this tick.
    pub ready: Vec<Ability>,
    /// Abilities still cooling down.
    pub cooling: Vec<Ability>,
}
