//! Repository port traits for database access.

use async_trait::async_trait;
use chroniclr_domain::{
    Ability, GameClock, GameId, ScheduledEvent, ScheduledEventId, StatusEffect, StatusEffectId,
};

use super::error::RepoError;

// =============================================================================
// Game Clock Storage
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GameClockRepo: Send + Sync {
    async fn get(&self, game_id: GameId) -> Result<Option<GameClock>, RepoError>;
    /// Upsert: replaces any existing clock for the same game.
    async fn save(&self, clock: &GameClock) -> Result<(), RepoError>;
    async fn delete(&self, game_id: GameId) -> Result<(), RepoError>;
}

// =============================================================================
// Scheduled Event Storage
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScheduledEventRepo: Send + Sync {
    async fn get(&self, id: ScheduledEventId) -> Result<Option<ScheduledEvent>, RepoError>;
    async fn save(&self, event: &ScheduledEvent) -> Result<(), RepoError>;
    /// Returns true if a row existed and was removed.
    async fn delete(&self, id: ScheduledEventId) -> Result<bool, RepoError>;

    /// All events for a game; storage order is unspecified, callers order
    /// under the game's calendar.
    async fn list_for_game(
        &self,
        game_id: GameId,
        include_triggered: bool,
    ) -> Result<Vec<ScheduledEvent>, RepoError>;

    /// Non-triggered events for a game (advance candidates).
    async fn list_pending(&self, game_id: GameId) -> Result<Vec<ScheduledEvent>, RepoError>;

    async fn delete_for_game(&self, game_id: GameId) -> Result<(), RepoError>;
}

// =============================================================================
// Ticker Entity Storage
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatusEffectRepo: Send + Sync {
    async fn save(&self, effect: &StatusEffect) -> Result<(), RepoError>;
    async fn delete(&self, id: StatusEffectId) -> Result<(), RepoError>;
    /// Effects in a game with a non-null round duration.
    async fn list_timed_for_game(&self, game_id: GameId) -> Result<Vec<StatusEffect>, RepoError>;
    async fn delete_for_game(&self, game_id: GameId) -> Result<(), RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AbilityRepo: Send + Sync {
    async fn save(&self, ability: &Ability) -> Result<(), RepoError>;
    /// Abilities in a game with `current_cooldown > 0`.
    async fn list_on_cooldown(&self, game_id: GameId) -> Result<Vec<Ability>, RepoError>;
    async fn delete_for_game(&self, game_id: GameId) -> Result<(), RepoError>;
}
