//! Status effect ticker.

use std::sync::Arc;

use chroniclr_domain::{DomainError, GameId, StatusEffectTickResult};

use crate::infrastructure::ports::StatusEffectRepo;

use super::error::TickerError;

/// Advance combat rounds for a game's timed status effects.
///
/// Each timed effect loses `rounds` from its remaining duration; effects that
/// reach zero or below are removed and reported as expired. Indefinite
/// effects (no duration) are never touched by the ticker.
pub struct TickStatusEffects {
    effect_repo: Arc<dyn StatusEffectRepo>,
}

impl TickStatusEffects {
    pub fn new(effect_repo: Arc<dyn StatusEffectRepo>) -> Self {
        Self { effect_repo }
    }

    pub async fn execute(
        &self,
        game_id: GameId,
        rounds: i64,
    ) -> Result<StatusEffectTickResult, TickerError> {
        if rounds < 1 {
            return Err(DomainError::validation("rounds must be at least 1").into());
        }

        let effects = self.effect_repo.list_timed_for_game(game_id).await?;
        let mut expired = Vec::new();
        let mut remaining = Vec::new();

        for mut effect in effects {
            let left = match effect.duration_rounds {
                Some(rounds_left) => rounds_left - rounds,
                // list_timed_for_game only returns timed effects.
                None => continue,
            };

            if left <= 0 {
                self.effect_repo.delete(effect.id).await?;
                expired.push(effect);
            } else {
                effect.duration_rounds = Some(left);
                self.effect_repo.save(&effect).await?;
                remaining.push(effect);
            }
        }

        tracing::debug!(
            game_id = %game_id,
            rounds,
            expired = expired.len(),
            remaining = remaining.len(),
            "Ticked status effects"
        );
        Ok(StatusEffectTickResult { expired, remaining })
    }
}
