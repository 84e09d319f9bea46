//! Ability cooldown ticker.

use std::sync::Arc;

use chroniclr_domain::{CooldownTickResult, DomainError, GameId};

use crate::infrastructure::ports::AbilityRepo;

use super::error::TickerError;

/// Advance combat rounds for a game's cooling-down abilities.
///
/// Cooldowns floor at zero; an ability whose cooldown reaches zero is
/// reported as ready but kept, since it goes back on cooldown next use.
pub struct TickCooldowns {
    ability_repo: Arc<dyn AbilityRepo>,
}

impl TickCooldowns {
    pub fn new(ability_repo: Arc<dyn AbilityRepo>) -> Self {
        Self { ability_repo }
    }

    pub async fn execute(
        &self,
        game_id: GameId,
        rounds: i64,
    ) -> Result<CooldownTickResult, TickerError> {
        if rounds < 1 {
            return Err(DomainError::validation("rounds must be at least 1").into());
        }

        let abilities = self.ability_repo.list_on_cooldown(game_id).await?;
        let mut ready = Vec::new();
        let mut cooling = Vec::new();

        for mut ability in abilities {
            ability.current_cooldown = (ability.current_cooldown - rounds).max(0);
            self.ability_repo.save(&ability).await?;
            if ability.is_ready() {
                ready.push(ability);
            } else {
                cooling.push(ability);
            }
        }

        tracing::debug!(
            game_id = %game_id,
            rounds,
            ready = ready.len(),
            cooling = cooling.len(),
            "Ticked ability cooldowns"
        );
        Ok(CooldownTickResult { ready, cooling })
    }
}
