//! Purge game use case.

use std::sync::Arc;

use chroniclr_domain::GameId;

use crate::infrastructure::ports::{
    AbilityRepo, GameClockRepo, RepoError, ScheduledEventRepo, StatusEffectRepo,
};

/// Remove everything Chroniclr holds for a game.
///
/// The clock owns the calendar and the other stores hang off the game id, so
/// a purge is four deletes. Idempotent: purging an unknown game succeeds.
pub struct PurgeGame {
    clock_repo: Arc<dyn GameClockRepo>,
    event_repo: Arc<dyn ScheduledEventRepo>,
    effect_repo: Arc<dyn StatusEffectRepo>,
    ability_repo: Arc<dyn AbilityRepo>,
}

impl PurgeGame {
    pub fn new(
        clock_repo: Arc<dyn GameClockRepo>,
        event_repo: Arc<dyn ScheduledEventRepo>,
        effect_repo: Arc<dyn StatusEffectRepo>,
        ability_repo: Arc<dyn AbilityRepo>,
    ) -> Self {
        Self {
            clock_repo,
            event_repo,
            effect_repo,
            ability_repo,
        }
    }

    pub async fn execute(&self, game_id: GameId) -> Result<(), RepoError> {
        self.event_repo.delete_for_game(game_id).await?;
        self.effect_repo.delete_for_game(game_id).await?;
        self.ability_repo.delete_for_game(game_id).await?;
        self.clock_repo.delete(game_id).await?;

        tracing::info!(game_id = %game_id, "Purged game data");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{
        MockAbilityRepo, MockGameClockRepo, MockScheduledEventRepo, MockStatusEffectRepo,
    };

    #[tokio::test]
    async fn purges_every_store_for_the_game() {
        let game_id = GameId::new();

        let mut clock_repo = MockGameClockRepo::new();
        clock_repo
            .expect_delete()
            .withf(move |id| *id == game_id)
            .times(1)
            .returning(|_| Ok(()));
        let mut event_repo = MockScheduledEventRepo::new();
        event_repo
            .expect_delete_for_game()
            .times(1)
            .returning(|_| Ok(()));
        let mut effect_repo = MockStatusEffectRepo::new();
        effect_repo
            .expect_delete_for_game()
            .times(1)
            .returning(|_| Ok(()));
        let mut ability_repo = MockAbilityRepo::new();
        ability_repo
            .expect_delete_for_game()
            .times(1)
            .returning(|_| Ok(()));

        let use_case = PurgeGame::new(
            Arc::new(clock_repo),
            Arc::new(event_repo),
            Arc::new(effect_repo),
            Arc::new(ability_repo),
        );
        use_case.execute(game_id).await.expect("purge should succeed");
    }
}
