//! Get clock use case.

use std::sync::Arc;

use chroniclr_domain::{GameClock, GameId};

use crate::infrastructure::ports::GameClockRepo;

use super::error::CalendarError;

/// Fetch a game's clock, if its calendar has been established.
pub struct GetClock {
    clock_repo: Arc<dyn GameClockRepo>,
}

impl GetClock {
    pub fn new(clock_repo: Arc<dyn GameClockRepo>) -> Self {
        Self { clock_repo }
    }

    pub async fn execute(&self, game_id: GameId) -> Result<Option<GameClock>, CalendarError> {
        Ok(self.clock_repo.get(game_id).await?)
    }
}
