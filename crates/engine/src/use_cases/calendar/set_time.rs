//! Set time use case.
//!
//! Direct clock override, bypassing the advancer: no events fire.

use std::sync::Arc;

use chroniclr_domain::{GameClock, GameDateTime, GameId};

use crate::infrastructure::ports::GameClockRepo;

use super::error::CalendarError;

/// Set the clock to an exact time.
///
/// The date must be canonical under the game's calendar; non-canonical dates
/// are rejected here so the converter's round-trip law never sees them.
pub struct SetTime {
    clock_repo: Arc<dyn GameClockRepo>,
}

impl SetTime {
    pub fn new(clock_repo: Arc<dyn GameClockRepo>) -> Self {
        Self { clock_repo }
    }

    pub async fn execute(
        &self,
        game_id: GameId,
        time: GameDateTime,
    ) -> Result<GameClock, CalendarError> {
        let mut clock = self
            .clock_repo
            .get(game_id)
            .await?
            .ok_or(CalendarError::NotInitialized)?;

        clock.calendar.validate_date(&time)?;

        clock.current_time = time;
        self.clock_repo.save(&clock).await?;

        tracing::debug!(game_id = %game_id, time = %clock.display(), "Set game time");
        Ok(clock)
    }
}
