//! List events use case.

use std::sync::Arc;

use chroniclr_domain::{GameId, ScheduledEvent};

use crate::infrastructure::ports::{GameClockRepo, ScheduledEventRepo};

use super::error::EventError;

/// List a game's scheduled events in trigger-time order.
///
/// Ordering is calendar-aware, so it lives here rather than in the store:
/// only the game's own calendar knows how its dates compare.
pub struct ListEvents {
    clock_repo: Arc<dyn GameClockRepo>,
    event_repo: Arc<dyn ScheduledEventRepo>,
}

impl ListEvents {
    pub fn new(
        clock_repo: Arc<dyn GameClockRepo>,
        event_repo: Arc<dyn ScheduledEventRepo>,
    ) -> Self {
        Self {
            clock_repo,
            event_repo,
        }
    }

    pub async fn execute(
        &self,
        game_id: GameId,
        include_triggered: bool,
    ) -> Result<Vec<ScheduledEvent>, EventError> {
        let clock = self
            .clock_repo
            .get(game_id)
            .await?
            .ok_or(EventError::ClockNotInitialized)?;

        let mut events = self
            .event_repo
            .list_for_game(game_id, include_triggered)
            .await?;
        events.sort_by(|a, b| clock.calendar.compare(&a.trigger_time, &b.trigger_time));
        Ok(events)
    }
}
