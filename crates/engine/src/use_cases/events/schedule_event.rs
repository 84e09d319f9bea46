//! Schedule event use case.

use std::sync::Arc;

use chroniclr_domain::{GameDateTime, GameId, Recurrence, ScheduledEvent};

use crate::infrastructure::ports::{ClockPort, GameClockRepo, ScheduledEventRepo};

use super::error::EventError;

/// Parameters for scheduling a new event.
#[derive(Debug, Clone)]
pub struct ScheduleEventParams {
    pub name: String,
    pub description: Option<String>,
    pub trigger_time: GameDateTime,
    pub recurring: Option<Recurrence>,
    pub metadata: Option<serde_json::Value>,
}

/// Schedule a future (or past) event on a game's timeline.
///
/// The game must have an established calendar, and the trigger time must be
/// canonical under it. Scheduling in the past is allowed; such events fire on
/// the next advance that crosses them only if time moves backward first, so
/// in practice they sit pending.
pub struct ScheduleEvent {
    clock_repo: Arc<dyn GameClockRepo>,
    event_repo: Arc<dyn ScheduledEventRepo>,
    clock: Arc<dyn ClockPort>,
}

impl ScheduleEvent {
    pub fn new(
        clock_repo: Arc<dyn GameClockRepo>,
        event_repo: Arc<dyn ScheduledEventRepo>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            clock_repo,
            event_repo,
            clock,
        }
    }

    pub async fn execute(
        &self,
        game_id: GameId,
        params: ScheduleEventParams,
    ) -> Result<ScheduledEvent, EventError> {
        let game_clock = self
            .clock_repo
            .get(game_id)
            .await?
            .ok_or(EventError::ClockNotInitialized)?;

        game_clock.calendar.validate_date(&params.trigger_time)?;

        let mut event = ScheduledEvent::new(
            game_id,
            params.name,
            params.trigger_time,
            self.clock.now(),
        );
        if let Some(description) = params.description {
            event = event.with_description(description);
        }
        if let Some(rule) = params.recurring {
            event = event.with_recurrence(rule);
        }
        if let Some(metadata) = params.metadata {
            event = event.with_metadata(metadata);
        }

        self.event_repo.save(&event).await?;

        tracing::info!(
            game_id = %game_id,
            event_id = %event.id,
            trigger = %game_clock.calendar.format(&event.trigger_time),
            "Scheduled event"
        );
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::{MockGameClockRepo, MockScheduledEventRepo};
    use chrono::{TimeZone, Utc};
    use chroniclr_domain::{CalendarConfig, GameClock};

    fn params(trigger: GameDateTime) -> ScheduleEventParams {
        ScheduleEventParams {
            name: "festival of lanterns".into(),
            description: Some("the whole town turns out".into()),
            trigger_time: trigger,
            recurring: Some(Recurrence::Yearly),
            metadata: Some(serde_json::json!({"location": "market square"})),
        }
    }

    fn fixed_clock() -> Arc<FixedClock> {
        Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53)
                .single()
                .expect("valid timestamp"),
        ))
    }

    #[tokio::test]
    async fn schedules_a_valid_event() {
        let game_id = GameId::new();
        let mut clock_repo = MockGameClockRepo::new();
        let clock = GameClock::new(
            game_id,
            GameDateTime::new(1, 0, 0, 8, 0),
            CalendarConfig::default(),
        );
        clock_repo
            .expect_get()
            .returning(move |_| Ok(Some(clock.clone())));

        let mut event_repo = MockScheduledEventRepo::new();
        event_repo
            .expect_save()
            .withf(move |e| {
                e.game_id == game_id
                    && e.name == "festival of lanterns"
                    && e.recurring == Some(Recurrence::Yearly)
                    && !e.triggered
            })
            .times(1)
            .returning(|_| Ok(()));

        let use_case = ScheduleEvent::new(
            Arc::new(clock_repo),
            Arc::new(event_repo),
            fixed_clock(),
        );
        let event = use_case
            .execute(game_id, params(GameDateTime::new(2, 3, 14, 18, 0)))
            .await
            .expect("schedule should succeed");

        assert_eq!(event.trigger_time, GameDateTime::new(2, 3, 14, 18, 0));
        assert_eq!(event.metadata["location"], "market square");
    }

    #[tokio::test]
    async fn when_no_clock_exists_then_scheduling_is_refused() {
        let mut clock_repo = MockGameClockRepo::new();
        clock_repo.expect_get().returning(|_| Ok(None));
        let mut event_repo = MockScheduledEventRepo::new();
        event_repo.expect_save().times(0);

        let use_case = ScheduleEvent::new(
            Arc::new(clock_repo),
            Arc::new(event_repo),
            fixed_clock(),
        );
        let result = use_case
            .execute(GameId::new(), params(GameDateTime::new(1, 0, 0, 0, 0)))
            .await;

        assert!(matches!(result, Err(EventError::ClockNotInitialized)));
    }

    #[tokio::test]
    async fn when_trigger_time_is_not_canonical_then_rejected() {
        let game_id = GameId::new();
        let mut clock_repo = MockGameClockRepo::new();
        let clock = GameClock::new(
            game_id,
            GameDateTime::new(1, 0, 0, 8, 0),
            CalendarConfig::default(),
        );
        clock_repo
            .expect_get()
            .returning(move |_| Ok(Some(clock.clone())));
        let mut event_repo = MockScheduledEventRepo::new();
        event_repo.expect_save().times(0);

        let use_case = ScheduleEvent::new(
            Arc::new(clock_repo),
            Arc::new(event_repo),
            fixed_clock(),
        );
        // Hour 24 does not exist in a 24-hour day.
        let result = use_case
            .execute(game_id, params(GameDateTime::new(1, 0, 0, 24, 0)))
            .await;

        assert!(matches!(result, Err(EventError::Validation(_))));
    }
}
