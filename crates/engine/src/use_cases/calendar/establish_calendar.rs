//! Establish calendar use case.
//!
//! Sets up (or replaces) a game's calendar and clock.

use std::sync::Arc;

use chroniclr_domain::{CalendarConfig, CalendarConfigPatch, GameClock, GameDateTime, GameId};

use crate::infrastructure::ports::GameClockRepo;

use super::error::CalendarError;

/// Establish calendar use case.
///
/// Merges caller overrides onto the default calendar, validates the result,
/// and upserts the game's clock. Calling again for the same game replaces the
/// existing clock (idempotent by game id).
pub struct EstablishCalendar {
    clock_repo: Arc<dyn GameClockRepo>,
}

impl EstablishCalendar {
    pub fn new(clock_repo: Arc<dyn GameClockRepo>) -> Self {
        Self { clock_repo }
    }

    /// # Arguments
    /// * `game_id` - The game to establish a calendar for
    /// * `overrides` - Calendar fields to override; absent fields keep defaults
    /// * `initial_time` - Starting clock position; defaults to 08:00 on the
    ///   first day of the epoch year
    pub async fn execute(
        &self,
        game_id: GameId,
        overrides: CalendarConfigPatch,
        initial_time: Option<GameDateTime>,
    ) -> Result<GameClock, CalendarError> {
        let calendar = overrides.apply(CalendarConfig::default());
        calendar.validate()?;

        let current_time = match initial_time {
            Some(dt) => {
                calendar.validate_date(&dt)?;
                dt
            }
            None => calendar.default_start_time(),
        };

        let clock = GameClock::new(game_id, current_time, calendar);
        self.clock_repo.save(&clock).await?;

        tracing::info!(game_id = %game_id, time = %clock.display(), "Established game calendar");
        Ok(clock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockGameClockRepo;

    #[tokio::test]
    async fn defaults_produce_an_eight_oclock_start() {
        let game_id = GameId::new();
        let mut clock_repo = MockGameClockRepo::new();
        clock_repo
            .expect_save()
            .withf(move |c| c.game_id == game_id)
            .times(1)
            .returning(|_| Ok(()));

        let use_case = EstablishCalendar::new(Arc::new(clock_repo));
        let clock = use_case
            .execute(game_id, CalendarConfigPatch::default(), None)
            .await
            .expect("establish should succeed");

        assert_eq!(clock.current_time, GameDateTime::new(1, 0, 0, 8, 0));
        assert_eq!(clock.calendar.month_names.len(), 12);
    }

    #[tokio::test]
    async fn overrides_and_initial_time_are_applied() {
        let game_id = GameId::new();
        let mut clock_repo = MockGameClockRepo::new();
        clock_repo.expect_save().returning(|_| Ok(()));

        let overrides = CalendarConfigPatch {
            month_names: Some(vec!["Dawn".into(), "Dusk".into()]),
            days_per_month: Some(vec![10, 12]),
            start_year: Some(500),
            ..Default::default()
        };
        let initial = GameDateTime::new(500, 1, 11, 23, 59);

        let use_case = EstablishCalendar::new(Arc::new(clock_repo));
        let clock = use_case
            .execute(game_id, overrides, Some(initial))
            .await
            .expect("establish should succeed");

        assert_eq!(clock.current_time, initial);
        assert_eq!(clock.calendar.days_per_year(), 22);
    }

    #[tokio::test]
    async fn establishing_twice_replaces_the_clock_for_the_same_game() {
        let game_id = GameId::new();
        let mut clock_repo = MockGameClockRepo::new();
        clock_repo
            .expect_save()
            .withf(move |c| c.game_id == game_id)
            .times(2)
            .returning(|_| Ok(()));

        let use_case = EstablishCalendar::new(Arc::new(clock_repo));
        use_case
            .execute(game_id, CalendarConfigPatch::default(), None)
            .await
            .expect("first establish should succeed");

        let overrides = CalendarConfigPatch {
            hours_per_day: Some(10),
            ..Default::default()
        };
        let clock = use_case
            .execute(game_id, overrides, None)
            .await
            .expect("re-establish should succeed");

        assert_eq!(clock.calendar.hours_per_day, 10);
    }

    #[tokio::test]
    async fn when_overrides_are_inconsistent_then_nothing_is_persisted() {
        let mut clock_repo = MockGameClockRepo::new();
        clock_repo.expect_save().times(0);

        let overrides = CalendarConfigPatch {
            month_names: Some(vec!["Only".into()]),
            days_per_month: Some(vec![10, 20]),
            ..Default::default()
        };

        let use_case = EstablishCalendar::new(Arc::new(clock_repo));
        let result = use_case
            .execute(GameId::new(), overrides, None)
            .await;

        assert!(matches!(result, Err(CalendarError::Validation(_))));
    }

    #[tokio::test]
    async fn when_initial_time_is_not_canonical_then_establish_fails() {
        let mut clock_repo = MockGameClockRepo::new();
        clock_repo.expect_save().times(0);

        let use_case = EstablishCalendar::new(Arc::new(clock_repo));
        // Day 30 does not exist in a 30-day month (0-based indices).
        let result = use_case
            .execute(
                GameId::new(),
                CalendarConfigPatch::default(),
                Some(GameDateTime::new(1, 0, 30, 0, 0)),
            )
            .await;

        assert!(matches!(result, Err(CalendarError::Validation(_))));
    }
}
