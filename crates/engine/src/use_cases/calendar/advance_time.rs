//! Advance time use case - the scheduling core.
//!
//! Moves a game's clock by a duration, fires every pending scheduled event
//! whose trigger time was crossed, and reschedules recurring events.

use std::cmp::Ordering;
use std::sync::Arc;

use chroniclr_domain::{AdvanceDuration, AdvanceResult, GameId};
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::infrastructure::ports::{GameClockRepo, ScheduledEventRepo};

use super::error::CalendarError;

/// Per-game async locks serializing concurrent advances.
///
/// The advance is a multi-step read-modify-write; holding the game's lock for
/// its whole span keeps the triggered/recurring bookkeeping consistent.
/// Distinct games share no state and advance independently.
#[derive(Default)]
pub struct AdvanceLocks {
    locks: DashMap<GameId, Arc<Mutex<()>>>,
}

impl AdvanceLocks {
    pub fn new() -> Self {
        Self::default()
    }

    async fn acquire(&self, game_id: GameId) -> OwnedMutexGuard<()> {
        let lock = self.locks.entry(game_id).or_default().clone();
        lock.lock_owned().await
    }
}

/// Advance time use case.
///
/// Fires an event when its trigger time lies in the closed interval
/// `[previous, new]`: a zero-duration advance fires events at exactly the
/// current instant, and a backward advance (new before previous) fires
/// nothing. Recurring events are rescheduled once per advance, stepped from
/// their own trigger time, and stay pending; non-recurring events are marked
/// triggered permanently.
pub struct AdvanceTime {
    clock_repo: Arc<dyn GameClockRepo>,
    event_repo: Arc<dyn ScheduledEventRepo>,
    locks: AdvanceLocks,
}

impl AdvanceTime {
    pub fn new(
        clock_repo: Arc<dyn GameClockRepo>,
        event_repo: Arc<dyn ScheduledEventRepo>,
    ) -> Self {
        Self {
            clock_repo,
            event_repo,
            locks: AdvanceLocks::new(),
        }
    }

    pub async fn execute(
        &self,
        game_id: GameId,
        duration: AdvanceDuration,
    ) -> Result<AdvanceResult, CalendarError> {
        let _guard = self.locks.acquire(game_id).await;

        let mut clock = self
            .clock_repo
            .get(game_id)
            .await?
            .ok_or(CalendarError::NotInitialized)?;
        let cfg = clock.calendar.clone();
        let previous_time = clock.current_time;

        let new_minutes = cfg.to_epoch_minutes(&previous_time) + duration.total_minutes(&cfg);
        let new_time = cfg.from_epoch_minutes(new_minutes);

        clock.current_time = new_time;
        self.clock_repo.save(&clock).await?;

        let candidates = self.event_repo.list_pending(game_id).await?;
        let mut triggered_events = Vec::new();

        for mut event in candidates {
            let in_window = cfg.compare(&event.trigger_time, &previous_time) != Ordering::Less
                && cfg.compare(&event.trigger_time, &new_time) != Ordering::Greater;
            if !in_window {
                continue;
            }

            let mut snapshot = event.clone();
            snapshot.triggered = true;
            triggered_events.push(snapshot);

            match event.recurring {
                Some(rule) => {
                    // One reschedule per advance, even when the duration
                    // spans several recurrence periods.
                    event.trigger_time = rule.next_trigger(&event.trigger_time, &cfg);
                }
                None => event.triggered = true,
            }
            self.event_repo.save(&event).await?;
        }

        tracing::info!(
            game_id = %game_id,
            from = %cfg.format(&previous_time),
            to = %cfg.format(&new_time),
            fired = triggered_events.len(),
            "Advanced game time"
        );

        Ok(AdvanceResult {
            previous_time,
            new_time,
            triggered_events,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex as StdMutex;

    use super::*;
    use crate::infrastructure::ports::{MockGameClockRepo, MockScheduledEventRepo};
    use chrono::Utc;
    use chroniclr_domain::{
        CalendarConfig, GameClock, GameDateTime, Recurrence, ScheduledEvent,
    };

    fn tiny_calendar() -> CalendarConfig {
        // 2 months of 3 days each, 2 hours/day, 60 minutes/hour.
        CalendarConfig {
            month_names: vec!["First".into(), "Second".into()],
            days_per_month: vec![3, 3],
            hours_per_day: 2,
            minutes_per_hour: 60,
            start_year: 1,
            era_name: None,
        }
    }

    struct Fixture {
        clock_repo: MockGameClockRepo,
        event_repo: MockScheduledEventRepo,
        saved_events: Arc<StdMutex<Vec<ScheduledEvent>>>,
    }

    fn fixture(
        game_id: GameId,
        calendar: CalendarConfig,
        start: GameDateTime,
        events: Vec<ScheduledEvent>,
    ) -> Fixture {
        let clock = GameClock::new(game_id, start, calendar);

        let mut clock_repo = MockGameClockRepo::new();
        let clock_for_get = clock.clone();
        clock_repo
            .expect_get()
            .returning(move |_| Ok(Some(clock_for_get.clone())));
        clock_repo.expect_save().returning(|_| Ok(()));

        let saved_events = Arc::new(StdMutex::new(Vec::new()));
        let mut event_repo = MockScheduledEventRepo::new();
        event_repo
            .expect_list_pending()
            .returning(move |_| Ok(events.clone()));
        let sink = saved_events.clone();
        event_repo.expect_save().returning(move |e| {
            sink.lock().expect("sink lock").push(e.clone());
            Ok(())
        });

        Fixture {
            clock_repo,
            event_repo,
            saved_events,
        }
    }

    fn event_at(game_id: GameId, trigger: GameDateTime) -> ScheduledEvent {
        ScheduledEvent::new(game_id, "bell tolls", trigger, Utc::now())
    }

    #[tokio::test]
    async fn when_no_clock_exists_then_not_initialized_and_nothing_mutated() {
        let mut clock_repo = MockGameClockRepo::new();
        clock_repo.expect_get().returning(|_| Ok(None));
        clock_repo.expect_save().times(0);
        let mut event_repo = MockScheduledEventRepo::new();
        event_repo.expect_list_pending().times(0);

        let use_case = AdvanceTime::new(Arc::new(clock_repo), Arc::new(event_repo));
        let result = use_case
            .execute(GameId::new(), AdvanceDuration::days(1))
            .await;

        assert!(matches!(result, Err(CalendarError::NotInitialized)));
    }

    #[tokio::test]
    async fn four_day_advance_crosses_the_month_boundary_and_fires_crossed_events() {
        // 6-day years, start at the epoch, advance 4 days.
        let start = GameDateTime::new(1, 0, 0, 0, 0);
        let game_id = GameId::new();
        let crossed = event_at(game_id, GameDateTime::new(1, 0, 2, 1, 0));
        let f = fixture(game_id, tiny_calendar(), start, vec![crossed]);

        let use_case = AdvanceTime::new(Arc::new(f.clock_repo), Arc::new(f.event_repo));
        let result = use_case
            .execute(game_id, AdvanceDuration::days(4))
            .await
            .expect("advance should succeed");

        assert_eq!(result.previous_time, start);
        assert_eq!(result.new_time, GameDateTime::new(1, 1, 1, 0, 0));
        assert_eq!(result.triggered_events.len(), 1);
        assert!(result.triggered_events[0].triggered);

        let saved = f.saved_events.lock().expect("saved");
        assert_eq!(saved.len(), 1);
        assert!(saved[0].triggered, "non-recurring event persists as triggered");
    }

    #[tokio::test]
    async fn boundary_events_fire_and_one_minute_past_does_not() {
        let cal = tiny_calendar();
        let start = GameDateTime::new(1, 0, 1, 0, 0);
        let game_id = GameId::new();

        let at_start = event_at(game_id, start);
        let at_end = event_at(game_id, GameDateTime::new(1, 0, 2, 0, 0));
        let past_end = event_at(game_id, GameDateTime::new(1, 0, 2, 0, 1));
        let f = fixture(game_id, cal, start, vec![at_start.clone(), at_end.clone(), past_end]);

        let use_case = AdvanceTime::new(Arc::new(f.clock_repo), Arc::new(f.event_repo));
        let result = use_case
            .execute(game_id, AdvanceDuration::days(1))
            .await
            .expect("advance should succeed");

        let fired: Vec<_> = result.triggered_events.iter().map(|e| e.id).collect();
        assert_eq!(fired, vec![at_start.id, at_end.id]);
    }

    #[tokio::test]
    async fn zero_duration_advance_fires_only_events_at_the_current_instant() {
        let start = GameDateTime::new(1, 1, 2, 1, 30);
        let game_id = GameId::new();
        let now_event = event_at(game_id, start);
        let later = event_at(game_id, GameDateTime::new(1, 1, 2, 1, 31));
        let f = fixture(game_id, tiny_calendar(), start, vec![now_event.clone(), later]);

        let use_case = AdvanceTime::new(Arc::new(f.clock_repo), Arc::new(f.event_repo));
        let result = use_case
            .execute(game_id, AdvanceDuration::default())
            .await
            .expect("advance should succeed");

        assert_eq!(result.new_time, result.previous_time);
        assert_eq!(result.triggered_events.len(), 1);
        assert_eq!(result.triggered_events[0].id, now_event.id);
    }

    #[tokio::test]
    async fn backward_advance_moves_the_clock_but_fires_nothing() {
        let start = GameDateTime::new(2, 0, 0, 0, 0);
        let game_id = GameId::new();
        let earlier = event_at(game_id, GameDateTime::new(1, 1, 2, 0, 0));
        let f = fixture(game_id, tiny_calendar(), start, vec![earlier]);

        let use_case = AdvanceTime::new(Arc::new(f.clock_repo), Arc::new(f.event_repo));
        let result = use_case
            .execute(game_id, AdvanceDuration::days(-1))
            .await
            .expect("advance should succeed");

        assert_eq!(result.new_time, GameDateTime::new(1, 1, 2, 0, 0));
        assert!(result.triggered_events.is_empty());
        assert!(f.saved_events.lock().expect("saved").is_empty());
    }

    #[tokio::test]
    async fn recurring_event_is_rescheduled_one_period_and_stays_pending() {
        let start = GameDateTime::new(1, 0, 0, 0, 0);
        let game_id = GameId::new();
        let trigger = GameDateTime::new(1, 0, 1, 1, 0);
        let daily = event_at(game_id, trigger).with_recurrence(Recurrence::Daily);
        let f = fixture(game_id, tiny_calendar(), start, vec![daily.clone()]);

        let use_case = AdvanceTime::new(Arc::new(f.clock_repo), Arc::new(f.event_repo));
        // Spans several recurrence periods; only one reschedule happens.
        let result = use_case
            .execute(game_id, AdvanceDuration::days(5))
            .await
            .expect("advance should succeed");

        assert_eq!(result.triggered_events.len(), 1);
        assert!(result.triggered_events[0].triggered);

        let saved = f.saved_events.lock().expect("saved");
        assert_eq!(saved.len(), 1);
        assert!(!saved[0].triggered, "recurring event stays schedulable");
        // Stepped exactly one day (2h * 60m) from its own trigger time.
        assert_eq!(saved[0].trigger_time, GameDateTime::new(1, 0, 2, 1, 0));
    }

    #[tokio::test]
    async fn events_outside_the_window_are_left_untouched() {
        let start = GameDateTime::new(1, 0, 0, 0, 0);
        let game_id = GameId::new();
        let far_future = event_at(game_id, GameDateTime::new(3, 0, 0, 0, 0));
        let f = fixture(game_id, tiny_calendar(), start, vec![far_future]);

        let use_case = AdvanceTime::new(Arc::new(f.clock_repo), Arc::new(f.event_repo));
        let result = use_case
            .execute(game_id, AdvanceDuration::days(1))
            .await
            .expect("advance should succeed");

        assert!(result.triggered_events.is_empty());
        assert!(f.saved_events.lock().expect("saved").is_empty());
    }
}
