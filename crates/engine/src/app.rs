//! Application state and composition.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::infrastructure::{
    clock::SystemClock,
    ports::{AbilityRepo, ClockPort, GameClockRepo, ScheduledEventRepo, StatusEffectRepo},
    sqlite::{
        SqliteAbilityRepo, SqliteGameClockRepo, SqliteScheduledEventRepo, SqliteStatusEffectRepo,
    },
};
use crate::use_cases;

/// Main application state.
///
/// Holds the repository ports and use cases. Passed to HTTP handlers via
/// Axum state.
pub struct App {
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub calendar: use_cases::calendar::CalendarUseCases,
    pub events: use_cases::events::EventUseCases,
    pub tickers: use_cases::tickers::TickerUseCases,
    pub management: use_cases::management::ManagementUseCases,
}

impl App {
    /// Wire every use case against the SQLite-backed repositories.
    pub fn new(pool: SqlitePool) -> Self {
        let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);

        let clock_repo: Arc<dyn GameClockRepo> =
            Arc::new(SqliteGameClockRepo::new(pool.clone(), clock.clone()));
        let event_repo: Arc<dyn ScheduledEventRepo> =
            Arc::new(SqliteScheduledEventRepo::new(pool.clone()));
        let effect_repo: Arc<dyn StatusEffectRepo> =
            Arc::new(SqliteStatusEffectRepo::new(pool.clone()));
        let ability_repo: Arc<dyn AbilityRepo> = Arc::new(SqliteAbilityRepo::new(pool));

        let calendar = use_cases::calendar::CalendarUseCases::new(
            Arc::new(use_cases::calendar::EstablishCalendar::new(
                clock_repo.clone(),
            )),
            Arc::new(use_cases::calendar::GetClock::new(clock_repo.clone())),
            Arc::new(use_cases::calendar::SetTime::new(clock_repo.clone())),
            Arc::new(use_cases::calendar::AdvanceTime::new(
                clock_repo.clone(),
                event_repo.clone(),
            )),
        );

        let events = use_cases::events::EventUseCases::new(
            Arc::new(use_cases::events::ScheduleEvent::new(
                clock_repo.clone(),
                event_repo.clone(),
                clock,
            )),
            Arc::new(use_cases::events::ListEvents::new(
                clock_repo.clone(),
                event_repo.clone(),
            )),
            Arc::new(use_cases::events::CancelEvent::new(event_repo.clone())),
        );

        let tickers = use_cases::tickers::TickerUseCases::new(
            Arc::new(use_cases::tickers::TickStatusEffects::new(
                effect_repo.clone(),
            )),
            Arc::new(use_cases::tickers::TickCooldowns::new(ability_repo.clone())),
        );

        let management =
            use_cases::management::ManagementUseCases::new(Arc::new(
                use_cases::management::PurgeGame::new(
                    clock_repo,
                    event_repo,
                    effect_repo,
                    ability_repo,
                ),
            ));

        Self {
            use_cases: UseCases {
                calendar,
                events,
                tickers,
                management,
            },
        }
    }
}
