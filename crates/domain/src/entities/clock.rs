//! Game clock entity - one per game, pairing a calendar with the current time.

use serde::{Deserialize, Serialize};

use crate::calendar::{CalendarConfig, GameDateTime};
use crate::ids::GameId;

/// Per-game mutable clock state.
///
/// Created when a game establishes its calendar, mutated only by the time
/// advancer and by direct time-set. Destroyed with its game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameClock {
    pub game_id: GameId,
    pub current_time: GameDateTime,
    pub calendar: CalendarConfig,
}

impl GameClock {
    pub fn new(game_id: GameId, current_time: GameDateTime, calendar: CalendarConfig) -> Self {
        Self {
            game_id,
            current_time,
            calendar,
        }
    }

    /// Display string for the current clock position.
    pub fn display(&self) -> String {
        self.calendar.format(&self.current_time)
    }
}

/// Structured report returned by a time advance.
///
/// `triggered_events` are snapshots with `triggered: true`; recurring events
/// remain schedulable in the store with a rescheduled trigger time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvanceResult {
    pub previous_time: GameDateTime,
    pub new_time: GameDateTime,
    pub triggered_events: Vec<super::ScheduledEvent>,
}
