//! Scheduled event entity - a future (or recurring) trigger on the game clock.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::{CalendarConfig, GameDateTime};
use crate::ids::{GameId, ScheduledEventId};

/// How a fired event's next trigger time is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recurrence {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Recurrence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recurrence::Daily => "daily",
            Recurrence::Weekly => "weekly",
            Recurrence::Monthly => "monthly",
            Recurrence::Yearly => "yearly",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "daily" => Some(Recurrence::Daily),
            "weekly" => Some(Recurrence::Weekly),
            "monthly" => Some(Recurrence::Monthly),
            "yearly" => Some(Recurrence::Yearly),
            _ => None,
        }
    }

    /// Next occurrence after a firing, stepped from the event's current
    /// trigger time (not the advanced clock).
    ///
    /// Monthly steps add the length of the month the trigger currently sits
    /// in; on irregular calendars this drifts across month boundaries. That
    /// is the documented behavior, kept deliberately.
    pub fn next_trigger(&self, current: &GameDateTime, cfg: &CalendarConfig) -> GameDateTime {
        let step = match self {
            Recurrence::Daily => cfg.minutes_per_day(),
            Recurrence::Weekly => 7 * cfg.minutes_per_day(),
            Recurrence::Monthly => {
                let days = cfg
                    .days_per_month
                    .get(current.month as usize)
                    .copied()
                    .unwrap_or(1) as i64;
                days * cfg.minutes_per_day()
            }
            Recurrence::Yearly => cfg.minutes_per_year(),
        };
        cfg.from_epoch_minutes(cfg.to_epoch_minutes(current) + step)
    }
}

impl std::fmt::Display for Recurrence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named trigger scheduled against a game's fictional time.
///
/// Non-recurring events are terminal once `triggered` is set. Recurring
/// events never set `triggered`; their `trigger_time` is replaced by the next
/// occurrence each time they fire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledEvent {
    pub id: ScheduledEventId,
    pub game_id: GameId,
    pub name: String,
    pub description: Option<String>,
    pub trigger_time: GameDateTime,
    pub recurring: Option<Recurrence>,
    pub triggered: bool,
    /// Free-form caller metadata, passed through untouched.
    pub metadata: serde_json::Value,
    /// Real-world creation timestamp (bookkeeping, not fictional time).
    pub created_at: DateTime<Utc>,
}

impl ScheduledEvent {
    pub fn new(
        game_id: GameId,
        name: impl Into<String>,
        trigger_time: GameDateTime,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ScheduledEventId::new(),
            game_id,
            name: name.into(),
            description: None,
            trigger_time,
            recurring: None,
            triggered: false,
            metadata: serde_json::Value::Null,
            created_at,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurring = Some(recurrence);
        self
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }
}
