use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

// =============================================================================
// Calendar Configuration
// =============================================================================

/// The shape of a game's fictional calendar.
///
/// Month lengths may differ (irregular calendars are supported), but every
/// year has the same total length: there is no leap-year handling.
/// Once a game has scheduled events against a calendar, the calendar must be
/// treated as immutable - comparing dates across different calendars is
/// undefined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarConfig {
    /// Ordered month names; length defines the number of months in a year.
    pub month_names: Vec<String>,
    /// Days in each month, same length as `month_names`.
    pub days_per_month: Vec<u32>,
    pub hours_per_day: u32,
    pub minutes_per_hour: u32,
    /// The epoch's year value: epoch-minute 0 is `{start_year, 0, 0, 0, 0}`.
    pub start_year: i64,
    /// Display-only era label (e.g. "DR", "Third Age").
    pub era_name: Option<String>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            month_names: [
                "Deepwinter",
                "Thawmoon",
                "Seedfall",
                "Rainsward",
                "Blossomtide",
                "Highsun",
                "Emberwane",
                "Harvestmoon",
                "Goldleaf",
                "Mistral",
                "Frostgate",
                "Yearsend",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            days_per_month: vec![30; 12],
            hours_per_day: 24,
            minutes_per_hour: 60,
            start_year: 1,
            era_name: None,
        }
    }
}

impl CalendarConfig {
    /// Validate the structural invariants of the calendar.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.month_names.is_empty() {
            return Err(DomainError::validation(
                "Calendar must have at least one month",
            ));
        }
        if self.month_names.len() != self.days_per_month.len() {
            return Err(DomainError::validation(format!(
                "monthNames ({}) and daysPerMonth ({}) must have the same length",
                self.month_names.len(),
                self.days_per_month.len()
            )));
        }
        if self.days_per_month.iter().any(|&d| d == 0) {
            return Err(DomainError::validation("Every month needs at least one day"));
        }
        if self.hours_per_day == 0 {
            return Err(DomainError::validation("hoursPerDay must be positive"));
        }
        if self.minutes_per_hour == 0 {
            return Err(DomainError::validation("minutesPerHour must be positive"));
        }
        Ok(())
    }

    /// Check that a date is canonical under this calendar: valid month index,
    /// valid day for that month, hour and minute in range.
    pub fn validate_date(&self, dt: &GameDateTime) -> Result<(), DomainError> {
        let month = dt.month as usize;
        if month >= self.month_names.len() {
            return Err(DomainError::validation(format!(
                "Month index {} out of range (calendar has {} months)",
                dt.month,
                self.month_names.len()
            )));
        }
        if dt.day >= self.days_per_month[month] {
            return Err(DomainError::validation(format!(
                "Day {} out of range for {} ({} days)",
                dt.day, self.month_names[month], self.days_per_month[month]
            )));
        }
        if dt.hour >= self.hours_per_day {
            return Err(DomainError::validation(format!(
                "Hour {} out of range (day has {} hours)",
                dt.hour, self.hours_per_day
            )));
        }
        if dt.minute >= self.minutes_per_hour {
            return Err(DomainError::validation(format!(
                "Minute {} out of range (hour has {} minutes)",
                dt.minute, self.minutes_per_hour
            )));
        }
        Ok(())
    }

    pub fn days_per_year(&self) -> i64 {
        self.days_per_month.iter().map(|&d| d as i64).sum()
    }

    pub fn minutes_per_day(&self) -> i64 {
        self.hours_per_day as i64 * self.minutes_per_hour as i64
    }

    pub fn minutes_per_year(&self) -> i64 {
        self.days_per_year() * self.minutes_per_day()
    }

    /// Default clock position for a freshly established game: 08:00 on the
    /// first day of the epoch year.
    pub fn default_start_time(&self) -> GameDateTime {
        GameDateTime {
            year: self.start_year,
            month: 0,
            day: 0,
            hour: 8.min(self.hours_per_day - 1),
            minute: 0,
        }
    }

    // =========================================================================
    // Time Converter
    // =========================================================================

    /// Map a canonical date onto the linear epoch-minute axis.
    ///
    /// Minute 0 is `{start_year, month 0, day 0, 00:00}`. Dates before the
    /// epoch map to negative values.
    pub fn to_epoch_minutes(&self, dt: &GameDateTime) -> i64 {
        let days_before_month: i64 = self.days_per_month[..dt.month as usize]
            .iter()
            .map(|&d| d as i64)
            .sum();
        let total_days =
            (dt.year - self.start_year) * self.days_per_year() + days_before_month + dt.day as i64;
        (total_days * self.hours_per_day as i64 + dt.hour as i64) * self.minutes_per_hour as i64
            + dt.minute as i64
    }

    /// Inverse of [`to_epoch_minutes`](Self::to_epoch_minutes).
    ///
    /// Always returns a canonical date, including for negative (pre-epoch)
    /// inputs, by dividing euclideanly.
    pub fn from_epoch_minutes(&self, minutes: i64) -> GameDateTime {
        let mpy = self.minutes_per_year();
        let mpd = self.minutes_per_day();

        let year = self.start_year + minutes.div_euclid(mpy);
        let mut rem = minutes.rem_euclid(mpy);

        let mut day_of_year = rem.div_euclid(mpd);
        rem = rem.rem_euclid(mpd);

        let mut month = 0u32;
        for &days in &self.days_per_month {
            if day_of_year < days as i64 {
                break;
            }
            day_of_year -= days as i64;
            month += 1;
        }

        GameDateTime {
            year,
            month,
            day: day_of_year as u32,
            hour: (rem / self.minutes_per_hour as i64) as u32,
            minute: (rem % self.minutes_per_hour as i64) as u32,
        }
    }

    /// Total order over dates under this calendar.
    pub fn compare(&self, a: &GameDateTime, b: &GameDateTime) -> Ordering {
        self.to_epoch_minutes(a).cmp(&self.to_epoch_minutes(b))
    }

    /// Human-readable rendering: 1-based day, month name, year with era
    /// label if present, zero-padded hour:minute. Display-only.
    pub fn format(&self, dt: &GameDateTime) -> String {
        let month_name = self
            .month_names
            .get(dt.month as usize)
            .map(String::as_str)
            .unwrap_or("?");
        let year = match &self.era_name {
            Some(era) => format!("{} {}", dt.year, era),
            None => dt.year.to_string(),
        };
        format!(
            "{} {} {}, {:02}:{:02}",
            dt.day + 1,
            month_name,
            year,
            dt.hour,
            dt.minute
        )
    }
}

// =============================================================================
// Calendar Overrides
// =============================================================================

/// Caller-supplied overrides merged onto [`CalendarConfig::default`] when a
/// game establishes its calendar. Absent fields keep the default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarConfigPatch {
    pub month_names: Option<Vec<String>>,
    pub days_per_month: Option<Vec<u32>>,
    pub hours_per_day: Option<u32>,
    pub minutes_per_hour: Option<u32>,
    pub start_year: Option<i64>,
    pub era_name: Option<String>,
}

impl CalendarConfigPatch {
    /// Merge this patch onto a base configuration.
    pub fn apply(self, base: CalendarConfig) -> CalendarConfig {
        CalendarConfig {
            month_names: self.month_names.unwrap_or(base.month_names),
            days_per_month: self.days_per_month.unwrap_or(base.days_per_month),
            hours_per_day: self.hours_per_day.unwrap_or(base.hours_per_day),
            minutes_per_hour: self.minutes_per_hour.unwrap_or(base.minutes_per_hour),
            start_year: self.start_year.unwrap_or(base.start_year),
            era_name: self.era_name.or(base.era_name),
        }
    }
}

// =============================================================================
// Game Date/Time
// =============================================================================

/// A point in a game's fictional time.
///
/// `month` and `day` are 0-based indices into the calendar. Values produced
/// by the converter are always canonical; values supplied by callers are
/// validated at the operation boundary before they reach the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameDateTime {
    pub year: i64,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

impl GameDateTime {
    pub fn new(year: i64, month: u32, day: u32, hour: u32, minute: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
        }
    }
}

// =============================================================================
// Advance Duration
// =============================================================================

/// A span of fictional time to advance by. All fields default to 0; negative
/// components are accepted and move the clock backward.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AdvanceDuration {
    #[serde(default)]
    pub days: i64,
    #[serde(default)]
    pub hours: i64,
    #[serde(default)]
    pub minutes: i64,
}

impl AdvanceDuration {
    pub fn days(days: i64) -> Self {
        Self {
            days,
            ..Self::default()
        }
    }

    pub fn minutes(minutes: i64) -> Self {
        Self {
            minutes,
            ..Self::default()
        }
    }

    /// Total length in epoch-minutes under the given calendar.
    pub fn total_minutes(&self, cfg: &CalendarConfig) -> i64 {
        self.minutes
            + self.hours * cfg.minutes_per_hour as i64
            + self.days * cfg.minutes_per_day()
    }

    pub fn is_zero(&self) -> bool {
        self.days == 0 && self.hours == 0 && self.minutes == 0
    }
}
