//! Calendar use cases.
//!
//! Everything that touches a game's clock: establishing the calendar,
//! reading it, overriding the time, and advancing it (which is where
//! scheduled events fire).

use std::sync::Arc;

mod advance_time;
mod error;
mod establish_calendar;
mod get_clock;
mod set_time;

pub use advance_time::AdvanceTime;
pub use error::CalendarError;
pub use establish_calendar::EstablishCalendar;
pub use get_clock::GetClock;
pub use set_time::SetTime;

/// Container for calendar use cases.
pub struct CalendarUseCases {
    pub establish_calendar: Arc<EstablishCalendar>,
    pub get_clock: Arc<GetClock>,
    pub set_time: Arc<SetTime>,
    pub advance_time: Arc<AdvanceTime>,
}

impl CalendarUseCases {
    pub fn new(
        establish_calendar: Arc<EstablishCalendar>,
        get_clock: Arc<GetClock>,
        set_time: Arc<SetTime>,
        advance_time: Arc<AdvanceTime>,
    ) -> Self {
        Self {
            establish_calendar,
            get_clock,
            set_time,
            advance_time,
        }
    }
}
