//! Scheduled event use cases.

use std::sync::Arc;

mod cancel_event;
mod error;
mod list_events;
mod schedule_event;

pub use cancel_event::CancelEvent;
pub use error::EventError;
pub use list_events::ListEvents;
pub use schedule_event::{ScheduleEvent, ScheduleEventParams};

/// Container for scheduled event use cases.
pub struct EventUseCases {
    pub schedule_event: Arc<ScheduleEvent>,
    pub list_events: Arc<ListEvents>,
    pub cancel_event: Arc<CancelEvent>,
}

impl EventUseCases {
    pub fn new(
        schedule_event: Arc<ScheduleEvent>,
        list_events: Arc<ListEvents>,
        cancel_event: Arc<CancelEvent>,
    ) -> Self {
        Self {
            schedule_event,
            list_events,
            cancel_event,
        }
    }
}
