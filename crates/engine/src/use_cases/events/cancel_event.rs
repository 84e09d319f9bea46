//! Cancel event use case.

use std::sync::Arc;

use chroniclr_domain::ScheduledEventId;

use crate::infrastructure::ports::ScheduledEventRepo;

use super::error::EventError;

/// Remove a scheduled event outright.
///
/// Returns whether anything was deleted; cancelling an unknown id is a no-op,
/// not an error.
pub struct CancelEvent {
    event_repo: Arc<dyn ScheduledEventRepo>,
}

impl CancelEvent {
    pub fn new(event_repo: Arc<dyn ScheduledEventRepo>) -> Self {
        Self { event_repo }
    }

    pub async fn execute(&self, event_id: ScheduledEventId) -> Result<bool, EventError> {
        let deleted = self.event_repo.delete(event_id).await?;
        if deleted {
            tracing::debug!(event_id = %event_id, "Cancelled scheduled event");
        }
        Ok(deleted)
    }
}
