//! Testability ports for injecting time.

use chrono::{DateTime, Utc};

/// Real-world clock, used only for row bookkeeping (`created_at`), never for
/// fictional game time.
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
