//! SQLite implementations of the repository ports.

pub mod ability_repo;
pub mod clock_repo;
pub mod connection;
pub mod effect_repo;
pub mod event_repo;

pub use ability_repo::SqliteAbilityRepo;
pub use clock_repo::SqliteGameClockRepo;
pub use connection::{connect, ensure_schema};
pub use effect_repo::SqliteStatusEffectRepo;
pub use event_repo::SqliteScheduledEventRepo;
