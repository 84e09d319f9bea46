//! Entity types - Plain data structs persisted per game.

pub mod ability;
pub mod clock;
pub mod scheduled_event;
pub mod status_effect;

pub use ability::{Ability, CooldownTickResult};
pub use clock::{AdvanceResult, GameClock};
pub use scheduled_event::{Recurrence, ScheduledEvent};
pub use status_effect::{StatusEffect, StatusEffectTickResult};
