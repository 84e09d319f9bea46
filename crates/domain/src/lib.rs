extern crate self as chroniclr_domain;

pub mod calendar;
pub mod entities;
pub mod error;
pub mod ids;

// Re-export calendar types
pub use calendar::{AdvanceDuration, CalendarConfig, CalendarConfigPatch, GameDateTime};

// Re-export entities (explicit list in entities/mod.rs)
pub use entities::{
    Ability, AdvanceResult, CooldownTickResult, GameClock, Recurrence, ScheduledEvent,
    StatusEffect, StatusEffectTickResult,
};

pub use error::DomainError;

// Re-export ID types
pub use ids::{AbilityId, CharacterId, GameId, ScheduledEventId, StatusEffectId};
