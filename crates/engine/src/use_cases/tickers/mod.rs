//! Round tickers.
//!
//! Combat-round bookkeeping that runs outside the calendar: status effect
//! durations and ability cooldowns are measured in rounds, not game minutes.

use std::sync::Arc;

mod error;
mod tick_cooldowns;
mod tick_status_effects;

pub use error::TickerError;
pub use tick_cooldowns::TickCooldowns;
pub use tick_status_effects::TickStatusEffects;

/// Container for the round tickers.
pub struct TickerUseCases {
    pub tick_status_effects: Arc<TickStatusEffects>,
    pub tick_cooldowns: Arc<TickCooldowns>,
}

impl TickerUseCases {
    pub fn new(
        tick_status_effects: Arc<TickStatusEffects>,
        tick_cooldowns: Arc<TickCooldowns>,
    ) -> Self {
        Self {
            tick_status_effects,
            tick_cooldowns,
        }
    }
}
