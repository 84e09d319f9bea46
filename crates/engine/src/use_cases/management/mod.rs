//! Game lifecycle use cases.

use std::sync::Arc;

mod purge_game;

pub use purge_game::PurgeGame;

/// Container for game lifecycle use cases.
pub struct ManagementUseCases {
    pub purge_game: Arc<PurgeGame>,
}

impl ManagementUseCases {
    pub fn new(purge_game: Arc<PurgeGame>) -> Self {
        Self { purge_game }
    }
}
