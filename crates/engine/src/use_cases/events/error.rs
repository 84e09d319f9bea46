//! Errors shared by the scheduled event use cases.

use chroniclr_domain::DomainError;

use crate::infrastructure::ports::RepoError;

#[derive(Debug, thiserror::Error)]
pub enum EventError {
    /// Events hang off a game's clock; scheduling against a game with no
    /// calendar has no timeline to anchor to.
    #[error("Game clock not initialized")]
    ClockNotInitialized,
    #[error("Invalid input: {0}")]
    Validation(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
