//! Errors shared by the calendar use cases.

use chroniclr_domain::DomainError;

use crate::infrastructure::ports::RepoError;

#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    /// No clock exists for the game yet; the caller must establish a
    /// calendar first. Recoverable, nothing was mutated.
    #[error("Game clock not initialized")]
    NotInitialized,
    #[error("Invalid input: {0}")]
    Validation(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
