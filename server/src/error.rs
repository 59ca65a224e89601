use thiserror::Error;

use crate::{services::AccountError, store::StoreError};

/// Failures of a session request. The display text is what the player sees.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error("Please fill in both fields.")]
    MissingCredentials,
    #[error("This user is already logged in as Player {0}.")]
    AlreadyLoggedIn(u8),
    #[error("Both players must be logged in.")]
    PlayersMissing,
    #[error("Score {0} is out of range.")]
    ScoreOutOfRange(u32),
    #[error("Database error occurred")]
    Store(#[source] StoreError),
    #[error("Could not read message.")]
    Malformed(#[source] postcard::Error),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ScoreOutOfRange(score) => ServiceError::ScoreOutOfRange(score),
            other => ServiceError::Store(other),
        }
    }
}

impl ServiceError {
    /// Faults of the server rather than of the request
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            ServiceError::Store(_)
                | ServiceError::Account(AccountError::Store(_))
                | ServiceError::Account(AccountError::Hashing(_))
        )
    }
}
