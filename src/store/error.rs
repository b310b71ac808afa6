use crate::core::PlayerId;

/// Errors raised by a player store.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("player store lock was poisoned")]
    LockPoisoned,

    #[error("username `{0}` already exists")]
    DuplicateUsername(String),

    #[error("{0} appears more than once")]
    DuplicateId(PlayerId),

    #[error("{0} does not exist")]
    MissingRecord(PlayerId),

    #[error("{0} cannot change its username")]
    UsernameChanged(PlayerId),

    #[error("snapshot error: {0}")]
    Snapshot(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
