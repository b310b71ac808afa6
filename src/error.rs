//! Error taxonomy surfaced to engine callers.
//!
//! Every rejected precondition maps to its own variant so a caller can tell
//! it apart from success and from other failures. None of them are fatal:
//! `TransientContention` asks for a retry, the rest describe a request that
//! cannot be honored against the current state.

use crate::core::PlayerId;
use crate::store::StoreError;

/// Errors surfaced while resolving an action through the engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("{0} not found")]
    PlayerNotFound(PlayerId),

    #[error("no player named `{0}`")]
    UsernameNotFound(String),

    #[error("{0} is incapacitated and cannot act")]
    ActorIncapacitated(PlayerId),

    #[error("no other players to steal from")]
    NoTargetsAvailable,

    #[error("{0} cannot target themselves")]
    SelfTarget(PlayerId),

    #[error("username `{0}` is already taken")]
    UsernameTaken(String),

    #[error("players are busy, try again")]
    TransientContention,

    #[error("player store failed: {0}")]
    Store(#[from] StoreError),
}

impl EngineError {
    /// True when a referenced player could not be resolved.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PlayerNotFound(_) | Self::UsernameNotFound(_))
    }

    /// True when the caller should simply retry.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::TransientContention)
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
