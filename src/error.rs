//! Error types shared across the crate

use thiserror::Error;

use crate::persistence::StorageError;
use crate::roster::InvalidRoster;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Lookup of a name that is not a giver in the current mapping
    #[error("Unknown participant: {0}")]
    UnknownParticipant(String),

    /// No name was selected before asking for an assignment
    #[error("No participant selected")]
    NoSelection,

    /// Derivation hit its configured attempt cap without producing a derangement
    #[error("Derivation gave up after {attempts} attempts")]
    DerivationExhausted { attempts: u32 },

    /// Persisted assignments failed to parse or validate
    #[error("Corrupt persisted assignments: {0}")]
    CorruptPersistedState(String),

    #[error("Invalid roster: {0}")]
    InvalidRoster(#[from] InvalidRoster),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
