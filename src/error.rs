// File: src/error.rs
use thiserror::Error;

/// Errors surfaced by the rhyme engine.
///
/// An invalid query and a query with no rhymes are ordinary outcomes, see
/// [`crate::core::types::QueryOutcome`]. Only caller-side faults land here.
#[derive(Error, Debug)]
pub enum RhymeError {
    #[error("corpus index has not been built; call build_index first")]
    IndexNotBuilt,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot error: incompatible version {actual}, expected <= {expected}")]
    IncompatibleSnapshot { expected: u32, actual: u32 },
}

pub type Result<T> = std::result::Result<T, RhymeError>;
