use thiserror::Error;

/// Errors surfaced by the repositories and the photo slot.
///
/// The store's `load` never errors (a missing or corrupt document reads as
/// empty); everything that mutates state reports through this enum.
#[derive(Error, Debug)]
pub enum Error {
    /// Empty or otherwise unusable input, e.g. a whitespace-only title.
    #[error("validation failed: {0}")]
    ValidationFailed(String),

    /// A positional index or stable id that matches nothing.
    #[error("not found: {0}")]
    NotFound(String),

    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
