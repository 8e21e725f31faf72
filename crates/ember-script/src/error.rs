//! Error types for ember-script

use thiserror::Error;

/// Configuration loading error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("Duplicate definition: {0}")]
    DuplicateDefinition(String),

    #[error("Unknown effect: {0}")]
    UnknownEffect(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
