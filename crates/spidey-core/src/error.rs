//! Error types for spidey.
//!
//! The state cells themselves never fail; these errors belong to the layers
//! around them (configuration, input validation, output).

use thiserror::Error;

/// spidey error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Query is empty")]
    EmptyQuery,
}

/// Result type alias for spidey operations.
pub type Result<T> = std::result::Result<T, Error>;
