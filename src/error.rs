//! Error types for scrib operations.

use thiserror::Error;

/// Errors that can occur while rendering or emitting documents.
///
/// Generation itself is total; the fallible edges are the YAML front-matter
/// collaborator, the CLI's output I/O, and the CLI's JSON tree dump.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[cfg(feature = "cli")]
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
