//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors.
///
/// All of these are fatal: the build aborts before any content I/O starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no `config.daphne` found in `{0}`")]
    Missing(PathBuf),

    #[error("unable to read `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    /// The serde_json error carries the line/column of the parse failure.
    #[error("failed to parse `{0}`: {1}")]
    Json(PathBuf, #[source] serde_json::Error),
}
