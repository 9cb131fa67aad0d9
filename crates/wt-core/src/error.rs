//! Core error type.
//!
//! Sub-crates wrap `CoreError` as one variant of their own enum via `#[from]`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("query string error: {0}")]
    Query(#[from] serde_qs::Error),
}

/// Shorthand result type for `wt-core`.
pub type CoreResult<T> = Result<T, CoreError>;
