//! Graph-subsystem error type.

use thiserror::Error;

use wt_core::{CoreError, EdgeId};

/// Errors produced by `wt-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("edge {0} not found in network")]
    EdgeNotFound(EdgeId),

    #[error("network parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GraphResult<T> = Result<T, GraphError>;
