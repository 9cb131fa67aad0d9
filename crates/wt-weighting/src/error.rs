use thiserror::Error;

use wt_core::TravelMode;

/// Resolution failures.  Both are fatal to the request and are returned to
/// the caller untouched; nothing here is transient.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WeightingError {
    #[error(
        "edge-based traversal requested but travel mode {mode} has no turn cost support; \
         enable turn costs for the profile or set edge_based=false"
    )]
    UnsupportedTraversalMode { mode: TravelMode },

    #[error("weighting {name:?} cannot be used for isochrones; use \"shortest\" or \"fastest\"")]
    UnresolvableIsochroneMode { name: String },
}

pub type WeightingResult<T> = Result<T, WeightingError>;
