//! Recognised configuration keys.

/// Requested cost strategy name.
pub const WEIGHTING: &str = "weighting";

/// Alternative strategy key; wins over [`WEIGHTING`] when non-empty.
pub const WEIGHTING_METHOD: &str = "weighting_method";

/// Explicit traversal-mode request (`true` = edge-based).
pub const EDGE_BASED: &str = "edge_based";

/// Enables soft-modifier composition.
pub const CUSTOM_WEIGHTINGS: &str = "custom_weightings";

/// Switches resolution to the isochrone path.
pub const ISOCHRONE_WEIGHTING: &str = "isochroneWeighting";

/// Requests time-dependent speed evaluation.
pub const TIME_DEPENDENT_SPEED: &str = "time_dependent_speed";

/// Optional speed cap (km/h) for time-based strategies.
pub const MAXIMUM_SPEED: &str = "maximum_speed";

/// Prefix of every namespaced soft-modifier key: `weighting_#<name>_<param>`.
pub const MODIFIER_PREFIX: &str = "weighting_#";
