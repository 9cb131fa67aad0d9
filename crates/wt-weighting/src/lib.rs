//! `wt-weighting` — turns a routing request's configuration into the edge
//! cost function its search will use.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`factory`]     | `resolve`, `resolve_for_isochrone`, selection rules       |
//! | [`cost`]        | `CostFunction` trait, `CostKind`                          |
//! | [`base`]        | `BaseStrategy` and the shortest/fastest/priority functions|
//! | [`speed`]       | `SpeedSource` trait, `GraphSpeed`                         |
//! | [`conditional`] | `ConditionalSpeedSource` time-dependent speed decorator   |
//! | [`modifier`]    | `SoftModifierKind` and the five soft modifiers            |
//! | [`addition`]    | `AdditionWeighting`, `compose_soft_weightings`            |
//! | [`namespace`]   | `weighting_#<name>_<param>` key decoding                  |
//! | [`traversal`]   | `EdgeTraversal`                                           |
//! | [`params`]      | recognised configuration keys                             |
//! | [`error`]       | `WeightingError`, `WeightingResult<T>`                    |
//!
//! # Example
//!
//! ```ignore
//! let config = Configuration::new().with("weighting", "fastest");
//! let cost = wt_weighting::resolve(&config, &FlagEncoder::new(TravelMode::Bike), &network, true)?;
//! let secs = cost.cost(&EdgeTraversal::forward(edge));
//! ```

pub mod addition;
pub mod base;
pub mod conditional;
pub mod cost;
pub mod error;
pub mod factory;
pub mod modifier;
pub mod namespace;
pub mod params;
pub mod speed;
pub mod traversal;


pub use addition::{compose_soft_weightings, AdditionWeighting};
pub use base::{BaseStrategy, FastestWeighting, PriorityWeighting, ShortestWeighting};
pub use conditional::{decorate_conditional_speed, ConditionalSpeedSource};
pub use cost::{CostFunction, CostKind};
pub use error::{WeightingError, WeightingResult};
pub use factory::{
    requested_weighting, resolve, resolve_for_isochrone, select_base_strategy,
    select_isochrone_strategy, traversal_mode, TraversalMode,
};
pub use modifier::{
    AccelerationWeighting, AvoidHillsWeighting, GreenWeighting, QuietWeighting,
    SoftModifierKind, SteepnessDifficultyWeighting,
};
pub use namespace::{decode_key, modifier_names, modifier_params, NamespacedKey};
pub use speed::{GraphSpeed, SpeedSource};
pub use traversal::EdgeTraversal;
