//! Resolution of a request configuration into one composed cost function.
//!
//! # Pipeline
//!
//! ```text
//! isochrone? ──yes──► select_isochrone_strategy ──► base
//!     │
//!     no
//!     ▼
//! traversal_mode ──► select_base_strategy
//!                        │   ◄── decorate_conditional_speed (time_dependent_speed)
//!                        ▼       wraps the speed source the base reads
//!                      base
//!                        ▼
//!           compose_soft_weightings   (custom_weightings)
//! ```
//!
//! Resolution is a pure function of its inputs: it never mutates the
//! configuration, the capability object or the graph, and two calls with the
//! same inputs build equivalent cost functions.

use log::debug;

use wt_core::{ConfigValue, Configuration, TravelCapability};
use wt_graph::RoadNetwork;

use crate::addition::compose_soft_weightings;
use crate::conditional::decorate_conditional_speed;
use crate::{params, BaseStrategy, CostFunction, GraphSpeed, WeightingError, WeightingResult};

/// How a search expands the graph.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TraversalMode {
    /// States are nodes; turn costs cannot be charged.
    NodeBased,
    /// States are directed edges; required for turn costs.
    EdgeBased,
}

/// Decide the traversal mode for the request.
///
/// Edge-based is the default exactly when the capability supports turn
/// costs.  An explicit `edge_based=true` is always honoured, so it fails for
/// a capability without turn costs.  An explicit `edge_based=false` replaces
/// the default only when `allow_turn_cost_override` is set.
pub fn traversal_mode<C>(
    config: &Configuration,
    capability: &C,
    allow_turn_cost_override: bool,
) -> WeightingResult<TraversalMode>
where
    C: TravelCapability + ?Sized,
{
    let turn_costs = capability.supports_turn_costs();
    let edge_based = match config.get(params::EDGE_BASED).and_then(ConfigValue::as_bool) {
        Some(true) => true,
        Some(false) if allow_turn_cost_override => false,
        _ => turn_costs,
    };

    match (edge_based, turn_costs) {
        (true, false) => Err(WeightingError::UnsupportedTraversalMode { mode: capability.mode() }),
        (true, true) => Ok(TraversalMode::EdgeBased),
        (false, _) => Ok(TraversalMode::NodeBased),
    }
}

/// Requested strategy name, lowercased: `weighting_method` when non-empty,
/// else `weighting`, else the empty string.
pub fn requested_weighting(config: &Configuration) -> String {
    let method = config.get_string(params::WEIGHTING_METHOD, "");
    let name = if method.trim().is_empty() {
        config.get_string(params::WEIGHTING, "")
    } else {
        method
    };
    name.trim().to_lowercase()
}

/// Map a strategy name onto a base strategy for ordinary routing.  Total:
/// names it does not recognise fall back to a sensible default.
pub fn select_base_strategy<C>(name: &str, capability: &C) -> BaseStrategy
where
    C: TravelCapability + ?Sized,
{
    let priority = capability.supports_priority_costing();
    match name.to_ascii_lowercase().as_str() {
        "shortest" => BaseStrategy::Shortest,
        // Heavy vehicles keep plain travel time even with priority data.
        "fastest" if priority && !capability.is_heavy_vehicle() => BaseStrategy::PriorityWeighted,
        "fastest" => BaseStrategy::Fastest,
        "priority" => BaseStrategy::RecommendedPreference,
        _ if !priority => BaseStrategy::Fastest,
        "recommended_pref" => BaseStrategy::RecommendedPreference,
        "recommended" => BaseStrategy::RecommendedOptimized,
        _ => BaseStrategy::FastestSafe,
    }
}

/// Map a strategy name onto a base strategy for isochrones.  Isochrones
/// measure reachability, so every time-like name collapses to `Fastest`.
pub fn select_isochrone_strategy(name: &str) -> Option<BaseStrategy> {
    match name.to_ascii_lowercase().as_str() {
        "shortest" => Some(BaseStrategy::Shortest),
        "fastest" | "priority" | "recommended_pref" | "recommended" => Some(BaseStrategy::Fastest),
        _ => None,
    }
}

/// Resolve `config` into the cost function a route search should use.
///
/// With `isochroneWeighting` set this is [`resolve_for_isochrone`] and the
/// traversal mode is not consulted.
///
/// # Errors
///
/// - [`WeightingError::UnsupportedTraversalMode`] if edge-based traversal is
///   requested for a capability without turn costs.
/// - [`WeightingError::UnresolvableIsochroneMode`] if `isochroneWeighting`
///   is set and the strategy name has no isochrone equivalent.
pub fn resolve<'a, C>(
    config: &Configuration,
    capability: &C,
    network: &'a RoadNetwork,
    allow_turn_cost_override: bool,
) -> WeightingResult<Box<dyn CostFunction + 'a>>
where
    C: TravelCapability + ?Sized,
{
    if config.get_bool(params::ISOCHRONE_WEIGHTING, false) {
        return resolve_for_isochrone(config, capability, network);
    }

    let traversal = traversal_mode(config, capability, allow_turn_cost_override)?;

    let name = requested_weighting(config);
    let strategy = select_base_strategy(&name, capability);
    debug!(
        "resolved weighting {name:?} to {strategy} for {} ({traversal:?})",
        capability.name()
    );

    let mode = capability.mode();
    let speed = decorate_conditional_speed(Box::new(GraphSpeed::new(mode, network)), config, mode, network);
    let base = strategy.build_with_speed(capability, config, network, speed);
    Ok(compose_soft_weightings(config, base, capability, network))
}

/// Resolve `config` for an isochrone computation.  Regular graph speeds, no
/// soft modifiers.
///
/// # Errors
///
/// [`WeightingError::UnresolvableIsochroneMode`] for any name other than
/// `shortest`, `fastest`, `priority`, `recommended_pref` or `recommended`.
pub fn resolve_for_isochrone<'a, C>(
    config: &Configuration,
    capability: &C,
    network: &'a RoadNetwork,
) -> WeightingResult<Box<dyn CostFunction + 'a>>
where
    C: TravelCapability + ?Sized,
{
    let name = requested_weighting(config);
    let strategy = select_isochrone_strategy(&name)
        .ok_or_else(|| WeightingError::UnresolvableIsochroneMode { name: name.clone() })?;
    debug!("resolved isochrone weighting {name:?} to {strategy} for {}", capability.name());
    Ok(strategy.build(capability, config, network))
}
