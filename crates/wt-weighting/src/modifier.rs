//! Soft modifiers: additive cost terms layered over a base strategy.
//!
//! A modifier reads one edge attribute and turns it into extra cost.  Edges
//! without that attribute, or graphs that never stored it, contribute `0.0`,
//! so a modifier can be requested on any graph without failing.  Modifiers
//! never change speed; they report the graph speed for the travel mode.

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use wt_core::{Configuration, TravelCapability, TravelMode};
use wt_graph::RoadNetwork;

use crate::{CostFunction, CostKind, EdgeTraversal};

// ── SoftModifierKind ──────────────────────────────────────────────────────────

/// Every soft modifier the engine knows, by its configuration name.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum SoftModifierKind {
    SteepnessDifficulty,
    AvoidHills,
    Green,
    Quiet,
    Acceleration,
}

impl SoftModifierKind {
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Exact, case-sensitive lookup of a modifier name.
    pub fn from_name(name: &str) -> Option<Self> {
        name.parse().ok()
    }

    /// Construct the modifier from its own parameter sub-map (keys with the
    /// namespace prefix already stripped).
    pub fn build<'a, C>(
        self,
        capability: &C,
        params: &Configuration,
        network: &'a RoadNetwork,
    ) -> Box<dyn CostFunction + 'a>
    where
        C: TravelCapability + ?Sized,
    {
        let mode = capability.mode();
        match self {
            SoftModifierKind::SteepnessDifficulty => {
                Box::new(SteepnessDifficultyWeighting::new(mode, params, network))
            }
            SoftModifierKind::AvoidHills => Box::new(AvoidHillsWeighting::new(mode, params, network)),
            SoftModifierKind::Green => Box::new(GreenWeighting::new(mode, params, network)),
            SoftModifierKind::Quiet => Box::new(QuietWeighting::new(mode, params, network)),
            SoftModifierKind::Acceleration => Box::new(AccelerationWeighting::new(mode, network)),
        }
    }
}

/// Shared `factor` parameter: non-negative, default `1.0`.
fn factor_param(params: &Configuration) -> f64 {
    params.get_f64("factor", 1.0).max(0.0)
}

macro_rules! graph_speed {
    () => {
        #[inline]
        fn speed(&self, t: &EdgeTraversal) -> f64 {
            self.network.speed(self.mode, t.edge, t.reverse)
        }
    };
}

// ── Steepness difficulty ──────────────────────────────────────────────────────

/// Uphill grade bucket width in percent.
const GRADE_BUCKET_PCT: f64 = 3.0;

/// Per-metre penalty by fitness level (rows) and uphill grade bucket
/// (columns: 0-3, 3-6, 6-9, 9-12, 12-15, 15+ percent).  Fitter riders pay a
/// little on flat ground and much less on climbs.
const STEEPNESS_PENALTY: [[f64; 6]; 4] = [
    [0.0, 0.5, 1.5, 3.0, 5.0, 8.0],
    [0.0, 0.2, 0.8, 1.5, 3.0, 5.0],
    [0.2, 0.0, 0.3, 0.8, 1.5, 3.0],
    [0.5, 0.2, 0.0, 0.2, 0.8, 1.5],
];

const DEFAULT_DIFFICULTY_LEVEL: usize = 1;

/// Penalises climbs according to a fitness level `0..=3` (`level` parameter).
/// Descents cost as much as flat ground.
pub struct SteepnessDifficultyWeighting<'a> {
    level:   usize,
    mode:    TravelMode,
    network: &'a RoadNetwork,
}

impl<'a> SteepnessDifficultyWeighting<'a> {
    pub fn new(mode: TravelMode, params: &Configuration, network: &'a RoadNetwork) -> Self {
        let max_level = STEEPNESS_PENALTY.len() - 1;
        let level = params
            .get("level")
            .and_then(|v| v.as_f64())
            .map(|l| l.round().clamp(0.0, max_level as f64) as usize)
            .unwrap_or(DEFAULT_DIFFICULTY_LEVEL);
        Self { level, mode, network }
    }

    pub fn level(&self) -> usize {
        self.level
    }
}

impl CostFunction for SteepnessDifficultyWeighting<'_> {
    fn cost(&self, t: &EdgeTraversal) -> f64 {
        let Some(grade) = self.network.grade(t.edge, t.reverse) else {
            return 0.0;
        };
        let row = &STEEPNESS_PENALTY[self.level];
        let bucket = ((grade.max(0.0) / GRADE_BUCKET_PCT) as usize).min(row.len() - 1);
        self.network.distance(t.edge) * row[bucket]
    }

    graph_speed!();

    fn kind(&self) -> CostKind {
        CostKind::Modifier(SoftModifierKind::SteepnessDifficulty)
    }
}

// ── Avoid hills ───────────────────────────────────────────────────────────────

/// Per-metre cost of an edge steeper than `maximum_gradient`.
const EXCESS_GRADIENT_PENALTY: f64 = 10.0;

/// Penalises any gradient, up or down, in proportion to its steepness.
/// Parameters: `factor` (default 1) and optional `maximum_gradient` in
/// percent, above which edges get a flat heavy penalty.
pub struct AvoidHillsWeighting<'a> {
    factor:           f64,
    maximum_gradient: Option<f64>,
    mode:             TravelMode,
    network:          &'a RoadNetwork,
}

impl<'a> AvoidHillsWeighting<'a> {
    pub fn new(mode: TravelMode, params: &Configuration, network: &'a RoadNetwork) -> Self {
        let maximum_gradient = params
            .get("maximum_gradient")
            .and_then(|v| v.as_f64())
            .filter(|g| *g > 0.0);
        Self { factor: factor_param(params), maximum_gradient, mode, network }
    }
}

impl CostFunction for AvoidHillsWeighting<'_> {
    fn cost(&self, t: &EdgeTraversal) -> f64 {
        let Some(grade) = self.network.grade(t.edge, t.reverse) else {
            return 0.0;
        };
        let grade = grade.abs();
        let distance = self.network.distance(t.edge);
        if self.maximum_gradient.is_some_and(|max| grade > max) {
            return distance * EXCESS_GRADIENT_PENALTY;
        }
        distance * self.factor * grade / 10.0
    }

    graph_speed!();

    fn kind(&self) -> CostKind {
        CostKind::Modifier(SoftModifierKind::AvoidHills)
    }
}

// ── Green ─────────────────────────────────────────────────────────────────────

/// Favours green surroundings: cost grows as the green index `[0, 1]` drops.
pub struct GreenWeighting<'a> {
    factor:  f64,
    mode:    TravelMode,
    network: &'a RoadNetwork,
}

impl<'a> GreenWeighting<'a> {
    pub fn new(mode: TravelMode, params: &Configuration, network: &'a RoadNetwork) -> Self {
        Self { factor: factor_param(params), mode, network }
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }
}

impl CostFunction for GreenWeighting<'_> {
    fn cost(&self, t: &EdgeTraversal) -> f64 {
        match self.network.green_index(t.edge) {
            Some(green) => self.network.distance(t.edge) * self.factor * (1.0 - green.clamp(0.0, 1.0)),
            None => 0.0,
        }
    }

    graph_speed!();

    fn kind(&self) -> CostKind {
        CostKind::Modifier(SoftModifierKind::Green)
    }
}

// ── Quiet ─────────────────────────────────────────────────────────────────────

/// Avoids noise: cost grows with the noise level `[0, 1]`.
pub struct QuietWeighting<'a> {
    factor:  f64,
    mode:    TravelMode,
    network: &'a RoadNetwork,
}

impl<'a> QuietWeighting<'a> {
    pub fn new(mode: TravelMode, params: &Configuration, network: &'a RoadNetwork) -> Self {
        Self { factor: factor_param(params), mode, network }
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }
}

impl CostFunction for QuietWeighting<'_> {
    fn cost(&self, t: &EdgeTraversal) -> f64 {
        match self.network.noise_level(t.edge) {
            Some(noise) => self.network.distance(t.edge) * self.factor * noise.clamp(0.0, 1.0),
            None => 0.0,
        }
    }

    graph_speed!();

    fn kind(&self) -> CostKind {
        CostKind::Modifier(SoftModifierKind::Quiet)
    }
}

// ── Acceleration ──────────────────────────────────────────────────────────────

/// m/s² assumed when speeding up between edges.
const ACCELERATION_MS2: f64 = 1.5;

/// m/s² assumed when slowing down between edges.
const DECELERATION_MS2: f64 = 2.5;

/// Charges the seconds spent changing speed from the previous edge to this
/// one.  Needs turn context; the first edge of a search costs nothing.
pub struct AccelerationWeighting<'a> {
    mode:    TravelMode,
    network: &'a RoadNetwork,
}

impl<'a> AccelerationWeighting<'a> {
    pub fn new(mode: TravelMode, network: &'a RoadNetwork) -> Self {
        Self { mode, network }
    }

    /// Speed on the previous edge, traversed towards the current edge's
    /// start node.  `None` if the previous edge is not in the graph or the
    /// two edges do not touch there.
    fn previous_speed(&self, t: &EdgeTraversal) -> Option<f64> {
        if t.prev_edge.index() >= self.network.edge_count() {
            return None;
        }
        let (from, _) = self.network.endpoints(t.edge, t.reverse);
        let (prev_base, prev_adj) = self.network.endpoints(t.prev_edge, false);
        let prev_reverse = if prev_adj == from {
            false
        } else if prev_base == from {
            true
        } else {
            return None;
        };
        Some(self.network.speed(self.mode, t.prev_edge, prev_reverse))
    }
}

impl CostFunction for AccelerationWeighting<'_> {
    fn cost(&self, t: &EdgeTraversal) -> f64 {
        if !t.has_turn_context() {
            return 0.0;
        }
        let Some(prev) = self.previous_speed(t) else {
            return 0.0;
        };
        let current = self.speed(t);
        if prev <= 0.0 || current <= 0.0 {
            return 0.0;
        }
        let delta_ms = (current - prev) / 3.6;
        if delta_ms >= 0.0 {
            delta_ms / ACCELERATION_MS2
        } else {
            -delta_ms / DECELERATION_MS2
        }
    }

    graph_speed!();

    fn kind(&self) -> CostKind {
        CostKind::Modifier(SoftModifierKind::Acceleration)
    }
}
