//! Base cost strategies.
//!
//! Every resolved weighting bottoms out in exactly one of these.  `Shortest`
//! is pure distance; the rest start from capped travel time at the speed
//! their [`SpeedSource`] reports and, for the priority variants, scale it by
//! the edge's [`PriorityCode`].

use strum::{Display, IntoStaticStr};

use wt_core::{Configuration, PriorityCode, TravelCapability, TravelMode};
use wt_graph::RoadNetwork;

use crate::{params, CostFunction, CostKind, EdgeTraversal, GraphSpeed, SpeedSource};

/// km/h → m/s.
const SPEED_CONV: f64 = 3.6;

/// Offset keeping the priority divisor away from zero.
const PRIORITY_OFFSET: f64 = 0.5;

/// Travel-time multiplier applied by `FastestSafe` to unsafe edges.
const UNSAFE_PENALTY: f64 = 2.0;

// ── BaseStrategy ──────────────────────────────────────────────────────────────

/// The family of base cost strategies.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum BaseStrategy {
    /// Distance in metres.
    Shortest,
    /// Travel time in seconds.
    Fastest,
    /// Travel time scaled by the raw priority factor.
    PriorityWeighted,
    /// Travel time scaled by a priority factor that leans hard on preferred
    /// and avoided edges.
    RecommendedPreference,
    /// Travel time scaled by a milder priority adjustment.
    RecommendedOptimized,
    /// Travel time, doubled on edges rated avoid-if-possible or worse.
    FastestSafe,
}

impl BaseStrategy {
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// `true` for the strategies that read the edge priority code.
    pub fn uses_priority(self) -> bool {
        !matches!(self, BaseStrategy::Shortest | BaseStrategy::Fastest)
    }

    /// Construct the cost function for this strategy over the graph's
    /// regular speeds.
    ///
    /// `config` is consulted for [`params::MAXIMUM_SPEED`] only.
    pub fn build<'a, C>(
        self,
        capability: &C,
        config: &Configuration,
        network: &'a RoadNetwork,
    ) -> Box<dyn CostFunction + 'a>
    where
        C: TravelCapability + ?Sized,
    {
        let speed = Box::new(GraphSpeed::new(capability.mode(), network));
        self.build_with_speed(capability, config, network, speed)
    }

    /// Construct the cost function for this strategy reading edge speeds
    /// from `speed`.  Time-based strategies derive their cost from it.
    pub fn build_with_speed<'a, C>(
        self,
        capability: &C,
        config: &Configuration,
        network: &'a RoadNetwork,
        speed: Box<dyn SpeedSource + 'a>,
    ) -> Box<dyn CostFunction + 'a>
    where
        C: TravelCapability + ?Sized,
    {
        let fastest = |speed| FastestWeighting::new(capability, config, network, speed);
        let variant = match self {
            BaseStrategy::Shortest => return Box::new(ShortestWeighting::new(network, speed)),
            BaseStrategy::Fastest => return Box::new(fastest(speed)),
            BaseStrategy::PriorityWeighted => PriorityVariant::Plain,
            BaseStrategy::RecommendedPreference => PriorityVariant::Preference,
            BaseStrategy::RecommendedOptimized => PriorityVariant::Optimized,
            BaseStrategy::FastestSafe => PriorityVariant::Safe,
        };
        Box::new(PriorityWeighting::new(variant, fastest(speed)))
    }
}

// ── Shortest ──────────────────────────────────────────────────────────────────

/// Cost is the edge length in metres, whatever the speed.
pub struct ShortestWeighting<'a> {
    speed:   Box<dyn SpeedSource + 'a>,
    network: &'a RoadNetwork,
}

impl<'a> ShortestWeighting<'a> {
    pub fn new(network: &'a RoadNetwork, speed: Box<dyn SpeedSource + 'a>) -> Self {
        Self { speed, network }
    }
}

impl CostFunction for ShortestWeighting<'_> {
    #[inline]
    fn cost(&self, t: &EdgeTraversal) -> f64 {
        self.network.distance(t.edge)
    }

    #[inline]
    fn speed(&self, t: &EdgeTraversal) -> f64 {
        self.speed.speed_kmh(t)
    }

    fn kind(&self) -> CostKind {
        CostKind::Base(BaseStrategy::Shortest)
    }

    fn is_time_dependent(&self) -> bool {
        self.speed.is_time_dependent()
    }
}

// ── Fastest ───────────────────────────────────────────────────────────────────

/// Cost is travel time in seconds at the source speed, capped by the
/// profile's top speed and by an optional `maximum_speed` request hint.
pub struct FastestWeighting<'a> {
    mode:          TravelMode,
    max_speed_kmh: f64,
    speed:         Box<dyn SpeedSource + 'a>,
    network:       &'a RoadNetwork,
}

impl<'a> FastestWeighting<'a> {
    pub fn new<C>(
        capability: &C,
        config: &Configuration,
        network: &'a RoadNetwork,
        speed: Box<dyn SpeedSource + 'a>,
    ) -> Self
    where
        C: TravelCapability + ?Sized,
    {
        let mut max_speed_kmh = capability.max_speed_kmh();
        let requested = config.get_f64(params::MAXIMUM_SPEED, 0.0);
        if requested > 0.0 {
            max_speed_kmh = max_speed_kmh.min(requested);
        }
        Self { mode: capability.mode(), max_speed_kmh, speed, network }
    }

    pub fn max_speed_kmh(&self) -> f64 {
        self.max_speed_kmh
    }

    #[inline]
    fn capped_speed(&self, t: &EdgeTraversal) -> f64 {
        self.speed.speed_kmh(t).min(self.max_speed_kmh)
    }

    /// Seconds to traverse the edge; `INFINITY` when the speed is zero.
    #[inline]
    pub fn travel_time_secs(&self, t: &EdgeTraversal) -> f64 {
        let speed = self.capped_speed(t);
        if speed <= 0.0 {
            return f64::INFINITY;
        }
        self.network.distance(t.edge) / speed * SPEED_CONV
    }
}

impl CostFunction for FastestWeighting<'_> {
    #[inline]
    fn cost(&self, t: &EdgeTraversal) -> f64 {
        self.travel_time_secs(t)
    }

    #[inline]
    fn speed(&self, t: &EdgeTraversal) -> f64 {
        self.capped_speed(t)
    }

    fn kind(&self) -> CostKind {
        CostKind::Base(BaseStrategy::Fastest)
    }

    fn is_time_dependent(&self) -> bool {
        self.speed.is_time_dependent()
    }
}

// ── Priority variants ─────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum PriorityVariant {
    Plain,
    Preference,
    Optimized,
    Safe,
}

impl PriorityVariant {
    fn strategy(self) -> BaseStrategy {
        match self {
            PriorityVariant::Plain => BaseStrategy::PriorityWeighted,
            PriorityVariant::Preference => BaseStrategy::RecommendedPreference,
            PriorityVariant::Optimized => BaseStrategy::RecommendedOptimized,
            PriorityVariant::Safe => BaseStrategy::FastestSafe,
        }
    }

    /// Final cost from travel time and the edge's priority code.
    fn apply(self, time: f64, code: PriorityCode) -> f64 {
        match self {
            PriorityVariant::Plain => time / (PRIORITY_OFFSET + code.factor()),
            PriorityVariant::Preference => time / (PRIORITY_OFFSET + preference_factor(code)),
            PriorityVariant::Optimized => time / (PRIORITY_OFFSET + optimized_factor(code)),
            PriorityVariant::Safe if code <= PriorityCode::AvoidIfPossible => time * UNSAFE_PENALTY,
            PriorityVariant::Safe => time,
        }
    }
}

/// Priority factor for `RecommendedPreference`.
fn preference_factor(code: PriorityCode) -> f64 {
    let p = code.factor();
    match code {
        c if c <= PriorityCode::ReachDestination => p / 1.5,
        PriorityCode::AvoidIfPossible => p / 1.25,
        PriorityCode::Prefer => p * 1.5,
        c if c >= PriorityCode::VeryNice => p * 2.2,
        _ => p,
    }
}

/// Priority factor for `RecommendedOptimized`.
fn optimized_factor(code: PriorityCode) -> f64 {
    let p = code.factor();
    match code {
        c if c <= PriorityCode::ReachDestination => p / 1.25,
        c if c >= PriorityCode::Prefer => p * 1.25,
        _ => p,
    }
}

/// Travel time adjusted by the edge priority code.  One type serves all four
/// priority strategies; they differ only in how the code scales the time.
pub struct PriorityWeighting<'a> {
    variant: PriorityVariant,
    fastest: FastestWeighting<'a>,
}

impl<'a> PriorityWeighting<'a> {
    fn new(variant: PriorityVariant, fastest: FastestWeighting<'a>) -> Self {
        Self { variant, fastest }
    }
}

impl CostFunction for PriorityWeighting<'_> {
    fn cost(&self, t: &EdgeTraversal) -> f64 {
        let time = self.fastest.travel_time_secs(t);
        if time.is_infinite() {
            return time;
        }
        let code = self.fastest.network.priority(self.fastest.mode, t.edge, t.reverse);
        self.variant.apply(time, code)
    }

    #[inline]
    fn speed(&self, t: &EdgeTraversal) -> f64 {
        self.fastest.speed(t)
    }

    fn kind(&self) -> CostKind {
        CostKind::Base(self.variant.strategy())
    }

    fn is_time_dependent(&self) -> bool {
        self.fastest.is_time_dependent()
    }
}
