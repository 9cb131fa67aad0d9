//! The `CostFunction` trait, the seam every weighting implements.
//!
//! Base strategies, soft modifiers and the addition composer are all
//! `CostFunction`s, so wrappers hold their inner functions as
//! `Box<dyn CostFunction + 'a>` without caring which kind they wrap.
//! Time-dependent speeds enter below this seam, through the base function's
//! [`crate::SpeedSource`].  `'a` is the lifetime of the borrowed [`wt_graph::RoadNetwork`].
//!
//! # Units
//!
//! Costs are non-negative `f64`s whose unit depends on the base strategy
//! (metres for `Shortest`, seconds for the time-based ones, scaled seconds
//! for the priority variants).  Time-based strategies return `f64::INFINITY`
//! for an edge the travel mode cannot use in that direction; any other access
//! filtering belongs to the search.  Speeds are km/h.

use std::fmt;

use crate::{BaseStrategy, EdgeTraversal, SoftModifierKind};

/// What a cost function is, for inspection and logging.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum CostKind {
    Base(BaseStrategy),
    Modifier(SoftModifierKind),
    /// Base plus a sum of soft modifiers.
    Addition,
}

impl fmt::Display for CostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CostKind::Base(s) => write!(f, "{s}"),
            CostKind::Modifier(m) => write!(f, "{m}"),
            CostKind::Addition => f.write_str("addition"),
        }
    }
}

/// Edge cost function used by a shortest-path search.
///
/// Implementations are immutable after construction and hold no per-query
/// state, so one instance may be evaluated from many threads at once.
pub trait CostFunction: Send + Sync {
    /// Cost of the traversal; `f64::INFINITY` when it is not allowed.
    fn cost(&self, traversal: &EdgeTraversal) -> f64;

    /// Speed in km/h reported for travel-time estimation.
    fn speed(&self, traversal: &EdgeTraversal) -> f64;

    fn kind(&self) -> CostKind;

    /// The function this one wraps, if it is a wrapper.
    fn inner(&self) -> Option<&dyn CostFunction> {
        None
    }

    /// Soft modifiers summed into this function, in composition order.
    fn modifier_kinds(&self) -> Vec<SoftModifierKind> {
        Vec::new()
    }

    /// The base strategy at the bottom of any wrapper chain.
    fn base_strategy(&self) -> Option<BaseStrategy> {
        match self.kind() {
            CostKind::Base(strategy) => Some(strategy),
            _ => self.inner().and_then(|inner| inner.base_strategy()),
        }
    }

    /// `true` if the base function reads a time-dependent speed source.
    fn is_time_dependent(&self) -> bool {
        self.inner().is_some_and(|inner| inner.is_time_dependent())
    }
}

impl fmt::Debug for dyn CostFunction + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let modifiers = self.modifier_kinds();
        match self.inner() {
            Some(inner) if modifiers.is_empty() => write!(f, "{}({:?})", self.kind(), inner),
            Some(inner) => write!(f, "{}({:?} + {:?})", self.kind(), inner, modifiers),
            None if self.is_time_dependent() => write!(f, "{}[conditional_speed]", self.kind()),
            None => write!(f, "{}", self.kind()),
        }
    }
}
