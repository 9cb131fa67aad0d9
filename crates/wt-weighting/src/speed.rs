//! Where base cost functions get their edge speeds from.

use wt_core::TravelMode;
use wt_graph::RoadNetwork;

use crate::EdgeTraversal;

/// Speed lookup behind a base cost function.  Time-based strategies turn
/// this speed into their cost, so replacing the source changes routing
/// costs as well as reported speeds.
pub trait SpeedSource: Send + Sync {
    /// Speed in km/h; `0.0` when the edge cannot be used in that direction.
    fn speed_kmh(&self, traversal: &EdgeTraversal) -> f64;

    /// `true` if the speed may depend on the traversal's entry time.
    fn is_time_dependent(&self) -> bool {
        false
    }
}

/// The regular per-mode speed stored in the graph.
pub struct GraphSpeed<'a> {
    mode:    TravelMode,
    network: &'a RoadNetwork,
}

impl<'a> GraphSpeed<'a> {
    pub fn new(mode: TravelMode, network: &'a RoadNetwork) -> Self {
        Self { mode, network }
    }
}

impl SpeedSource for GraphSpeed<'_> {
    #[inline]
    fn speed_kmh(&self, t: &EdgeTraversal) -> f64 {
        self.network.speed(self.mode, t.edge, t.reverse)
    }
}
