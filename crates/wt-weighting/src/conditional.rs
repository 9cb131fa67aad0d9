//! Time-dependent speed decorator.

use log::debug;

use wt_core::{Configuration, TravelMode};
use wt_graph::{EncodedValue, RoadNetwork};

use crate::{params, EdgeTraversal, SpeedSource};

/// Wraps a speed source and returns the conditional speed active at the
/// traversal's entry time, falling back to the inner source when no rule
/// applies or the traversal carries no time.
pub struct ConditionalSpeedSource<'a> {
    inner:   Box<dyn SpeedSource + 'a>,
    mode:    TravelMode,
    network: &'a RoadNetwork,
}

impl<'a> ConditionalSpeedSource<'a> {
    pub fn new(inner: Box<dyn SpeedSource + 'a>, mode: TravelMode, network: &'a RoadNetwork) -> Self {
        Self { inner, mode, network }
    }
}

impl SpeedSource for ConditionalSpeedSource<'_> {
    fn speed_kmh(&self, t: &EdgeTraversal) -> f64 {
        t.at.and_then(|at| self.network.conditional_speed_at(self.mode, t.edge, at))
            .unwrap_or_else(|| self.inner.speed_kmh(t))
    }

    fn is_time_dependent(&self) -> bool {
        true
    }
}

/// Wrap `speed` in a [`ConditionalSpeedSource`] when the request asks for
/// time-dependent speeds and the graph stores conditional speeds for `mode`.
/// Otherwise `speed` is returned as it came in.
pub fn decorate_conditional_speed<'a>(
    speed: Box<dyn SpeedSource + 'a>,
    config: &Configuration,
    mode: TravelMode,
    network: &'a RoadNetwork,
) -> Box<dyn SpeedSource + 'a> {
    if !config.get_bool(params::TIME_DEPENDENT_SPEED, false) {
        return speed;
    }
    if !network.has_encoded_value(mode, EncodedValue::ConditionalSpeed) {
        debug!("time-dependent speed requested but graph has no conditional speeds for {mode}");
        return speed;
    }
    Box::new(ConditionalSpeedSource::new(speed, mode, network))
}
