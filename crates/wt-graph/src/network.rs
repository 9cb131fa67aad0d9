//! Edge-attribute store and builder.
//!
//! # Data layout
//!
//! Edges are stored once, from `edge_base` to `edge_adj`, and may be
//! traversed in either direction.  Direction-dependent attributes (speed,
//! priority) are kept per travel mode in a [`ModeLayer`] with separate
//! forward and reverse arrays.  Mode-independent attributes (grade, green
//! index, noise level) are optional whole-network arrays: either every edge
//! has a value or the attribute is absent from the graph.
//!
//! All arrays are indexed by `EdgeId`.

use std::str::FromStr;

use chrono::NaiveDateTime;
use rustc_hash::FxHashMap;

use wt_core::{CoreError, EdgeId, NodeId, PriorityCode, TimeWindow, TravelMode};

use crate::{GraphError, GraphResult};

// ── EncodedValue ──────────────────────────────────────────────────────────────

/// An attribute a graph may or may not carry for a travel mode.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum EncodedValue {
    Speed,
    Priority,
    /// Time-varying speed rules (`maxspeed:conditional`).
    ConditionalSpeed,
    /// Signed gradient in percent, positive uphill from base to adj.
    Grade,
    /// Share of green surroundings in `[0, 1]`.
    GreenIndex,
    /// Normalised traffic noise exposure in `[0, 1]`.
    NoiseLevel,
}

// ── ConditionalSpeed ──────────────────────────────────────────────────────────

/// A speed that replaces the regular one while `window` is active.
///
/// Parsed from the conditional-tag form `"30 @ (Mo-Fr 07:00-19:00)"`; the
/// parentheses are optional.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct ConditionalSpeed {
    pub speed_kmh: f64,
    pub window:    TimeWindow,
}

impl FromStr for ConditionalSpeed {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, CoreError> {
        let (speed, window) = s
            .split_once('@')
            .ok_or_else(|| CoreError::Parse(format!("conditional speed {s:?}: expected \"<speed> @ (<window>)\"")))?;
        let speed_kmh: f64 = speed
            .trim()
            .parse()
            .map_err(|_| CoreError::Parse(format!("conditional speed {s:?}: bad speed {speed:?}")))?;
        let window = window
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(')')
            .parse()?;
        Ok(Self { speed_kmh, window })
    }
}

// ── ModeLayer ─────────────────────────────────────────────────────────────────

/// Direction-dependent attributes of every edge for one travel mode.
struct ModeLayer {
    speed_fwd:    Vec<f64>,
    speed_bwd:    Vec<f64>,
    priority_fwd: Vec<PriorityCode>,
    priority_bwd: Vec<PriorityCode>,
    has_priority: bool,
    conditional:  FxHashMap<EdgeId, Vec<ConditionalSpeed>>,
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Read-only per-edge attribute store.  Build with [`RoadNetworkBuilder`].
///
/// `RoadNetwork` holds no interior mutability, so a shared `&RoadNetwork`
/// can back any number of concurrently resolved cost functions.
pub struct RoadNetwork {
    node_count: usize,

    /// Start node of each edge.
    pub edge_base: Vec<NodeId>,
    /// End node of each edge.
    pub edge_adj: Vec<NodeId>,
    /// Length of each edge in metres.
    pub edge_length_m: Vec<f64>,

    grade_pct:   Option<Vec<f64>>,
    green_index: Option<Vec<f64>>,
    noise_level: Option<Vec<f64>>,

    layers: FxHashMap<TravelMode, ModeLayer>,
}

impl RoadNetwork {
    /// A network with no nodes, edges or mode layers.
    pub fn empty() -> Self {
        RoadNetworkBuilder::new().build()
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.edge_length_m.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edge_length_m.is_empty()
    }

    /// Travel modes with a speed layer, in no particular order.
    pub fn modes(&self) -> impl Iterator<Item = TravelMode> + '_ {
        self.layers.keys().copied()
    }

    /// Whether this graph carries `value` for `mode`.
    pub fn has_encoded_value(&self, mode: TravelMode, value: EncodedValue) -> bool {
        match value {
            EncodedValue::Speed => self.layers.contains_key(&mode),
            EncodedValue::Priority => self.layers.get(&mode).is_some_and(|l| l.has_priority),
            EncodedValue::ConditionalSpeed => {
                self.layers.get(&mode).is_some_and(|l| !l.conditional.is_empty())
            }
            EncodedValue::Grade => self.grade_pct.is_some(),
            EncodedValue::GreenIndex => self.green_index.is_some(),
            EncodedValue::NoiseLevel => self.noise_level.is_some(),
        }
    }

    // ── Edge attributes ───────────────────────────────────────────────────

    /// Length in metres.
    #[inline]
    pub fn distance(&self, edge: EdgeId) -> f64 {
        self.edge_length_m[edge.index()]
    }

    /// `(from, to)` in traversal direction.
    #[inline]
    pub fn endpoints(&self, edge: EdgeId, reverse: bool) -> (NodeId, NodeId) {
        let (base, adj) = (self.edge_base[edge.index()], self.edge_adj[edge.index()]);
        if reverse { (adj, base) } else { (base, adj) }
    }

    /// Regular speed in km/h; `0.0` when `mode` cannot use the edge in that
    /// direction or has no layer at all.
    #[inline]
    pub fn speed(&self, mode: TravelMode, edge: EdgeId, reverse: bool) -> f64 {
        match self.layers.get(&mode) {
            Some(layer) if reverse => layer.speed_bwd[edge.index()],
            Some(layer) => layer.speed_fwd[edge.index()],
            None => 0.0,
        }
    }

    /// Priority code; [`PriorityCode::Unchanged`] when the mode stores none.
    #[inline]
    pub fn priority(&self, mode: TravelMode, edge: EdgeId, reverse: bool) -> PriorityCode {
        match self.layers.get(&mode) {
            Some(layer) if reverse => layer.priority_bwd[edge.index()],
            Some(layer) => layer.priority_fwd[edge.index()],
            None => PriorityCode::Unchanged,
        }
    }

    /// All conditional speed rules for the edge, in insertion order.
    pub fn conditional_speeds(&self, mode: TravelMode, edge: EdgeId) -> &[ConditionalSpeed] {
        self.layers
            .get(&mode)
            .and_then(|l| l.conditional.get(&edge))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Speed of the first conditional rule active at `at`, if any.
    pub fn conditional_speed_at(&self, mode: TravelMode, edge: EdgeId, at: NaiveDateTime) -> Option<f64> {
        self.conditional_speeds(mode, edge)
            .iter()
            .find(|rule| rule.window.contains(at))
            .map(|rule| rule.speed_kmh)
    }

    /// Gradient in percent along the traversal direction.
    #[inline]
    pub fn grade(&self, edge: EdgeId, reverse: bool) -> Option<f64> {
        let g = self.grade_pct.as_ref()?[edge.index()];
        Some(if reverse { -g } else { g })
    }

    #[inline]
    pub fn green_index(&self, edge: EdgeId) -> Option<f64> {
        self.green_index.as_ref().map(|v| v[edge.index()])
    }

    #[inline]
    pub fn noise_level(&self, edge: EdgeId) -> Option<f64> {
        self.noise_level.as_ref().map(|v| v[edge.index()])
    }
}

// ── EdgeSpec ──────────────────────────────────────────────────────────────────

/// Mode-independent description of one edge, passed to
/// [`RoadNetworkBuilder::add_edge`].
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeSpec {
    base:        NodeId,
    adj:         NodeId,
    length_m:    f64,
    grade_pct:   Option<f64>,
    green_index: Option<f64>,
    noise_level: Option<f64>,
}

impl EdgeSpec {
    pub fn new(base: NodeId, adj: NodeId, length_m: f64) -> Self {
        Self { base, adj, length_m, grade_pct: None, green_index: None, noise_level: None }
    }

    pub fn grade(mut self, pct: f64) -> Self {
        self.grade_pct = Some(pct);
        self
    }

    pub fn green_index(mut self, index: f64) -> Self {
        self.green_index = Some(index.clamp(0.0, 1.0));
        self
    }

    pub fn noise_level(mut self, level: f64) -> Self {
        self.noise_level = Some(level.clamp(0.0, 1.0));
        self
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

#[derive(Default)]
struct RawLayer {
    speeds:      FxHashMap<EdgeId, (f64, f64)>,
    priorities:  FxHashMap<EdgeId, (PriorityCode, PriorityCode)>,
    conditional: FxHashMap<EdgeId, Vec<ConditionalSpeed>>,
}

/// Construct a [`RoadNetwork`] incrementally, then call [`build`](Self::build).
///
/// Optional attributes become part of the graph as soon as one edge sets
/// them; edges that did not set them read `0.0`.
///
/// # Example
///
/// ```
/// use wt_core::{NodeId, TravelMode};
/// use wt_graph::{EdgeSpec, EncodedValue, RoadNetworkBuilder};
///
/// let mut b = RoadNetworkBuilder::new();
/// let e = b.add_edge(EdgeSpec::new(NodeId(0), NodeId(1), 1_000.0).grade(4.0));
/// b.set_speed(TravelMode::Bike, e, 18.0, 18.0).unwrap();
/// let net = b.build();
/// assert_eq!(net.grade(e, true), Some(-4.0));
/// assert!(net.has_encoded_value(TravelMode::Bike, EncodedValue::Speed));
/// assert!(!net.has_encoded_value(TravelMode::Car, EncodedValue::Speed));
/// ```
#[derive(Default)]
pub struct RoadNetworkBuilder {
    node_count: usize,
    edges:      Vec<EdgeSpec>,
    layers:     FxHashMap<TravelMode, RawLayer>,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an isolated node and return its id (sequential from 0).
    pub fn add_node(&mut self) -> NodeId {
        let id = NodeId(self.node_count as u32);
        self.node_count += 1;
        id
    }

    /// Add an edge.  Nodes referenced beyond the current count are created.
    pub fn add_edge(&mut self, edge: EdgeSpec) -> EdgeId {
        let id = EdgeId(self.edges.len() as u32);
        self.node_count = self
            .node_count
            .max(edge.base.index() + 1)
            .max(edge.adj.index() + 1);
        self.edges.push(edge);
        id
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn check(&self, edge: EdgeId) -> GraphResult<()> {
        if edge.index() < self.edges.len() {
            Ok(())
        } else {
            Err(GraphError::EdgeNotFound(edge))
        }
    }

    /// Set forward and reverse speed (km/h) of `edge` for `mode`.  A speed of
    /// `0.0` closes that direction.
    pub fn set_speed(&mut self, mode: TravelMode, edge: EdgeId, forward: f64, reverse: f64) -> GraphResult<()> {
        self.check(edge)?;
        self.layers
            .entry(mode)
            .or_default()
            .speeds
            .insert(edge, (forward.max(0.0), reverse.max(0.0)));
        Ok(())
    }

    pub fn set_priority(
        &mut self,
        mode:    TravelMode,
        edge:    EdgeId,
        forward: PriorityCode,
        reverse: PriorityCode,
    ) -> GraphResult<()> {
        self.check(edge)?;
        self.layers.entry(mode).or_default().priorities.insert(edge, (forward, reverse));
        Ok(())
    }

    /// Append a time-conditional speed rule.  Earlier rules win on overlap.
    pub fn add_conditional_speed(&mut self, mode: TravelMode, edge: EdgeId, rule: ConditionalSpeed) -> GraphResult<()> {
        self.check(edge)?;
        self.layers
            .entry(mode)
            .or_default()
            .conditional
            .entry(edge)
            .or_default()
            .push(rule);
        Ok(())
    }

    /// Consume the builder and produce a [`RoadNetwork`].
    pub fn build(self) -> RoadNetwork {
        let n = self.edges.len();

        let optional = |get: fn(&EdgeSpec) -> Option<f64>| -> Option<Vec<f64>> {
            self.edges
                .iter()
                .any(|e| get(e).is_some())
                .then(|| self.edges.iter().map(|e| get(e).unwrap_or(0.0)).collect())
        };
        let grade_pct   = optional(|e| e.grade_pct);
        let green_index = optional(|e| e.green_index);
        let noise_level = optional(|e| e.noise_level);

        let layers = self
            .layers
            .into_iter()
            .map(|(mode, raw)| {
                let mut layer = ModeLayer {
                    speed_fwd:    vec![0.0; n],
                    speed_bwd:    vec![0.0; n],
                    priority_fwd: vec![PriorityCode::Unchanged; n],
                    priority_bwd: vec![PriorityCode::Unchanged; n],
                    has_priority: !raw.priorities.is_empty(),
                    conditional:  raw.conditional,
                };
                for (edge, (fwd, bwd)) in raw.speeds {
                    layer.speed_fwd[edge.index()] = fwd;
                    layer.speed_bwd[edge.index()] = bwd;
                }
                for (edge, (fwd, bwd)) in raw.priorities {
                    layer.priority_fwd[edge.index()] = fwd;
                    layer.priority_bwd[edge.index()] = bwd;
                }
                (mode, layer)
            })
            .collect();

        RoadNetwork {
            node_count: self.node_count,
            edge_base: self.edges.iter().map(|e| e.base).collect(),
            edge_adj: self.edges.iter().map(|e| e.adj).collect(),
            edge_length_m: self.edges.iter().map(|e| e.length_m).collect(),
            grade_pct,
            green_index,
            noise_level,
            layers,
        }
    }
}
