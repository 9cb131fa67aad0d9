//! Travel modes and their capability predicates.
//!
//! The weighting engine never inspects a mode's physical rules; it only asks
//! the questions in [`TravelCapability`].  [`FlagEncoder`] is the stock
//! implementation; routing front-ends with richer profile objects implement
//! the trait themselves.

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

// ── TravelMode ────────────────────────────────────────────────────────────────

/// The class of traveller a profile describes.
///
/// The string forms are the stable encoder names used in profile
/// configuration files.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(ascii_case_insensitive)]
pub enum TravelMode {
    #[strum(serialize = "car")]
    Car,
    #[strum(serialize = "heavyvehicle")]
    HeavyVehicle,
    #[strum(serialize = "bike")]
    Bike,
    #[strum(serialize = "mtb")]
    MountainBike,
    #[strum(serialize = "racingbike")]
    RoadBike,
    #[strum(serialize = "electrobike")]
    ElectricBike,
    #[strum(serialize = "foot")]
    Walking,
    #[strum(serialize = "hiking")]
    Hiking,
    #[strum(serialize = "wheelchair")]
    Wheelchair,
}

impl TravelMode {
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Default top speed in km/h, used to cap edge speeds for time costs.
    pub fn default_max_speed_kmh(self) -> f64 {
        match self {
            TravelMode::Car          => 140.0,
            TravelMode::HeavyVehicle => 80.0,
            TravelMode::Bike         => 30.0,
            TravelMode::MountainBike => 30.0,
            TravelMode::RoadBike     => 40.0,
            TravelMode::ElectricBike => 25.0,
            TravelMode::Walking      => 15.0,
            TravelMode::Hiking       => 15.0,
            TravelMode::Wheelchair   => 10.0,
        }
    }

    /// Whether the stock encoder for this mode stores a priority code.
    pub fn has_priority(self) -> bool {
        !matches!(self, TravelMode::Car)
    }
}

// ── Capability trait ──────────────────────────────────────────────────────────

/// Read-only capability surface of a travel-mode profile.
///
/// Implementations must be `Send + Sync`: one capability object is shared by
/// every concurrent resolution for its profile.
pub trait TravelCapability: Send + Sync {
    fn mode(&self) -> TravelMode;

    /// Stable identity of the profile, by default the mode name.
    fn name(&self) -> &str {
        self.mode().as_str()
    }

    /// `true` when the graph carries turn-cost data for this profile, which
    /// is the precondition for edge-based traversal.
    fn supports_turn_costs(&self) -> bool;

    /// `true` when edges carry a priority code usable by priority-weighted
    /// cost functions.
    fn supports_priority_costing(&self) -> bool;

    fn max_speed_kmh(&self) -> f64 {
        self.mode().default_max_speed_kmh()
    }

    /// The heavy-vehicle profile is excluded from priority-weighted `fastest`.
    fn is_heavy_vehicle(&self) -> bool {
        self.mode() == TravelMode::HeavyVehicle
    }
}

// ── FlagEncoder ───────────────────────────────────────────────────────────────

/// Stock capability object: a mode plus the per-graph turn-cost switch.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct FlagEncoder {
    mode:          TravelMode,
    turn_costs:    bool,
    max_speed_kmh: f64,
}

impl FlagEncoder {
    pub fn new(mode: TravelMode) -> Self {
        Self {
            mode,
            turn_costs:    false,
            max_speed_kmh: mode.default_max_speed_kmh(),
        }
    }

    pub fn with_turn_costs(mut self, turn_costs: bool) -> Self {
        self.turn_costs = turn_costs;
        self
    }

    pub fn with_max_speed(mut self, max_speed_kmh: f64) -> Self {
        self.max_speed_kmh = max_speed_kmh;
        self
    }
}

impl TravelCapability for FlagEncoder {
    fn mode(&self) -> TravelMode {
        self.mode
    }

    fn supports_turn_costs(&self) -> bool {
        self.turn_costs
    }

    fn supports_priority_costing(&self) -> bool {
        self.mode.has_priority()
    }

    fn max_speed_kmh(&self) -> f64 {
        self.max_speed_kmh
    }
}

// ── PriorityCode ──────────────────────────────────────────────────────────────

/// Seven-step edge preference scale stored per edge and travel mode.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[repr(u8)]
pub enum PriorityCode {
    AvoidAtAllCosts  = 1,
    ReachDestination = 2,
    AvoidIfPossible  = 3,
    #[default]
    Unchanged        = 4,
    Prefer           = 5,
    VeryNice         = 6,
    Best             = 7,
}

impl PriorityCode {
    /// Clamp an arbitrary stored byte onto the scale.
    pub fn from_value(value: u8) -> Self {
        match value {
            0 | 1 => PriorityCode::AvoidAtAllCosts,
            2 => PriorityCode::ReachDestination,
            3 => PriorityCode::AvoidIfPossible,
            4 => PriorityCode::Unchanged,
            5 => PriorityCode::Prefer,
            6 => PriorityCode::VeryNice,
            _ => PriorityCode::Best,
        }
    }

    #[inline]
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Normalised priority in `(0, 1]`: `code / Best`.
    #[inline]
    pub fn factor(self) -> f64 {
        self.value() as f64 / PriorityCode::Best.value() as f64
    }
}
