//! `wt-core` — foundational types for the edge weighting engine.
//!
//! Every other `wt-*` crate depends on this one.  It has no `wt-*`
//! dependencies of its own.
//!
//! # What lives here
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`ids`]       | `EdgeId`, `NodeId`                                         |
//! | [`config`]    | `Configuration`, `ConfigValue` — the flat request hints    |
//! | [`encoder`]   | `TravelMode`, `TravelCapability`, `FlagEncoder`, `PriorityCode` |
//! | [`time`]      | `TimeWindow` (opening-hours subset)                        |
//! | [`error`]     | `CoreError`, `CoreResult`                                  |

pub mod config;
pub mod encoder;
pub mod error;
pub mod ids;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{ConfigValue, Configuration};
pub use encoder::{FlagEncoder, PriorityCode, TravelCapability, TravelMode};
pub use error::{CoreError, CoreResult};
pub use ids::{EdgeId, NodeId};
pub use time::TimeWindow;
