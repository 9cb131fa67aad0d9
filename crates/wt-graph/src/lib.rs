//! `wt-graph` — the read-only graph handle consumed by cost functions.
//!
//! Storage and adjacency belong to the routing engine; this crate only models
//! what a cost function may ask about an edge.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`network`] | `RoadNetwork`, `RoadNetworkBuilder`, `EdgeSpec`, `EncodedValue`, `ConditionalSpeed` |
//! | [`loader`]  | `load_network_csv`, `load_network_reader`                    |
//! | [`error`]   | `GraphError`, `GraphResult<T>`                               |

pub mod error;
pub mod loader;
pub mod network;

#[cfg(test)]
mod tests;

pub use error::{GraphError, GraphResult};
pub use loader::{load_network_csv, load_network_reader};
pub use network::{ConditionalSpeed, EdgeSpec, EncodedValue, RoadNetwork, RoadNetworkBuilder};
