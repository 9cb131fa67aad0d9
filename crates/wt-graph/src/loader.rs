//! CSV network loader.
//!
//! # CSV format
//!
//! One row per edge, loaded for a single travel mode.  Edge ids are assigned
//! in row order.
//!
//! ```csv
//! from,to,length_m,speed_kmh,reverse_speed_kmh,priority,grade_pct,green_index,noise_level,conditional_speed
//! 0,1,120.0,50,50,4,1.5,0.2,0.7,
//! 1,2,80.0,30,0,,,,,20 @ (Mo-Fr 07:00-19:00)
//! ```
//!
//! | Column              | Required | Meaning                                         |
//! |---------------------|----------|-------------------------------------------------|
//! | `from`, `to`        | yes      | node ids                                        |
//! | `length_m`          | yes      | metres                                          |
//! | `speed_kmh`         | yes      | forward speed; `0` closes the direction         |
//! | `reverse_speed_kmh` | no       | defaults to `speed_kmh`                         |
//! | `priority`          | no       | 1..=7 priority code; the column makes priority part of the graph |
//! | `grade_pct`, `green_index`, `noise_level` | no | optional attributes          |
//! | `conditional_speed` | no       | `;`-separated rules, e.g. `30 @ (22:00-06:00)`  |

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use wt_core::{NodeId, PriorityCode, TravelMode};

use crate::network::{ConditionalSpeed, EdgeSpec, RoadNetwork, RoadNetworkBuilder};
use crate::{GraphError, GraphResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct EdgeRecord {
    from:              u32,
    to:                u32,
    length_m:          f64,
    speed_kmh:         f64,
    #[serde(default)]
    reverse_speed_kmh: Option<f64>,
    #[serde(default)]
    priority:          Option<u8>,
    #[serde(default)]
    grade_pct:         Option<f64>,
    #[serde(default)]
    green_index:       Option<f64>,
    #[serde(default)]
    noise_level:       Option<f64>,
    #[serde(default)]
    conditional_speed: Option<String>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a single-mode [`RoadNetwork`] from a CSV file.
pub fn load_network_csv(path: &Path, mode: TravelMode) -> GraphResult<RoadNetwork> {
    let file = std::fs::File::open(path)?;
    load_network_reader(file, mode)
}

/// Like [`load_network_csv`] but accepts any `Read` source.
pub fn load_network_reader<R: Read>(reader: R, mode: TravelMode) -> GraphResult<RoadNetwork> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut builder = RoadNetworkBuilder::new();

    for (row_no, result) in csv_reader.deserialize::<EdgeRecord>().enumerate() {
        let row = result.map_err(|e| GraphError::Parse(e.to_string()))?;
        if !(row.length_m.is_finite() && row.length_m >= 0.0) {
            return Err(GraphError::Parse(format!(
                "row {row_no}: length_m must be a non-negative number, got {}",
                row.length_m
            )));
        }

        let mut spec = EdgeSpec::new(NodeId(row.from), NodeId(row.to), row.length_m);
        if let Some(g) = row.grade_pct {
            spec = spec.grade(g);
        }
        if let Some(g) = row.green_index {
            spec = spec.green_index(g);
        }
        if let Some(n) = row.noise_level {
            spec = spec.noise_level(n);
        }
        let edge = builder.add_edge(spec);

        let reverse = row.reverse_speed_kmh.unwrap_or(row.speed_kmh);
        builder.set_speed(mode, edge, row.speed_kmh, reverse)?;

        if let Some(p) = row.priority {
            let code = PriorityCode::from_value(p);
            builder.set_priority(mode, edge, code, code)?;
        }

        for rule in row
            .conditional_speed
            .as_deref()
            .unwrap_or("")
            .split(';')
            .map(str::trim)
            .filter(|r| !r.is_empty())
        {
            builder.add_conditional_speed(mode, edge, rule.parse::<ConditionalSpeed>()?)?;
        }
    }

    Ok(builder.build())
}
