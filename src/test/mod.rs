// ZigBee-Eval: Analysis of Extended ZigBee Channel Simulation Results
// Copyright (C) 2024-2025 Roland Schmid <roschmi@ethz.ch> and Tibor Schneider <sctibor@ethz.ch>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//! End-to-end tests running the analysis on synthetic simulation results.
//!
//! The rendering tests need system fonts and are ignored by default:
//!
//! ```shell
//! cargo test -- --include-ignored
//! ```

use std::{fs, io::Write, path::Path};

use strum::IntoEnumIterator;

use crate::records::{Condition, ScenarioRecord};

mod trends;

pub const DISTANCES: [f64; 3] = [5.0, 10.0, 20.0];
pub const NODE_COUNTS: [u32; 3] = [4, 6, 8];

/// PDR strictly decreasing in distance and node count; noise and fading each cost a fixed amount.
pub fn decreasing_pdr(distance: f64, num_nodes: u32, condition: Condition) -> f64 {
    let mut pdr = 100.0 - distance - 0.5 * num_nodes as f64;
    if condition.noise() {
        pdr -= 4.0;
    }
    if condition.fading() {
        pdr -= 9.0;
    }
    pdr
}

/// One record per distance, node count and condition.
pub fn grid() -> Vec<ScenarioRecord> {
    let mut records = Vec::new();
    for condition in Condition::iter() {
        for distance in DISTANCES {
            for num_nodes in NODE_COUNTS {
                let pdr = decreasing_pdr(distance, num_nodes, condition);
                records.push(ScenarioRecord::new(
                    distance,
                    num_nodes,
                    condition,
                    pdr,
                    30.0 - distance,
                    5.0 + num_nodes as f64,
                ));
            }
        }
    }
    records
}

/// Writes `records` in the format of the simulator output.
pub fn write_results(path: &Path, records: &[ScenarioRecord]) {
    let mut file = fs::File::create(path).unwrap();
    writeln!(
        file,
        "Scenario,Distance,NumNodes,Noise,Fading,Sent,Received,Dropped,DroppedNoise,\
         DroppedFading,DroppedSensitivity,PDR,AvgSNR,MinSNR,MaxSNR,AvgDelay"
    )
    .unwrap();
    for (i, r) in records.iter().enumerate() {
        let received = (r.pdr * 10.0).round() as u32;
        writeln!(
            file,
            "S{i},{},{},{},{},1000,{received},{},0,0,0,{},{},{},{},{}",
            r.distance,
            r.num_nodes,
            r.noise as u8,
            r.fading as u8,
            1000 - received,
            r.pdr,
            r.avg_snr,
            r.avg_snr - 3.0,
            r.avg_snr + 3.0,
            r.avg_delay,
        )
        .unwrap();
    }
}
