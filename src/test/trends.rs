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
use itertools::Itertools;

use super::grid;
use crate::{
    dataset::Dataset,
    records::Condition,
    report::{self, distance_trends, node_trends},
    selection::Parameters,
};

#[test]
fn every_trend_decreases() {
    let data = Dataset::from_records(grid());
    let params = Parameters::select(&data);
    assert_eq!(params.mid_distance, 10.0);
    assert_eq!(params.mid_nodes, 6);

    let by_distance = distance_trends(&data, &params);
    let by_nodes = node_trends(&data, &params);
    assert_eq!(by_distance.len(), 4);
    assert_eq!(by_nodes.len(), 4);
    for trend in by_distance.iter().chain(&by_nodes) {
        assert!(trend.change < 0.0, "{trend:?}");
    }
    // PDR(20m) - PDR(5m) at 6 nodes
    assert_eq!(by_distance[0].change, -15.0);
    // PDR(8 nodes) - PDR(4 nodes) at 10m
    assert_eq!(by_nodes[3].change, -2.0);

    let mut out = Vec::new();
    report::write_trends(&mut out, &data, &params).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines = text.lines().filter(|l| l.contains('•')).collect_vec();
    assert_eq!(lines.len(), 8);
    assert!(lines.iter().all(|l| l.contains("PDR -")));
    assert!(text.contains("   • Ideal: PDR -15.0% from 5m → 20m"));
    assert!(text.contains("   • Realistic: PDR -2.0% from 4 → 8 nodes"));
}

#[test]
fn trends_need_two_values() {
    let data = Dataset::from_records(
        grid()
            .into_iter()
            .filter(|r| r.distance == 10.0)
            .collect(),
    );
    let params = Parameters::select(&data);
    assert!(distance_trends(&data, &params).is_empty());
    assert_eq!(node_trends(&data, &params).len(), 4);

    let ideal_only = Dataset::from_records(
        grid()
            .into_iter()
            .filter(|r| r.condition() == Condition::Ideal)
            .collect(),
    );
    let params = Parameters::select(&ideal_only);
    let trends = distance_trends(&ideal_only, &params);
    assert_eq!(trends.len(), 1);
    assert_eq!(trends[0].condition, Condition::Ideal);
}
