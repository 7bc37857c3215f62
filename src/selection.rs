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
//! Selection of the representative parameter values used to hold one axis fixed while sweeping
//! the other.

use crate::dataset::Dataset;

/// Representative distance if the data contains no distances at all.
pub const DEFAULT_DISTANCE: f64 = 10.0;
/// Representative node count if the data contains no node counts at all.
pub const DEFAULT_NUM_NODES: u32 = 6;

/// Returns the element at index `len / 2` of an already sorted slice (the upper-middle element
/// for even lengths), or `default` if the slice is empty.
pub fn representative<T: Copy>(sorted: &[T], default: T) -> T {
    sorted.get(sorted.len() / 2).copied().unwrap_or(default)
}

/// Available parameter values and the chosen representatives.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub distances: Vec<f64>,
    pub node_counts: Vec<u32>,
    pub mid_distance: f64,
    pub mid_nodes: u32,
}

impl Parameters {
    pub fn select(data: &Dataset) -> Self {
        let distances = data.distances();
        let node_counts = data.node_counts();
        let mid_distance = representative(&distances, DEFAULT_DISTANCE);
        let mid_nodes = representative(&node_counts, DEFAULT_NUM_NODES);
        log::debug!("Selected distance={mid_distance}m and nodes={mid_nodes}");
        Self {
            distances,
            node_counts,
            mid_distance,
            mid_nodes,
        }
    }

    pub fn min_distance(&self) -> Option<f64> {
        self.distances.first().copied()
    }

    pub fn max_distance(&self) -> Option<f64> {
        self.distances.last().copied()
    }

    pub fn min_nodes(&self) -> Option<u32> {
        self.node_counts.first().copied()
    }

    pub fn max_nodes(&self) -> Option<u32> {
        self.node_counts.last().copied()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::records::{Condition, ScenarioRecord};

    #[test]
    fn index_based_midpoint() {
        assert_eq!(representative(&[1], 0), 1);
        assert_eq!(representative(&[1, 2], 0), 2);
        assert_eq!(representative(&[1, 2, 3], 0), 2);
        assert_eq!(representative(&[1, 2, 3, 100], 0), 3);
        assert_eq!(representative(&[5.0, 10.0, 15.0, 20.0, 25.0], 0.0), 15.0);
        assert_eq!(representative::<u32>(&[], 6), 6);
    }

    #[test]
    fn defaults_for_empty_data() {
        let params = Parameters::select(&Dataset::default());
        assert_eq!(params.mid_distance, DEFAULT_DISTANCE);
        assert_eq!(params.mid_nodes, DEFAULT_NUM_NODES);
        assert_eq!(params.min_distance(), None);
        assert_eq!(params.max_nodes(), None);
    }

    #[test]
    fn select_from_data() {
        let data = Dataset::from_records(
            [(20.0, 8), (5.0, 4), (15.0, 6), (10.0, 10), (5.0, 8)]
                .into_iter()
                .map(|(d, n)| ScenarioRecord::new(d, n, Condition::Ideal, 90.0, 20.0, 10.0))
                .collect(),
        );
        let params = Parameters::select(&data);
        assert_eq!(params.distances, vec![5.0, 10.0, 15.0, 20.0]);
        assert_eq!(params.node_counts, vec![4, 6, 8, 10]);
        assert_eq!(params.mid_distance, 15.0);
        assert_eq!(params.mid_nodes, 8);
        assert_eq!(params.min_distance(), Some(5.0));
        assert_eq!(params.max_distance(), Some(20.0));
        assert_eq!(params.min_nodes(), Some(4));
        assert_eq!(params.max_nodes(), Some(10));
    }
}
