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
//! Pure grouping, pivoting and merging functions over a [`Dataset`].

use std::collections::BTreeMap;

use itertools::Itertools;
use ordered_float::OrderedFloat;

use crate::{
    dataset::Dataset,
    records::{Condition, Metric, ScenarioRecord},
};

/// Arithmetic mean, `None` for an empty input.
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, n), x| (sum + x, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Rounds to two decimal places, ties to even.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round_ties_even() / 100.0
}

/// A line of `(x, y)` points, sorted by `x`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Series {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

impl FromIterator<(f64, f64)> for Series {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        let (x, y) = iter.into_iter().multiunzip();
        Self { x, y }
    }
}

/// Groups the records by `x` and computes the mean of `metric` for each group. The result is
/// sorted by `x`.
pub fn mean_series(
    data: &Dataset,
    x: impl Fn(&ScenarioRecord) -> f64,
    metric: Metric,
) -> Series {
    data.iter()
        .map(|r| (OrderedFloat(x(r)), r.metric(metric)))
        .into_group_map()
        .into_iter()
        .sorted_by_key(|(x, _)| *x)
        .filter_map(|(x, ys)| mean(ys).map(|y| (x.into_inner(), y)))
        .collect()
}

/// One [`mean_series`] per channel condition present in the data, sorted by the `(noise, fading)` flags.
pub fn series_by_condition(
    data: &Dataset,
    x: impl Fn(&ScenarioRecord) -> f64 + Copy,
    metric: Metric,
) -> Vec<(Condition, Series)> {
    data.iter()
        .map(|r| r.condition())
        .sorted()
        .dedup()
        .map(|c| (c, mean_series(&data.with_condition(c), x, metric)))
        .collect()
}

/// Two-dimensional table of mean values. Rows and columns are sorted by their keys; cells without
/// any record are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotTable<R, C> {
    pub rows: Vec<R>,
    pub cols: Vec<C>,
    pub cells: Vec<Vec<Option<f64>>>,
}

impl<R, C> PivotTable<R, C> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.cols.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.cells.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// Iterates over all filled cells as `(row_index, col_index, value)`.
    pub fn filled(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.cells.iter().enumerate().flat_map(|(i, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(j, v)| v.map(|v| (i, j, v)))
        })
    }
}

/// Pivots `value` into a `row_key` × `col_key` table, averaging duplicates.
pub fn pivot<R, C>(
    data: &Dataset,
    row_key: impl Fn(&ScenarioRecord) -> R,
    col_key: impl Fn(&ScenarioRecord) -> C,
    value: impl Fn(&ScenarioRecord) -> f64,
) -> PivotTable<R, C>
where
    R: Ord + Clone,
    C: Ord + Clone,
{
    let mut groups: BTreeMap<(R, C), Vec<f64>> = BTreeMap::new();
    for record in data {
        groups
            .entry((row_key(record), col_key(record)))
            .or_default()
            .push(value(record));
    }
    let rows = groups.keys().map(|(r, _)| r.clone()).sorted().dedup().collect_vec();
    let cols = groups.keys().map(|(_, c)| c.clone()).sorted().dedup().collect_vec();
    let cells = rows
        .iter()
        .map(|r| {
            cols.iter()
                .map(|c| {
                    groups
                        .get(&(r.clone(), c.clone()))
                        .and_then(|vs| mean(vs.iter().copied()))
                })
                .collect_vec()
        })
        .collect_vec();
    PivotTable { rows, cols, cells }
}

/// Mean PDR per node count.
pub fn pdr_by_nodes(data: &Dataset) -> BTreeMap<u32, f64> {
    data.iter()
        .map(|r| (r.num_nodes, r.pdr))
        .into_group_map()
        .into_iter()
        .filter_map(|(n, pdrs)| mean(pdrs).map(|m| (n, m)))
        .collect()
}

/// Joins the `off` and `on` subsets on the node count and returns `PDR_off - PDR_on` for every
/// node count present in both. Each subset is first reduced to its mean PDR per node count, so
/// the join is one-to-one.
pub fn pdr_delta(off: &Dataset, on: &Dataset) -> Series {
    let on = pdr_by_nodes(on);
    pdr_by_nodes(off)
        .into_iter()
        .filter_map(|(n, pdr_off)| on.get(&n).map(|pdr_on| (n as f64, pdr_off - pdr_on)))
        .collect()
}
