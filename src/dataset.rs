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
//! Loading and querying the set of simulated scenarios.

use std::{
    fs,
    path::{Path, PathBuf},
};

use itertools::Itertools;
use ordered_float::OrderedFloat;

use crate::records::{Condition, ScenarioRecord};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Input file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Read-only, ordered sequence of scenario records as stored in the input file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<ScenarioRecord>,
}

impl Dataset {
    /// Reads all records from the CSV file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }
        log::info!("Loading: {path:?}");
        let mut csv = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(fs::File::open(path)?);
        let records = csv
            .deserialize()
            .collect::<Result<Vec<ScenarioRecord>, _>>()?;
        log::debug!("Read {} records from {path:?}", records.len());
        Ok(Self { records })
    }

    pub fn from_records(records: Vec<ScenarioRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ScenarioRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScenarioRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The first `n` records in file order.
    pub fn head(&self, n: usize) -> &[ScenarioRecord] {
        &self.records[..n.min(self.records.len())]
    }

    /// Returns a new dataset containing the records matching `pred`, keeping their order.
    pub fn filter(&self, pred: impl Fn(&ScenarioRecord) -> bool) -> Self {
        Self {
            records: self.records.iter().filter(|r| pred(r)).cloned().collect(),
        }
    }

    pub fn with_nodes(&self, num_nodes: u32) -> Self {
        self.filter(|r| r.num_nodes == num_nodes)
    }

    pub fn with_distance(&self, distance: f64) -> Self {
        self.filter(|r| r.distance == distance)
    }

    pub fn with_condition(&self, condition: Condition) -> Self {
        self.filter(|r| r.condition() == condition)
    }

    /// Sorted distinct distances.
    pub fn distances(&self) -> Vec<f64> {
        self.records
            .iter()
            .map(|r| OrderedFloat(r.distance))
            .sorted()
            .dedup()
            .map(|d| d.into_inner())
            .collect()
    }

    /// Sorted distinct node counts.
    pub fn node_counts(&self) -> Vec<u32> {
        self.records
            .iter()
            .map(|r| r.num_nodes)
            .sorted()
            .dedup()
            .collect()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a ScenarioRecord;

    type IntoIter = std::slice::Iter<'a, ScenarioRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl FromIterator<ScenarioRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = ScenarioRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
