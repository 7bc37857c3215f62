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
//! Library for analyzing the results of the extended ZigBee channel simulation: packet delivery
//! ratio, SNR and delay under noise and fading, over distance and network size.

pub mod aggregate;
pub mod dataset;
pub mod pipeline;
pub mod records;
pub mod render;
pub mod report;
pub mod selection;
pub mod util;
pub mod views;

#[cfg(test)]
mod test;

pub mod prelude {
    pub use super::{
        dataset::{Dataset, LoadError},
        pipeline::Options,
        records::{Condition, Metric, ScenarioRecord},
        selection::Parameters,
    };
}
