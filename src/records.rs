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
//! Module defining the record data types (de-)serialized from the extended simulation CSV.

use std::cmp::Ordering;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
/// One simulated configuration, i.e., one row of `zigbee_extended_results.csv`.
pub struct ScenarioRecord {
    #[serde(rename = "Scenario", default)]
    pub scenario: Option<String>,
    /// Inter-node spacing in meters.
    #[serde(rename = "Distance")]
    pub distance: f64,
    #[serde(rename = "NumNodes")]
    pub num_nodes: u32,
    /// Gaussian noise enabled.
    #[serde(
        rename = "Noise",
        serialize_with = "serialize_flag",
        deserialize_with = "deserialize_flag"
    )]
    pub noise: bool,
    /// Rayleigh fading enabled.
    #[serde(
        rename = "Fading",
        serialize_with = "serialize_flag",
        deserialize_with = "deserialize_flag"
    )]
    pub fading: bool,
    #[serde(rename = "Sent", default)]
    pub sent: Option<u64>,
    #[serde(rename = "Received", default)]
    pub received: Option<u64>,
    #[serde(rename = "Dropped", default)]
    pub dropped: Option<u64>,
    /// Packet delivery ratio in `[%]`.
    #[serde(rename = "PDR")]
    pub pdr: f64,
    /// Mean SNR in dB.
    #[serde(rename = "AvgSNR")]
    pub avg_snr: f64,
    #[serde(rename = "MinSNR", default)]
    pub min_snr: Option<f64>,
    #[serde(rename = "MaxSNR", default)]
    pub max_snr: Option<f64>,
    /// Mean end-to-end delay in ms.
    #[serde(rename = "AvgDelay")]
    pub avg_delay: f64,
}

impl ScenarioRecord {
    /// Builds a record carrying only the columns used by the analysis.
    pub fn new(
        distance: f64,
        num_nodes: u32,
        condition: Condition,
        pdr: f64,
        avg_snr: f64,
        avg_delay: f64,
    ) -> Self {
        Self {
            scenario: None,
            distance,
            num_nodes,
            noise: condition.noise(),
            fading: condition.fading(),
            sent: None,
            received: None,
            dropped: None,
            pdr,
            avg_snr,
            min_snr: None,
            max_snr: None,
            avg_delay,
        }
    }

    pub fn condition(&self) -> Condition {
        Condition::from_flags(self.noise, self.fading)
    }

    pub fn noise_label(&self) -> &'static str {
        if self.noise {
            "Noise"
        } else {
            "No Noise"
        }
    }

    pub fn fading_label(&self) -> &'static str {
        if self.fading {
            "Fading"
        } else {
            "No Fading"
        }
    }

    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Pdr => self.pdr,
            Metric::AvgSnr => self.avg_snr,
            Metric::AvgDelay => self.avg_delay,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
)]
/// Channel condition given by the combination of the noise and fading flags. The variant order is
/// the order of the condition matrix, the bar chart and the trend report. Sorting orders by the
/// `(noise, fading)` flags instead, which is the order of the sweep legends and heat map rows.
pub enum Condition {
    #[strum(serialize = "Ideal")]
    Ideal,
    #[strum(serialize = "Noise Only")]
    NoiseOnly,
    #[strum(serialize = "Fading Only")]
    FadingOnly,
    #[strum(serialize = "Realistic")]
    Realistic,
}

impl Condition {
    pub fn from_flags(noise: bool, fading: bool) -> Self {
        match (noise, fading) {
            (false, false) => Self::Ideal,
            (true, false) => Self::NoiseOnly,
            (false, true) => Self::FadingOnly,
            (true, true) => Self::Realistic,
        }
    }

    pub fn noise(&self) -> bool {
        matches!(self, Self::NoiseOnly | Self::Realistic)
    }

    pub fn fading(&self) -> bool {
        matches!(self, Self::FadingOnly | Self::Realistic)
    }

    /// Title used for the condition-matrix panels.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Ideal => "Ideal (No Noise, No Fading)",
            Self::NoiseOnly => "Noise Only",
            Self::FadingOnly => "Fading Only",
            Self::Realistic => "Realistic (Noise + Fading)",
        }
    }

    /// Legend label, e.g., `Noise=1, Fading=0`.
    pub fn flags_label(&self) -> String {
        format!(
            "Noise={}, Fading={}",
            self.noise() as u8,
            self.fading() as u8
        )
    }
}

impl PartialOrd for Condition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Condition {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.noise(), self.fading()).cmp(&(other.noise(), other.fading()))
    }
}

/// Numeric measurement columns of a [`ScenarioRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Metric {
    #[strum(serialize = "PDR")]
    Pdr,
    #[strum(serialize = "AvgSNR")]
    AvgSnr,
    #[strum(serialize = "AvgDelay")]
    AvgDelay,
}

fn serialize_flag<S: Serializer>(flag: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(*flag as u8)
}

fn deserialize_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let buf = String::deserialize(deserializer)?;
    match buf.trim() {
        "1" | "1.0" | "true" | "True" => Ok(true),
        "0" | "0.0" | "false" | "False" => Ok(false),
        x => Err(de::Error::invalid_value(
            de::Unexpected::Str(x),
            &"a boolean flag (0 or 1)",
        )),
    }
}

#[cfg(test)]
mod test {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn deserialize_simulator_row() {
        let csv_data = "Scenario,Distance,NumNodes,Noise,Fading,Sent,Received,Dropped,DroppedNoise,DroppedFading,DroppedSensitivity,PDR,AvgSNR,MinSNR,MaxSNR,AvgDelay\n\
                        D10_N6_noise_fading,10,6,1,1,500,431,69,20,40,9,86.2,12.5,2.1,20.3,14.75\n";
        let mut csv = csv::Reader::from_reader(csv_data.as_bytes());
        let record: ScenarioRecord = csv.deserialize().next().unwrap().unwrap();

        assert_eq!(record.scenario.as_deref(), Some("D10_N6_noise_fading"));
        assert_eq!(record.distance, 10.0);
        assert_eq!(record.num_nodes, 6);
        assert!(record.noise);
        assert!(record.fading);
        assert_eq!(record.received, Some(431));
        assert_eq!(record.pdr, 86.2);
        assert_eq!(record.max_snr, Some(20.3));
        assert_eq!(record.avg_delay, 14.75);
        assert_eq!(record.condition(), Condition::Realistic);
    }

    #[test]
    fn deserialize_minimal_row() {
        let csv_data = "Distance,NumNodes,Noise,Fading,PDR,AvgSNR,AvgDelay\n5.5,4,0,1,99.0,30.1,8.0\n";
        let mut csv = csv::Reader::from_reader(csv_data.as_bytes());
        let record: ScenarioRecord = csv.deserialize().next().unwrap().unwrap();

        assert_eq!(
            record,
            ScenarioRecord::new(5.5, 4, Condition::FadingOnly, 99.0, 30.1, 8.0)
        );
        assert_eq!(record.noise_label(), "No Noise");
        assert_eq!(record.fading_label(), "Fading");
    }

    #[test]
    fn reject_invalid_flag() {
        let csv_data = "Distance,NumNodes,Noise,Fading,PDR,AvgSNR,AvgDelay\n5,4,2,0,99.0,30.1,8.0\n";
        let mut csv = csv::Reader::from_reader(csv_data.as_bytes());
        let record: Result<ScenarioRecord, _> = csv.deserialize().next().unwrap();
        assert!(record.is_err());
    }

    #[test]
    fn condition_flags() {
        let order = Condition::iter().collect::<Vec<_>>();
        assert_eq!(
            order,
            vec![
                Condition::Ideal,
                Condition::NoiseOnly,
                Condition::FadingOnly,
                Condition::Realistic
            ]
        );
        for c in order {
            assert_eq!(Condition::from_flags(c.noise(), c.fading()), c);
        }
        assert_eq!(Condition::NoiseOnly.flags_label(), "Noise=1, Fading=0");
        assert_eq!(Condition::Realistic.to_string(), "Realistic");
    }

    #[test]
    fn conditions_sort_by_flags() {
        let mut sorted = Condition::iter().collect::<Vec<_>>();
        sorted.sort();
        assert_eq!(
            sorted,
            vec![
                Condition::Ideal,
                Condition::FadingOnly,
                Condition::NoiseOnly,
                Condition::Realistic
            ]
        );
        assert!(Condition::FadingOnly < Condition::NoiseOnly);
    }
}
