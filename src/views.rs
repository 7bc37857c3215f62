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
//! The four analysis views rendered into figures. Each view is plain data computed from the
//! dataset and the selected [`Parameters`].

use ordered_float::OrderedFloat;
use strum::IntoEnumIterator;

use crate::{
    aggregate::{self, PivotTable, Series},
    dataset::Dataset,
    records::{Condition, Metric, ScenarioRecord},
    selection::Parameters,
};

/// Axis swept while the other parameter is held at its representative value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepAxis {
    Distance,
    NumNodes,
}

impl SweepAxis {
    pub fn value(&self, record: &ScenarioRecord) -> f64 {
        match self {
            Self::Distance => record.distance,
            Self::NumNodes => record.num_nodes as f64,
        }
    }
}

/// Line series of PDR, SNR and delay along one axis, plus the PDR heat map per condition.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepView {
    pub axis: SweepAxis,
    /// Value of the parameter held fixed (node count for a distance sweep, distance otherwise).
    pub fixed: f64,
    /// Values of the swept axis available in the whole dataset.
    pub ticks: Vec<f64>,
    pub pdr: Vec<(Condition, Series)>,
    pub snr: Vec<(Condition, Series)>,
    pub delay: Vec<(Condition, Series)>,
    /// Mean PDR, rows: conditions, columns: swept axis values.
    pub heatmap: PivotTable<Condition, OrderedFloat<f64>>,
}

impl SweepView {
    pub fn distance(data: &Dataset, params: &Parameters) -> Self {
        let fixed = data.with_nodes(params.mid_nodes);
        Self::build(
            &fixed,
            SweepAxis::Distance,
            params.mid_nodes as f64,
            params.distances.clone(),
        )
    }

    pub fn num_nodes(data: &Dataset, params: &Parameters) -> Self {
        let fixed = data.with_distance(params.mid_distance);
        Self::build(
            &fixed,
            SweepAxis::NumNodes,
            params.mid_distance,
            params.node_counts.iter().map(|n| *n as f64).collect(),
        )
    }

    fn build(data: &Dataset, axis: SweepAxis, fixed: f64, ticks: Vec<f64>) -> Self {
        let x = move |r: &ScenarioRecord| axis.value(r);
        Self {
            axis,
            fixed,
            ticks,
            pdr: aggregate::series_by_condition(data, x, Metric::Pdr),
            snr: aggregate::series_by_condition(data, x, Metric::AvgSnr),
            delay: aggregate::series_by_condition(data, x, Metric::AvgDelay),
            heatmap: aggregate::pivot(
                data,
                |r| r.condition(),
                |r| OrderedFloat(axis.value(r)),
                |r| r.pdr,
            ),
        }
    }
}

/// PDR over distance × node count for a single condition.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixPanel {
    pub condition: Condition,
    /// `None` if the dataset holds no records for this condition.
    pub table: Option<PivotTable<OrderedFloat<f64>, u32>>,
}

/// One [`MatrixPanel`] per condition, in condition order.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionMatrix {
    pub panels: Vec<MatrixPanel>,
}

impl ConditionMatrix {
    pub fn new(data: &Dataset) -> Self {
        let panels = Condition::iter()
            .map(|condition| {
                let subset = data.with_condition(condition);
                let table = (!subset.is_empty()).then(|| {
                    aggregate::pivot(
                        &subset,
                        |r| OrderedFloat(r.distance),
                        |r| r.num_nodes,
                        |r| r.pdr,
                    )
                });
                if table.is_none() {
                    log::warn!("No data for condition {condition}");
                }
                MatrixPanel { condition, table }
            })
            .collect();
        Self { panels }
    }
}

/// Which factor an impact series isolates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumIter)]
pub enum Factor {
    /// Noise on vs. off, without fading.
    #[strum(serialize = "Noise")]
    Noise,
    /// Fading on vs. off, without noise.
    #[strum(serialize = "Fading")]
    Fading,
    /// Ideal vs. realistic channel.
    #[strum(serialize = "Noise + Fading")]
    Combined,
}

impl Factor {
    /// Conditions compared: `(off, on)`.
    pub fn conditions(&self) -> (Condition, Condition) {
        match self {
            Self::Noise => (Condition::Ideal, Condition::NoiseOnly),
            Self::Fading => (Condition::Ideal, Condition::FadingOnly),
            Self::Combined => (Condition::Ideal, Condition::Realistic),
        }
    }
}

/// PDR reduction caused by one factor, one series (over node count) per distance.
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactPanel {
    pub factor: Factor,
    pub series: Vec<(f64, Series)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImpactAnalysis {
    pub panels: Vec<ImpactPanel>,
    /// Mean PDR over all records of each condition.
    pub mean_pdr: Vec<(Condition, Option<f64>)>,
}

impl ImpactAnalysis {
    pub fn new(data: &Dataset, params: &Parameters) -> Self {
        let panels = Factor::iter()
            .map(|factor| ImpactPanel {
                factor,
                series: impact_series(data, &params.distances, factor),
            })
            .collect();
        let mean_pdr = Condition::iter()
            .map(|c| (c, aggregate::mean(data.with_condition(c).iter().map(|r| r.pdr))))
            .collect();
        Self { panels, mean_pdr }
    }
}

/// Computes `PDR_off - PDR_on` over the node count for every distance where both subsets have
/// records and share at least one node count.
pub fn impact_series(data: &Dataset, distances: &[f64], factor: Factor) -> Vec<(f64, Series)> {
    let (off, on) = factor.conditions();
    distances
        .iter()
        .filter_map(|&distance| {
            let at_distance = data.with_distance(distance);
            let off = at_distance.with_condition(off);
            let on = at_distance.with_condition(on);
            if off.is_empty() || on.is_empty() {
                return None;
            }
            let delta = aggregate::pdr_delta(&off, &on);
            (!delta.is_empty()).then_some((distance, delta))
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    /// PDR decreasing with distance and node count; noise costs 5%, fading 10%.
    fn grid(conditions: &[Condition]) -> Dataset {
        let mut records = Vec::new();
        for &c in conditions {
            for d in [5.0, 10.0, 20.0] {
                for n in [4, 6, 8] {
                    let mut pdr = 100.0 - d - n as f64;
                    if c.noise() {
                        pdr -= 5.0;
                    }
                    if c.fading() {
                        pdr -= 10.0;
                    }
                    records.push(ScenarioRecord::new(d, n, c, pdr, pdr / 3.0, 200.0 - pdr));
                }
            }
        }
        Dataset::from_records(records)
    }

    fn all_conditions() -> Vec<Condition> {
        Condition::iter().collect()
    }

    #[test]
    fn distance_sweep_holds_nodes_fixed() {
        let data = grid(&all_conditions());
        let params = Parameters::select(&data);
        let view = SweepView::distance(&data, &params);

        assert_eq!(view.fixed, 6.0);
        assert_eq!(view.ticks, vec![5.0, 10.0, 20.0]);
        assert_eq!(view.pdr.len(), 4);
        let (c, ideal) = &view.pdr[0];
        assert_eq!(*c, Condition::Ideal);
        assert_eq!(ideal.x, vec![5.0, 10.0, 20.0]);
        assert_eq!(ideal.y, vec![89.0, 84.0, 74.0]);
        assert_eq!(view.delay[3].1.y, vec![200.0 - 74.0, 200.0 - 69.0, 200.0 - 59.0]);

        // legend and heat map rows are sorted by (noise, fading)
        let sorted = vec![
            Condition::Ideal,
            Condition::FadingOnly,
            Condition::NoiseOnly,
            Condition::Realistic,
        ];
        assert_eq!(view.pdr.iter().map(|(c, _)| *c).collect::<Vec<_>>(), sorted);
        assert_eq!(view.heatmap.rows, sorted);
        assert_eq!(view.heatmap.get(1, 0), Some(100.0 - 5.0 - 6.0 - 10.0));
        assert_eq!(view.heatmap.cols.len(), 3);
        assert_eq!(view.heatmap.get(3, 2), Some(59.0));
    }

    #[test]
    fn node_sweep_holds_distance_fixed() {
        let data = grid(&all_conditions());
        let params = Parameters::select(&data);
        let view = SweepView::num_nodes(&data, &params);

        assert_eq!(view.axis, SweepAxis::NumNodes);
        assert_eq!(view.fixed, 10.0);
        assert_eq!(view.ticks, vec![4.0, 6.0, 8.0]);
        assert_eq!(view.pdr[1].0, Condition::FadingOnly);
        assert_eq!(view.pdr[1].1.y, vec![76.0, 74.0, 72.0]);
        assert_eq!(view.pdr[2].0, Condition::NoiseOnly);
        assert_eq!(view.pdr[2].1.y, vec![81.0, 79.0, 77.0]);
    }

    #[test]
    fn matrix_placeholder_for_missing_condition() {
        let data = grid(&[Condition::Ideal, Condition::Realistic]);
        let matrix = ConditionMatrix::new(&data);

        assert_eq!(matrix.panels.len(), 4);
        assert!(matrix.panels[0].table.is_some());
        assert!(matrix.panels[1].table.is_none());
        assert!(matrix.panels[2].table.is_none());
        let realistic = matrix.panels[3].table.as_ref().unwrap();
        assert_eq!(realistic.rows.len(), 3);
        assert_eq!(realistic.cols, vec![4, 6, 8]);
        assert_eq!(realistic.get(0, 0), Some(100.0 - 5.0 - 4.0 - 15.0));

        let empty = ConditionMatrix::new(&Dataset::default());
        assert!(empty.panels.iter().all(|p| p.table.is_none()));
    }

    #[test]
    fn impact_per_factor() {
        let data = grid(&all_conditions());
        let params = Parameters::select(&data);
        let impact = ImpactAnalysis::new(&data, &params);

        let expected = [(Factor::Noise, 5.0), (Factor::Fading, 10.0), (Factor::Combined, 15.0)];
        for (panel, (factor, loss)) in impact.panels.iter().zip(expected) {
            assert_eq!(panel.factor, factor);
            assert_eq!(panel.series.len(), 3);
            for (_, series) in &panel.series {
                assert_eq!(series.x, vec![4.0, 6.0, 8.0]);
                assert!(series.y.iter().all(|y| (*y - loss).abs() < 1e-9));
            }
        }

        let ideal_mean = impact.mean_pdr[0].1.unwrap();
        let realistic_mean = impact.mean_pdr[3].1.unwrap();
        assert!((ideal_mean - realistic_mean - 15.0).abs() < 1e-9);
    }

    #[test]
    fn impact_skips_distances_without_counterpart() {
        let mut data = grid(&[Condition::Ideal]).records().to_vec();
        data.push(ScenarioRecord::new(10.0, 6, Condition::NoiseOnly, 50.0, 1.0, 1.0));
        let data = Dataset::from_records(data);
        let params = Parameters::select(&data);

        let noise = impact_series(&data, &params.distances, Factor::Noise);
        assert_eq!(noise.len(), 1);
        assert_eq!(noise[0].0, 10.0);
        assert_eq!(noise[0].1.x, vec![6.0]);
        assert_eq!(noise[0].1.y, vec![84.0 - 50.0]);
        assert!(impact_series(&data, &params.distances, Factor::Fading).is_empty());

        let impact = ImpactAnalysis::new(&data, &params);
        assert_eq!(impact.mean_pdr[2], (Condition::FadingOnly, None));
    }
}
