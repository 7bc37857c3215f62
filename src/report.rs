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
//! Console report: data overview, grouped summary statistics and the trend summary.

use std::{collections::BTreeMap, fs, io, path::Path};

use itertools::Itertools;
use ordered_float::OrderedFloat;
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::{
    aggregate::{mean, round2},
    dataset::Dataset,
    records::{Condition, ScenarioRecord},
    selection::Parameters,
};

/// Number of records shown in the data overview.
pub const SAMPLE_ROWS: usize = 5;
const RULE_WIDTH: usize = 80;

/// One row of the grouped summary table. Values are rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    #[serde(rename = "Distance")]
    pub distance: f64,
    #[serde(rename = "NumNodes")]
    pub num_nodes: u32,
    #[serde(rename = "Noise")]
    pub noise: u8,
    #[serde(rename = "Fading")]
    pub fading: u8,
    #[serde(rename = "PDR")]
    pub pdr: f64,
    #[serde(rename = "AvgSNR")]
    pub avg_snr: f64,
    #[serde(rename = "AvgDelay")]
    pub avg_delay: f64,
}

/// Groups all records by `(Distance, NumNodes, Noise, Fading)` and averages the measurements of
/// each group. Rows are sorted by the group key.
pub fn summary_table(data: &Dataset) -> Vec<SummaryRow> {
    let mut groups: BTreeMap<(OrderedFloat<f64>, u32, bool, bool), Vec<&ScenarioRecord>> =
        BTreeMap::new();
    for r in data {
        groups
            .entry((OrderedFloat(r.distance), r.num_nodes, r.noise, r.fading))
            .or_default()
            .push(r);
    }
    groups
        .into_iter()
        .map(|((distance, num_nodes, noise, fading), group)| {
            let avg = |f: fn(&ScenarioRecord) -> f64| {
                round2(mean(group.iter().copied().map(f)).unwrap_or(f64::NAN))
            };
            SummaryRow {
                distance: distance.into_inner(),
                num_nodes,
                noise: noise as u8,
                fading: fading as u8,
                pdr: avg(|r| r.pdr),
                avg_snr: avg(|r| r.avg_snr),
                avg_delay: avg(|r| r.avg_delay),
            }
        })
        .collect()
}

/// Writes the summary table as CSV to `path`.
pub fn write_summary_csv(path: impl AsRef<Path>, rows: &[SummaryRow]) -> Result<(), csv::Error> {
    let mut csv = csv::WriterBuilder::new().has_headers(true).from_writer(
        fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path.as_ref())?,
    );
    for row in rows {
        csv.serialize(row)?;
    }
    csv.flush()?;
    Ok(())
}

/// PDR change between the smallest and the largest value of the swept parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Trend {
    pub condition: Condition,
    pub from: f64,
    pub to: f64,
    /// `PDR(to) - PDR(from)`, negative if the delivery ratio drops.
    pub change: f64,
}

/// PDR trend from the smallest to the largest distance, holding the node count at its
/// representative value.
pub fn distance_trends(data: &Dataset, params: &Parameters) -> Vec<Trend> {
    match (params.min_distance(), params.max_distance()) {
        (Some(from), Some(to)) if params.distances.len() >= 2 => {
            trends(&data.with_nodes(params.mid_nodes), from, to, |r| r.distance)
        }
        _ => Vec::new(),
    }
}

/// PDR trend from the smallest to the largest node count, holding the distance at its
/// representative value.
pub fn node_trends(data: &Dataset, params: &Parameters) -> Vec<Trend> {
    match (params.min_nodes(), params.max_nodes()) {
        (Some(from), Some(to)) if params.node_counts.len() >= 2 => trends(
            &data.with_distance(params.mid_distance),
            from as f64,
            to as f64,
            |r| r.num_nodes as f64,
        ),
        _ => Vec::new(),
    }
}

fn trends(data: &Dataset, from: f64, to: f64, x: impl Fn(&ScenarioRecord) -> f64) -> Vec<Trend> {
    Condition::iter()
        .filter_map(|condition| {
            let subset = data.with_condition(condition);
            if subset.len() < 2 {
                return None;
            }
            let pdr_at = |v: f64| mean(subset.iter().filter(|r| x(*r) == v).map(|r| r.pdr));
            let (pdr_from, pdr_to) = (pdr_at(from)?, pdr_at(to)?);
            Some(Trend {
                condition,
                from,
                to,
                change: pdr_to - pdr_from,
            })
        })
        .collect()
}

fn rule(out: &mut impl io::Write) -> io::Result<()> {
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))
}

/// Writes `rows` as a right-aligned text table.
fn write_table(
    out: &mut impl io::Write,
    header: &[String],
    rows: &[Vec<String>],
) -> io::Result<()> {
    let widths = header
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect_vec();
    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{cell:>w$}"))
            .join("  ")
    };
    writeln!(out, "{}", line(header))?;
    for row in rows {
        writeln!(out, "{}", line(row))?;
    }
    Ok(())
}

/// Prints the scenario count, the available parameter values, the selected representatives and
/// the first records.
pub fn write_overview(
    out: &mut impl io::Write,
    data: &Dataset,
    params: &Parameters,
) -> io::Result<()> {
    writeln!(out, "=== Data overview ===")?;
    writeln!(out, "Total scenarios: {}", data.len())?;
    writeln!(out, "Available distances: [{}]", params.distances.iter().join(", "))?;
    writeln!(out, "Available node counts: [{}]", params.node_counts.iter().join(", "))?;
    writeln!(
        out,
        "Using distance={}m and nodes={} for the analysis",
        params.mid_distance, params.mid_nodes
    )?;
    writeln!(out)?;
    writeln!(out, "Data sample:")?;

    let sample = data.head(SAMPLE_ROWS);
    let with_scenario = sample.iter().any(|r| r.scenario.is_some());
    let with_counts = sample.iter().any(|r| r.sent.is_some() || r.received.is_some());
    let with_snr_range = sample.iter().any(|r| r.min_snr.is_some() || r.max_snr.is_some());
    let opt = |x: Option<String>| x.unwrap_or_else(|| "-".to_string());

    let mut header = Vec::new();
    if with_scenario {
        header.push("Scenario");
    }
    header.extend(["Distance", "NumNodes", "Noise", "Fading"]);
    if with_counts {
        header.extend(["Sent", "Received"]);
    }
    header.extend(["PDR", "AvgSNR"]);
    if with_snr_range {
        header.extend(["MinSNR", "MaxSNR"]);
    }
    header.extend(["AvgDelay", "NoiseLabel", "FadingLabel"]);

    let rows = sample
        .iter()
        .map(|r| {
            let mut row = Vec::new();
            if with_scenario {
                row.push(opt(r.scenario.clone()));
            }
            row.extend([
                r.distance.to_string(),
                r.num_nodes.to_string(),
                (r.noise as u8).to_string(),
                (r.fading as u8).to_string(),
            ]);
            if with_counts {
                row.push(opt(r.sent.map(|x| x.to_string())));
                row.push(opt(r.received.map(|x| x.to_string())));
            }
            row.extend([r.pdr.to_string(), r.avg_snr.to_string()]);
            if with_snr_range {
                row.push(opt(r.min_snr.map(|x| x.to_string())));
                row.push(opt(r.max_snr.map(|x| x.to_string())));
            }
            row.extend([
                r.avg_delay.to_string(),
                r.noise_label().to_string(),
                r.fading_label().to_string(),
            ]);
            row
        })
        .collect_vec();
    let header = header.into_iter().map(String::from).collect_vec();
    write_table(out, &header, &rows)?;
    writeln!(out)
}

/// Prints the grouped summary table.
pub fn write_summary(out: &mut impl io::Write, rows: &[SummaryRow]) -> io::Result<()> {
    writeln!(out)?;
    rule(out)?;
    writeln!(out, "SUMMARY STATISTICS")?;
    rule(out)?;
    let header = ["Distance", "NumNodes", "Noise", "Fading", "PDR", "AvgSNR", "AvgDelay"]
        .map(String::from);
    let rows = rows
        .iter()
        .map(|r| {
            vec![
                r.distance.to_string(),
                r.num_nodes.to_string(),
                r.noise.to_string(),
                r.fading.to_string(),
                format!("{:.2}", r.pdr),
                format!("{:.2}", r.avg_snr),
                format!("{:.2}", r.avg_delay),
            ]
        })
        .collect_vec();
    write_table(out, &header, &rows)
}

/// Formats a distance trend line, e.g., `• Ideal: PDR -15.0% from 5m → 20m`.
pub fn format_distance_trend(trend: &Trend) -> String {
    format!(
        "   • {}: PDR {:+.1}% from {}m → {}m",
        trend.condition, trend.change, trend.from, trend.to
    )
}

/// Formats a node-count trend line, e.g., `• Ideal: PDR -4.0% from 4 → 8 nodes`.
pub fn format_node_trend(trend: &Trend) -> String {
    format!(
        "   • {}: PDR {:+.1}% from {} → {} nodes",
        trend.condition, trend.change, trend.from, trend.to
    )
}

/// Prints the natural-language trend summary.
pub fn write_trends(
    out: &mut impl io::Write,
    data: &Dataset,
    params: &Parameters,
) -> io::Result<()> {
    writeln!(out)?;
    rule(out)?;
    writeln!(out, "KEY FINDINGS")?;
    rule(out)?;

    writeln!(out, "\n1. Impact of DISTANCE:")?;
    for trend in distance_trends(data, params) {
        writeln!(out, "{}", format_distance_trend(&trend))?;
    }

    writeln!(out, "\n2. Impact of NUMBER OF NODES:")?;
    for trend in node_trends(data, params) {
        writeln!(out, "{}", format_node_trend(&trend))?;
    }

    writeln!(out)?;
    rule(out)
}
