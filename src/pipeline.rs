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
//! Runs the whole analysis: load, select, build the views, render and report.

use std::{fs, io, path::PathBuf};

use crate::{
    dataset::Dataset,
    render::{self, html},
    report,
    selection::Parameters,
    util::PathBufExt,
    views::{ConditionMatrix, ImpactAnalysis, SweepView},
};

/// Default location of the simulation results.
pub const DEFAULT_DATA_PATH: &str = "results_extended/zigbee_extended_results.csv";
/// Default directory receiving the figures.
pub const DEFAULT_OUTPUT_PATH: &str = "results_extended";

/// File names of the generated figures, without extension.
pub const FIGURES: [&str; 4] = [
    "analysis_distance",
    "analysis_num_nodes",
    "analysis_matrix",
    "analysis_impact",
];
/// File name of the summary statistics written next to the figures.
pub const SUMMARY_CSV: &str = "summary_stats.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub data_path: PathBuf,
    pub output_path: PathBuf,
    /// Also write interactive HTML charts.
    pub html: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            html: false,
        }
    }
}

/// Runs the analysis and prints the report to `out`. Fails before writing any file if the input
/// cannot be loaded.
pub fn run(opts: &Options, out: &mut impl io::Write) -> anyhow::Result<()> {
    let data = Dataset::load(&opts.data_path)?;
    if data.is_empty() {
        log::warn!("{:?} contains no scenarios", opts.data_path);
    }
    let params = Parameters::select(&data);

    report::write_overview(out, &data, &params)?;

    fs::create_dir_all(&opts.output_path)?;
    let root = opts.output_path.as_path();
    let [distance, num_nodes, matrix, impact] = FIGURES;

    let distance_view = SweepView::distance(&data, &params);
    let node_view = SweepView::num_nodes(&data, &params);
    let condition_matrix = ConditionMatrix::new(&data);
    let impact_analysis = ImpactAnalysis::new(&data, &params);

    let path = root.then_fmt("{}.png", distance);
    render::render_sweep(&distance_view, &path)?;
    saved(out, &path)?;

    let path = root.then_fmt("{}.png", num_nodes);
    render::render_sweep(&node_view, &path)?;
    saved(out, &path)?;

    let path = root.then_fmt("{}.png", matrix);
    render::render_matrix(&condition_matrix, &path)?;
    saved(out, &path)?;

    let path = root.then_fmt("{}.png", impact);
    render::render_impact(&impact_analysis, &path)?;
    saved(out, &path)?;

    if opts.html {
        let path = root.then_fmt("{}.html", distance);
        html::write_sweep_html(&distance_view, &path);
        saved(out, &path)?;

        let path = root.then_fmt("{}.html", num_nodes);
        html::write_sweep_html(&node_view, &path);
        saved(out, &path)?;

        let path = root.then_fmt("{}.html", matrix);
        html::write_matrix_html(&condition_matrix, &path);
        saved(out, &path)?;

        let path = root.then_fmt("{}.html", impact);
        html::write_impact_html(&impact_analysis, &path);
        saved(out, &path)?;
    }

    let summary = report::summary_table(&data);
    report::write_summary(out, &summary)?;
    let path = root.then(SUMMARY_CSV);
    report::write_summary_csv(&path, &summary)?;
    saved(out, &path)?;

    report::write_trends(out, &data, &params)?;
    Ok(())
}

fn saved(out: &mut impl io::Write, path: &std::path::Path) -> io::Result<()> {
    log::debug!("Wrote {path:?}");
    writeln!(out, "✓ Saved: {}", path.display())
}
