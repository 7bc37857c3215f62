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
//! Interactive HTML companions of the PNG figures, written with plotly.

use std::path::Path;

use itertools::Itertools;
use plotly::{
    common::{Marker, Mode},
    layout::{Axis, GridPattern, LayoutGrid},
    Bar, HeatMap, Plot, Scatter,
};

use crate::{
    aggregate::Series,
    records::Condition,
    views::{ConditionMatrix, ImpactAnalysis, SweepAxis, SweepView},
};

/// Hex color of a channel condition, matching the PNG figures.
fn hex_color(condition: Condition) -> &'static str {
    match condition {
        Condition::Ideal => "#2ecc71",
        Condition::NoiseOnly => "#3498db",
        Condition::FadingOnly => "#e74c3c",
        Condition::Realistic => "#9b59b6",
    }
}

fn grid_plot(title: String) -> Plot {
    let mut plot = Plot::new();
    plot.set_layout(
        plot.layout()
            .clone()
            .title(title)
            .grid(
                LayoutGrid::new()
                    .rows(2)
                    .columns(2)
                    .pattern(GridPattern::Independent),
            )
            .height(1000),
    );
    plot
}

fn line_trace(series: &Series, name: String, axis: usize) -> Box<Scatter<f64, f64>> {
    Scatter::new(series.x.clone(), series.y.clone())
        .name(&name)
        .mode(Mode::LinesMarkers)
        .x_axis(&format!("x{axis}"))
        .y_axis(&format!("y{axis}"))
}

/// Writes the sweep view to `path`: PDR, SNR and delay lines in the first three panels, the PDR
/// heat map in the fourth.
pub fn write_sweep_html(view: &SweepView, path: impl AsRef<Path>) {
    let (what, x_title) = match view.axis {
        SweepAxis::Distance => ("DISTANCE", "Distance between nodes (m)"),
        SweepAxis::NumNodes => ("NUMBER OF NODES", "Number of nodes"),
    };
    let mut plot = grid_plot(format!("<b>Impact of {what} on ZigBee network performance</b>"));

    for (axis, lines) in [(1, &view.pdr), (2, &view.snr), (3, &view.delay)] {
        for (condition, series) in lines {
            plot.add_trace(
                line_trace(series, condition.flags_label(), axis)
                    .marker(Marker::new().color(hex_color(*condition)))
                    .legend_group(&condition.to_string())
                    .show_legend(axis == 1),
            );
        }
    }
    plot.add_trace(
        HeatMap::new(
            view.heatmap.cols.iter().map(|x| x.into_inner()).collect_vec(),
            view.heatmap.rows.iter().map(|c| c.flags_label()).collect_vec(),
            view.heatmap.cells.clone(),
        )
        .x_axis("x4")
        .y_axis("y4"),
    );

    plot.set_layout(
        plot.layout()
            .clone()
            .x_axis(Axis::new().title(x_title))
            .y_axis(Axis::new().title("PDR (%)"))
            .x_axis2(Axis::new().title(x_title))
            .y_axis2(Axis::new().title("Average SNR (dB)"))
            .x_axis3(Axis::new().title(x_title))
            .y_axis3(Axis::new().title("Average delay (ms)"))
            .x_axis4(Axis::new().title(x_title)),
    );

    log::debug!("Plotting {:?}", path.as_ref());
    plot.write_html(path);
}

/// Writes one heat map per condition with data into a 2×2 grid.
pub fn write_matrix_html(matrix: &ConditionMatrix, path: impl AsRef<Path>) {
    let mut plot = grid_plot("<b>Summary matrix: Distance × Number of nodes</b>".to_string());
    for (i, panel) in matrix.panels.iter().enumerate() {
        let Some(table) = &panel.table else {
            continue;
        };
        plot.add_trace(
            HeatMap::new(
                table.cols.clone(),
                table.rows.iter().map(|d| d.into_inner()).collect_vec(),
                table.cells.clone(),
            )
            .name(panel.condition.title())
            .x_axis(&format!("x{}", i + 1))
            .y_axis(&format!("y{}", i + 1)),
        );
    }
    log::debug!("Plotting {:?}", path.as_ref());
    plot.write_html(path);
}

/// Writes the PDR loss per factor and the mean PDR per condition.
pub fn write_impact_html(impact: &ImpactAnalysis, path: impl AsRef<Path>) {
    let mut plot = grid_plot("<b>Impact analysis of each factor</b>".to_string());
    for (i, panel) in impact.panels.iter().enumerate() {
        for (distance, series) in &panel.series {
            plot.add_trace(line_trace(
                series,
                format!("{}: {distance}m", panel.factor),
                i + 1,
            ));
        }
    }
    let (names, values): (Vec<_>, Vec<_>) = impact
        .mean_pdr
        .iter()
        .filter_map(|(c, pdr)| pdr.map(|pdr| (c.to_string(), pdr)))
        .unzip();
    plot.add_trace(
        Bar::new(names, values)
            .name("Mean PDR")
            .x_axis("x4")
            .y_axis("y4"),
    );
    log::debug!("Plotting {:?}", path.as_ref());
    plot.write_html(path);
}
