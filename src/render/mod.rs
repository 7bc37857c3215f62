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
//! Rendering of the analysis views into PNG figures.

use std::{ops::Range, path::Path};

use itertools::Itertools;
use plotters::{
    coord::Shift,
    prelude::*,
    style::{
        text_anchor::{HPos, Pos, VPos},
        FontDesc, FontFamily, FontStyle,
    },
};

use crate::{
    aggregate::Series,
    records::Condition,
    views::{ConditionMatrix, ImpactAnalysis, SweepAxis, SweepView},
};

pub mod html;

/// Size of every figure in pixels.
pub const FIGURE_SIZE: (u32, u32) = (1600, 1200);
/// Minimum SNR (dB) for a packet to be received, drawn as a reference line.
pub const SNR_THRESHOLD_DB: f64 = 4.0;
/// PDR range of the heat map color scale.
const PDR_RANGE: (f64, f64) = (0.0, 100.0);

const FONT: &str = "sans-serif";

/// Colors of the channel conditions, in condition order.
pub fn condition_color(condition: Condition) -> RGBColor {
    match condition {
        Condition::Ideal => RGBColor(46, 204, 113),
        Condition::NoiseOnly => RGBColor(52, 152, 219),
        Condition::FadingOnly => RGBColor(231, 76, 60),
        Condition::Realistic => RGBColor(155, 89, 182),
    }
}

/// Colors for an arbitrary number of series (e.g., one per distance).
fn palette(i: usize) -> RGBColor {
    const COLORS: [RGBColor; 8] = [
        RGBColor(31, 119, 180),
        RGBColor(255, 127, 14),
        RGBColor(44, 160, 44),
        RGBColor(214, 39, 40),
        RGBColor(148, 103, 189),
        RGBColor(140, 86, 75),
        RGBColor(227, 119, 194),
        RGBColor(127, 127, 127),
    ];
    COLORS[i % COLORS.len()]
}

/// Red-yellow-green diverging color scale for `value` within `PDR_RANGE`.
pub fn heat_color(value: f64) -> RGBColor {
    let (lo, hi) = PDR_RANGE;
    let t = ((value - lo) / (hi - lo)).clamp(0.0, 1.0);
    let lerp = |a: (u8, u8, u8), b: (u8, u8, u8), t: f64| {
        let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
        RGBColor(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
    };
    let (red, yellow, green) = ((215, 48, 39), (255, 255, 191), (26, 152, 80));
    if t < 0.5 {
        lerp(red, yellow, t * 2.0)
    } else {
        lerp(yellow, green, (t - 0.5) * 2.0)
    }
}

fn text_style<'a>(size: f64, color: &impl Color, h: HPos, v: VPos) -> TextStyle<'a> {
    FontDesc::new(FontFamily::SansSerif, size, FontStyle::Normal)
        .color(color)
        .pos(Pos::new(h, v))
}

/// Computes the axis range covering all `values`, extended by `pad` of its width on both sides.
/// Falls back to `0..1` for empty input.
pub fn padded_range(values: impl IntoIterator<Item = f64>, pad: f64) -> Range<f64> {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        return 0.0..1.0;
    }
    let pad = if hi > lo { (hi - lo) * pad } else { 1.0 };
    (lo - pad)..(hi + pad)
}

/// A labeled line in a line chart.
struct Line<'a> {
    label: String,
    color: RGBColor,
    series: &'a Series,
}

struct LineChart<'a> {
    caption: String,
    x_desc: &'a str,
    y_desc: &'a str,
    lines: Vec<Line<'a>>,
    /// Values the x axis must cover, even if no line reaches them.
    x_extent: Vec<f64>,
    /// Horizontal reference line `(y, label)`.
    reference: Option<(f64, &'a str)>,
    legend: SeriesLabelPosition,
}

/// Plots every `Line` with markers into `area`.
fn draw_line_chart<DB>(area: &DrawingArea<DB, Shift>, chart: LineChart) -> anyhow::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let x_range = padded_range(
        chart
            .lines
            .iter()
            .flat_map(|l| l.series.x.iter().copied())
            .chain(chart.x_extent.iter().copied()),
        0.05,
    );
    let y_range = padded_range(
        chart
            .lines
            .iter()
            .flat_map(|l| l.series.y.iter().copied())
            .chain(chart.reference.map(|(y, _)| y)),
        0.1,
    );

    let mut ctx = ChartBuilder::on(area)
        .caption(&chart.caption, (FONT, 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range.clone(), y_range)?;

    ctx.configure_mesh()
        .x_desc(chart.x_desc)
        .y_desc(chart.y_desc)
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    if let Some((y, label)) = chart.reference {
        let style = BLACK.mix(0.6).stroke_width(1);
        ctx.draw_series(std::iter::once(PathElement::new(
            vec![(x_range.start, y), (x_range.end, y)],
            style,
        )))?
        .label(label)
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    }

    for line in &chart.lines {
        let color = line.color;
        ctx.draw_series(LineSeries::new(line.series.points(), color.stroke_width(2)))?
            .label(&line.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        ctx.draw_series(
            line.series
                .points()
                .map(|p| Circle::new(p, 4, color.filled())),
        )?;
    }

    if !chart.lines.is_empty() || chart.reference.is_some() {
        ctx.configure_series_labels()
            .position(chart.legend)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }
    Ok(())
}

/// A table of values shown as colored, annotated cells.
struct Heatmap<'a> {
    caption: String,
    x_desc: &'a str,
    y_desc: &'a str,
    row_labels: Vec<String>,
    col_labels: Vec<String>,
    cells: &'a [Vec<Option<f64>>],
}

/// Draws a heat map in pixel coordinates: row labels on the left, column labels below, color bar on
/// the right. Cells without a value are left gray.
fn draw_heatmap<DB>(area: &DrawingArea<DB, Shift>, map: Heatmap) -> anyhow::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let area = area.margin(10, 10, 10, 10).titled(&map.caption, (FONT, 20))?;
    if map.row_labels.is_empty() || map.col_labels.is_empty() {
        return draw_placeholder(&area);
    }

    let (w, h) = area.dim_in_pixel();
    let (w, h) = (w as i32, h as i32);
    let (left, top, right, bottom) = (150, 24, 110, 60);
    let grid_w = (w - left - right).max(1);
    let grid_h = (h - top - bottom).max(1);
    let cell_w = grid_w / map.col_labels.len() as i32;
    let cell_h = grid_h / map.row_labels.len() as i32;

    let label = |size: f64, h: HPos, v: VPos| text_style(size, &BLACK, h, v);

    area.draw(&Text::new(
        map.y_desc.to_string(),
        (left - 8, 4),
        label(14.0, HPos::Right, VPos::Top),
    ))?;

    for (i, row_label) in map.row_labels.iter().enumerate() {
        let y0 = top + i as i32 * cell_h;
        area.draw(&Text::new(
            row_label.clone(),
            (left - 8, y0 + cell_h / 2),
            label(14.0, HPos::Right, VPos::Center),
        ))?;
        for (j, _) in map.col_labels.iter().enumerate() {
            let x0 = left + j as i32 * cell_w;
            let value = map.cells.get(i).and_then(|r| r.get(j)).copied().flatten();
            let fill = value.map(heat_color).unwrap_or(RGBColor(220, 220, 220));
            area.draw(&Rectangle::new(
                [(x0, y0), (x0 + cell_w, y0 + cell_h)],
                fill.filled(),
            ))?;
            area.draw(&Rectangle::new(
                [(x0, y0), (x0 + cell_w, y0 + cell_h)],
                WHITE.stroke_width(1),
            ))?;
            if let Some(v) = value {
                area.draw(&Text::new(
                    format!("{v:.1}"),
                    (x0 + cell_w / 2, y0 + cell_h / 2),
                    label(16.0, HPos::Center, VPos::Center),
                ))?;
            }
        }
    }

    let grid_bottom = top + cell_h * map.row_labels.len() as i32;
    for (j, col_label) in map.col_labels.iter().enumerate() {
        area.draw(&Text::new(
            col_label.clone(),
            (left + j as i32 * cell_w + cell_w / 2, grid_bottom + 8),
            label(14.0, HPos::Center, VPos::Top),
        ))?;
    }
    area.draw(&Text::new(
        map.x_desc.to_string(),
        (left + grid_w / 2, grid_bottom + 32),
        label(15.0, HPos::Center, VPos::Top),
    ))?;

    // color bar
    let bar_x = w - right + 20;
    let steps = 50;
    let step_h = (grid_h / steps).max(1);
    for k in 0..steps {
        let value = PDR_RANGE.0 + (PDR_RANGE.1 - PDR_RANGE.0) * (k as f64 + 0.5) / steps as f64;
        let y1 = top + grid_h - k * step_h;
        area.draw(&Rectangle::new(
            [(bar_x, y1 - step_h), (bar_x + 20, y1)],
            heat_color(value).filled(),
        ))?;
    }
    for value in [PDR_RANGE.0, (PDR_RANGE.0 + PDR_RANGE.1) / 2.0, PDR_RANGE.1] {
        let frac = (value - PDR_RANGE.0) / (PDR_RANGE.1 - PDR_RANGE.0);
        let y = top + grid_h - (frac * (steps * step_h) as f64) as i32;
        area.draw(&Text::new(
            format!("{value:.0}"),
            (bar_x + 26, y),
            label(13.0, HPos::Left, VPos::Center),
        ))?;
    }
    area.draw(&Text::new(
        "PDR (%)".to_string(),
        (bar_x, top + grid_h + 8),
        label(13.0, HPos::Left, VPos::Top),
    ))?;
    Ok(())
}

/// Marks an area for which there is nothing to plot.
fn draw_placeholder<DB>(area: &DrawingArea<DB, Shift>) -> anyhow::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let (w, h) = area.dim_in_pixel();
    area.draw(&Text::new(
        "No data".to_string(),
        (w as i32 / 2, h as i32 / 2),
        text_style(24.0, &BLACK.mix(0.6), HPos::Center, VPos::Center),
    ))?;
    Ok(())
}

fn condition_lines(lines: &[(Condition, Series)]) -> Vec<Line<'_>> {
    lines
        .iter()
        .map(|(condition, series)| Line {
            label: condition.flags_label(),
            color: condition_color(*condition),
            series,
        })
        .collect()
}

/// Renders a distance or node-count sweep: PDR, SNR and delay over the swept axis, plus the PDR
/// heat map per channel condition.
pub fn render_sweep(view: &SweepView, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let (title, x_desc, fixed) = match view.axis {
        SweepAxis::Distance => (
            "Impact of DISTANCE on ZigBee network performance",
            "Distance between nodes (m)",
            format!("{} nodes", view.fixed),
        ),
        SweepAxis::NumNodes => (
            "Impact of NUMBER OF NODES on ZigBee network performance",
            "Number of nodes",
            format!("Distance = {}m", view.fixed),
        ),
    };
    let short = match view.axis {
        SweepAxis::Distance => "Distance",
        SweepAxis::NumNodes => "Number of nodes",
    };

    let root = BitMapBackend::new(path.as_ref(), FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(title, (FONT, 30))?;
    let panels = root.split_evenly((2, 2));

    for (panel, (metric, y_desc, lines, reference)) in panels.iter().zip([
        ("PDR", "PDR (%)", &view.pdr, None),
        (
            "SNR",
            "Average SNR (dB)",
            &view.snr,
            Some((SNR_THRESHOLD_DB, "SNR threshold")),
        ),
        ("Delay", "Average delay (ms)", &view.delay, None),
    ]) {
        draw_line_chart(
            panel,
            LineChart {
                caption: format!("{metric} vs {short} ({fixed})"),
                x_desc,
                y_desc,
                lines: condition_lines(lines),
                x_extent: view.ticks.clone(),
                reference,
                legend: SeriesLabelPosition::UpperRight,
            },
        )?;
    }

    draw_heatmap(
        &panels[3],
        Heatmap {
            caption: format!("Heatmap: PDR by {short} and channel condition"),
            x_desc,
            y_desc: "Channel condition",
            row_labels: view.heatmap.rows.iter().map(|c| c.flags_label()).collect(),
            col_labels: view.heatmap.cols.iter().map(|x| x.to_string()).collect(),
            cells: &view.heatmap.cells,
        },
    )?;

    root.present()?;
    log::debug!("Plotted {:?}", path.as_ref());
    Ok(())
}

/// Renders the PDR matrix (distance × node count) of every channel condition. Conditions without
/// data show a placeholder.
pub fn render_matrix(matrix: &ConditionMatrix, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let root = BitMapBackend::new(path.as_ref(), FIGURE_SIZE).into_drawing_area();
    draw_matrix(&root, matrix)?;
    root.present()?;
    log::debug!("Plotted {:?}", path.as_ref());
    Ok(())
}

fn draw_matrix<DB>(root: &DrawingArea<DB, Shift>, matrix: &ConditionMatrix) -> anyhow::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let root = root.titled("Summary matrix: Distance × Number of nodes", (FONT, 30))?;
    let panels = root.split_evenly((2, 2));

    for (area, panel) in panels.iter().zip(&matrix.panels) {
        match &panel.table {
            Some(table) => draw_heatmap(
                area,
                Heatmap {
                    caption: format!("PDR - {}", panel.condition.title()),
                    x_desc: "Number of nodes",
                    y_desc: "Distance (m)",
                    row_labels: table.rows.iter().map(|d| d.to_string()).collect(),
                    col_labels: table.cols.iter().map(|n| n.to_string()).collect(),
                    cells: &table.cells,
                },
            )?,
            None => draw_placeholder(area)?,
        }
    }
    Ok(())
}

/// Renders the PDR loss caused by noise, fading and both, and the mean PDR per condition.
pub fn render_impact(impact: &ImpactAnalysis, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let root = BitMapBackend::new(path.as_ref(), FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled("Impact analysis of each factor", (FONT, 30))?;
    let panels = root.split_evenly((2, 2));

    let captions = [
        "Impact of Gaussian noise (without fading)",
        "Impact of Rayleigh fading (without noise)",
        "Combined impact (noise + fading)",
    ];
    for ((area, panel), caption) in panels.iter().zip(&impact.panels).zip(captions) {
        let y_desc = format!("PDR loss due to {} (%)", panel.factor);
        let lines = panel
            .series
            .iter()
            .enumerate()
            .map(|(i, (distance, series))| Line {
                label: format!("{distance}m"),
                color: palette(i),
                series,
            })
            .collect_vec();
        let x_extent = lines
            .iter()
            .flat_map(|l| l.series.x.iter().copied())
            .collect();
        draw_line_chart(
            area,
            LineChart {
                caption: caption.to_string(),
                x_desc: "Number of nodes",
                y_desc: &y_desc,
                lines,
                x_extent,
                reference: Some((0.0, "no impact")),
                legend: SeriesLabelPosition::UpperLeft,
            },
        )?;
    }

    draw_mean_pdr_bars(&panels[3], &impact.mean_pdr)?;

    root.present()?;
    log::debug!("Plotted {:?}", path.as_ref());
    Ok(())
}

/// Bar chart of the mean PDR per condition, annotated with the values.
fn draw_mean_pdr_bars<DB>(
    area: &DrawingArea<DB, Shift>,
    mean_pdr: &[(Condition, Option<f64>)],
) -> anyhow::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let names = mean_pdr.iter().map(|(c, _)| c.to_string()).collect_vec();
    let mut ctx = ChartBuilder::on(area)
        .caption("Mean PDR by channel condition", (FONT, 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5..(names.len() as f64 - 0.5), 0.0..105.0)?;

    let x_label = |x: &f64| {
        let i = x.round();
        if (x - i).abs() < 1e-6 && i >= 0.0 {
            names.get(i as usize).cloned().unwrap_or_default()
        } else {
            String::new()
        }
    };
    ctx.configure_mesh()
        .disable_x_mesh()
        .x_labels(names.len().max(1))
        .x_label_formatter(&x_label)
        .y_desc("Mean PDR (%)")
        .draw()?;

    for (i, (condition, value)) in mean_pdr.iter().enumerate() {
        let Some(value) = *value else {
            continue;
        };
        let x = i as f64;
        ctx.draw_series(std::iter::once(Rectangle::new(
            [(x - 0.35, 0.0), (x + 0.35, value)],
            condition_color(*condition).filled(),
        )))?;
        ctx.draw_series(std::iter::once(Rectangle::new(
            [(x - 0.35, 0.0), (x + 0.35, value)],
            BLACK.stroke_width(2),
        )))?;
        ctx.draw_series(std::iter::once(Text::new(
            format!("{value:.1}%"),
            (x, value + 1.0),
            text_style(16.0, &BLACK, HPos::Center, VPos::Bottom),
        )))?;
    }
    Ok(())
}
