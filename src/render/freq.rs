//! Frequency-domain singular vectors: stem plots and normalized rasters.

use super::raster::{format_axis_label, paint_grid, AxisFrame, RasterStyle};
use super::PanelText;
use crate::config::PlotParams;
use crate::style::StyleContext;
use ndarray::{Array2, ArrayView1, ArrayView2};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    symbols::Marker,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

/// Marker color at the head of each stem.
const STEM_MARKER: Color = Color::Magenta;

/// How one part of a complex vector is drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum FreqPlot {
    /// Nothing to draw.
    Empty,
    /// One entity: a stem per frequency sample.
    Stems {
        /// `(frequency, value)` pairs.
        points: Vec<(f64, f64)>,
        /// Symmetric vertical limit.
        limit: f64,
    },
    /// Several entities: a grid normalized to `[-1, 1]`.
    Raster {
        /// Normalized values as `[entity, sample]`.
        values: Array2<f64>,
        /// First and last entity number.
        numbers: (f64, f64),
    },
}

/// Plan how to draw a `[entity, sample]` frame of one complex part.
pub fn plan_frequency(
    frame: ArrayView2<'_, f64>,
    freqs: ArrayView1<'_, f64>,
    numbers: &[usize],
) -> FreqPlot {
    let peak = frame.iter().fold(0.0f64, |acc, v| acc.max(v.abs()));
    match frame.nrows() {
        0 => FreqPlot::Empty,
        1 => FreqPlot::Stems {
            points: freqs.iter().copied().zip(frame.row(0).iter().copied()).collect(),
            limit: if peak > 0.0 { peak * 1.1 } else { 1.0 },
        },
        n => {
            let values = if peak != 0.0 {
                frame.mapv(|v| v / peak)
            } else {
                frame.to_owned()
            };
            FreqPlot::Raster {
                values,
                numbers: (
                    numbers.first().copied().unwrap_or(1) as f64,
                    numbers.last().copied().unwrap_or(n) as f64,
                ),
            }
        },
    }
}

fn freq_bounds(freqs: ArrayView1<'_, f64>) -> [f64; 2] {
    match (freqs.first(), freqs.last()) {
        (Some(&a), Some(&b)) if a != b => [a.min(b), a.max(b)],
        (Some(&a), Some(_)) => [a - 0.5, a + 0.5],
        _ => [0.0, 1.0],
    }
}

/// Draw a planned frequency frame.
pub(super) fn draw_frequency(
    f: &mut Frame<'_>,
    area: Rect,
    plot: &FreqPlot,
    freqs: ArrayView1<'_, f64>,
    text: &PanelText,
    params: &PlotParams,
    style: &StyleContext,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(style.spine))
        .title(format!(" {} ", text.title))
        .title_style(Style::default().fg(style.title))
        .style(Style::default().bg(style.figure_bg));
    let bounds = freq_bounds(freqs);

    match plot {
        FreqPlot::Empty => {
            let para = Paragraph::new("No traces")
                .style(Style::default().fg(style.text))
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(para, area);
        },
        FreqPlot::Raster { values, numbers } => {
            let inner = block.inner(area);
            f.render_widget(block, area);
            let frame = AxisFrame {
                x_bounds: (bounds[0], bounds[1]),
                y_bounds: *numbers,
                x_caption: text.x_caption.clone(),
                y_caption: text.y_caption.clone(),
            };
            let grid_area = frame.draw(f.buffer_mut(), inner, style);
            let raster = RasterStyle {
                limits: (-1.0, 1.0),
                colormap: params.wiggle_colormap,
                mode: params.view_mode,
            };
            paint_grid(f.buffer_mut(), grid_area, values.view(), &raster, (false, false), style.face);
        },
        FreqPlot::Stems { points, limit } => {
            let stems: Vec<[(f64, f64); 2]> = points.iter().map(|&(x, y)| [(x, 0.0), (x, y)]).collect();
            let baseline = [(bounds[0], 0.0), (bounds[1], 0.0)];

            let mut datasets: Vec<Dataset<'_>> = stems
                .iter()
                .map(|stem| {
                    Dataset::default()
                        .marker(Marker::Braille)
                        .graph_type(GraphType::Line)
                        .style(Style::default().fg(style.line))
                        .data(stem)
                })
                .collect();
            datasets.push(
                Dataset::default()
                    .marker(Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(style.spine))
                    .data(&baseline),
            );
            datasets.push(
                Dataset::default()
                    .marker(Marker::Dot)
                    .graph_type(GraphType::Scatter)
                    .style(Style::default().fg(STEM_MARKER))
                    .data(points),
            );

            let x_axis = Axis::default()
                .title(text.x_caption.as_str())
                .style(Style::default().fg(style.tick))
                .bounds(bounds)
                .labels(vec![
                    format_axis_label(bounds[0]),
                    format_axis_label((bounds[0] + bounds[1]) / 2.0),
                    format_axis_label(bounds[1]),
                ]);
            let y_axis = Axis::default()
                .title(text.y_caption.as_str())
                .style(Style::default().fg(style.tick))
                .bounds([-limit, *limit])
                .labels(vec![
                    format_axis_label(-limit),
                    "0".to_string(),
                    format_axis_label(*limit),
                ]);

            let chart = Chart::new(datasets)
                .block(block)
                .style(Style::default().bg(style.face).fg(style.label))
                .x_axis(x_axis)
                .y_axis(y_axis);
            f.render_widget(chart, area);
        },
    }
}
