//! Wiggle plots: traces drawn as displaced lines with filled lobes.

use super::raster::{format_axis_label, paint_grid, AxisFrame, RasterStyle};
use super::PanelText;
use crate::config::PlotParams;
use crate::style::StyleContext;
use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    symbols::Marker,
    widgets::{Axis as ChartAxis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

/// Largest trace count drawn with one tick label per trace.
pub const MAX_LABELED_TRACES: usize = 18;
/// Largest trace count drawn as stacked lines.
pub const MAX_STACKED_TRACES: usize = 70;

/// How a frame of traces is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WiggleLayout {
    /// A single unscaled trace around zero.
    Single,
    /// Stacked traces with one tick label each.
    Labeled,
    /// Stacked traces without tick labels.
    Stacked,
    /// A colormapped grid.
    Raster,
}

impl WiggleLayout {
    /// Layout for a frame with `n` traces.
    pub fn for_trace_count(n: usize) -> Self {
        match n {
            0 | 1 => WiggleLayout::Single,
            2..=MAX_LABELED_TRACES => WiggleLayout::Labeled,
            n if n <= MAX_STACKED_TRACES => WiggleLayout::Stacked,
            _ => WiggleLayout::Raster,
        }
    }
}

/// One trace, in plot coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct WiggleTrace {
    /// Vertical position of the zero line.
    pub baseline: f64,
    /// `(x, baseline + value)` pairs.
    pub points: Vec<(f64, f64)>,
}

/// A rasterized frame with its color limits.
#[derive(Debug, Clone, PartialEq)]
pub struct WiggleRaster {
    /// Values as `[trace, sample]`.
    pub values: Array2<f64>,
    /// Symmetric color limits.
    pub limits: (f64, f64),
}

/// Everything needed to draw one frame of traces.
#[derive(Debug, Clone, PartialEq)]
pub struct WigglePlot {
    /// Chosen layout.
    pub layout: WiggleLayout,
    /// Line traces; empty for rasters.
    pub traces: Vec<WiggleTrace>,
    /// Grid for the raster layout.
    pub raster: Option<WiggleRaster>,
    /// Horizontal range.
    pub x_bounds: [f64; 2],
    /// Vertical range.
    pub y_bounds: [f64; 2],
    /// Vertical tick labels, evenly spread over `y_bounds`.
    pub y_labels: Vec<String>,
    /// Divisor applied to every trace.
    pub scale: f64,
    /// Fill colors of positive and negative lobes, before blending.
    pub fills: (Option<Color>, Option<Color>),
}

fn x_bounds(xvals: ArrayView1<'_, f64>) -> [f64; 2] {
    match (xvals.first(), xvals.last()) {
        (Some(&a), Some(&b)) if a != b => [a.min(b), a.max(b)],
        (Some(&a), Some(_)) => [a - 0.5, a + 0.5],
        _ => [0.0, 1.0],
    }
}

/// Plan how to draw a frame of traces laid out as `[trace, sample]`.
///
/// Stacked traces are divided by the largest peak-to-peak range in the frame;
/// a frame with no displacement at all is left unscaled.
pub fn plan_wiggles(
    traces: ArrayView2<'_, f64>,
    xvals: ArrayView1<'_, f64>,
    numbers: &[usize],
    params: &PlotParams,
) -> WigglePlot {
    let count = traces.nrows();
    let layout = WiggleLayout::for_trace_count(count);
    let fills = params.wiggle_colormap.fills(params.view_mode);
    let x_bounds = x_bounds(xvals);
    let peak = traces.iter().fold(0.0f64, |acc, v| acc.max(v.abs()));

    let trace_points = |row: ArrayView1<'_, f64>, baseline: f64, scale: f64| -> Vec<(f64, f64)> {
        xvals
            .iter()
            .zip(row.iter())
            .map(|(&x, &v)| (x, baseline + v / scale))
            .collect()
    };

    match layout {
        WiggleLayout::Single => {
            let traces = traces
                .axis_iter(Axis(0))
                .map(|row| WiggleTrace {
                    baseline: 0.0,
                    points: trace_points(row, 0.0, 1.0),
                })
                .collect();
            let half = if peak > 0.0 { peak * 1.1 } else { 1.0 };
            WigglePlot {
                layout,
                traces,
                raster: None,
                x_bounds,
                y_bounds: [-half, half],
                y_labels: vec![format_axis_label(-half), "0".to_string(), format_axis_label(half)],
                scale: 1.0,
                fills,
            }
        },
        WiggleLayout::Labeled | WiggleLayout::Stacked => {
            let largest_range = traces
                .axis_iter(Axis(0))
                .map(|row| {
                    let (lo, hi) = row
                        .iter()
                        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
                    if lo.is_finite() && hi.is_finite() {
                        hi - lo
                    } else {
                        0.0
                    }
                })
                .fold(0.0f64, f64::max);
            let scale = if largest_range != 0.0 { largest_range } else { 1.0 };

            let traces = traces
                .axis_iter(Axis(0))
                .enumerate()
                .map(|(n, row)| WiggleTrace {
                    baseline: n as f64,
                    points: trace_points(row, n as f64, scale),
                })
                .collect();

            // One blank label below and above the outermost baselines keeps
            // each number level with its trace.
            let y_labels = if layout == WiggleLayout::Labeled {
                std::iter::once(String::new())
                    .chain((0..count).map(|n| {
                        numbers.get(n).copied().unwrap_or(n + 1).to_string()
                    }))
                    .chain(std::iter::once(String::new()))
                    .collect()
            } else {
                Vec::new()
            };

            WigglePlot {
                layout,
                traces,
                raster: None,
                x_bounds,
                y_bounds: [-1.0, count as f64],
                y_labels,
                scale,
                fills,
            }
        },
        WiggleLayout::Raster => {
            let limit = peak * params.pclip;
            let limit = if limit > 0.0 && limit.is_finite() { limit } else { 1.0 };
            let first = numbers.first().copied().unwrap_or(1) as f64;
            let last = numbers.last().copied().unwrap_or(count) as f64;
            WigglePlot {
                layout,
                traces: Vec::new(),
                raster: Some(WiggleRaster {
                    values: traces.to_owned(),
                    limits: (-limit, limit),
                }),
                x_bounds,
                y_bounds: [first, last],
                y_labels: Vec::new(),
                scale: 1.0,
                fills,
            }
        },
    }
}

/// Vertical fill strokes of one lobe, sampled at `dy` spacing.
fn fill_points(
    traces: &[WiggleTrace],
    dy: f64,
    max_columns: usize,
    positive: bool,
) -> Vec<(f64, f64)> {
    let mut points = Vec::new();
    for trace in traces {
        let step = (trace.points.len() / max_columns.max(1)).max(1);
        for &(x, y) in trace.points.iter().step_by(step) {
            let (from, to) = if positive {
                (trace.baseline, y)
            } else {
                (y, trace.baseline)
            };
            let mut v = from;
            while v < to {
                points.push((x, v));
                v += dy;
            }
        }
    }
    points
}

/// Draw a planned wiggle frame.
pub(super) fn draw_wiggles(
    f: &mut Frame<'_>,
    area: Rect,
    plot: &WigglePlot,
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

    if let Some(raster) = &plot.raster {
        let inner = block.inner(area);
        f.render_widget(block, area);
        let frame = AxisFrame {
            x_bounds: (plot.x_bounds[0], plot.x_bounds[1]),
            y_bounds: (plot.y_bounds[0], plot.y_bounds[1]),
            x_caption: text.x_caption.clone(),
            y_caption: text.y_caption.clone(),
        };
        let grid_area = frame.draw(f.buffer_mut(), inner, style);
        let raster_style = RasterStyle {
            limits: raster.limits,
            colormap: params.wiggle_colormap,
            mode: params.view_mode,
        };
        paint_grid(
            f.buffer_mut(),
            grid_area,
            raster.values.view(),
            &raster_style,
            (false, false),
            style.face,
        );
        return;
    }

    if plot.traces.is_empty() {
        let para = Paragraph::new("No traces")
            .style(Style::default().fg(style.text))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(para, area);
        return;
    }

    // Braille cells are four dots tall and two wide.
    let dy = (plot.y_bounds[1] - plot.y_bounds[0]) / (area.height.max(1) as f64 * 4.0);
    let columns = area.width as usize * 2;
    let (pos_fill, neg_fill) = plot.fills;
    let positive = pos_fill
        .map(|_| fill_points(&plot.traces, dy, columns, true))
        .unwrap_or_default();
    let negative = neg_fill
        .map(|_| fill_points(&plot.traces, dy, columns, false))
        .unwrap_or_default();

    let mut datasets = Vec::with_capacity(plot.traces.len() + 2);
    if let Some(color) = pos_fill {
        datasets.push(
            Dataset::default()
                .marker(Marker::Braille)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(style.fill(color)))
                .data(&positive),
        );
    }
    if let Some(color) = neg_fill {
        datasets.push(
            Dataset::default()
                .marker(Marker::Braille)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(style.fill(color)))
                .data(&negative),
        );
    }
    for trace in &plot.traces {
        datasets.push(
            Dataset::default()
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(style.line))
                .data(&trace.points),
        );
    }

    let [x0, x1] = plot.x_bounds;
    let x_axis = ChartAxis::default()
        .title(text.x_caption.as_str())
        .style(Style::default().fg(style.tick))
        .bounds(plot.x_bounds)
        .labels(vec![
            format_axis_label(x0),
            format_axis_label((x0 + x1) / 2.0),
            format_axis_label(x1),
        ]);
    let y_axis = ChartAxis::default()
        .title(text.y_caption.as_str())
        .style(Style::default().fg(style.tick))
        .bounds(plot.y_bounds)
        .labels(plot.y_labels.clone());

    let chart = Chart::new(datasets)
        .block(block)
        .style(Style::default().bg(style.face).fg(style.label))
        .x_axis(x_axis)
        .y_axis(y_axis);

    f.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render_to_text;
    use ndarray::{Array1, Array2};

    fn frame(traces: usize, samples: usize) -> (Array2<f64>, Array1<f64>, Vec<usize>) {
        let data = Array2::from_shape_fn((traces, samples), |(r, t)| ((t + r) as f64 * 0.3).sin() * 4.0);
        let time = Array1::linspace(0.0, 2.0, samples);
        (data, time, (1..=traces).collect())
    }

    #[test]
    fn layout_thresholds() {
        assert_eq!(WiggleLayout::for_trace_count(0), WiggleLayout::Single);
        assert_eq!(WiggleLayout::for_trace_count(1), WiggleLayout::Single);
        assert_eq!(WiggleLayout::for_trace_count(2), WiggleLayout::Labeled);
        assert_eq!(WiggleLayout::for_trace_count(18), WiggleLayout::Labeled);
        assert_eq!(WiggleLayout::for_trace_count(19), WiggleLayout::Stacked);
        assert_eq!(WiggleLayout::for_trace_count(70), WiggleLayout::Stacked);
        assert_eq!(WiggleLayout::for_trace_count(71), WiggleLayout::Raster);
    }

    #[test]
    fn eighteen_traces_get_tick_labels() {
        let (data, time, numbers) = frame(18, 20);
        let plot = plan_wiggles(data.view(), time.view(), &numbers, &PlotParams::default());
        assert_eq!(plot.layout, WiggleLayout::Labeled);
        assert_eq!(plot.y_labels.len(), 20);
        assert_eq!(plot.y_labels[1], "1");
        assert_eq!(plot.y_labels[18], "18");
        assert_eq!(plot.traces.len(), 18);
    }

    #[test]
    fn nineteen_traces_have_no_tick_labels() {
        let (data, time, numbers) = frame(19, 20);
        let plot = plan_wiggles(data.view(), time.view(), &numbers, &PlotParams::default());
        assert_eq!(plot.layout, WiggleLayout::Stacked);
        assert!(plot.y_labels.is_empty());
        assert_eq!(plot.traces[18].baseline, 18.0);
    }

    #[test]
    fn seventy_one_traces_are_rasterized() {
        let (data, time, numbers) = frame(71, 20);
        let params = PlotParams {
            pclip: 0.5,
            ..PlotParams::default()
        };
        let plot = plan_wiggles(data.view(), time.view(), &numbers, &params);
        assert_eq!(plot.layout, WiggleLayout::Raster);
        assert!(plot.traces.is_empty());
        let raster = plot.raster.expect("raster planned");
        let peak = data.iter().fold(0.0f64, |a, v| a.max(v.abs()));
        assert!((raster.limits.1 - peak * 0.5).abs() < 1e-12);
        assert_eq!(raster.limits.0, -raster.limits.1);
        assert_eq!(raster.values, data);
    }

    #[test]
    fn stacked_traces_are_scaled_by_largest_range() {
        let data = Array2::from_shape_vec((2, 3), vec![0.0, 2.0, -2.0, 0.0, 1.0, 0.0]).expect("shape");
        let time = Array1::linspace(0.0, 1.0, 3);
        let plot = plan_wiggles(data.view(), time.view(), &[1, 2], &PlotParams::default());
        assert_eq!(plot.scale, 4.0);
        assert_eq!(plot.traces[0].points[1], (0.5, 0.5));
        assert_eq!(plot.traces[1].points[1], (0.5, 1.25));
    }

    #[test]
    fn all_zero_frame_is_left_unscaled() {
        let data = Array2::zeros((5, 10));
        let time = Array1::linspace(0.0, 1.0, 10);
        let plot = plan_wiggles(data.view(), time.view(), &[1, 2, 3, 4, 5], &PlotParams::default());
        assert_eq!(plot.scale, 1.0);
        for trace in &plot.traces {
            assert!(trace.points.iter().all(|&(_, y)| y == trace.baseline));
        }
    }

    #[test]
    fn single_trace_is_drawn_unscaled() {
        let (data, time, numbers) = frame(1, 12);
        let plot = plan_wiggles(data.view(), time.view(), &numbers, &PlotParams::default());
        assert_eq!(plot.layout, WiggleLayout::Single);
        assert_eq!(plot.scale, 1.0);
        let ys: Vec<f64> = plot.traces[0].points.iter().map(|&(_, y)| y).collect();
        assert_eq!(ys, data.row(0).to_vec());
    }

    #[test]
    fn draws_every_layout_without_panicking() {
        let style = StyleContext::from_mode(crate::config::ViewMode::Dark);
        let params = PlotParams::default();
        let text = PanelText {
            title: "Data [Record 1/1]".to_string(),
            x_caption: "Time".to_string(),
            y_caption: "Receiver".to_string(),
        };
        for count in [0, 1, 5, 30, 90] {
            let (data, time, numbers) = frame(count, 25);
            let plot = plan_wiggles(data.view(), time.view(), &numbers, &params);
            let screen = render_to_text(60, 20, |f| draw_wiggles(f, f.area(), &plot, &text, &params, &style));
            assert!(screen.contains("Data [Record 1/1]"), "count={count}");
        }
        let plot = plan_wiggles(Array2::zeros((0, 0)).view(), Array1::zeros(0).view(), &[], &params);
        let screen = render_to_text(40, 10, |f| draw_wiggles(f, f.area(), &plot, &text, &params, &style));
        assert!(screen.contains("No traces"));
    }
}
