//! Cell-level painting shared by the raster, map and image panels.

use crate::config::ViewMode;
use crate::style::{Colormap, StyleContext};
use ndarray::ArrayView2;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
};
use unicode_width::UnicodeWidthStr;

/// Width reserved on the left of a plot for tick labels.
const TICK_MARGIN: u16 = 8;

/// Color limits and palette of a raster.
#[derive(Debug, Clone, Copy)]
pub(super) struct RasterStyle {
    /// Values mapped to the two ends of the colormap.
    pub(super) limits: (f64, f64),
    /// Palette.
    pub(super) colormap: Colormap,
    /// Display mode, for mode-dependent palettes.
    pub(super) mode: ViewMode,
}

impl RasterStyle {
    /// Color of a value; non-finite values get `missing`.
    pub(super) fn color(&self, value: f64, missing: Color) -> Color {
        if !value.is_finite() {
            return missing;
        }
        let (lo, hi) = self.limits;
        let range = hi - lo;
        let t = if range.abs() < 1e-12 {
            0.5
        } else {
            ((value - lo) / range).clamp(0.0, 1.0)
        };
        self.colormap.color(t, self.mode)
    }
}

/// Format axis label with smart precision.
pub(super) fn format_axis_label(val: f64) -> String {
    if !val.is_finite() {
        return "?".to_string();
    }
    let abs_val = val.abs();
    if abs_val == 0.0 {
        "0".to_string()
    } else if !(1e-2..1e5).contains(&abs_val) {
        format!("{:.1e}", val)
    } else if abs_val >= 100.0 {
        format!("{:.0}", val)
    } else if abs_val >= 1.0 {
        format!("{:.1}", val)
    } else {
        format!("{:.2}", val)
    }
}

/// Write `text` starting at `(x, y)`, clipped to `clip`.
pub(super) fn put_str(buf: &mut Buffer, x: u16, y: u16, text: &str, style: Style, clip: Rect) {
    if y < clip.y || y >= clip.bottom() {
        return;
    }
    let mut col = x;
    for ch in text.chars() {
        if col >= clip.right() {
            break;
        }
        if col >= clip.x {
            if let Some(cell) = buf.cell_mut((col, y)) {
                cell.set_char(ch).set_style(style);
            }
        }
        col = col.saturating_add(1);
    }
}

/// Set one cell's glyph and foreground, if it lies inside `clip`.
pub(super) fn put_glyph(buf: &mut Buffer, x: u16, y: u16, glyph: char, fg: Color, clip: Rect) {
    if x < clip.x || x >= clip.right() || y < clip.y || y >= clip.bottom() {
        return;
    }
    if let Some(cell) = buf.cell_mut((x, y)) {
        cell.set_char(glyph).set_fg(fg);
    }
}

/// Fill an area with a background color.
pub(super) fn fill_background(buf: &mut Buffer, area: Rect, bg: Color) {
    buf.set_style(area, Style::default().bg(bg));
}

/// Paint a grid of values over `area`.
///
/// `values` is indexed `[row, col]` with row 0 at the bottom of the area.
/// The flip flags mirror the grid horizontally or vertically.
pub(super) fn paint_grid(
    buf: &mut Buffer,
    area: Rect,
    values: ArrayView2<'_, f64>,
    raster: &RasterStyle,
    flip: (bool, bool),
    missing: Color,
) {
    let (rows, cols) = values.dim();
    if rows == 0 || cols == 0 || area.width == 0 || area.height == 0 {
        return;
    }
    let width = area.width as usize;
    let height = area.height as usize;

    for cy in 0..height {
        // Row 0 of the grid is drawn at the bottom.
        let from_bottom = height - 1 - cy;
        let from_bottom = if flip.1 { height - 1 - from_bottom } else { from_bottom };
        let row = (from_bottom * rows / height).min(rows - 1);
        for cx in 0..width {
            let col_pos = if flip.0 { width - 1 - cx } else { cx };
            let col = (col_pos * cols / width).min(cols - 1);
            let color = raster.color(values[[row, col]], missing);
            if let Some(cell) = buf.cell_mut((area.x + cx as u16, area.y + cy as u16)) {
                cell.set_char('█').set_fg(color);
            }
        }
    }
}

/// Tick labels and captions around a plot area.
#[derive(Debug, Clone)]
pub(super) struct AxisFrame {
    /// Horizontal data range, left to right.
    pub(super) x_bounds: (f64, f64),
    /// Vertical data range, bottom to top.
    pub(super) y_bounds: (f64, f64),
    /// Caption under the horizontal axis.
    pub(super) x_caption: String,
    /// Caption above the vertical axis.
    pub(super) y_caption: String,
}

impl AxisFrame {
    /// Draw tick labels and captions around `area` and return the inner plot area.
    ///
    /// The caption of the vertical axis takes the top line, the horizontal tick
    /// labels and caption the bottom two.
    pub(super) fn draw(&self, buf: &mut Buffer, area: Rect, style: &StyleContext) -> Rect {
        if area.width <= TICK_MARGIN + 2 || area.height < 5 {
            return area;
        }
        let plot = Rect {
            x: area.x + TICK_MARGIN,
            y: area.y + 1,
            width: area.width - TICK_MARGIN,
            height: area.height - 3,
        };
        let label_style = Style::default().fg(style.label).bg(style.figure_bg);
        let tick_style = Style::default().fg(style.tick).bg(style.figure_bg);

        put_str(buf, area.x, area.y, &self.y_caption, label_style, area);

        // Vertical ticks: top, middle, bottom.
        let (y0, y1) = self.y_bounds;
        for (row, value) in [
            (plot.y, y1),
            (plot.y + plot.height / 2, (y0 + y1) / 2.0),
            (plot.bottom() - 1, y0),
        ] {
            let label: String = format_axis_label(value).chars().take(TICK_MARGIN as usize - 1).collect();
            let x = plot.x.saturating_sub(label.width() as u16 + 1);
            put_str(buf, x, row, &label, tick_style, area);
        }

        // Horizontal ticks: left, middle, right.
        let tick_row = plot.bottom();
        let (x0, x1) = self.x_bounds;
        let right_label = format_axis_label(x1);
        let right_x = plot.right().saturating_sub(right_label.width() as u16);
        let middle_label = format_axis_label((x0 + x1) / 2.0);
        let middle_x = plot.x + plot.width / 2 - (middle_label.width() as u16 / 2).min(plot.width / 2);
        put_str(buf, plot.x, tick_row, &format_axis_label(x0), tick_style, area);
        put_str(buf, middle_x, tick_row, &middle_label, tick_style, area);
        put_str(buf, right_x, tick_row, &right_label, tick_style, area);

        let caption_x = plot.x + (plot.width.saturating_sub(self.x_caption.width() as u16)) / 2;
        put_str(buf, caption_x, tick_row + 1, &self.x_caption, label_style, area);

        plot
    }
}

/// Draw a vertical colorbar strip with `%.2f` labels at its ends and middle.
///
/// The strip takes two columns on the left of `area`; labels go to its right.
pub(super) fn draw_colorbar(buf: &mut Buffer, area: Rect, raster: &RasterStyle, style: &StyleContext) {
    if area.width < 3 || area.height < 2 {
        return;
    }
    let height = area.height as usize;
    let (lo, hi) = raster.limits;
    for cy in 0..height {
        let t = if height > 1 {
            1.0 - cy as f64 / (height - 1) as f64
        } else {
            0.5
        };
        let color = raster.colormap.color(t, raster.mode);
        for dx in 0..2 {
            if let Some(cell) = buf.cell_mut((area.x + dx, area.y + cy as u16)) {
                cell.set_char('█').set_fg(color);
            }
        }
    }
    let edge = Style::default().fg(style.cbar_edge).bg(style.figure_bg);
    let text = Style::default().fg(style.tick).bg(style.figure_bg);
    let label_x = area.x + 3;
    put_str(buf, area.x + 2, area.y, "┐", edge, area);
    put_str(buf, area.x + 2, area.bottom() - 1, "┘", edge, area);
    put_str(buf, label_x, area.y, &format!("{:.2}", hi), text, area);
    put_str(buf, label_x, area.y + area.height / 2, &format!("{:.2}", (lo + hi) / 2.0), text, area);
    put_str(buf, label_x, area.bottom() - 1, &format!("{:.2}", lo), text, area);
}
