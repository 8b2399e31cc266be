//! Image panels: colormapped slices for 2D images, shaded isosurfaces for 3D.

use super::labels::with_unit;
use super::map::{bounds, Projection, Viewport};
use super::raster::{draw_colorbar, fill_background, paint_grid, put_str, AxisFrame, RasterStyle};
use super::PanelText;
use crate::config::PlotParams;
use crate::isosurface::{normal, Mesh};
use crate::style::{blend, StyleContext};
use ndarray::{Array2, ArrayView1, ArrayView2};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Columns taken by the colorbar and its labels.
const COLORBAR_WIDTH: u16 = 10;

/// Slice values with everything above `vmax` pushed down to `vmin`.
///
/// The result is laid out `[y, x]` so that rows run along the vertical axis.
pub fn clip_slice(slice: ArrayView2<'_, f64>, vmin: f64, vmax: f64) -> Array2<f64> {
    slice.t().mapv(|v| if v > vmax { vmin } else { v })
}

fn axis_bounds(axis: ArrayView1<'_, f64>) -> (f64, f64) {
    match (axis.first(), axis.last()) {
        (Some(&a), Some(&b)) => (a.min(b), a.max(b)),
        _ => (0.0, 1.0),
    }
}

fn panel_block<'a>(title: &str, style: &StyleContext) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(style.spine))
        .title(format!(" {} ", title))
        .title_style(Style::default().fg(style.title))
        .style(Style::default().bg(style.figure_bg))
}

/// Draw a 2D image slice given as `[x, y]`.
pub(super) fn draw_slice(
    f: &mut Frame<'_>,
    area: Rect,
    slice: ArrayView2<'_, f64>,
    x: ArrayView1<'_, f64>,
    y: ArrayView1<'_, f64>,
    text: &PanelText,
    bar_caption: Option<&str>,
    params: &PlotParams,
    style: &StyleContext,
) {
    let block = panel_block(&text.title, style);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let raster = RasterStyle {
        limits: (params.vmin, params.vmax),
        colormap: params.image_colormap,
        mode: params.view_mode,
    };
    let (plot_area, bar_area) = if params.colorbar && inner.width > COLORBAR_WIDTH * 2 {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(COLORBAR_WIDTH)])
            .split(inner);
        (chunks[0], Some(chunks[1]))
    } else {
        (inner, None)
    };

    let frame = AxisFrame {
        x_bounds: axis_bounds(x),
        y_bounds: axis_bounds(y),
        x_caption: text.x_caption.clone(),
        y_caption: text.y_caption.clone(),
    };
    let grid_area = frame.draw(f.buffer_mut(), plot_area, style);
    let values = clip_slice(slice, params.vmin, params.vmax);
    paint_grid(
        f.buffer_mut(),
        grid_area,
        values.view(),
        &raster,
        (params.invert_xaxis, params.invert_yaxis),
        style.face,
    );

    if let Some(bar) = bar_area {
        // Line the strip up with the painted grid.
        let strip = Rect {
            x: bar.x + 1,
            y: grid_area.y,
            width: bar.width.saturating_sub(1),
            height: grid_area.height,
        };
        draw_colorbar(f.buffer_mut(), strip, &raster, style);
        if let Some(caption) = bar_caption.filter(|_| grid_area.y > bar.y) {
            let label = Style::default().fg(style.label).bg(style.figure_bg);
            put_str(f.buffer_mut(), strip.x, grid_area.y - 1, caption, label, bar);
        }
    }
}

/// Grid extents of a 3D image, used to keep the view fixed while paging.
#[derive(Debug, Clone, Copy)]
pub struct VolumeExtent {
    /// Smallest corner.
    pub min: [f64; 3],
    /// Largest corner.
    pub max: [f64; 3],
}

impl VolumeExtent {
    /// Extent of the grid spanned by three axes.
    pub fn from_axes(x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>, z: ArrayView1<'_, f64>) -> Self {
        let (x0, x1) = axis_bounds(x);
        let (y0, y1) = axis_bounds(y);
        let (z0, z1) = axis_bounds(z);
        Self {
            min: [x0, y0, z0],
            max: [x1, y1, z1],
        }
    }

    fn corners(&self) -> impl Iterator<Item = [f64; 3]> + '_ {
        (0..8).map(move |i| {
            [
                if i & 1 == 0 { self.min[0] } else { self.max[0] },
                if i & 2 == 0 { self.min[1] } else { self.max[1] },
                if i & 4 == 0 { self.min[2] } else { self.max[2] },
            ]
        })
    }
}

/// Rasterize a mesh into cell colors with a depth buffer.
///
/// Returns one entry per cell of the viewport area, row-major; `None` where
/// no triangle covers the cell.
fn rasterize(
    mesh: &Mesh,
    projection: &Projection,
    viewport: &Viewport,
    style: &StyleContext,
) -> Vec<Option<ratatui::style::Color>> {
    let area = viewport.area();
    let (width, height) = (area.width as usize, area.height as usize);
    let mut depth = vec![f64::INFINITY; width * height];
    let mut colors = vec![None; width * height];
    let toward = projection.toward_viewer();

    for face in mesh.faces() {
        let Some(n) = normal(face) else {
            continue;
        };
        let facing = (n[0] * toward[0] + n[1] * toward[1] + n[2] * toward[2]).abs();
        let color = blend(style.shade, style.surface, style.shade_alpha * (1.0 - facing));

        let screen = face.map(|p| viewport.position(projection.project3(p)));
        let depths = face.map(|p| projection.depth(p));
        let xs = screen.map(|(x, _)| x);
        let ys = screen.map(|(_, y)| y);
        let x_lo = xs.iter().copied().fold(f64::INFINITY, f64::min).floor().max(0.0) as usize;
        let x_hi = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max).ceil();
        let y_lo = ys.iter().copied().fold(f64::INFINITY, f64::min).floor().max(0.0) as usize;
        let y_hi = ys.iter().copied().fold(f64::NEG_INFINITY, f64::max).ceil();
        if x_hi < 0.0 || y_hi < 0.0 {
            continue;
        }
        let x_hi = (x_hi as usize).min(width.saturating_sub(1));
        let y_hi = (y_hi as usize).min(height.saturating_sub(1));

        let [(ax, ay), (bx, by), (cx, cy)] = screen;
        let det = (by - cy) * (ax - cx) + (cx - bx) * (ay - cy);
        for row in y_lo..=y_hi {
            for col in x_lo..=x_hi {
                let (px, py) = (col as f64, row as f64);
                let d = if det.abs() < 1e-9 {
                    // Edge-on: only the cells holding a corner.
                    let hit = screen.iter().any(|&(sx, sy)| sx.round() == px && sy.round() == py);
                    if !hit {
                        continue;
                    }
                    depths.iter().copied().fold(f64::INFINITY, f64::min)
                } else {
                    let w0 = ((by - cy) * (px - cx) + (cx - bx) * (py - cy)) / det;
                    let w1 = ((cy - ay) * (px - cx) + (ax - cx) * (py - cy)) / det;
                    let w2 = 1.0 - w0 - w1;
                    // Half a cell of slack so thin slivers still land somewhere.
                    let slack = -0.5 / det.abs().sqrt().max(1.0);
                    if w0 < slack || w1 < slack || w2 < slack {
                        continue;
                    }
                    w0 * depths[0] + w1 * depths[1] + w2 * depths[2]
                };
                let idx = row * width + col;
                if d < depth[idx] {
                    depth[idx] = d;
                    colors[idx] = Some(color);
                }
            }
        }
    }
    colors
}

/// Draw a shaded isosurface of a 3D image.
pub(super) fn draw_isosurface(
    f: &mut Frame<'_>,
    area: Rect,
    mesh: Option<&Mesh>,
    extent: VolumeExtent,
    title: &str,
    params: &PlotParams,
    style: &StyleContext,
) {
    let block = panel_block(title, style);
    let inner = block.inner(area);

    let mesh = match mesh {
        Some(mesh) if !mesh.is_empty() => mesh,
        _ => {
            let para = Paragraph::new(format!("No surface at level {}", params.isolevel))
                .style(Style::default().fg(style.text))
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(para, area);
            return;
        },
    };
    f.render_widget(block, area);
    if inner.width < 4 || inner.height < 4 {
        return;
    }

    let label_style = Style::default().fg(style.label).bg(style.figure_bg);
    let vertical = with_unit(&params.zlabel, &params.zu);
    let depth = with_unit(&params.ylabel, &params.yu);
    let horizontal = with_unit(&params.xlabel, &params.xu);
    put_str(f.buffer_mut(), inner.x, inner.y, &vertical, label_style, inner);
    let dx = inner.right().saturating_sub(depth.width() as u16);
    put_str(f.buffer_mut(), dx, inner.y, &depth, label_style, inner);
    let hx = inner.x + inner.width.saturating_sub(horizontal.width() as u16) / 2;
    put_str(f.buffer_mut(), hx, inner.bottom() - 1, &horizontal, label_style, inner);

    let plot = Rect {
        x: inner.x,
        y: inner.y + 1,
        width: inner.width,
        height: inner.height - 2,
    };
    fill_background(f.buffer_mut(), plot, style.face);

    let projection = Projection {
        invert_z: params.invert_zaxis,
    };
    let Some((min, max)) = bounds(extent.corners().map(|c| projection.project3(c))) else {
        return;
    };
    let viewport = Viewport::fit(plot, min, max, (params.invert_xaxis, false));
    let colors = rasterize(mesh, &projection, &viewport, style);

    let buf = f.buffer_mut();
    let width = plot.width as usize;
    for (idx, color) in colors.into_iter().enumerate() {
        if let Some(color) = color {
            let (x, y) = (plot.x + (idx % width) as u16, plot.y + (idx / width) as u16);
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char('█').set_fg(color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewMode;
    use crate::isosurface::extract;
    use crate::render::render_to_text;
    use ndarray::{array, Array1, Array3};

    #[test]
    fn values_above_vmax_drop_to_vmin() {
        let slice = array![[0.2, 1.5], [0.9, 3.0]];
        let clipped = clip_slice(slice.view(), -1.0, 1.0);
        // Transposed: rows follow y.
        assert_eq!(clipped, array![[0.2, 0.9], [-1.0, -1.0]]);
    }

    #[test]
    fn slice_with_colorbar_shows_limits() {
        let style = StyleContext::from_mode(ViewMode::Dark);
        let params = PlotParams {
            colorbar: true,
            vmin: -2.0,
            vmax: 2.0,
            ..PlotParams::default()
        };
        let x = Array1::linspace(0.0, 1.0, 8);
        let y = Array1::linspace(0.0, 2.0, 6);
        let slice = Array2::from_shape_fn((8, 6), |(i, j)| (i + j) as f64 / 6.0);
        let text = PanelText {
            title: "α = 0".to_string(),
            x_caption: "x".to_string(),
            y_caption: "y".to_string(),
        };
        let screen = render_to_text(60, 20, |f| {
            draw_slice(f, f.area(), slice.view(), x.view(), y.view(), &text, Some("1/‖φ‖"), &params, &style)
        });
        assert!(screen.contains("α = 0"));
        assert!(screen.contains("2.00"));
        assert!(screen.contains("-2.00"));
        assert!(screen.contains('█'));
        assert!(screen.contains("1/‖φ‖"));
    }

    #[test]
    fn isosurface_is_drawn() {
        let style = StyleContext::from_mode(ViewMode::Light);
        let params = PlotParams::default();
        let axis = Array1::<f64>::linspace(-1.0, 1.0, 10);
        let volume = Array3::from_shape_fn((10, 10, 10), |(i, j, k)| {
            1.0 - (axis[i].powi(2) + axis[j].powi(2) + axis[k].powi(2))
        });
        let mesh = extract(volume.view(), 0.5, axis.view(), axis.view(), axis.view());
        let extent = VolumeExtent::from_axes(axis.view(), axis.view(), axis.view());
        let screen = render_to_text(50, 20, |f| {
            draw_isosurface(f, f.area(), Some(&mesh), extent, "Isosurface @ 0.5 [α = 0]", &params, &style)
        });
        assert!(screen.contains("Isosurface"));
        assert!(screen.contains('█'));
    }

    #[test]
    fn missing_surface_is_reported() {
        let style = StyleContext::from_mode(ViewMode::Light);
        let axis = Array1::linspace(0.0, 1.0, 3);
        let extent = VolumeExtent::from_axes(axis.view(), axis.view(), axis.view());
        let screen = render_to_text(50, 10, |f| {
            draw_isosurface(f, f.area(), None, extent, "Isosurface", &PlotParams::default(), &style)
        });
        assert!(screen.contains("No surface"));
    }
}
