//! Spatial map of receivers, sources and the scatterer boundary.

use super::labels::with_unit;
use super::raster::{fill_background, put_glyph, put_str};
use crate::config::PlotParams;
use crate::data::{Points, WiggleType};
use crate::style::StyleContext;
use ndarray::ArrayView1;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Terminal cells are about twice as tall as they are wide.
const CELL_ASPECT: f64 = 2.0;

/// Fixed oblique projection of 3D points onto the screen plane.
///
/// The y axis recedes into the screen at 30 degrees, foreshortened by half.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    /// Flip the vertical coordinate before projecting.
    pub invert_z: bool,
}

impl Projection {
    const DEPTH_SCALE: f64 = 0.5;
    const DEPTH_ANGLE: f64 = std::f64::consts::FRAC_PI_6;

    /// Project a 2D or 3D point to plane coordinates.
    pub fn project(&self, p: ArrayView1<'_, f64>) -> (f64, f64) {
        match p.len() {
            0 => (0.0, 0.0),
            1 => (p[0], 0.0),
            2 => (p[0], p[1]),
            _ => self.project3([p[0], p[1], p[2]]),
        }
    }

    /// Project a 3D point to plane coordinates.
    pub fn project3(&self, [x, y, z]: [f64; 3]) -> (f64, f64) {
        let z = if self.invert_z { -z } else { z };
        (
            x + Self::DEPTH_SCALE * y * Self::DEPTH_ANGLE.cos(),
            z + Self::DEPTH_SCALE * y * Self::DEPTH_ANGLE.sin(),
        )
    }

    /// Distance from the viewer; smaller is closer.
    pub fn depth(&self, [_, y, _]: [f64; 3]) -> f64 {
        y
    }

    /// Unit vector pointing from the scene toward the viewer.
    pub fn toward_viewer(&self) -> [f64; 3] {
        let (s, c) = Self::DEPTH_ANGLE.sin_cos();
        let z_sign = if self.invert_z { -1.0 } else { 1.0 };
        let v = [-Self::DEPTH_SCALE * c, -1.0, -Self::DEPTH_SCALE * s * z_sign];
        let norm = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
        [v[0] / norm, v[1] / norm, v[2] / norm]
    }
}

/// Maps plane coordinates onto terminal cells with equal aspect.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    area: Rect,
    origin: (f64, f64),
    /// Rows per plane unit; columns per unit are `CELL_ASPECT` times more.
    scale: f64,
    offset: (f64, f64),
    flip: (bool, bool),
}

impl Viewport {
    /// Fit a bounding box `(min, max)` into `area`.
    pub fn fit(area: Rect, min: (f64, f64), max: (f64, f64), flip: (bool, bool)) -> Self {
        let pad = |lo: f64, hi: f64| {
            let span = hi - lo;
            if span > 0.0 {
                (lo - span * 0.05, hi + span * 0.05)
            } else {
                (lo - 0.5, hi + 0.5)
            }
        };
        let (x0, x1) = pad(min.0, max.0);
        let (y0, y1) = pad(min.1, max.1);
        let width = area.width.max(1) as f64;
        let height = area.height.max(1) as f64;
        let scale = (height / (y1 - y0)).min(width / ((x1 - x0) * CELL_ASPECT));
        let offset = (
            (width - (x1 - x0) * scale * CELL_ASPECT) / 2.0,
            (height - (y1 - y0) * scale) / 2.0,
        );
        Self {
            area,
            origin: (x0, y0),
            scale,
            offset,
            flip,
        }
    }

    /// Cell of a plane point, or `None` outside the area.
    pub fn cell(&self, p: (f64, f64)) -> Option<(u16, u16)> {
        let (cx, cy) = self.position(p);
        let (cx, cy) = (cx.round(), cy.round());
        if !(cx >= 0.0 && cy >= 0.0 && cx < self.area.width as f64 && cy < self.area.height as f64) {
            return None;
        }
        Some((self.area.x + cx as u16, self.area.y + cy as u16))
    }

    /// Screen position of a plane point in cells, relative to the area.
    pub fn position(&self, (u, v): (f64, f64)) -> (f64, f64) {
        let cx = (u - self.origin.0) * self.scale * CELL_ASPECT + self.offset.0;
        let cy = (v - self.origin.1) * self.scale + self.offset.1;
        let width = self.area.width as f64;
        let height = self.area.height as f64;
        let cx = if self.flip.0 { width - 1.0 - cx } else { cx };
        // Screen rows grow downward.
        let cy = if self.flip.1 { cy } else { height - 1.0 - cy };
        (cx, cy)
    }

    /// The area this viewport draws into.
    pub fn area(&self) -> Rect {
        self.area
    }
}

/// Bounding box of projected points.
pub(super) fn bounds(points: impl IntoIterator<Item = (f64, f64)>) -> Option<((f64, f64), (f64, f64))> {
    points.into_iter().filter(|(u, v)| u.is_finite() && v.is_finite()).fold(None, |acc, (u, v)| {
        Some(match acc {
            None => ((u, v), (u, v)),
            Some(((x0, y0), (x1, y1))) => ((x0.min(u), y0.min(v)), (x1.max(u), y1.max(v))),
        })
    })
}

/// Geometry drawn on a map.
#[derive(Debug, Clone, Copy)]
pub(super) struct MapScene<'a> {
    /// Receiver locations.
    pub(super) receivers: Option<&'a Points>,
    /// Source locations.
    pub(super) sources: Option<&'a Points>,
    /// Scatterer boundary.
    pub(super) scatterer: Option<&'a Points>,
    /// Kind of sources, which picks their glyph.
    pub(super) wiggle_type: WiggleType,
    /// Source at the cursor, if the map follows one.
    pub(super) active: Option<usize>,
}

fn source_glyphs(wiggle_type: WiggleType) -> (char, char) {
    match wiggle_type {
        WiggleType::Data => ('*', '★'),
        WiggleType::Impulse => ('•', '●'),
    }
}

/// Draw a dashed polyline between consecutive points.
fn draw_dashed(buf: &mut ratatui::buffer::Buffer, viewport: &Viewport, pts: &[(f64, f64)], color: Color, clip: Rect) {
    let mut step = 0usize;
    for pair in pts.windows(2) {
        let (x0, y0) = viewport.position(pair[0]);
        let (x1, y1) = viewport.position(pair[1]);
        let n = ((x1 - x0).abs().max((y1 - y0).abs()).ceil() as usize).max(1);
        for i in 0..n {
            let t = i as f64 / n as f64;
            let (x, y) = (x0 + t * (x1 - x0), y0 + t * (y1 - y0));
            // Two cells on, two off.
            if step % 4 < 2 && x >= 0.0 && y >= 0.0 {
                put_glyph(
                    buf,
                    viewport.area.x.saturating_add(x.round() as u16),
                    viewport.area.y.saturating_add(y.round() as u16),
                    '·',
                    color,
                    clip,
                );
            }
            step += 1;
        }
    }
}

/// Draw the map panel.
pub(super) fn draw_map(f: &mut Frame<'_>, area: Rect, scene: &MapScene<'_>, params: &PlotParams, style: &StyleContext) {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(style.spine))
        .style(Style::default().bg(style.figure_bg));
    if scene.active.is_some() {
        block = block
            .title(" Map ")
            .title_style(Style::default().fg(style.title));
    }
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.width < 4 || inner.height < 4 {
        return;
    }

    let projection = Projection {
        invert_z: params.invert_zaxis,
    };
    let is_3d = [scene.receivers, scene.sources, scene.scatterer]
        .into_iter()
        .flatten()
        .any(|p| p.dim() == 3);

    // Captions: x below, vertical axis on top, depth in the top right.
    let vertical = if is_3d {
        with_unit(&params.zlabel, &params.zu)
    } else {
        with_unit(&params.ylabel, &params.yu)
    };
    let label_style = Style::default().fg(style.label).bg(style.figure_bg);
    put_str(f.buffer_mut(), inner.x, inner.y, &vertical, label_style, inner);
    if is_3d {
        let depth = with_unit(&params.ylabel, &params.yu);
        let x = inner.right().saturating_sub(depth.width() as u16);
        put_str(f.buffer_mut(), x, inner.y, &depth, label_style, inner);
    }
    let horizontal = with_unit(&params.xlabel, &params.xu);
    let hx = inner.x + inner.width.saturating_sub(horizontal.width() as u16) / 2;
    put_str(f.buffer_mut(), hx, inner.bottom() - 1, &horizontal, label_style, inner);

    let plot = Rect {
        x: inner.x,
        y: inner.y + 1,
        width: inner.width,
        height: inner.height - 2,
    };
    fill_background(f.buffer_mut(), plot, style.face);

    let project_all = |points: Option<&Points>| -> Vec<(f64, f64)> {
        points
            .map(|p| p.iter().map(|row| projection.project(row)).collect())
            .unwrap_or_default()
    };
    let receivers = if params.show_receivers {
        project_all(scene.receivers)
    } else {
        Vec::new()
    };
    // Impulse sampling points are always shown; data sources follow the toggle.
    let show_sources = params.show_sources || scene.wiggle_type == WiggleType::Impulse;
    let sources = if show_sources {
        project_all(scene.sources)
    } else {
        Vec::new()
    };
    let scatterer = if params.show_scatterer {
        project_all(scene.scatterer)
    } else {
        Vec::new()
    };

    let Some((min, max)) = bounds(receivers.iter().chain(&sources).chain(&scatterer).copied()) else {
        return;
    };
    let viewport = Viewport::fit(plot, min, max, (params.invert_xaxis, params.invert_yaxis));
    let buf = f.buffer_mut();

    draw_dashed(buf, &viewport, &scatterer, style.scatterer, plot);

    for &p in &receivers {
        if let Some((x, y)) = viewport.cell(p) {
            put_glyph(buf, x, y, '▼', style.receiver, plot);
        }
    }

    let (glyph, active_glyph) = source_glyphs(scene.wiggle_type);
    for (i, &p) in sources.iter().enumerate() {
        if Some(i) == scene.active {
            continue;
        }
        let color = if scene.active.is_some() {
            style.inactive_source
        } else {
            style.source
        };
        if let Some((x, y)) = viewport.cell(p) {
            put_glyph(buf, x, y, glyph, color, plot);
        }
    }
    if let Some(p) = scene.active.and_then(|i| sources.get(i)) {
        if let Some((x, y)) = viewport.cell(*p) {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char(active_glyph)
                    .set_fg(style.active_source)
                    .set_style(Style::default().add_modifier(Modifier::BOLD));
            }
        }
    }
}
