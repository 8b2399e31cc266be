//! Frame rendering.
//!
//! `draw` is a pure function of the [`App`]: it reads the session, the cursor
//! and the style configuration and paints one figure. Each submodule draws one
//! kind of panel into the area it is given.

mod footer;
mod freq;
mod image;
mod labels;
mod map;
mod raster;
mod wiggle;

pub use footer::keymap_text;
pub use freq::{plan_frequency, FreqPlot};
pub use image::{clip_slice, VolumeExtent};
pub use labels::{
    amplitude_label, format_point, format_sci, image_title, vector_suptitle, vector_title, wave_title, with_unit, Entity,
};
pub use map::{Projection, Viewport};
pub use wiggle::{
    plan_wiggles, WiggleLayout, WigglePlot, WiggleRaster, WiggleTrace, MAX_LABELED_TRACES, MAX_STACKED_TRACES,
};

use crate::app::App;
use crate::config::PlotParams;
use crate::data::{ComplexPart, ImageFrame, ImageStack, Points};
use crate::session::{Session, VectorPanel, VectorSession, WaveSession};
use crate::style::StyleContext;
use crate::viewer::ViewState;
use ndarray::ArrayView1;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Title and axis captions of one panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelText {
    /// Panel title.
    pub title: String,
    /// Caption of the horizontal axis.
    pub x_caption: String,
    /// Caption of the vertical axis.
    pub y_caption: String,
}

/// Draw the whole figure.
pub fn draw(f: &mut Frame<'_>, app: &App) {
    let style = &app.style;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1), Constraint::Length(1)])
        .split(f.area());

    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(style.spine))
        .title(format!(" {} ", app.file_name()))
        .title_style(Style::default().fg(style.title))
        .style(Style::default().bg(style.figure_bg));
    let inner = outer.inner(chunks[0]);
    f.render_widget(outer, chunks[0]);

    if app.view.pager().is_empty() {
        draw_message(f, inner, "No frames to display", style);
    } else {
        match &app.session {
            Session::Waves(waves) => draw_waves(f, inner, waves, &app.view, &app.params, style),
            Session::Vectors(vectors) => draw_vectors(f, inner, vectors, app.view.cursor(), &app.params, style),
            Session::Images(stack) => draw_images(f, inner, stack, app, style),
        }
    }

    footer::draw_keymap(f, chunks[1], &app.keymap, app.view.can_switch(), style);
    footer::draw_status(f, chunks[2], &app.status_line(), style);
}

fn draw_message(f: &mut Frame<'_>, area: Rect, text: &str, style: &StyleContext) {
    let para = Paragraph::new(text.to_string())
        .style(Style::default().fg(style.text))
        .alignment(Alignment::Center);
    f.render_widget(para, area);
}

/// Coordinates of the first entity, for single-trace captions.
fn first_point(points: Option<&Points>) -> Option<ArrayView1<'_, f64>> {
    points.filter(|p| !p.is_empty()).map(|p| p.point(0))
}

fn draw_waves(
    f: &mut Frame<'_>,
    area: Rect,
    waves: &WaveSession,
    view: &ViewState,
    params: &PlotParams,
    style: &StyleContext,
) {
    let experiment = waves.experiment(view.active());
    let index = view.cursor();
    let frame = experiment.frame(index);
    let numbers = &experiment.receiver_numbers;
    let plot = plan_wiggles(frame, experiment.time.view(), numbers, params);
    let text = PanelText {
        title: wave_title(experiment, index, params),
        x_caption: with_unit("Time", &params.tu),
        y_caption: amplitude_label(
            frame.nrows(),
            Entity::Receiver,
            numbers.first().copied().unwrap_or(1),
            first_point(Some(&experiment.receivers)),
            params,
        ),
    };

    if !waves.show_map {
        wiggle::draw_wiggles(f, area, &plot, &text, params, style);
        return;
    }
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);
    wiggle::draw_wiggles(f, chunks[0], &plot, &text, params, style);
    let scene = map::MapScene {
        receivers: Some(&experiment.receivers),
        sources: experiment.sources.as_ref(),
        scatterer: waves.scatterer.as_ref(),
        wiggle_type: experiment.wiggle_type,
        active: Some(index),
    };
    map::draw_map(f, chunks[1], &scene, params, style);
}

fn draw_vector_panel(
    f: &mut Frame<'_>,
    area: Rect,
    session: &VectorSession,
    panel: VectorPanel,
    index: usize,
    params: &PlotParams,
    style: &StyleContext,
) {
    let vectors = &session.vectors;
    let frame = vectors.frame(panel.side, panel.part.unwrap_or(ComplexPart::Real), index);
    let (numbers, points) = vectors.entities(panel.side);
    let entity = Entity::from(panel.side);
    let y_caption = amplitude_label(
        frame.nrows(),
        entity,
        numbers.first().copied().unwrap_or(1),
        first_point(points),
        params,
    );
    let title = vector_title(panel.side, index + 1, panel.part);

    if panel.part.is_some() {
        let text = PanelText {
            title,
            x_caption: with_unit("Frequency", &params.fu),
            y_caption,
        };
        let plot = plan_frequency(frame, vectors.samples.view(), numbers);
        freq::draw_frequency(f, area, &plot, vectors.samples.view(), &text, params, style);
    } else {
        let text = PanelText {
            title,
            x_caption: with_unit("Time", &params.tu),
            y_caption,
        };
        let plot = plan_wiggles(frame, vectors.samples.view(), numbers, params);
        wiggle::draw_wiggles(f, area, &plot, &text, params, style);
    }
}

fn draw_vectors(
    f: &mut Frame<'_>,
    area: Rect,
    session: &VectorSession,
    index: usize,
    params: &PlotParams,
    style: &StyleContext,
) {
    let area = if session.vectors.is_complex() {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(3)])
            .split(area);
        let heading = Paragraph::new(vector_suptitle(session.side))
            .style(Style::default().fg(style.title).bg(style.figure_bg))
            .alignment(Alignment::Center);
        f.render_widget(heading, rows[0]);
        rows[1]
    } else {
        area
    };
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    for (panel, chunk) in session.panels().into_iter().zip(chunks.iter()) {
        draw_vector_panel(f, *chunk, session, panel, index, params, style);
    }
}

fn draw_images(f: &mut Frame<'_>, area: Rect, stack: &ImageStack, app: &App, style: &StyleContext) {
    let params = &app.params;
    let index = app.view.cursor();
    let (alpha, tau) = (stack.alpha(index), stack.tau(index));
    match stack.frame(index) {
        ImageFrame::Planar(slice) => {
            let text = PanelText {
                title: image_title(alpha, tau, None, params),
                x_caption: with_unit(&params.xlabel, &params.xu),
                y_caption: with_unit(&params.ylabel, &params.yu),
            };
            // Time-domain images plot the reciprocal norm of the test function.
            let bar_caption = tau.map(|_| "1/‖φ‖");
            image::draw_slice(f, area, slice, stack.x.view(), stack.y.view(), &text, bar_caption, params, style);
        },
        ImageFrame::Volumetric(_) => {
            let z = stack.z_axis();
            let extent = VolumeExtent::from_axes(stack.x.view(), stack.y.view(), z.view());
            let title = image_title(alpha, tau, Some(params.isolevel), params);
            image::draw_isosurface(f, area, app.surface(), extent, &title, params, style);
        },
    }
}

/// Render into an in-memory terminal and return its buffer.
#[cfg(test)]
pub(crate) fn render_to_buffer(width: u16, height: u16, draw: impl FnOnce(&mut Frame<'_>)) -> ratatui::buffer::Buffer {
    use ratatui::{backend::TestBackend, Terminal};

    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(draw).unwrap();
    terminal.backend().buffer().clone()
}

/// Render into an in-memory terminal and return its cells as one string.
#[cfg(test)]
pub(crate) fn render_to_text(width: u16, height: u16, draw: impl FnOnce(&mut Frame<'_>)) -> String {
    let buffer = render_to_buffer(width, height, draw);
    buffer.content().iter().map(|cell| cell.symbol()).collect()
}
