//! Application state and logic.

use std::path::PathBuf;

use crate::clipboard::{copy_to_clipboard, frame_tsv};
use crate::config::PlotParams;
use crate::data::ImageFrame;
use crate::isosurface::{extract, Mesh};
use crate::session::Session;
use crate::style::StyleContext;
use crate::viewer::{Command, DatasetId, Keymap, ViewState};
use crossterm::event::KeyCode;

/// Application state.
#[derive(Debug)]
pub struct App {
    /// What is being paged through.
    pub session: Session,
    /// Cursor state.
    pub view: ViewState,
    /// Style configuration.
    pub params: PlotParams,
    /// Colors for the display mode.
    pub style: StyleContext,
    /// Key bindings.
    pub keymap: Keymap,
    /// Status message.
    pub status: String,
    /// Set once the user asks to quit.
    pub should_quit: bool,
    /// File the session was loaded from.
    pub path: PathBuf,
    /// Isosurface of the 3D frame at the given index.
    surface: Option<(usize, Mesh)>,
}

impl App {
    /// Create a new application instance.
    pub fn new(session: Session, params: PlotParams, path: PathBuf) -> Self {
        let view = session.initial_view();
        let style = StyleContext::from_mode(params.view_mode);
        let mut app = Self {
            session,
            view,
            params,
            style,
            keymap: Keymap::default(),
            status: "Ready".to_string(),
            should_quit: false,
            path,
            surface: None,
        };
        app.refresh_surface();
        app
    }

    /// File name shown in the figure title.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Isosurface of the current frame, for 3D images.
    pub fn surface(&self) -> Option<&Mesh> {
        match &self.surface {
            Some((index, mesh)) if *index == self.view.cursor() => Some(mesh),
            _ => None,
        }
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, code: KeyCode) {
        let Some(command) = self.keymap.lookup(code) else {
            return;
        };
        match command {
            Command::Quit => self.should_quit = true,
            Command::CopyFrame => self.copy_frame(),
            Command::SwitchDataset if !self.view.can_switch() => {
                self.status = "No reciprocal dataset".to_string();
            },
            _ => {
                let before = self.view;
                self.view = self.keymap.apply(self.view, code);
                tracing::debug!(
                    command = command.name(),
                    from = before.cursor(),
                    to = self.view.cursor(),
                    dataset = self.view.active().ordinal(),
                    "navigate"
                );
                if command == Command::SwitchDataset {
                    self.status = format!("Showing {} dataset", dataset_name(self.view.active()));
                } else {
                    self.status.clear();
                }
                self.refresh_surface();
            },
        }
    }

    fn copy_frame(&mut self) {
        let text = frame_tsv(&self.session, &self.view);
        if text.is_empty() {
            self.status = "Nothing to copy".to_string();
            return;
        }
        match copy_to_clipboard(&text) {
            Ok(()) => {
                self.status = format!("Copied frame {} ({} lines)", self.view.cursor() + 1, text.lines().count());
            },
            Err(e) => {
                tracing::warn!("clipboard copy failed: {}", e);
                self.status = format!("Copy failed: {}", e);
            },
        }
    }

    /// Extract the isosurface of the current frame unless it is cached.
    fn refresh_surface(&mut self) {
        let Session::Images(stack) = &self.session else {
            return;
        };
        if self.view.pager().is_empty() {
            return;
        }
        let index = self.view.cursor();
        if matches!(&self.surface, Some((cached, _)) if *cached == index) {
            return;
        }
        if let ImageFrame::Volumetric(volume) = stack.frame(index) {
            let z = stack.z_axis();
            let mesh = extract(volume, self.params.isolevel, stack.x.view(), stack.y.view(), z.view());
            tracing::debug!(frame = index, triangles = mesh.triangles.len(), "isosurface");
            self.surface = Some((index, mesh));
        }
    }

    /// Text of the status line.
    pub fn status_line(&self) -> String {
        let pager = self.view.pager();
        let mut parts = Vec::new();
        if !self.status.is_empty() {
            parts.push(self.status.clone());
        }
        let position = if pager.is_empty() {
            "0/0".to_string()
        } else {
            format!("{}/{}", pager.index() + 1, pager.len())
        };
        parts.push(format!("{} {}", self.session.name(), position));
        if self.view.can_switch() {
            parts.push(dataset_name(self.view.active()).to_string());
        }
        parts.push(self.params.view_mode.name().to_string());
        parts.push(self.params.output_format.extension().to_string());
        parts.join(" | ")
    }
}

fn dataset_name(id: DatasetId) -> &'static str {
    match id {
        DatasetId::Primary => "primary",
        DatasetId::Reciprocal => "reciprocal",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{sample_experiment, ImageStack, ImageVolume, WaveRecords};
    use crate::session::WaveSession;
    use ndarray::{Array3, Array4};

    fn wave_app(reciprocal: bool) -> App {
        let experiment = sample_experiment(3, 4);
        let reciprocal = reciprocal
            .then(|| experiment.reciprocal(Array3::zeros((4, 16, 3))))
            .flatten();
        let records = WaveRecords {
            experiment,
            reciprocal,
            scatterer: None,
        };
        App::new(
            Session::Waves(WaveSession::new(records, false)),
            PlotParams::default(),
            PathBuf::from("/tmp/run.nc"),
        )
    }

    #[test]
    fn navigation_wraps_and_updates_status_line() {
        let mut app = wave_app(false);
        assert_eq!(app.view.cursor(), 2);
        app.handle_key(KeyCode::Right);
        app.handle_key(KeyCode::Right);
        assert_eq!(app.view.cursor(), 0);
        assert_eq!(app.status_line(), "data 1/4 | light | pdf");
        assert_eq!(app.file_name(), "run.nc");
    }

    #[test]
    fn switch_without_reciprocal_keeps_cursor() {
        let mut app = wave_app(false);
        app.handle_key(KeyCode::Char('r'));
        assert_eq!(app.view.active(), DatasetId::Primary);
        assert_eq!(app.view.cursor(), 2);
        assert!(app.status.contains("No reciprocal"));
    }

    #[test]
    fn switch_with_reciprocal_toggles() {
        let mut app = wave_app(true);
        app.handle_key(KeyCode::Char('r'));
        assert_eq!(app.view.active(), DatasetId::Reciprocal);
        assert!(app.status_line().contains("reciprocal"));
        app.handle_key(KeyCode::Char('r'));
        assert_eq!(app.view.active(), DatasetId::Primary);
    }

    #[test]
    fn quit_keys_set_flag() {
        for code in [KeyCode::Char('q'), KeyCode::Esc] {
            let mut app = wave_app(false);
            app.handle_key(code);
            assert!(app.should_quit);
        }
        let mut app = wave_app(false);
        app.handle_key(KeyCode::Char('x'));
        assert!(!app.should_quit);
    }

    #[test]
    fn surface_follows_cursor() {
        let axis = ndarray::Array1::<f64>::linspace(-1.0, 1.0, 6);
        let stack = ImageStack {
            volume: ImageVolume::Volumetric(Array4::from_shape_fn((6, 6, 6, 2), |(i, j, k, f)| {
                1.0 - (axis[i].powi(2) + axis[j].powi(2) + axis[k].powi(2)) + f as f64 * 0.1
            })),
            x: axis.clone(),
            y: axis.clone(),
            z: Some(axis.clone()),
            alpha: vec![0.0, 0.1],
            tau: None,
        };
        let mut app = App::new(Session::Images(stack), PlotParams::default(), PathBuf::from("img.nc"));
        assert!(app.surface().is_some());
        app.handle_key(KeyCode::Right);
        assert_eq!(app.view.cursor(), 1);
        assert!(app.surface().is_some());
    }
}
