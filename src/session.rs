//! What a viewing session pages through.

use crate::data::{
    ComplexPart, Experiment, ImageStack, Points, SingularVectors, VectorSide, WaveRecords,
};
use crate::viewer::{DatasetId, Pager, ViewState};

/// Wave recordings, with an optional reciprocal dataset and companion map.
#[derive(Debug, Clone)]
pub struct WaveSession {
    /// Experiment the session was opened with.
    pub primary: Experiment,
    /// Reciprocal experiment, if available.
    pub reciprocal: Option<Experiment>,
    /// Scatterer boundary points.
    pub scatterer: Option<Points>,
    /// Draw a map panel next to the wiggles.
    pub show_map: bool,
}

impl WaveSession {
    /// Build a session from loaded records.
    pub fn new(records: WaveRecords, show_map: bool) -> Self {
        Self {
            primary: records.experiment,
            reciprocal: records.reciprocal,
            scatterer: records.scatterer,
            show_map,
        }
    }

    /// Experiment for a dataset; falls back to the primary one.
    pub fn experiment(&self, id: DatasetId) -> &Experiment {
        match (id, &self.reciprocal) {
            (DatasetId::Reciprocal, Some(exp)) => exp,
            _ => &self.primary,
        }
    }
}

/// Singular vectors and the panels they are shown in.
#[derive(Debug, Clone)]
pub struct VectorSession {
    /// The vectors.
    pub vectors: SingularVectors,
    /// Side shown as real and imaginary panels for complex vectors.
    pub side: VectorSide,
}

/// One panel of the vector viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorPanel {
    /// Left or right vectors.
    pub side: VectorSide,
    /// Complex part, for frequency-domain vectors.
    pub part: Option<ComplexPart>,
}

impl VectorSession {
    /// Panels drawn side by side.
    ///
    /// Real vectors show the left and right vectors; complex vectors show
    /// the real and imaginary parts of the chosen side.
    pub fn panels(&self) -> [VectorPanel; 2] {
        if self.vectors.is_complex() {
            [
                VectorPanel {
                    side: self.side,
                    part: Some(ComplexPart::Real),
                },
                VectorPanel {
                    side: self.side,
                    part: Some(ComplexPart::Imag),
                },
            ]
        } else {
            [
                VectorPanel {
                    side: VectorSide::Left,
                    part: None,
                },
                VectorPanel {
                    side: VectorSide::Right,
                    part: None,
                },
            ]
        }
    }
}

/// The frame stack of a session.
#[derive(Debug, Clone)]
pub enum Session {
    /// Recorded data or impulse responses.
    Waves(WaveSession),
    /// Singular vectors.
    Vectors(VectorSession),
    /// Reconstructed images.
    Images(ImageStack),
}

impl Session {
    /// Cursor state on first display.
    ///
    /// Wave sessions open on the middle source; the others on the first frame.
    pub fn initial_view(&self) -> ViewState {
        match self {
            Session::Waves(waves) => ViewState::new(
                Pager::centered(waves.primary.source_count()),
                waves
                    .reciprocal
                    .as_ref()
                    .map(|exp| Pager::centered(exp.source_count())),
            ),
            Session::Vectors(session) => ViewState::new(Pager::new(session.vectors.count()), None),
            Session::Images(stack) => ViewState::new(Pager::new(stack.frame_count()), None),
        }
    }

    /// Get display name.
    pub fn name(&self) -> &'static str {
        match self {
            Session::Waves(waves) => match waves.primary.wiggle_type {
                crate::data::WiggleType::Data => "data",
                crate::data::WiggleType::Impulse => "impulse",
            },
            Session::Vectors(_) => "vectors",
            Session::Images(_) => "images",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample_experiment;
    use ndarray::Array3;

    fn waves(reciprocal: bool) -> Session {
        let primary = sample_experiment(4, 5);
        let reciprocal = reciprocal
            .then(|| primary.reciprocal(Array3::zeros((5, 16, 4))))
            .flatten();
        Session::Waves(WaveSession {
            primary,
            reciprocal,
            scatterer: None,
            show_map: false,
        })
    }

    #[test]
    fn waves_open_on_middle_source() {
        let view = waves(false).initial_view();
        assert_eq!(view.cursor(), 2);
        assert!(!view.can_switch());
    }

    #[test]
    fn reciprocal_gets_its_own_centered_pager() {
        let view = waves(true).initial_view().switch_dataset();
        assert_eq!(view.pager().len(), 4);
        assert_eq!(view.cursor(), 2);
    }

    #[test]
    fn experiment_falls_back_to_primary() {
        let Session::Waves(session) = waves(false) else {
            panic!("expected waves");
        };
        assert_eq!(
            session.experiment(DatasetId::Reciprocal).source_count(),
            session.primary.source_count()
        );
    }
}
