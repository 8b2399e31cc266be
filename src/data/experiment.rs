//! Recorded data and impulse responses, paged by source.

use super::Points;
use ndarray::{Array1, Array3, ArrayView2, Axis};

/// What a wave experiment's traces represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WiggleType {
    /// Recorded scattered-wave data, one frame per source.
    Data,
    /// Simulated impulse responses, one frame per sampling point.
    Impulse,
}

/// A stack of wave recordings indexed by source.
#[derive(Debug, Clone)]
pub struct Experiment {
    /// Traces as `[receiver, time, source]`.
    pub data: Array3<f64>,
    /// Time axis shared by every trace.
    pub time: Array1<f64>,
    /// Receiver numbers shown in captions.
    pub receiver_numbers: Vec<usize>,
    /// Receiver coordinates.
    pub receivers: Points,
    /// Source numbers shown in captions.
    pub source_numbers: Vec<usize>,
    /// Source coordinates, if known.
    pub sources: Option<Points>,
    /// Kind of traces.
    pub wiggle_type: WiggleType,
}

impl Experiment {
    /// Number of frames (sources).
    pub fn source_count(&self) -> usize {
        self.data.len_of(Axis(2))
    }

    /// Number of traces per frame.
    pub fn receiver_count(&self) -> usize {
        self.data.len_of(Axis(0))
    }

    /// Traces recorded for one source, as `[receiver, time]`.
    pub fn frame(&self, source: usize) -> ArrayView2<'_, f64> {
        self.data.index_axis(Axis(2), source)
    }

    /// Build the reciprocal experiment: receivers become sources and vice versa.
    ///
    /// `data` must be laid out as `[source, time, receiver]` of this experiment.
    /// Returns `None` when this experiment has no source coordinates, since the
    /// reciprocal receivers would have no location.
    pub fn reciprocal(&self, data: Array3<f64>) -> Option<Experiment> {
        let sources = self.sources.clone()?;
        Some(Experiment {
            data,
            time: self.time.clone(),
            receiver_numbers: self.source_numbers.clone(),
            receivers: sources,
            source_numbers: self.receiver_numbers.clone(),
            sources: Some(self.receivers.clone()),
            wiggle_type: self.wiggle_type,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use ndarray::{Array2, Array3};

    /// A small experiment on a line of receivers with sources above them.
    pub(crate) fn sample_experiment(receivers: usize, sources: usize) -> Experiment {
        let samples = 16;
        let data = Array3::from_shape_fn((receivers, samples, sources), |(r, t, s)| {
            ((t as f64) * 0.4 + r as f64 + s as f64).sin()
        });
        Experiment {
            data,
            time: Array1::linspace(0.0, 1.5, samples),
            receiver_numbers: (1..=receivers).collect(),
            receivers: Points::new(Array2::from_shape_fn((receivers, 2), |(i, j)| {
                if j == 0 {
                    i as f64
                } else {
                    0.0
                }
            })),
            source_numbers: (1..=sources).collect(),
            sources: Some(Points::new(Array2::from_shape_fn((sources, 2), |(i, j)| {
                if j == 0 {
                    i as f64 * 2.0
                } else {
                    5.0
                }
            }))),
            wiggle_type: WiggleType::Data,
        }
    }

    #[test]
    fn frame_selects_one_source() {
        let exp = sample_experiment(4, 3);
        assert_eq!(exp.source_count(), 3);
        assert_eq!(exp.receiver_count(), 4);
        let frame = exp.frame(2);
        assert_eq!(frame.shape(), &[4, 16]);
        assert_eq!(frame[[1, 3]], exp.data[[1, 3, 2]]);
    }

    #[test]
    fn reciprocal_swaps_roles() {
        let exp = sample_experiment(4, 3);
        let reciprocal = exp
            .reciprocal(Array3::zeros((3, 16, 4)))
            .expect("sources are known");
        assert_eq!(reciprocal.source_count(), 4);
        assert_eq!(reciprocal.receiver_count(), 3);
        assert_eq!(reciprocal.receiver_numbers, exp.source_numbers);
        assert_eq!(reciprocal.sources.as_ref(), Some(&exp.receivers));
    }

    #[test]
    fn reciprocal_needs_source_geometry() {
        let mut exp = sample_experiment(2, 2);
        exp.sources = None;
        assert!(exp.reciprocal(Array3::zeros((2, 16, 2))).is_none());
    }
}
