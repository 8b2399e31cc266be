//! Singular vectors of a data operator, paged by vector index.

use super::Points;
use clap::ValueEnum;
use ndarray::{Array1, Array3, ArrayView2, Axis};

/// Which singular vectors a panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum VectorSide {
    /// Left-singular vectors, defined over receivers.
    #[default]
    Left,
    /// Right-singular vectors, defined over sources.
    Right,
}

/// Real or imaginary part of a complex vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplexPart {
    /// Real part.
    Real,
    /// Imaginary part.
    Imag,
}

/// Domain in which the vectors were computed.
#[derive(Debug, Clone)]
pub enum VectorDomain {
    /// Real-valued vectors over time.
    Time,
    /// Complex vectors over frequency; the main stacks hold the real parts.
    Frequency {
        /// Imaginary parts of the left vectors.
        left_imag: Array3<f64>,
        /// Imaginary parts of the right vectors.
        right_imag: Array3<f64>,
    },
}

/// Left and right singular vectors sharing a sample axis.
#[derive(Debug, Clone)]
pub struct SingularVectors {
    /// Left vectors as `[receiver, sample, k]`.
    pub left: Array3<f64>,
    /// Right vectors as `[source, sample, k]`.
    pub right: Array3<f64>,
    /// Time or frequency samples.
    pub samples: Array1<f64>,
    /// Receiver numbers.
    pub receiver_numbers: Vec<usize>,
    /// Receiver coordinates, if known.
    pub receivers: Option<Points>,
    /// Source numbers.
    pub source_numbers: Vec<usize>,
    /// Source coordinates, if known.
    pub sources: Option<Points>,
    /// Time or frequency domain.
    pub domain: VectorDomain,
}

impl SingularVectors {
    /// Number of singular vectors.
    pub fn count(&self) -> usize {
        self.left.len_of(Axis(2))
    }

    /// Whether the vectors are complex (frequency domain).
    pub fn is_complex(&self) -> bool {
        matches!(self.domain, VectorDomain::Frequency { .. })
    }

    /// One vector as `[entity, sample]`.
    ///
    /// For time-domain vectors `part` is ignored.
    pub fn frame(&self, side: VectorSide, part: ComplexPart, index: usize) -> ArrayView2<'_, f64> {
        let stack = match (&self.domain, side, part) {
            (VectorDomain::Frequency { left_imag, .. }, VectorSide::Left, ComplexPart::Imag) => {
                left_imag
            },
            (VectorDomain::Frequency { right_imag, .. }, VectorSide::Right, ComplexPart::Imag) => {
                right_imag
            },
            (_, VectorSide::Left, _) => &self.left,
            (_, VectorSide::Right, _) => &self.right,
        };
        stack.index_axis(Axis(2), index)
    }

    /// Numbers and coordinates of the entities a side is defined over.
    pub fn entities(&self, side: VectorSide) -> (&[usize], Option<&Points>) {
        match side {
            VectorSide::Left => (&self.receiver_numbers, self.receivers.as_ref()),
            VectorSide::Right => (&self.source_numbers, self.sources.as_ref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complex_vectors() -> SingularVectors {
        SingularVectors {
            left: Array3::from_elem((3, 5, 2), 1.0),
            right: Array3::from_elem((4, 5, 2), 2.0),
            samples: Array1::linspace(0.0, 4.0, 5),
            receiver_numbers: vec![1, 2, 3],
            receivers: None,
            source_numbers: vec![1, 2, 3, 4],
            sources: None,
            domain: VectorDomain::Frequency {
                left_imag: Array3::from_elem((3, 5, 2), -1.0),
                right_imag: Array3::from_elem((4, 5, 2), -2.0),
            },
        }
    }

    #[test]
    fn frame_picks_side_and_part() {
        let vectors = complex_vectors();
        assert!(vectors.is_complex());
        assert_eq!(vectors.count(), 2);
        assert_eq!(vectors.frame(VectorSide::Left, ComplexPart::Real, 1)[[0, 0]], 1.0);
        assert_eq!(vectors.frame(VectorSide::Left, ComplexPart::Imag, 1)[[0, 0]], -1.0);
        assert_eq!(vectors.frame(VectorSide::Right, ComplexPart::Imag, 0)[[3, 4]], -2.0);
        assert_eq!(vectors.frame(VectorSide::Right, ComplexPart::Real, 0).shape(), &[4, 5]);
    }

    #[test]
    fn time_domain_ignores_part() {
        let mut vectors = complex_vectors();
        vectors.domain = VectorDomain::Time;
        assert_eq!(vectors.frame(VectorSide::Left, ComplexPart::Imag, 0)[[0, 0]], 1.0);
        assert_eq!(vectors.entities(VectorSide::Right).0.len(), 4);
    }
}
