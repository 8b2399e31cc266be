//! Receiver, source and scatterer coordinates.

use ndarray::{Array2, ArrayView1, Axis};

/// A set of points in 2D or 3D space, one point per row.
#[derive(Debug, Clone, PartialEq)]
pub struct Points {
    coords: Array2<f64>,
}

impl Points {
    /// Wrap a `[count, dim]` coordinate array.
    pub fn new(coords: Array2<f64>) -> Self {
        Self { coords }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.coords.nrows()
    }

    /// Whether there are no points.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Spatial dimension (2 or 3).
    pub fn dim(&self) -> usize {
        self.coords.ncols()
    }

    /// Coordinates of one point.
    pub fn point(&self, index: usize) -> ArrayView1<'_, f64> {
        self.coords.row(index)
    }

    /// Iterate over all points.
    pub fn iter(&self) -> impl Iterator<Item = ArrayView1<'_, f64>> {
        self.coords.axis_iter(Axis(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn reports_count_and_dimension() {
        let points = Points::new(array![[0.0, 1.0, 2.0], [3.0, 4.0, 5.0]]);
        assert_eq!(points.len(), 2);
        assert_eq!(points.dim(), 3);
        assert_eq!(points.point(1).to_vec(), vec![3.0, 4.0, 5.0]);
        assert_eq!(points.iter().count(), 2);
        assert!(!points.is_empty());
    }
}
