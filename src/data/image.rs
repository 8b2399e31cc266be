//! Reconstructed images, paged by regularization parameter.

use ndarray::{Array1, Array3, Array4, ArrayView2, ArrayView3, Axis};

/// Image values for every frame.
#[derive(Debug, Clone)]
pub enum ImageVolume {
    /// 2D images as `[x, y, frame]`.
    Planar(Array3<f64>),
    /// 3D images as `[x, y, z, frame]`.
    Volumetric(Array4<f64>),
}

/// A single frame of an image stack.
#[derive(Debug, Clone, Copy)]
pub enum ImageFrame<'a> {
    /// A 2D slice as `[x, y]`.
    Planar(ArrayView2<'a, f64>),
    /// A 3D volume as `[x, y, z]`.
    Volumetric(ArrayView3<'a, f64>),
}

/// A stack of images over a sampling grid.
#[derive(Debug, Clone)]
pub struct ImageStack {
    /// Image values.
    pub volume: ImageVolume,
    /// Grid coordinates along x.
    pub x: Array1<f64>,
    /// Grid coordinates along y.
    pub y: Array1<f64>,
    /// Grid coordinates along z, for 3D images.
    pub z: Option<Array1<f64>>,
    /// Regularization parameter of each frame.
    pub alpha: Vec<f64>,
    /// Focusing time of each frame, for time-domain images.
    pub tau: Option<Vec<f64>>,
}

impl ImageStack {
    /// Number of frames.
    pub fn frame_count(&self) -> usize {
        match &self.volume {
            ImageVolume::Planar(v) => v.len_of(Axis(2)),
            ImageVolume::Volumetric(v) => v.len_of(Axis(3)),
        }
    }

    /// Image values of one frame.
    pub fn frame(&self, index: usize) -> ImageFrame<'_> {
        match &self.volume {
            ImageVolume::Planar(v) => ImageFrame::Planar(v.index_axis(Axis(2), index)),
            ImageVolume::Volumetric(v) => ImageFrame::Volumetric(v.index_axis(Axis(3), index)),
        }
    }

    /// Grid coordinates along z, or sample indices when the file has no `z`.
    pub fn z_axis(&self) -> Array1<f64> {
        match (&self.z, &self.volume) {
            (Some(z), _) => z.clone(),
            (None, ImageVolume::Volumetric(v)) => Array1::range(0.0, v.len_of(Axis(2)) as f64, 1.0),
            (None, ImageVolume::Planar(_)) => Array1::zeros(0),
        }
    }

    /// Regularization parameter of one frame.
    pub fn alpha(&self, index: usize) -> f64 {
        self.alpha.get(index).copied().unwrap_or(0.0)
    }

    /// Focusing time of one frame, if the images are time-domain.
    pub fn tau(&self, index: usize) -> Option<f64> {
        self.tau.as_ref().and_then(|t| t.get(index).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planar_frames_are_sliced_on_last_axis() {
        let stack = ImageStack {
            volume: ImageVolume::Planar(Array3::from_shape_fn((4, 3, 2), |(i, j, k)| {
                (i * 100 + j * 10 + k) as f64
            })),
            x: Array1::linspace(0.0, 1.0, 4),
            y: Array1::linspace(0.0, 1.0, 3),
            z: None,
            alpha: vec![0.0, 1e-2],
            tau: Some(vec![0.5, 0.75]),
        };
        assert_eq!(stack.frame_count(), 2);
        match stack.frame(1) {
            ImageFrame::Planar(slice) => assert_eq!(slice[[2, 1]], 211.0),
            ImageFrame::Volumetric(_) => panic!("expected a planar frame"),
        }
        assert_eq!(stack.alpha(1), 1e-2);
        assert_eq!(stack.alpha(9), 0.0);
        assert_eq!(stack.tau(1), Some(0.75));
    }

    #[test]
    fn missing_z_falls_back_to_indices() {
        let mut stack = ImageStack {
            volume: ImageVolume::Volumetric(Array4::zeros((2, 2, 3, 1))),
            x: Array1::linspace(0.0, 1.0, 2),
            y: Array1::linspace(0.0, 1.0, 2),
            z: None,
            alpha: vec![0.0],
            tau: None,
        };
        assert_eq!(stack.z_axis().to_vec(), vec![0.0, 1.0, 2.0]);

        stack.z = Some(Array1::from(vec![5.0, 6.0, 7.0]));
        assert_eq!(stack.z_axis().to_vec(), vec![5.0, 6.0, 7.0]);
    }
}
