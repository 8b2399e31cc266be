//! Frame stacks and geometry.
//!
//! This module holds the pre-computed arrays a viewer pages through and the
//! NetCDF adapter that loads them.

mod experiment;
mod geometry;
mod image;
mod reader;
mod vectors;

pub use experiment::{Experiment, WiggleType};
pub use geometry::Points;
pub use image::{ImageFrame, ImageStack, ImageVolume};
pub use reader::{DataReader, WaveRecords};
pub use vectors::{ComplexPart, SingularVectors, VectorDomain, VectorSide};

#[cfg(test)]
pub(crate) use experiment::tests::sample_experiment;
