//! vezda-view - a terminal viewer for wave-imaging experiments.
//!
//! The viewer pages through pre-computed frame stacks: recorded data and
//! impulse responses as wiggle plots with an optional source map, singular
//! vectors as wiggle or stem plots, and reconstructed images as colormapped
//! slices or shaded isosurfaces.
//!
//! # Features
//!
//! - NetCDF loading of experiments, singular vectors and images
//! - Wrap-around paging with arrow keys or vim keys
//! - Switching between a dataset and its reciprocal
//! - Light and dark display modes
//! - Clipboard export of the current frame
//!
//! # Example
//!
//! ```ignore
//! use vezda_view::data::{DataReader, WiggleType};
//! use vezda_view::session::{Session, WaveSession};
//! use std::path::Path;
//!
//! let records = DataReader::read_waves(Path::new("data.nc"), WiggleType::Data, true)?;
//! let session = Session::Waves(WaveSession::new(records, true));
//! let view = session.initial_view();
//! println!("Showing source {} of {}", view.cursor() + 1, view.pager().len());
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod app;
pub mod clipboard;
pub mod config;
pub mod data;
pub mod error;
pub mod isosurface;
pub mod render;
pub mod session;
pub mod style;
pub mod viewer;

pub use error::{Result, VezdaError};
