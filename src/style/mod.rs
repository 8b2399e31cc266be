//! Colors, palettes and per-mode figure styling.

mod colormaps;
mod theme;

pub use colormaps::Colormap;
pub use theme::{blend, StyleContext};
