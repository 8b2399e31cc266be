//! Color mapping functions for traces and images.

use crate::config::ViewMode;
use clap::ValueEnum;
use ratatui::style::Color;

/// Named color palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Colormap {
    /// Built-in diverging cyan/magenta scheme, centered on the background tone.
    Native,
    /// Black to white.
    Grays,
    /// Blue-white-red diverging scheme.
    Seismic,
    /// Magma (perceptually uniform).
    Magma,
    /// Viridis (perceptually uniform, colorblind-friendly).
    Viridis,
    /// Plasma (perceptually uniform).
    Plasma,
}

type Stop = (f64, [u8; 3]);

const CYAN: [u8; 3] = [0, 255, 255];
const MAGENTA: [u8; 3] = [255, 0, 255];
const WHITESMOKE: [u8; 3] = [245, 245, 245];
const BLACK: [u8; 3] = [0, 0, 0];

const NATIVE_LIGHT: [Stop; 3] = [(0.0, CYAN), (0.5, WHITESMOKE), (1.0, MAGENTA)];
const NATIVE_DARK: [Stop; 3] = [(0.0, CYAN), (0.5, BLACK), (1.0, MAGENTA)];
const GRAYS: [Stop; 2] = [(0.0, BLACK), (1.0, [255, 255, 255])];
const SEISMIC: [Stop; 5] = [
    (0.0, [0, 0, 77]),
    (0.25, [0, 0, 255]),
    (0.5, [255, 255, 255]),
    (0.75, [255, 0, 0]),
    (1.0, [128, 0, 0]),
];
const MAGMA: [Stop; 5] = [
    (0.0, [0, 0, 4]),
    (0.25, [81, 18, 124]),
    (0.5, [183, 55, 121]),
    (0.75, [252, 137, 97]),
    (1.0, [252, 253, 191]),
];
const VIRIDIS: [Stop; 5] = [
    (0.0, [68, 1, 84]),
    (0.25, [59, 82, 139]),
    (0.5, [33, 145, 140]),
    (0.75, [94, 201, 98]),
    (1.0, [253, 231, 37]),
];
const PLASMA: [Stop; 5] = [
    (0.0, [13, 8, 135]),
    (0.25, [126, 3, 168]),
    (0.5, [204, 71, 120]),
    (0.75, [248, 149, 64]),
    (1.0, [240, 249, 33]),
];

impl Colormap {
    /// Get palette name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Grays => "grays",
            Self::Seismic => "seismic",
            Self::Magma => "magma",
            Self::Viridis => "viridis",
            Self::Plasma => "plasma",
        }
    }

    /// Map a normalized value (0.0 to 1.0) to an RGB color.
    ///
    /// Only the native palette depends on the display mode: its midpoint is
    /// whitesmoke in light mode and black in dark mode.
    pub fn color(self, t: f64, mode: ViewMode) -> Color {
        let t = if t.is_nan() { 0.5 } else { t.clamp(0.0, 1.0) };

        let stops: &[Stop] = match (self, mode) {
            (Self::Native, ViewMode::Light) => &NATIVE_LIGHT,
            (Self::Native, ViewMode::Dark) => &NATIVE_DARK,
            (Self::Grays, _) => &GRAYS,
            (Self::Seismic, _) => &SEISMIC,
            (Self::Magma, _) => &MAGMA,
            (Self::Viridis, _) => &VIRIDIS,
            (Self::Plasma, _) => &PLASMA,
        };

        interpolate(stops, t)
    }

    /// Fill colors for the positive and negative lobes of a wiggle trace.
    ///
    /// `None` means the lobe is left unfilled.
    pub fn fills(self, mode: ViewMode) -> (Option<Color>, Option<Color>) {
        match (self, mode) {
            (Self::Native, _) => (Some(Color::Rgb(191, 0, 191)), Some(Color::Rgb(0, 191, 191))),
            (Self::Grays, ViewMode::Light) => (Some(Color::Rgb(0, 0, 0)), None),
            (Self::Grays, ViewMode::Dark) => (Some(Color::Rgb(245, 245, 245)), None),
            (Self::Seismic, _) => (Some(Color::Rgb(0, 0, 255)), Some(Color::Rgb(255, 0, 0))),
            // Sequential maps fill from their upper and lower ends
            (other, _) => (Some(other.color(0.85, mode)), Some(other.color(0.15, mode))),
        }
    }
}

/// Piecewise linear interpolation between color stops.
fn interpolate(stops: &[Stop], t: f64) -> Color {
    let upper = stops
        .iter()
        .position(|&(pos, _)| pos >= t)
        .unwrap_or(stops.len() - 1);
    if upper == 0 {
        let [r, g, b] = stops[0].1;
        return Color::Rgb(r, g, b);
    }

    let (p0, c0) = stops[upper - 1];
    let (p1, c1) = stops[upper];
    let span = p1 - p0;
    let f = if span > 0.0 { (t - p0) / span } else { 0.0 };

    let channel = |i: usize| -> u8 {
        let v = c0[i] as f64 + f * (c1[i] as f64 - c0[i] as f64);
        v.round().clamp(0.0, 255.0) as u8
    };

    Color::Rgb(channel(0), channel(1), channel(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        assert_eq!(Colormap::Magma.color(0.0, ViewMode::Light), Color::Rgb(0, 0, 4));
        assert_eq!(
            Colormap::Magma.color(1.0, ViewMode::Light),
            Color::Rgb(252, 253, 191)
        );
        assert_eq!(Colormap::Grays.color(0.0, ViewMode::Dark), Color::Rgb(0, 0, 0));
        assert_eq!(
            Colormap::Grays.color(1.0, ViewMode::Dark),
            Color::Rgb(255, 255, 255)
        );
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        assert_eq!(
            Colormap::Viridis.color(-3.0, ViewMode::Light),
            Colormap::Viridis.color(0.0, ViewMode::Light)
        );
        assert_eq!(
            Colormap::Viridis.color(7.5, ViewMode::Light),
            Colormap::Viridis.color(1.0, ViewMode::Light)
        );
    }

    #[test]
    fn native_midpoint_follows_mode() {
        assert_eq!(
            Colormap::Native.color(0.5, ViewMode::Light),
            Color::Rgb(245, 245, 245)
        );
        assert_eq!(Colormap::Native.color(0.5, ViewMode::Dark), Color::Rgb(0, 0, 0));
        assert_eq!(Colormap::Native.color(0.0, ViewMode::Dark), Color::Rgb(0, 255, 255));
    }

    #[test]
    fn grays_fill_only_positive_lobe() {
        assert_eq!(
            Colormap::Grays.fills(ViewMode::Light),
            (Some(Color::Rgb(0, 0, 0)), None)
        );
        assert_eq!(
            Colormap::Grays.fills(ViewMode::Dark),
            (Some(Color::Rgb(245, 245, 245)), None)
        );
    }

    #[test]
    fn every_palette_fills_positive_lobe() {
        for cmap in Colormap::value_variants() {
            for mode in [ViewMode::Light, ViewMode::Dark] {
                assert!(cmap.fills(mode).0.is_some(), "{} has no fill", cmap.name());
            }
        }
    }
}
