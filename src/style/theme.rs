//! Figure styling for light and dark display modes.

use crate::config::ViewMode;
use ratatui::style::Color;

/// Colors and fill settings used when drawing a panel.
///
/// Every renderer receives one of these next to its drawing area instead of
/// looking colors up on the surface itself.
#[derive(Debug, Clone)]
pub struct StyleContext {
    /// Display mode the context was built for.
    pub mode: ViewMode,
    /// Figure background (outside the axes).
    pub figure_bg: Color,
    /// Axes face color.
    pub face: Color,
    /// General text color.
    pub text: Color,
    /// Axes frame color.
    pub spine: Color,
    /// Tick label color.
    pub tick: Color,
    /// Colorbar frame color.
    pub cbar_edge: Color,
    /// Opacity of wiggle fills.
    pub alpha: f64,
    /// Shade color for surfaces.
    pub shade: Color,
    /// Opacity of surface shading.
    pub shade_alpha: f64,
    /// Trace color.
    pub line: Color,
    /// Stem marker color.
    pub point: Color,
    /// Axis label color.
    pub label: Color,
    /// Title color.
    pub title: Color,
    /// Receiver marker color.
    pub receiver: Color,
    /// Source marker color.
    pub source: Color,
    /// Marker color of the source at the cursor.
    pub active_source: Color,
    /// Marker color of every other source.
    pub inactive_source: Color,
    /// Scatterer boundary color.
    pub scatterer: Color,
    /// Isosurface color.
    pub surface: Color,
    /// Keymap and status bar background.
    pub bar_bg: Color,
}

impl StyleContext {
    /// Create the style context for a display mode.
    pub fn from_mode(mode: ViewMode) -> Self {
        match mode {
            ViewMode::Light => Self {
                mode,
                figure_bg: Color::Rgb(255, 255, 255),
                face: Color::Rgb(229, 229, 229),
                text: Color::Rgb(0, 0, 0),
                spine: Color::Rgb(0, 0, 0),
                tick: Color::Rgb(85, 85, 85),
                cbar_edge: Color::Rgb(169, 169, 169),
                alpha: 0.6,
                shade: Color::Rgb(0, 0, 0),
                shade_alpha: 0.2,
                line: Color::Rgb(112, 128, 144),
                point: Color::Rgb(0, 0, 0),
                label: Color::Rgb(76, 76, 76),
                title: Color::Rgb(0, 0, 0),
                receiver: Color::Rgb(0, 0, 0),
                source: Color::Rgb(0, 0, 0),
                active_source: Color::Rgb(0, 139, 139),
                inactive_source: Color::Rgb(169, 169, 169),
                scatterer: Color::Rgb(169, 169, 169),
                surface: Color::Rgb(0, 191, 191),
                bar_bg: Color::Rgb(235, 235, 235),
            },
            ViewMode::Dark => Self {
                mode,
                figure_bg: Color::Rgb(0, 0, 0),
                face: Color::Rgb(82, 82, 82),
                text: Color::Rgb(245, 245, 245),
                spine: Color::Rgb(169, 169, 169),
                tick: Color::Rgb(85, 85, 85),
                cbar_edge: Color::Rgb(169, 169, 169),
                alpha: 0.6,
                shade: Color::Rgb(0, 0, 0),
                shade_alpha: 0.5,
                line: Color::Rgb(192, 192, 192),
                point: Color::Rgb(192, 192, 192),
                label: Color::Rgb(85, 85, 85),
                title: Color::Rgb(85, 85, 85),
                receiver: Color::Rgb(169, 169, 169),
                source: Color::Rgb(169, 169, 169),
                active_source: Color::Rgb(0, 191, 191),
                inactive_source: Color::Rgb(105, 105, 105),
                scatterer: Color::Rgb(211, 211, 211),
                surface: Color::Rgb(0, 191, 191),
                bar_bg: Color::Rgb(53, 53, 53),
            },
        }
    }

    /// Blend a fill color onto the axes face at the context's fill opacity.
    pub fn fill(&self, color: Color) -> Color {
        blend(color, self.face, self.alpha)
    }
}

/// Alpha-blend `fg` over `bg`. Non-RGB colors are returned unchanged.
pub fn blend(fg: Color, bg: Color, alpha: f64) -> Color {
    match (fg, bg) {
        (Color::Rgb(fr, fg_, fb), Color::Rgb(br, bg_, bb)) => {
            let a = alpha.clamp(0.0, 1.0);
            let mix = |f: u8, b: u8| (f as f64 * a + b as f64 * (1.0 - a)).round() as u8;
            Color::Rgb(mix(fr, br), mix(fg_, bg_), mix(fb, bb))
        },
        _ => fg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_and_inactive_sources_differ() {
        for mode in [ViewMode::Light, ViewMode::Dark] {
            let style = StyleContext::from_mode(mode);
            assert_ne!(style.active_source, style.inactive_source);
            assert_eq!(style.mode, mode);
        }
    }

    #[test]
    fn blend_respects_alpha_extremes() {
        let fg = Color::Rgb(200, 100, 0);
        let bg = Color::Rgb(0, 0, 100);
        assert_eq!(blend(fg, bg, 1.0), fg);
        assert_eq!(blend(fg, bg, 0.0), bg);
        assert_eq!(blend(fg, bg, 0.5), Color::Rgb(100, 50, 50));
        assert_eq!(blend(Color::Reset, bg, 0.5), Color::Reset);
    }
}
