//! Plot styling configuration.
//!
//! `PlotParams` is built once per session, from its defaults plus any
//! command-line overrides, and then handed read-only to every renderer.

use crate::style::Colormap;
use clap::{Args, ValueEnum};

/// Display mode for figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ViewMode {
    /// Light figure background.
    #[default]
    Light,
    /// Dark figure background.
    Dark,
}

impl ViewMode {
    /// Get display name.
    pub fn name(self) -> &'static str {
        match self {
            ViewMode::Light => "light",
            ViewMode::Dark => "dark",
        }
    }
}

/// Figure format used by collaborators that export figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Portable Document Format.
    #[default]
    Pdf,
    /// Portable Network Graphics.
    Png,
    /// Scalable Vector Graphics.
    Svg,
    /// Encapsulated PostScript.
    Eps,
}

impl OutputFormat {
    /// File extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
            OutputFormat::Eps => "eps",
        }
    }
}

/// Styling options shared by wiggle, map and image plots.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotParams {
    /// Figure export format.
    pub output_format: OutputFormat,
    /// Light or dark display.
    pub view_mode: ViewMode,
    /// Level at which 3D images are contoured.
    pub isolevel: f64,
    /// X-axis label for maps and images.
    pub xlabel: String,
    /// Y-axis label for maps and images.
    pub ylabel: String,
    /// Z-axis label for 3D maps and images.
    pub zlabel: String,
    /// X-coordinate units.
    pub xu: String,
    /// Y-coordinate units.
    pub yu: String,
    /// Z-coordinate units.
    pub zu: String,
    /// Time units.
    pub tu: String,
    /// Amplitude units.
    pub au: String,
    /// Frequency units.
    pub fu: String,
    /// Colormap for image slices.
    pub image_colormap: Colormap,
    /// Colormap for wiggle fills and rasterized traces.
    pub wiggle_colormap: Colormap,
    /// Draw a colorbar next to image slices.
    pub colorbar: bool,
    /// Lower color limit for image slices.
    pub vmin: f64,
    /// Upper color limit for image slices.
    pub vmax: f64,
    /// Fraction of the peak amplitude mapped to the ends of the wiggle colormap.
    pub pclip: f64,
    /// Flip the horizontal axis.
    pub invert_xaxis: bool,
    /// Flip the vertical axis.
    pub invert_yaxis: bool,
    /// Flip the depth axis of 3D plots.
    pub invert_zaxis: bool,
    /// Draw the scatterer boundary on maps.
    pub show_scatterer: bool,
    /// Draw sources on maps.
    pub show_sources: bool,
    /// Draw receivers on maps.
    pub show_receivers: bool,
    /// Title word for recorded data.
    pub data_title: String,
    /// Title word for impulse responses.
    pub impulse_title: String,
}

impl Default for PlotParams {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Pdf,
            view_mode: ViewMode::Light,
            isolevel: 0.7,
            xlabel: String::new(),
            ylabel: String::new(),
            zlabel: String::new(),
            xu: String::new(),
            yu: String::new(),
            zu: String::new(),
            tu: String::new(),
            au: String::new(),
            fu: String::new(),
            image_colormap: Colormap::Magma,
            wiggle_colormap: Colormap::Grays,
            colorbar: false,
            vmin: 0.0,
            vmax: 1.0,
            pclip: 1.0,
            invert_xaxis: false,
            invert_yaxis: false,
            invert_zaxis: false,
            show_scatterer: false,
            show_sources: true,
            show_receivers: true,
            data_title: "Data".to_string(),
            impulse_title: "Impulse Response".to_string(),
        }
    }
}

impl PlotParams {
    /// Units of the x, y and z coordinates, in that order.
    pub fn coordinate_units(&self) -> [&str; 3] {
        [self.xu.as_str(), self.yu.as_str(), self.zu.as_str()]
    }
}

/// Command-line overrides for [`PlotParams`].
#[derive(Args, Debug, Clone, Default)]
pub struct StyleArgs {
    /// Display mode
    #[arg(long, value_enum)]
    pub mode: Option<ViewMode>,

    /// Figure format for exports
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Colormap for wiggle plots
    #[arg(long, value_enum)]
    pub wiggle_colormap: Option<Colormap>,

    /// Colormap for images
    #[arg(long, value_enum)]
    pub image_colormap: Option<Colormap>,

    /// Draw a colorbar next to images
    #[arg(long)]
    pub colorbar: bool,

    /// Lower color limit for images
    #[arg(long, allow_negative_numbers = true)]
    pub vmin: Option<f64>,

    /// Upper color limit for images
    #[arg(long, allow_negative_numbers = true)]
    pub vmax: Option<f64>,

    /// Peak-clip fraction for rasterized wiggles
    #[arg(long)]
    pub pclip: Option<f64>,

    /// Isosurface level for 3D images
    #[arg(long)]
    pub isolevel: Option<f64>,

    /// X-axis label
    #[arg(long)]
    pub xlabel: Option<String>,

    /// Y-axis label
    #[arg(long)]
    pub ylabel: Option<String>,

    /// Z-axis label
    #[arg(long)]
    pub zlabel: Option<String>,

    /// X units
    #[arg(long)]
    pub xu: Option<String>,

    /// Y units
    #[arg(long)]
    pub yu: Option<String>,

    /// Z units
    #[arg(long)]
    pub zu: Option<String>,

    /// Time units
    #[arg(long)]
    pub tu: Option<String>,

    /// Amplitude units
    #[arg(long)]
    pub au: Option<String>,

    /// Frequency units
    #[arg(long)]
    pub fu: Option<String>,

    /// Flip the x axis
    #[arg(long)]
    pub invert_x: bool,

    /// Flip the y axis
    #[arg(long)]
    pub invert_y: bool,

    /// Flip the z axis
    #[arg(long)]
    pub invert_z: bool,

    /// Draw the scatterer boundary on maps
    #[arg(long)]
    pub show_scatterer: bool,

    /// Hide sources on maps
    #[arg(long)]
    pub hide_sources: bool,

    /// Hide receivers on maps
    #[arg(long)]
    pub hide_receivers: bool,

    /// Title for recorded data
    #[arg(long)]
    pub data_title: Option<String>,

    /// Title for impulse responses
    #[arg(long)]
    pub impulse_title: Option<String>,
}

impl From<StyleArgs> for PlotParams {
    fn from(args: StyleArgs) -> Self {
        let defaults = PlotParams::default();
        Self {
            output_format: args.format.unwrap_or(defaults.output_format),
            view_mode: args.mode.unwrap_or(defaults.view_mode),
            isolevel: args.isolevel.unwrap_or(defaults.isolevel),
            xlabel: args.xlabel.unwrap_or(defaults.xlabel),
            ylabel: args.ylabel.unwrap_or(defaults.ylabel),
            zlabel: args.zlabel.unwrap_or(defaults.zlabel),
            xu: args.xu.unwrap_or(defaults.xu),
            yu: args.yu.unwrap_or(defaults.yu),
            zu: args.zu.unwrap_or(defaults.zu),
            tu: args.tu.unwrap_or(defaults.tu),
            au: args.au.unwrap_or(defaults.au),
            fu: args.fu.unwrap_or(defaults.fu),
            image_colormap: args.image_colormap.unwrap_or(defaults.image_colormap),
            wiggle_colormap: args.wiggle_colormap.unwrap_or(defaults.wiggle_colormap),
            colorbar: args.colorbar || defaults.colorbar,
            vmin: args.vmin.unwrap_or(defaults.vmin),
            vmax: args.vmax.unwrap_or(defaults.vmax),
            pclip: args.pclip.unwrap_or(defaults.pclip),
            invert_xaxis: args.invert_x || defaults.invert_xaxis,
            invert_yaxis: args.invert_y || defaults.invert_yaxis,
            invert_zaxis: args.invert_z || defaults.invert_zaxis,
            show_scatterer: args.show_scatterer || defaults.show_scatterer,
            show_sources: !args.hide_sources && defaults.show_sources,
            show_receivers: !args.hide_receivers && defaults.show_receivers,
            data_title: args.data_title.unwrap_or(defaults.data_title),
            impulse_title: args.impulse_title.unwrap_or(defaults.impulse_title),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_policy() {
        let params = PlotParams::default();
        assert_eq!(params.output_format, OutputFormat::Pdf);
        assert_eq!(params.view_mode, ViewMode::Light);
        assert_eq!(params.isolevel, 0.7);
        assert_eq!(params.image_colormap, Colormap::Magma);
        assert_eq!(params.wiggle_colormap, Colormap::Grays);
        assert!(!params.colorbar);
        assert_eq!((params.vmin, params.vmax), (0.0, 1.0));
        assert_eq!(params.pclip, 1.0);
        assert!(!params.show_scatterer);
        assert!(params.show_sources && params.show_receivers);
        assert!(params.xu.is_empty() && params.au.is_empty());
    }

    #[test]
    fn empty_overrides_keep_defaults() {
        assert_eq!(PlotParams::from(StyleArgs::default()), PlotParams::default());
    }

    #[test]
    fn overrides_replace_defaults() {
        let args = StyleArgs {
            mode: Some(ViewMode::Dark),
            xu: Some("m".to_string()),
            hide_sources: true,
            invert_z: true,
            pclip: Some(0.5),
            ..StyleArgs::default()
        };
        let params = PlotParams::from(args);
        assert_eq!(params.view_mode, ViewMode::Dark);
        assert_eq!(params.coordinate_units(), ["m", "", ""]);
        assert!(!params.show_sources);
        assert!(params.invert_zaxis);
        assert_eq!(params.pclip, 0.5);
    }
}
