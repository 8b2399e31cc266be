//! Titles and axis captions.
//!
//! All functions here are pure string formatting.

use crate::config::PlotParams;
use crate::data::{ComplexPart, Experiment, VectorSide, WiggleType};
use ndarray::ArrayView1;

/// What the traces of a panel are indexed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    /// One trace per receiver.
    Receiver,
    /// One trace per source.
    Source,
}

impl Entity {
    /// Get display name.
    pub fn name(self) -> &'static str {
        match self {
            Entity::Receiver => "Receiver",
            Entity::Source => "Source",
        }
    }
}

impl From<VectorSide> for Entity {
    fn from(side: VectorSide) -> Self {
        match side {
            VectorSide::Left => Entity::Receiver,
            VectorSide::Right => Entity::Source,
        }
    }
}

/// Append ` (unit)` to a caption unless the unit is empty.
pub fn with_unit(caption: &str, unit: &str) -> String {
    if unit.is_empty() {
        caption.to_string()
    } else {
        format!("{} ({})", caption, unit)
    }
}

/// Format a number with a one-digit mantissa fraction and a signed
/// two-digit exponent, e.g. `1.0e-02`.
pub fn format_sci(value: f64) -> String {
    let raw = format!("{:.1e}", value);
    match raw.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        },
        None => raw,
    }
}

/// Format a coordinate tuple with two decimals, e.g. `(1.23 m, 4.56 m)`.
///
/// Each coordinate carries its unit only when that unit is non-empty.
pub fn format_point(coords: ArrayView1<'_, f64>, units: [&str; 3]) -> String {
    let parts: Vec<String> = coords
        .iter()
        .zip(units)
        .map(|(value, unit)| {
            if unit.is_empty() {
                format!("{:.2}", value)
            } else {
                format!("{:.2} {}", value, unit)
            }
        })
        .collect();
    format!("({})", parts.join(", "))
}

/// Vertical-axis caption of a wiggle panel.
///
/// With several traces the caption names the entity; with a single trace it
/// describes the amplitude and, when known, where the trace was recorded.
pub fn amplitude_label(
    trace_count: usize,
    entity: Entity,
    number: usize,
    coords: Option<ArrayView1<'_, f64>>,
    params: &PlotParams,
) -> String {
    if trace_count != 1 {
        return entity.name().to_string();
    }
    let amplitude = with_unit("Amplitude", &params.au);
    match coords {
        Some(coords) => format!(
            "{} [{} {} @ {}]",
            amplitude,
            entity.name(),
            number,
            format_point(coords, params.coordinate_units())
        ),
        None => format!("{} [{} {}]", amplitude, entity.name(), number),
    }
}

/// Title of a wave panel showing the frame at `index`.
pub fn wave_title(experiment: &Experiment, index: usize, params: &PlotParams) -> String {
    let number = experiment.source_numbers.get(index).copied().unwrap_or(index + 1);
    let location = experiment
        .sources
        .as_ref()
        .filter(|points| index < points.len())
        .map(|points| format_point(points.point(index), params.coordinate_units()));

    match (experiment.wiggle_type, location) {
        (WiggleType::Data, Some(location)) => {
            format!("{} [Source {} @ {}]", params.data_title, number, location)
        },
        (WiggleType::Data, None) => format!(
            "{} [Record {}/{}]",
            params.data_title,
            number,
            experiment.source_numbers.len()
        ),
        (WiggleType::Impulse, Some(location)) => {
            format!("{} [z @ {}]", params.impulse_title, location)
        },
        (WiggleType::Impulse, None) => format!("{} [z {}]", params.impulse_title, number),
    }
}

/// Heading over the real and imaginary panels of a complex vector.
pub fn vector_suptitle(side: VectorSide) -> &'static str {
    match side {
        VectorSide::Left => "Left-Singular Vector",
        VectorSide::Right => "Right-Singular Vector",
    }
}

/// Title of a singular-vector panel; `number` is 1-based.
pub fn vector_title(side: VectorSide, number: usize, part: Option<ComplexPart>) -> String {
    let (symbol, position, word) = match side {
        VectorSide::Left => ('φ', "xr", "Left"),
        VectorSide::Right => ('ψ', "xs", "Right"),
    };
    match part {
        None => format!("{}-Singular Vector {}{}({}, t)", word, symbol, number, position),
        Some(part) => {
            let prefix = match part {
                ComplexPart::Real => "Re",
                ComplexPart::Imag => "Im",
            };
            format!("{}{{{}\u{302}{}({}, ν)}}", prefix, symbol, number, position)
        },
    }
}

fn alpha_text(alpha: f64) -> String {
    if alpha == 0.0 {
        "α = 0".to_string()
    } else {
        format!("α = {}", format_sci(alpha))
    }
}

/// Plain number as written in titles: integral values keep one decimal.
fn format_level(level: f64) -> String {
    if level.fract() == 0.0 && level.is_finite() {
        format!("{:.1}", level)
    } else {
        format!("{}", level)
    }
}

/// Title of an image panel.
///
/// `isolevel` is set for 3D images, whose title names the contour level and
/// appends the focusing time when one is known.
pub fn image_title(alpha: f64, tau: Option<f64>, isolevel: Option<f64>, params: &PlotParams) -> String {
    match isolevel {
        None => alpha_text(alpha),
        Some(level) => {
            let mut inner = alpha_text(alpha);
            if let Some(tau) = tau {
                inner.push_str(&format!(", τ = {:.2}", tau));
                if !params.tu.is_empty() {
                    inner.push(' ');
                    inner.push_str(&params.tu);
                }
            }
            format!("Isosurface @ {} [{}]", format_level(level), inner)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample_experiment;
    use ndarray::array;

    fn params_with_units() -> PlotParams {
        PlotParams {
            xu: "m".to_string(),
            yu: "m".to_string(),
            ..PlotParams::default()
        }
    }

    #[test]
    fn single_trace_label_with_units() {
        let coords = array![1.23, 4.56];
        let label = amplitude_label(1, Entity::Receiver, 3, Some(coords.view()), &params_with_units());
        assert_eq!(label, "Amplitude [Receiver 3 @ (1.23 m, 4.56 m)]");
    }

    #[test]
    fn single_trace_label_omits_empty_units() {
        let coords = array![1.23, 4.56];
        let params = PlotParams {
            au: "Pa".to_string(),
            ..PlotParams::default()
        };
        let label = amplitude_label(1, Entity::Receiver, 3, Some(coords.view()), &params);
        assert_eq!(label, "Amplitude (Pa) [Receiver 3 @ (1.23, 4.56)]");

        let label = amplitude_label(1, Entity::Source, 7, None, &PlotParams::default());
        assert_eq!(label, "Amplitude [Source 7]");
    }

    #[test]
    fn many_traces_label_names_entity() {
        let params = PlotParams::default();
        assert_eq!(amplitude_label(5, Entity::Receiver, 1, None, &params), "Receiver");
        assert_eq!(amplitude_label(80, Entity::Source, 1, None, &params), "Source");
    }

    #[test]
    fn scientific_format_pads_exponent() {
        assert_eq!(format_sci(0.01), "1.0e-02");
        assert_eq!(format_sci(12345.0), "1.2e+04");
        assert_eq!(format_sci(3.0), "3.0e+00");
        assert_eq!(format_sci(1.5e-120), "1.5e-120");
    }

    #[test]
    fn wave_titles() {
        let params = params_with_units();
        let mut exp = sample_experiment(3, 4);
        assert_eq!(wave_title(&exp, 1, &params), "Data [Source 2 @ (2.00 m, 5.00 m)]");

        exp.wiggle_type = WiggleType::Impulse;
        assert_eq!(
            wave_title(&exp, 0, &PlotParams::default()),
            "Impulse Response [z @ (0.00, 5.00)]"
        );

        exp.wiggle_type = WiggleType::Data;
        exp.sources = None;
        assert_eq!(wave_title(&exp, 3, &params), "Data [Record 4/4]");
    }

    #[test]
    fn vector_titles() {
        assert_eq!(vector_title(VectorSide::Left, 3, None), "Left-Singular Vector φ3(xr, t)");
        assert_eq!(vector_title(VectorSide::Right, 1, None), "Right-Singular Vector ψ1(xs, t)");
        assert_eq!(
            vector_title(VectorSide::Left, 2, Some(ComplexPart::Real)),
            "Re{φ\u{302}2(xr, ν)}"
        );
        assert_eq!(
            vector_title(VectorSide::Right, 4, Some(ComplexPart::Imag)),
            "Im{ψ\u{302}4(xs, ν)}"
        );
        assert_eq!(vector_suptitle(VectorSide::Left), "Left-Singular Vector");
        assert_eq!(vector_suptitle(VectorSide::Right), "Right-Singular Vector");
    }

    #[test]
    fn image_titles() {
        let params = PlotParams {
            tu: "s".to_string(),
            ..PlotParams::default()
        };
        assert_eq!(image_title(0.01, None, None, &params), "α = 1.0e-02");
        assert_eq!(image_title(0.0, Some(0.5), None, &params), "α = 0");
        assert_eq!(
            image_title(0.01, Some(0.5), Some(0.7), &params),
            "Isosurface @ 0.7 [α = 1.0e-02, τ = 0.50 s]"
        );
        assert_eq!(
            image_title(0.0, None, Some(1.0), &PlotParams::default()),
            "Isosurface @ 1.0 [α = 0]"
        );
    }

    #[test]
    fn captions_with_units() {
        assert_eq!(with_unit("Time", ""), "Time");
        assert_eq!(with_unit("Time", "s"), "Time (s)");
    }
}
