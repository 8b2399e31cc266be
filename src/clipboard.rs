//! Clipboard integration.
//!
//! The frame at the cursor is exported as tab-separated text so it can be
//! pasted into a spreadsheet.

use crate::data::{ComplexPart, ImageFrame};
use crate::error::Result;
use crate::session::Session;
use crate::viewer::ViewState;
use arboard::Clipboard;
use ndarray::{ArrayView1, ArrayView2, Axis};

/// Copy text to clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}

/// One row per sample: the axis value, then every trace.
fn traces_tsv(out: &mut String, axis: ArrayView1<'_, f64>, traces: &[ArrayView2<'_, f64>]) {
    for (s, value) in axis.iter().enumerate() {
        let row: Vec<String> = std::iter::once(value.to_string())
            .chain(traces.iter().flat_map(|frame| {
                frame
                    .axis_iter(Axis(0))
                    .map(move |trace| trace.get(s).copied().unwrap_or(f64::NAN).to_string())
            }))
            .collect();
        out.push_str(&row.join("\t"));
        out.push('\n');
    }
}

/// One row per `y` grid line: the y coordinate, then values along x.
fn slice_tsv(out: &mut String, slice: ArrayView2<'_, f64>, y: ArrayView1<'_, f64>) {
    for (j, column) in slice.axis_iter(Axis(1)).enumerate() {
        let lead = y.get(j).copied().unwrap_or(j as f64);
        let row: Vec<String> = std::iter::once(lead.to_string())
            .chain(column.iter().map(f64::to_string))
            .collect();
        out.push_str(&row.join("\t"));
        out.push('\n');
    }
}

/// Tab-separated text of the frame at the cursor; empty for an empty stack.
pub fn frame_tsv(session: &Session, view: &ViewState) -> String {
    let mut out = String::new();
    if view.pager().is_empty() {
        return out;
    }
    let index = view.cursor();
    match session {
        Session::Waves(waves) => {
            let experiment = waves.experiment(view.active());
            traces_tsv(&mut out, experiment.time.view(), &[experiment.frame(index)]);
        },
        Session::Vectors(vectors) => {
            let frames: Vec<ArrayView2<'_, f64>> = vectors
                .panels()
                .iter()
                .map(|panel| {
                    vectors
                        .vectors
                        .frame(panel.side, panel.part.unwrap_or(ComplexPart::Real), index)
                })
                .collect();
            traces_tsv(&mut out, vectors.vectors.samples.view(), &frames);
        },
        Session::Images(stack) => match stack.frame(index) {
            ImageFrame::Planar(slice) => slice_tsv(&mut out, slice, stack.y.view()),
            ImageFrame::Volumetric(volume) => {
                for (k, layer) in volume.axis_iter(Axis(2)).enumerate() {
                    if k > 0 {
                        out.push('\n');
                    }
                    slice_tsv(&mut out, layer, stack.y.view());
                }
            },
        },
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{sample_experiment, ImageStack, ImageVolume, WaveRecords};
    use crate::session::WaveSession;
    use ndarray::{Array1, Array4};

    #[test]
    fn wave_frame_has_time_column_then_traces() {
        let records = WaveRecords {
            experiment: sample_experiment(3, 2),
            reciprocal: None,
            scatterer: None,
        };
        let session = Session::Waves(WaveSession::new(records, false));
        let view = session.initial_view();
        let text = frame_tsv(&session, &view);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 16);
        assert_eq!(lines[0].split('\t').count(), 4);
        assert!(lines[0].starts_with("0\t"));
        assert!(lines.iter().all(|line| !line.ends_with('\t')));
    }

    #[test]
    fn volume_layers_are_separated_by_blank_lines() {
        let stack = ImageStack {
            volume: ImageVolume::Volumetric(Array4::zeros((2, 3, 2, 1))),
            x: Array1::linspace(0.0, 1.0, 2),
            y: Array1::linspace(0.0, 2.0, 3),
            z: Some(Array1::linspace(0.0, 1.0, 2)),
            alpha: vec![0.0],
            tau: None,
        };
        let session = Session::Images(stack);
        let text = frame_tsv(&session, &session.initial_view());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3 + 1 + 3);
        assert_eq!(lines[3], "");
        assert_eq!(lines[1], "1\t0\t0");
    }
}
