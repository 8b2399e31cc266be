//! NetCDF file reader.
//!
//! Loads the pre-computed frame stacks produced by the imaging pipeline. Any
//! numeric variable type is widened to `f64`; layouts are checked here so the
//! renderers can trust their inputs.

use super::{Experiment, ImageStack, ImageVolume, Points, SingularVectors, VectorDomain, WiggleType};
use crate::error::{Result, VezdaError};
use ndarray::{Array1, Array2, Array3, Array4, ArrayD, Dimension, IxDyn};
use netcdf::types::{FloatType, IntType, NcVariableType};
use std::path::Path;
use tracing::{debug, info, warn};

/// Wave recordings loaded from one file.
#[derive(Debug, Clone)]
pub struct WaveRecords {
    /// The experiment the file describes.
    pub experiment: Experiment,
    /// The same experiment with receivers and sources swapped, if recorded.
    pub reciprocal: Option<Experiment>,
    /// Scatterer boundary points, if known.
    pub scatterer: Option<Points>,
}

/// NetCDF data reader.
#[derive(Debug)]
pub struct DataReader;

impl DataReader {
    /// Read recorded data (`WiggleType::Data`) or impulse responses
    /// (`WiggleType::Impulse`).
    ///
    /// A reciprocal dataset is only loaded for recorded data when
    /// `with_reciprocal` is set and the file carries `reciprocal_data`.
    pub fn read_waves(
        path: &Path,
        wiggle_type: WiggleType,
        with_reciprocal: bool,
    ) -> Result<WaveRecords> {
        let file = Self::open(path)?;
        let (data_name, sources_name) = match wiggle_type {
            WiggleType::Data => ("data", "sources"),
            WiggleType::Impulse => ("impulse", "points"),
        };

        let data = into_dim::<ndarray::Ix3>(data_name, "[receiver, time, source]", read_array(&file, data_name)?)?;
        let (receiver_count, sample_count, source_count) = data.dim();

        let time = read_axis(&file, "time", sample_count)?;
        let receivers = read_points(&file, "receivers", Some(receiver_count))?
            .ok_or_else(|| VezdaError::missing_variable("receivers"))?;
        let receiver_numbers = read_numbers(&file, "receiver_numbers", receiver_count)?;
        let sources = read_points(&file, sources_name, Some(source_count))?;
        if wiggle_type == WiggleType::Impulse && sources.is_none() {
            return Err(VezdaError::missing_variable(sources_name));
        }
        let source_numbers = match wiggle_type {
            WiggleType::Data => read_numbers(&file, "source_numbers", source_count)?,
            WiggleType::Impulse => (1..=source_count).collect(),
        };
        let scatterer = read_points(&file, "scatterer", None)?;

        let experiment = Experiment {
            data,
            time,
            receiver_numbers,
            receivers,
            source_numbers,
            sources,
            wiggle_type,
        };

        let reciprocal = if with_reciprocal && wiggle_type == WiggleType::Data {
            Self::read_reciprocal(&file, &experiment)?
        } else {
            None
        };

        info!(
            "Loaded {:?} from {}: {} receivers, {} samples, {} frames, reciprocal: {}",
            wiggle_type,
            path.display(),
            receiver_count,
            sample_count,
            source_count,
            reciprocal.is_some()
        );

        Ok(WaveRecords {
            experiment,
            reciprocal,
            scatterer,
        })
    }

    fn read_reciprocal(file: &netcdf::File, experiment: &Experiment) -> Result<Option<Experiment>> {
        let Some(raw) = read_optional(file, "reciprocal_data")? else {
            return Ok(None);
        };
        let data = into_dim::<ndarray::Ix3>("reciprocal_data", "[source, time, receiver]", raw)?;
        let expected = [
            experiment.source_count(),
            experiment.time.len(),
            experiment.receiver_count(),
        ];
        if data.shape() != expected {
            return Err(VezdaError::shape(
                "reciprocal_data",
                format!("{:?}", expected),
                data.shape(),
            ));
        }
        let reciprocal = experiment.reciprocal(data);
        if reciprocal.is_none() {
            warn!("Ignoring reciprocal_data: the file has no source coordinates");
        }
        Ok(reciprocal)
    }

    /// Read left and right singular vectors.
    ///
    /// A `frequency` axis marks complex vectors, whose imaginary parts are
    /// then required; otherwise a `time` axis is expected.
    pub fn read_vectors(path: &Path) -> Result<SingularVectors> {
        let file = Self::open(path)?;

        let left = into_dim::<ndarray::Ix3>("left_vectors", "[receiver, sample, k]", read_array(&file, "left_vectors")?)?;
        let right = into_dim::<ndarray::Ix3>("right_vectors", "[source, sample, k]", read_array(&file, "right_vectors")?)?;
        let (receiver_count, sample_count, count) = left.dim();
        let (source_count, right_samples, right_count) = right.dim();
        if right_samples != sample_count || right_count != count {
            return Err(VezdaError::shape(
                "right_vectors",
                format!("[source, {}, {}]", sample_count, count),
                right.shape(),
            ));
        }

        let (samples, domain) = if file.variable("frequency").is_some() {
            let samples = read_axis(&file, "frequency", sample_count)?;
            let left_imag = read_matching(&file, "left_vectors_imag", left.shape())?;
            let right_imag = read_matching(&file, "right_vectors_imag", right.shape())?;
            (samples, VectorDomain::Frequency { left_imag, right_imag })
        } else {
            (read_axis(&file, "time", sample_count)?, VectorDomain::Time)
        };

        let vectors = SingularVectors {
            left,
            right,
            samples,
            receiver_numbers: read_numbers(&file, "receiver_numbers", receiver_count)?,
            receivers: read_points(&file, "receivers", Some(receiver_count))?,
            source_numbers: read_numbers(&file, "source_numbers", source_count)?,
            sources: read_points(&file, "sources", Some(source_count))?,
            domain,
        };

        info!(
            "Loaded {} singular vectors from {} (complex: {})",
            count,
            path.display(),
            vectors.is_complex()
        );
        Ok(vectors)
    }

    /// Read a stack of 2D or 3D images.
    pub fn read_images(path: &Path) -> Result<ImageStack> {
        let file = Self::open(path)?;

        let raw = read_array(&file, "image")?;
        let shape = raw.shape().to_vec();
        let x = read_axis(&file, "x", shape.first().copied().unwrap_or(0))?;
        let y = read_axis(&file, "y", shape.get(1).copied().unwrap_or(0))?;

        let (volume, z) = match raw.ndim() {
            3 => (ImageVolume::Planar(into_dim::<ndarray::Ix3>("image", "[x, y, frame]", raw)?), None),
            4 => {
                let z = read_optional_axis(&file, "z", shape[2])?;
                let volume: Array4<f64> = into_dim::<ndarray::Ix4>("image", "[x, y, z, frame]", raw)?;
                (ImageVolume::Volumetric(volume), z)
            },
            _ => {
                return Err(VezdaError::shape(
                    "image",
                    "[x, y, frame] or [x, y, z, frame]",
                    &shape,
                ))
            },
        };

        let frame_count = shape.last().copied().unwrap_or(0);
        let alpha = match read_optional(&file, "alpha")? {
            Some(values) => check_len("alpha", values, frame_count)?,
            None => {
                let alpha = global_scalar(&file, "alpha").unwrap_or(0.0);
                vec![alpha; frame_count]
            },
        };
        let tau = read_optional(&file, "tau")?
            .map(|values| check_len("tau", values, frame_count))
            .transpose()?;

        info!(
            "Loaded {} images from {} ({}D)",
            frame_count,
            path.display(),
            if matches!(volume, ImageVolume::Volumetric(_)) { 3 } else { 2 }
        );

        Ok(ImageStack {
            volume,
            x,
            y,
            z,
            alpha,
            tau,
        })
    }

    fn open(path: &Path) -> Result<netcdf::File> {
        netcdf::open(path).map_err(|e| VezdaError::file_open(path.to_path_buf(), e.to_string()))
    }
}

fn read_array(file: &netcdf::File, name: &str) -> Result<ArrayD<f64>> {
    read_optional(file, name)?.ok_or_else(|| VezdaError::missing_variable(name))
}

fn read_optional(file: &netcdf::File, name: &str) -> Result<Option<ArrayD<f64>>> {
    match file.variable(name) {
        Some(var) => {
            let array = read_variable_array(&var)?;
            debug!("Read '{}' with shape {:?}", name, array.shape());
            Ok(Some(array))
        },
        None => Ok(None),
    }
}

fn into_dim<D: Dimension>(name: &str, expected: &str, array: ArrayD<f64>) -> Result<ndarray::Array<f64, D>> {
    let shape = array.shape().to_vec();
    array
        .into_dimensionality::<D>()
        .map_err(|_| VezdaError::shape(name, expected, &shape))
}

fn read_matching(file: &netcdf::File, name: &str, shape: &[usize]) -> Result<Array3<f64>> {
    let array = into_dim::<ndarray::Ix3>(name, "three dimensions", read_array(file, name)?)?;
    if array.shape() != shape {
        return Err(VezdaError::shape(name, format!("{:?}", shape), array.shape()));
    }
    Ok(array)
}

fn read_axis(file: &netcdf::File, name: &str, len: usize) -> Result<Array1<f64>> {
    read_optional_axis(file, name, len)?.ok_or_else(|| VezdaError::missing_variable(name))
}

fn read_optional_axis(file: &netcdf::File, name: &str, len: usize) -> Result<Option<Array1<f64>>> {
    let Some(raw) = read_optional(file, name)? else {
        return Ok(None);
    };
    let axis = into_dim::<ndarray::Ix1>(name, format!("[{}]", len).as_str(), raw)?;
    if axis.len() != len {
        return Err(VezdaError::shape(name, format!("[{}]", len), axis.shape()));
    }
    Ok(Some(axis))
}

/// Read a `[count, space]` coordinate array with 2 or 3 columns.
fn read_points(file: &netcdf::File, name: &str, count: Option<usize>) -> Result<Option<Points>> {
    let Some(raw) = read_optional(file, name)? else {
        return Ok(None);
    };
    let coords: Array2<f64> = into_dim::<ndarray::Ix2>(name, "[count, 2 or 3]", raw)?;
    let rows_ok = count.map_or(true, |n| coords.nrows() == n);
    if !rows_ok || !(2..=3).contains(&coords.ncols()) {
        let expected = match count {
            Some(n) => format!("[{}, 2 or 3]", n),
            None => "[count, 2 or 3]".to_string(),
        };
        return Err(VezdaError::shape(name, expected, coords.shape()));
    }
    Ok(Some(Points::new(coords)))
}

/// Read 1-based entity numbers, defaulting to `1..=count`.
fn read_numbers(file: &netcdf::File, name: &str, count: usize) -> Result<Vec<usize>> {
    match read_optional(file, name)? {
        Some(values) => Ok(check_len(name, values, count)?
            .into_iter()
            .map(|v| v.round().max(0.0) as usize)
            .collect()),
        None => Ok((1..=count).collect()),
    }
}

fn check_len(name: &str, values: ArrayD<f64>, len: usize) -> Result<Vec<f64>> {
    if values.len() != len {
        return Err(VezdaError::shape(name, format!("[{}]", len), values.shape()));
    }
    Ok(values.iter().copied().collect())
}

fn global_scalar(file: &netcdf::File, name: &str) -> Option<f64> {
    use netcdf::AttributeValue;

    match file.attribute(name)?.value() {
        Ok(AttributeValue::Double(v)) => Some(v),
        Ok(AttributeValue::Float(v)) => Some(f64::from(v)),
        Ok(AttributeValue::Int(v)) => Some(f64::from(v)),
        Ok(AttributeValue::Doubles(v)) => v.first().copied(),
        Ok(AttributeValue::Floats(v)) => v.first().map(|&x| f64::from(x)),
        Ok(AttributeValue::Str(s)) => s.trim().parse().ok(),
        Ok(other) => {
            warn!("Ignoring global attribute '{}': unsupported value {:?}", name, other);
            None
        },
        Err(e) => {
            warn!("Failed to read global attribute '{}': {}", name, e);
            None
        },
    }
}

fn read_variable_array(var: &netcdf::Variable<'_>) -> Result<ArrayD<f64>> {
    let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
    let name = var.name();

    let from_vec = |v: Vec<f64>| -> Result<ArrayD<f64>> {
        ArrayD::from_shape_vec(IxDyn(&shape), v)
            .map_err(|e| VezdaError::NetCDF(format!("Invalid shape/data size for '{}': {}", name, e)))
    };

    match var.vartype() {
        NcVariableType::Float(FloatType::F64) => {
            let values: Vec<f64> = var.get_values(..)?;
            from_vec(values)
        },
        NcVariableType::Float(FloatType::F32) => {
            let values: Vec<f32> = var.get_values(..)?;
            from_vec(values.into_iter().map(f64::from).collect())
        },
        NcVariableType::Int(IntType::I64) => {
            let values: Vec<i64> = var.get_values(..)?;
            from_vec(values.into_iter().map(|x| x as f64).collect())
        },
        NcVariableType::Int(IntType::I32) => {
            let values: Vec<i32> = var.get_values(..)?;
            from_vec(values.into_iter().map(f64::from).collect())
        },
        NcVariableType::Int(IntType::I16) => {
            let values: Vec<i16> = var.get_values(..)?;
            from_vec(values.into_iter().map(f64::from).collect())
        },
        NcVariableType::Int(IntType::I8) => {
            let values: Vec<i8> = var.get_values(..)?;
            from_vec(values.into_iter().map(f64::from).collect())
        },
        NcVariableType::Int(IntType::U64) => {
            let values: Vec<u64> = var.get_values(..)?;
            from_vec(values.into_iter().map(|x| x as f64).collect())
        },
        NcVariableType::Int(IntType::U32) => {
            let values: Vec<u32> = var.get_values(..)?;
            from_vec(values.into_iter().map(f64::from).collect())
        },
        NcVariableType::Int(IntType::U16) => {
            let values: Vec<u16> = var.get_values(..)?;
            from_vec(values.into_iter().map(f64::from).collect())
        },
        NcVariableType::Int(IntType::U8) => {
            let values: Vec<u8> = var.get_values(..)?;
            from_vec(values.into_iter().map(f64::from).collect())
        },
        other => Err(VezdaError::NetCDF(format!(
            "Variable '{}' has non-numeric type {:?}",
            name, other
        ))),
    }
}
