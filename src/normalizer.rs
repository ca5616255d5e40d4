//! Maps format-specific records onto [`UnifiedImageRecord`]

use ndarray::Array2;
use std::path::Path;

use crate::error::{LoadError, Result};
use crate::parser::parse_quantity;
use crate::types::{
    FileType, LoaderConfig, NanonisHeader, RawScanRecord, ResolvedMatrixImage,
    UnifiedImageRecord,
};

const SETPOINT: &str = "Setpoint";

/// Builds the unified record and stamps it with the source path, trace and channel.
pub(crate) fn normalize(
    raw: RawScanRecord,
    path: &Path,
    config: &LoaderConfig,
) -> Result<UnifiedImageRecord> {
    match raw {
        RawScanRecord::Matrix(image) => Ok(from_matrix(image, path, config)),
        RawScanRecord::Nanonis { data, header } => from_nanonis(data, header, path, config),
    }
}

fn from_matrix(
    image: ResolvedMatrixImage,
    path: &Path,
    config: &LoaderConfig,
) -> UnifiedImageRecord {
    UnifiedImageRecord {
        data: image.data,
        width: image.xy_width,
        height: image.xy_height,
        points: image.points,
        lines: image.lines,
        x_offset: image.x_offset,
        y_offset: image.y_offset,
        angle: image.angle,
        voltage: image.voltage,
        current: image.current,
        name: path.to_path_buf(),
        trace: config.trace,
        channel: config.channel.clone(),
        format: FileType::Matrix,
        header: None,
    }
}

/// Reads the setpoint current: the number in front of the unit of the first `Setpoint` entry.
fn setpoint_current(header: &NanonisHeader) -> Result<f64> {
    let setpoint = header
        .column(SETPOINT)?
        .first()
        .copied()
        .ok_or_else(|| LoadError::missing_field(format!("{SETPOINT}[0]")))?;
    parse_quantity(setpoint).ok_or_else(|| LoadError::UnitParse {
        field: SETPOINT.to_string(),
        value: setpoint.to_string(),
    })
}

fn from_nanonis(
    data: Array2<f64>,
    header: NanonisHeader,
    path: &Path,
    config: &LoaderConfig,
) -> Result<UnifiedImageRecord> {
    let height = header.number_at("scan_range", 1)?;
    let lines = header.count_at("scan_pixels", 1)?;
    let points = header.count_at("scan_pixels", 0)?;
    let width = header.number_at("scan_range", 0)?;
    let x_offset = header.number_at("scan_offset", 0)?;
    let y_offset = header.number_at("scan_offset", 1)?;
    let angle = header.exact_number("scan_angle")?;
    let voltage = header.number("bias")?;
    let current = setpoint_current(&header)?;

    Ok(UnifiedImageRecord {
        data,
        width,
        height,
        points,
        lines,
        x_offset,
        y_offset,
        angle,
        voltage,
        current,
        name: path.to_path_buf(),
        trace: config.trace,
        channel: config.channel.clone(),
        format: FileType::Nanonis,
        header: Some(header),
    })
}
