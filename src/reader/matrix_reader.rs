use itertools::Itertools;
use log::debug;
use std::path::Path;

use crate::backend::MatrixBackend;
use crate::error::{LoadError, Result};
use crate::types::{FileType, MatrixImage, RawScanRecord, ResolvedMatrixImage, Trace};
use crate::utils::infer_nanometers;

/// Opens a Matrix file and selects the image of the configured trace.
///
/// The channel is part of the Matrix filename, so only the trace is needed here.
pub(crate) fn read_matrix(
    backend: &dyn MatrixBackend,
    path: &Path,
    trace: Trace,
) -> Result<RawScanRecord> {
    // The session owns the file handle and is dropped on every return path
    let session = backend
        .open(path)
        .map_err(|e| LoadError::backend(FileType::Matrix, e))?;

    let traces = session.traces();
    let selected = traces
        .get(trace.index())
        .ok_or(LoadError::TraceOutOfRange {
            requested: trace.index(),
            available: traces.len(),
        })?;
    debug!("Selecting Matrix trace '{}' ({})", selected.label, trace);

    let image = session
        .select_image(selected)
        .map_err(|e| LoadError::backend(FileType::Matrix, e))?;

    Ok(RawScanRecord::Matrix(resolve_matrix_image(image)))
}

/// Fills in the size attributes a backend left out and converts sizes to nanometers.
///
/// Fallback order: `xy_width` from `width`, `xy_height` from `height`, `points` from the column
/// count of `data`, `lines` from its row count.
pub(crate) fn resolve_matrix_image(image: MatrixImage) -> ResolvedMatrixImage {
    let derived = [
        ("XY_width", image.xy_width.is_none()),
        ("XY_height", image.xy_height.is_none()),
        ("points", image.points.is_none()),
        ("lines", image.lines.is_none()),
    ]
    .into_iter()
    .filter_map(|(name, missing)| missing.then_some(name))
    .collect_vec();
    if !derived.is_empty() {
        debug!("Matrix image lacks {}, deriving them", derived.join(", "));
    }

    let xy_width = infer_nanometers(image.xy_width.unwrap_or(image.width));
    let xy_height = infer_nanometers(image.xy_height.unwrap_or(image.height));
    let points = image.points.unwrap_or_else(|| image.data.ncols());
    let lines = image.lines.unwrap_or_else(|| image.data.nrows());

    ResolvedMatrixImage {
        data: image.data,
        xy_width,
        xy_height,
        points,
        lines,
        x_offset: image.x_offset,
        y_offset: image.y_offset,
        angle: image.angle,
        voltage: image.voltage,
        current: image.current,
    }
}
