use ndarray::{Array2, ArrayView2, s};

/// Raw sizes below this are taken to be in meters
pub const METER_MAGNITUDE_THRESHOLD: f64 = 0.01;

pub const NANOMETERS_PER_METER: f64 = 1e9;

/// Converts a scan size to nanometers by looking at its magnitude.
///
/// Matrix backends do not say which unit a size is in. Anything smaller than 0.01 is assumed to
/// be meters and scaled by 1e9; everything else is assumed to already be nanometers. A genuine
/// scan narrower than 0.01 nm would be misread as meters.
pub fn infer_nanometers(value: f64) -> f64 {
    if value.abs() < METER_MAGNITUDE_THRESHOLD {
        value * NANOMETERS_PER_METER
    } else {
        value
    }
}

/// Reverse the row order
pub fn flip_rows(data: ArrayView2<'_, f64>) -> Array2<f64> {
    data.slice(s![..;-1, ..]).to_owned()
}

/// Reverse the column order
pub fn flip_columns(data: ArrayView2<'_, f64>) -> Array2<f64> {
    data.slice(s![.., ..;-1]).to_owned()
}

/// Reverse both axes
pub fn flip_both(data: ArrayView2<'_, f64>) -> Array2<f64> {
    data.slice(s![..;-1, ..;-1]).to_owned()
}
