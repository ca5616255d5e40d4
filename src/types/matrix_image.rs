//! Image object handed out by a Matrix backend

use bon::Builder;
use ndarray::Array2;

/// One Matrix image as the backend sees it.
///
/// Backend versions disagree on which size attributes they fill in, so `xy_width`, `xy_height`,
/// `points` and `lines` are optional; the Matrix reader resolves them from `width`, `height` and
/// the shape of `data`.
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct MatrixImage {
    /// Samples, shape `(lines, points)`
    pub data: Array2<f64>,
    /// Raw scan width as stored by the backend
    pub width: f64,
    /// Raw scan height as stored by the backend
    pub height: f64,
    pub xy_width: Option<f64>,
    pub xy_height: Option<f64>,
    pub points: Option<usize>,
    pub lines: Option<usize>,
    #[builder(default)]
    pub x_offset: f64,
    #[builder(default)]
    pub y_offset: f64,
    /// Scan rotation in degrees
    #[builder(default)]
    pub angle: f64,
    /// Gap voltage
    #[builder(default)]
    pub voltage: f64,
    /// Regulator setpoint current
    #[builder(default)]
    pub current: f64,
}
