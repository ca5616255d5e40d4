//! Intermediate and unified image records

use itertools::Itertools;
use ndarray::Array2;
use serde::Serialize;
use std::path::PathBuf;

use super::config::Trace;
use super::file_type::FileType;
use super::header::NanonisHeader;

/// A Matrix image after the size fallbacks and unit inference have been applied
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResolvedMatrixImage {
    pub data: Array2<f64>,
    pub xy_width: f64,
    pub xy_height: f64,
    pub points: usize,
    pub lines: usize,
    pub x_offset: f64,
    pub y_offset: f64,
    pub angle: f64,
    pub voltage: f64,
    pub current: f64,
}

/// What a format reader hands to the normalizer
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RawScanRecord {
    /// Matrix image, already carrying the unified field set
    Matrix(ResolvedMatrixImage),
    /// Direction-corrected samples plus the untouched header
    Nanonis {
        data: Array2<f64>,
        header: NanonisHeader,
    },
}

impl RawScanRecord {
    pub(crate) fn file_type(&self) -> FileType {
        match self {
            RawScanRecord::Matrix(_) => FileType::Matrix,
            RawScanRecord::Nanonis { .. } => FileType::Nanonis,
        }
    }
}

/// A loaded image with the standard set of scan metadata, identical in shape for every format
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnifiedImageRecord {
    /// Samples, shape `(lines, points)`
    pub data: Array2<f64>,
    /// Physical width
    pub width: f64,
    /// Physical height
    pub height: f64,
    /// Pixels per line
    pub points: usize,
    /// Number of lines
    pub lines: usize,
    pub x_offset: f64,
    pub y_offset: f64,
    /// Scan rotation in degrees
    pub angle: f64,
    /// Bias voltage in the units of the source file
    pub voltage: f64,
    /// Setpoint current
    pub current: f64,
    /// File the record was loaded from
    pub name: PathBuf,
    pub trace: Trace,
    pub channel: String,
    pub format: FileType,
    /// Full Nanonis header, kept for consumers that need more than the standard fields
    pub header: Option<NanonisHeader>,
}

impl UnifiedImageRecord {
    /// Scalar metadata as JSON, without pixel data or the raw header
    pub fn metadata_json(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name.display().to_string(),
            "format": self.format,
            "trace": self.trace,
            "channel": self.channel,
            "width": self.width,
            "height": self.height,
            "points": self.points,
            "lines": self.lines,
            "x_offset": self.x_offset,
            "y_offset": self.y_offset,
            "angle": self.angle,
            "voltage": self.voltage,
            "current": self.current,
        })
    }

    /// Get a summary of the record contents
    pub fn summary(&self) -> String {
        let mut result = String::new();

        result.push_str(&format!("{} image: {}\n", self.format, self.name.display()));
        result.push_str(&format!("  Channel: {} ({})\n", self.channel, self.trace));
        result.push_str(&format!("  Pixels: {}x{}\n", self.points, self.lines));
        result.push_str(&format!("  Size: {} x {}\n", self.width, self.height));
        result.push_str(&format!(
            "  Offset: ({}, {}), angle {}\n",
            self.x_offset, self.y_offset, self.angle
        ));
        result.push_str(&format!("  Bias: {}, setpoint: {}\n", self.voltage, self.current));

        if let Some(header) = &self.header {
            result.push_str(&format!(
                "  Header keys: {}\n",
                header.keys().take(8).join(", ")
            ));
            if header.len() > 8 {
                result.push_str(&format!("  ... and {} more\n", header.len() - 8));
            }
        }

        result
    }
}
