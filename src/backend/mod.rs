//! Format backends: the code that actually opens instrument files.
//!
//! The loader only talks to backends through the traits below. Matrix files need a caller
//! supplied [`MatrixBackend`]; Nanonis files are read by [`SxmReader`] unless another
//! [`NanonisBackend`] is configured.

mod sxm;

pub use sxm::{SxmError, SxmReader};

use itertools::Itertools;
use ndarray::Array2;
use std::collections::BTreeMap;
use std::path::Path;

pub use crate::error::BackendError;
use crate::types::{MatrixImage, NanonisHeader};

/// One entry of the ordered trace list of a Matrix file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixTrace {
    /// Backend-specific label, e.g. `"forward/up"`
    pub label: String,
}

impl MatrixTrace {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

/// An opened Matrix file. Dropping the session releases the file.
pub trait MatrixSession {
    /// Traces available in the file, in the backend's order (forward first)
    fn traces(&self) -> &[MatrixTrace];

    /// Decode the image recorded for `trace`
    fn select_image(&self, trace: &MatrixTrace) -> Result<MatrixImage, BackendError>;
}

/// Opens Matrix (`*_mtrx`) files
pub trait MatrixBackend {
    fn open(&self, path: &Path) -> Result<Box<dyn MatrixSession>, BackendError>;
}

/// Forward and backward samples of one Nanonis channel, each shaped `(lines, points)`
#[derive(Debug, Clone, PartialEq)]
pub struct SignalPair {
    pub forward: Array2<f64>,
    /// `None` when the channel was only recorded in the forward direction
    pub backward: Option<Array2<f64>>,
}

/// Everything a Nanonis backend extracts from one scan file
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NanonisScan {
    pub header: NanonisHeader,
    pub signals: BTreeMap<String, SignalPair>,
}

impl NanonisScan {
    /// Get available channel names
    pub fn channel_names(&self) -> Vec<String> {
        self.signals.keys().cloned().collect_vec()
    }
}

/// Reads Nanonis scan files
pub trait NanonisBackend {
    fn read_scan(&self, path: &Path) -> Result<NanonisScan, BackendError>;
}
