use serde::{Deserialize, Serialize};
use std::fmt;

/// Extension suffix (last five characters) written by the Matrix controller, e.g. `.Z_mtrx`
pub const MATRIX_SUFFIX: &str = "_mtrx";

/// Extension suffix (last three characters) of Nanonis scan files
pub const NANONIS_SUFFIX: &str = "sxm";

/// The controller platform an image file comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Matrix,
    Nanonis,
}

impl FileType {
    /// Match a file extension (without the leading dot) against the known suffixes.
    ///
    /// Matrix is checked first. Comparison is case-sensitive.
    pub fn from_extension(extension: &str) -> Option<Self> {
        if extension.ends_with(MATRIX_SUFFIX) {
            Some(Self::Matrix)
        } else if extension.ends_with(NANONIS_SUFFIX) {
            Some(Self::Nanonis)
        } else {
            None
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileType::Matrix => write!(f, "Matrix"),
            FileType::Nanonis => write!(f, "Nanonis"),
        }
    }
}
