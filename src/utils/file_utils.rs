use log::debug;
use memmap2::Mmap;
use std::fs::File;
use std::io;
use std::path::Path;

use crate::error::{LoadError, Result};
use crate::types::FileType;

/// Read a binary file using memory mapping for improved performance
/// This is more efficient for large files as it doesn't load the entire file into RAM
pub fn read_binary_file_mmap(path: impl AsRef<Path>) -> io::Result<Mmap> {
    let file = File::open(path)?;
    // Safety: The file is not modified while the mmap is active
    unsafe { Mmap::map(&file) }
}

/// Decide which controller wrote `path`.
///
/// Existence is checked before the extension, so a missing file is always reported as
/// [`LoadError::NotFound`]. No file content is read.
pub fn detect_file_type(path: &Path) -> Result<FileType> {
    if !path.exists() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let file_type = path
        .extension()
        .and_then(|extension| extension.to_str())
        .and_then(FileType::from_extension)
        .ok_or_else(|| LoadError::UnrecognizedFormat {
            path: path.to_path_buf(),
        })?;

    debug!("Detected {} file: {}", file_type, path.display());
    Ok(file_type)
}
