//! Type definitions shared by the readers and the normalizer

pub mod config;
pub mod file_type;
pub mod header;
pub mod matrix_image;
pub mod record;

// Re-export the main types for convenience
pub use config::{DEFAULT_CHANNEL, LoaderConfig, Trace};
pub use file_type::FileType;
pub use header::{HeaderValue, NanonisHeader};
pub use matrix_image::MatrixImage;
pub(crate) use record::{RawScanRecord, ResolvedMatrixImage};
pub use record::UnifiedImageRecord;
