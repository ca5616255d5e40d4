pub mod backend;
pub mod error;
pub mod image_loader;
mod normalizer;
pub mod parser;
mod reader;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

pub use backend::{
    BackendError, MatrixBackend, MatrixSession, MatrixTrace, NanonisBackend, NanonisScan,
    SignalPair, SxmReader,
};
pub use error::{LoadError, Result};
pub use image_loader::ImageLoader;
pub use types::{
    FileType, HeaderValue, LoaderConfig, MatrixImage, NanonisHeader, Trace, UnifiedImageRecord,
};
