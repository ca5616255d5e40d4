use bon::bon;
use log::info;
use std::path::Path;

use crate::backend::{MatrixBackend, NanonisBackend, SxmReader};
use crate::error::{LoadError, Result};
use crate::normalizer::normalize;
use crate::reader::{read_matrix, read_nanonis};
use crate::types::{DEFAULT_CHANNEL, FileType, LoaderConfig, Trace, UnifiedImageRecord};
use crate::utils::file_utils::detect_file_type;

/// Loads Matrix and Nanonis images into [`UnifiedImageRecord`]s.
///
/// The loader holds only its configuration and backends. Path, detected format and open file
/// handles live for the duration of one [`ImageLoader::load`] call, so a loader can be reused
/// for any number of files.
pub struct ImageLoader {
    config: LoaderConfig,
    matrix_backend: Option<Box<dyn MatrixBackend>>,
    nanonis_backend: Box<dyn NanonisBackend>,
}

#[bon]
impl ImageLoader {
    /// Create a loader. Without a `nanonis_backend`, `.sxm` files are read by [`SxmReader`];
    /// without a `matrix_backend`, Matrix files fail with
    /// [`LoadError::MatrixBackendUnavailable`].
    #[builder]
    pub fn new(
        #[builder(default)] trace: Trace,
        #[builder(into, default = DEFAULT_CHANNEL.to_string())] channel: String,
        matrix_backend: Option<Box<dyn MatrixBackend>>,
        nanonis_backend: Option<Box<dyn NanonisBackend>>,
    ) -> Self {
        Self {
            config: LoaderConfig { trace, channel },
            matrix_backend,
            nanonis_backend: nanonis_backend.unwrap_or_else(|| Box::new(SxmReader::new())),
        }
    }
}

impl ImageLoader {
    /// Create a loader from an existing configuration, reading Nanonis files with [`SxmReader`]
    pub fn with_config(config: LoaderConfig) -> Self {
        Self {
            config,
            matrix_backend: None,
            nanonis_backend: Box::new(SxmReader::new()),
        }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load the image at `path` using the configured trace and channel
    pub fn load(&self, path: impl AsRef<Path>) -> Result<UnifiedImageRecord> {
        let path = path.as_ref();
        let LoaderConfig { trace, channel } = &self.config;

        let raw = match detect_file_type(path)? {
            FileType::Matrix => {
                let backend = self.matrix_backend.as_deref().ok_or_else(|| {
                    LoadError::MatrixBackendUnavailable {
                        path: path.to_path_buf(),
                    }
                })?;
                read_matrix(backend, path, *trace)?
            }
            FileType::Nanonis => read_nanonis(&*self.nanonis_backend, path, *trace, channel)?,
        };
        let format = raw.file_type();

        let record = normalize(raw, path, &self.config)?;
        info!(
            "Loaded {} image {} ({}x{}, channel '{}', {})",
            format,
            path.display(),
            record.points,
            record.lines,
            record.channel,
            record.trace
        );
        Ok(record)
    }
}

impl Default for ImageLoader {
    fn default() -> Self {
        Self::with_config(LoaderConfig::default())
    }
}
