use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the stripping pipeline.
///
/// Every variant carries the offending path so the caller can log a single
/// descriptive line without reconstructing context.
#[derive(Debug, Error)]
pub enum StripError {
    /// The input path does not exist.
    #[error("input file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The input path exists but is not a regular file (directory, socket, ...).
    #[error("input is not a regular file: {}", .0.display())]
    InvalidInput(PathBuf),

    /// The input file could not be parsed as an image.
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The output file could not be encoded or written.
    #[error("failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl StripError {
    pub(crate) fn encode(
        path: &std::path::Path,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Encode {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }
}
