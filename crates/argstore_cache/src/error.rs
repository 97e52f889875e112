//! Error types for store operations.

use std::path::PathBuf;

use argstore_common::ParseError;

/// Errors that can occur while reading or writing a dataset store.
///
/// A missing fuzz-cache entry is not an error: lookups return `Option`.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// A store file or directory could not be read, written, or removed.
    #[error("store I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A store document exists but is not valid JSON of the expected shape.
    #[error("malformed store document {path}: {reason}")]
    Malformed {
        /// The document path.
        path: PathBuf,
        /// Description of the problem.
        reason: String,
    },

    /// A value could not be serialized.
    #[error("serialization error: {reason}")]
    Serialization {
        /// Description of the serialization failure.
        reason: String,
    },

    /// A persisted constant pool names a kind outside the registry.
    #[error("unknown primitive kind '{name}'")]
    UnknownKind {
        /// The unrecognized kind name.
        name: String,
    },

    /// A persisted literal does not parse as its kind.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A dataset name that cannot be used as a single directory name.
    #[error("invalid dataset name '{name}'")]
    InvalidDataset {
        /// The rejected name.
        name: String,
    },

    /// A package or class name that does not map to a path below the dataset.
    #[error("invalid class path '{package}.{class}'")]
    InvalidClassPath {
        /// The dotted package name.
        package: String,
        /// The class name.
        class: String,
    },
}

impl CacheError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CacheError::Io {
            path: path.into(),
            source,
        }
    }
}
