//! Error types for batch runs.

use std::path::PathBuf;

use argstore_cache::CacheError;
use argstore_common::ParseError;

use crate::collaborators::{ArgumentKey, CollaboratorError};

/// Errors that abort an orchestrated batch.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A store operation failed.
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// The constant extractor failed on a file.
    #[error("failed to extract constants from {path}: {source}")]
    Extraction {
        /// The file being processed.
        path: PathBuf,
        /// The extractor's error.
        source: CollaboratorError,
    },

    /// A literal reported by the extractor does not parse as its kind.
    #[error("invalid constant in {path}: {source}")]
    Conversion {
        /// The file the literal came from.
        path: PathBuf,
        /// The conversion failure.
        source: ParseError,
    },

    /// The metadata provider failed on a file.
    #[error("failed to read functions of {path}: {source}")]
    Metadata {
        /// The file being processed.
        path: PathBuf,
        /// The provider's error.
        source: CollaboratorError,
    },

    /// The argument generator failed for a function.
    #[error("failed to generate arguments for {key}: {source}")]
    Generation {
        /// The function's argument key.
        key: ArgumentKey,
        /// The generator's error.
        source: CollaboratorError,
    },
}
