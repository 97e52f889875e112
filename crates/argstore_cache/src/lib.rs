//! Persistent per-dataset stores for literal constants and fuzzed arguments.
//!
//! Each dataset owns a directory under the store root holding a merged
//! constant pool (`primitive_arguments.json`) and an indexed fuzz-argument
//! cache (`arguments/index.json` plus one blob per token). Stores are handed
//! out by a [`DatasetStoreRegistry`], which guarantees a single instance per
//! dataset name.

#![warn(missing_docs)]

pub mod dataset;
pub mod document;
pub mod error;
pub mod fuzz;
pub mod metadata;
pub mod pool;
pub mod registry;

pub use dataset::{DatasetStore, StoreOptions};
pub use document::DocumentStore;
pub use error::CacheError;
pub use fuzz::{FillOutcome, FuzzCache, FuzzRecord};
pub use metadata::MetadataStore;
pub use pool::{merge_constant_maps, ConstantMap, ConstantPool};
pub use registry::DatasetStoreRegistry;
