//! A single dataset's stores.

use std::path::{Component, Path, PathBuf};

use argstore_config::{OverwritePolicy, StoreConfig};

use crate::error::CacheError;
use crate::fuzz::FuzzCache;
use crate::pool::ConstantPool;

/// Settings shared by every dataset store a registry creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// Pretty-print the fuzz index.
    pub pretty_index: bool,
    /// Handling of blobs replaced by a later write to the same key.
    pub on_overwrite: OverwritePolicy,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            pretty_index: true,
            on_overwrite: OverwritePolicy::Reclaim,
        }
    }
}

impl From<&StoreConfig> for StoreOptions {
    fn from(config: &StoreConfig) -> Self {
        Self {
            pretty_index: config.store.pretty_index,
            on_overwrite: config.fuzz.on_overwrite,
        }
    }
}

/// The constant pool and fuzz cache of one dataset.
///
/// Obtain instances through [`DatasetStoreRegistry`](crate::DatasetStoreRegistry)
/// so that all callers share the same locks.
pub struct DatasetStore {
    name: String,
    dir: PathBuf,
    pool: ConstantPool,
    fuzz: FuzzCache,
}

impl DatasetStore {
    pub(crate) fn new(root: &Path, name: &str, options: StoreOptions) -> Result<Self, CacheError> {
        validate_name(name)?;
        let dir = root.join(name);
        Ok(Self {
            name: name.to_string(),
            pool: ConstantPool::new(&dir),
            fuzz: FuzzCache::new(&dir, options.pretty_index, options.on_overwrite),
            dir,
        })
    }

    /// Returns the dataset name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the dataset directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the constant pool.
    pub fn pool(&self) -> &ConstantPool {
        &self.pool
    }

    /// Returns the fuzz-argument cache.
    pub fn fuzz(&self) -> &FuzzCache {
        &self.fuzz
    }
}

/// Dataset names must be a single normal path component.
pub(crate) fn validate_name(name: &str) -> Result<(), CacheError> {
    if is_single_component(name) {
        Ok(())
    } else {
        Err(CacheError::InvalidDataset {
            name: name.to_string(),
        })
    }
}

/// `true` if `name` joins onto a directory as exactly one child entry.
pub(crate) fn is_single_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
