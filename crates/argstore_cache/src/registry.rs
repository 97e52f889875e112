//! Process-lifetime registry of dataset stores.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use argstore_config::StoreConfig;
use tracing::debug;

use crate::dataset::{DatasetStore, StoreOptions};
use crate::error::CacheError;
use crate::metadata::MetadataStore;

/// Hands out one shared [`DatasetStore`] per dataset name.
///
/// Construct one registry at startup and pass it to every call site that
/// touches a store. Stores are never evicted.
pub struct DatasetStoreRegistry {
    root: PathBuf,
    options: StoreOptions,
    stores: Mutex<HashMap<String, Arc<DatasetStore>>>,
}

impl DatasetStoreRegistry {
    /// Creates a registry rooted at `root` with default options.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_options(root, StoreOptions::default())
    }

    /// Creates a registry rooted at `root`.
    pub fn with_options(root: impl Into<PathBuf>, options: StoreOptions) -> Self {
        Self {
            root: root.into(),
            options,
            stores: Mutex::new(HashMap::new()),
        }
    }

    /// Creates a registry from a loaded configuration.
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::with_options(config.store.root.clone(), StoreOptions::from(config))
    }

    /// Returns the store root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the store for `name`, creating it on first use.
    ///
    /// Lookup and insertion happen under one lock, so concurrent first
    /// access never constructs two stores for the same name.
    pub fn get_or_create(&self, name: &str) -> Result<Arc<DatasetStore>, CacheError> {
        let mut stores = self.stores.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(store) = stores.get(name) {
            return Ok(Arc::clone(store));
        }
        let store = Arc::new(DatasetStore::new(&self.root, name, self.options)?);
        debug!(dataset = name, dir = %store.dir().display(), "created dataset store");
        stores.insert(name.to_string(), Arc::clone(&store));
        Ok(store)
    }

    /// Returns the metadata store sharing this registry's root.
    pub fn metadata(&self) -> MetadataStore {
        MetadataStore::new(&self.root)
    }

    /// Returns the number of datasets opened so far.
    pub fn len(&self) -> usize {
        self.stores.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns `true` if no dataset has been opened.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
