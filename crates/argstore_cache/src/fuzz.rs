//! Indexed cache of fuzzed argument records.
//!
//! Layout within a dataset directory:
//!
//! ```text
//! arguments/index.json      argument key -> token
//! arguments/<token>.json    the record stored under that token
//! ```
//!
//! Records are write-once. Writing an already indexed key allocates a new
//! token and repoints the index; what happens to the old blob is decided by
//! the configured [`OverwritePolicy`].

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Condvar, Mutex, PoisonError};

use argstore_config::OverwritePolicy;
use rand::Rng;
use serde_json::Value;
use tracing::{debug, warn};

use crate::document::DocumentStore;
use crate::error::CacheError;

/// Subdirectory holding the index and the record blobs.
pub const ARGUMENTS_DIR: &str = "arguments";

/// Name of the index document within [`ARGUMENTS_DIR`].
pub const INDEX_FILE: &str = "index.json";

/// File extension of record blobs.
const BLOB_EXT: &str = "json";

/// The ordered argument tuples generated for one function.
pub type FuzzRecord = Vec<Value>;

type FuzzIndex = BTreeMap<String, String>;

/// Result of [`FuzzCache::put_if_absent_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillOutcome {
    /// The key was already indexed; nothing was generated.
    Present,
    /// The producer returned a record, stored under this token.
    Stored(String),
    /// The producer returned no tuples; nothing was cached.
    Empty,
}

/// Fuzz-argument cache for one dataset.
///
/// Every method holds the dataset's index lock for its whole
/// read-modify-write, so individual calls are atomic with respect to each
/// other. A separate [`exists`](Self::exists) followed by
/// [`put`](Self::put) is not; use [`put_if_absent_with`](Self::put_if_absent_with)
/// for a single check-and-store.
pub struct FuzzCache {
    dir: PathBuf,
    pretty_index: bool,
    on_overwrite: OverwritePolicy,
    lock: Mutex<()>,
    /// Keys whose record is being produced by a `put_if_absent_with` call.
    generating: Mutex<HashSet<String>>,
    generated: Condvar,
}

impl FuzzCache {
    /// Creates a cache stored under `dataset_dir`.
    pub fn new(dataset_dir: &Path, pretty_index: bool, on_overwrite: OverwritePolicy) -> Self {
        Self {
            dir: dataset_dir.join(ARGUMENTS_DIR),
            pretty_index,
            on_overwrite,
            lock: Mutex::new(()),
            generating: Mutex::new(HashSet::new()),
            generated: Condvar::new(),
        }
    }

    /// Returns the directory holding the index and blobs.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns `true` if `key` is indexed. A missing cache directory counts as empty.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.load_index()?.contains_key(key))
    }

    /// Returns the record indexed under `key`, or `None` if the key is absent.
    pub fn get(&self, key: &str) -> Result<Option<FuzzRecord>, CacheError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let index = self.load_index()?;
        match index.get(key) {
            Some(token) => DocumentStore::load(&self.blob_path(token)).map(Some),
            None => Ok(None),
        }
    }

    /// Stores `record` under a fresh token and points `key` at it.
    ///
    /// Returns the new token. An existing entry for `key` is replaced.
    pub fn put(&self, key: &str, record: &[Value]) -> Result<String, CacheError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.put_unlocked(key, record)
    }

    /// Generates and stores a record for `key` unless it is already indexed.
    ///
    /// Concurrent callers for the same key wait for the one that claimed it
    /// and then see its result, so a key is generated at most once while it
    /// stays absent. No lock is held while `produce` runs: it may read this
    /// cache and other keys are generated in parallel. It must not request
    /// the same key again. `produce` returning `None` or an empty record
    /// caches nothing.
    pub fn put_if_absent_with<F, E>(&self, key: &str, produce: F) -> Result<FillOutcome, E>
    where
        F: FnOnce() -> Result<Option<FuzzRecord>, E>,
        E: From<CacheError>,
    {
        let Some(_claim) = self.claim(key)? else {
            return Ok(FillOutcome::Present);
        };
        match produce()? {
            Some(record) if !record.is_empty() => {
                let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
                // A plain `put` may have landed while generating.
                if self.load_index()?.contains_key(key) {
                    debug!(key, "dropped generated record, key stored concurrently");
                    return Ok(FillOutcome::Present);
                }
                let token = self.put_unlocked(key, &record)?;
                Ok(FillOutcome::Stored(token))
            }
            _ => Ok(FillOutcome::Empty),
        }
    }

    /// Waits until no other caller is generating `key`, then claims it.
    ///
    /// Returns `None` if the key is indexed by the time the claim is possible.
    fn claim(&self, key: &str) -> Result<Option<Claim<'_>>, CacheError> {
        let mut generating = self.generating.lock().unwrap_or_else(PoisonError::into_inner);
        while generating.contains(key) {
            generating = self
                .generated
                .wait(generating)
                .unwrap_or_else(PoisonError::into_inner);
        }
        if self.exists(key)? {
            return Ok(None);
        }
        generating.insert(key.to_string());
        Ok(Some(Claim {
            cache: self,
            key: key.to_string(),
        }))
    }

    /// Removes the whole cache directory, index and blobs included.
    pub fn delete_all(&self) -> Result<(), CacheError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        DocumentStore::remove_tree(&self.dir)?;
        debug!(dir = %self.dir.display(), "deleted fuzz cache");
        Ok(())
    }

    /// Returns the number of indexed keys.
    pub fn len(&self) -> Result<usize, CacheError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.load_index()?.len())
    }

    /// Returns `true` if no keys are indexed.
    pub fn is_empty(&self) -> Result<bool, CacheError> {
        self.len().map(|n| n == 0)
    }

    /// Removes every blob not referenced by the index.
    ///
    /// Returns the number of files removed.
    pub fn gc(&self) -> Result<usize, CacheError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let index = self.load_index()?;
        let live: HashSet<&str> = index.values().map(String::as_str).collect();

        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(CacheError::io(&self.dir, e)),
        };

        let mut removed = 0;
        for entry in entries {
            let entry = entry.map_err(|e| CacheError::io(&self.dir, e))?;
            let path = entry.path();
            if path.file_name().and_then(|n| n.to_str()) == Some(INDEX_FILE) {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(BLOB_EXT) {
                continue;
            }
            let Some(token) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if !live.contains(token) {
                std::fs::remove_file(&path).map_err(|e| CacheError::io(&path, e))?;
                removed += 1;
            }
        }
        debug!(dir = %self.dir.display(), removed, "fuzz cache gc");
        Ok(removed)
    }

    fn put_unlocked(&self, key: &str, record: &[Value]) -> Result<String, CacheError> {
        let mut index = self.load_index()?;
        let token = new_token();
        // Blob before index, so the index never names a token that was not written.
        DocumentStore::save(record, &self.blob_path(&token), false)?;

        let previous = index.insert(key.to_string(), token.clone());
        DocumentStore::save(&index, &self.index_path(), self.pretty_index)?;
        debug!(key, token = %token, tuples = record.len(), "stored fuzzed arguments");

        if let Some(previous) = previous {
            self.retire(key, &previous);
        }
        Ok(token)
    }

    /// Applies the overwrite policy to a token that is no longer indexed.
    fn retire(&self, key: &str, token: &str) {
        match self.on_overwrite {
            OverwritePolicy::Orphan => {
                debug!(key, token, "left previous blob in place");
            }
            OverwritePolicy::Reclaim => match std::fs::remove_file(self.blob_path(token)) {
                Ok(()) => debug!(key, token, "reclaimed previous blob"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                // The index is already consistent; the blob is left for `gc`.
                Err(e) => warn!(key, token, error = %e, "failed to reclaim previous blob"),
            },
        }
    }

    fn load_index(&self) -> Result<FuzzIndex, CacheError> {
        let path = self.index_path();
        let object = DocumentStore::load_object_or_empty(&path)?;
        object
            .into_iter()
            .map(|(key, token)| match token {
                Value::String(token) => Ok((key, token)),
                other => Err(CacheError::Malformed {
                    path: path.clone(),
                    reason: format!("token for '{key}' is not a string: {other}"),
                }),
            })
            .collect()
    }

    fn index_path(&self) -> PathBuf {
        self.dir.join(INDEX_FILE)
    }

    fn blob_path(&self, token: &str) -> PathBuf {
        self.dir.join(format!("{token}.{BLOB_EXT}"))
    }
}

/// Releases a claimed key and wakes callers waiting on it, also on error or panic.
struct Claim<'a> {
    cache: &'a FuzzCache,
    key: String,
}

impl Drop for Claim<'_> {
    fn drop(&mut self) {
        self.cache
            .generating
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
        self.cache.generated.notify_all();
    }
}

/// A random 32-character lowercase hex token.
fn new_token() -> String {
    let mut rng = rand::thread_rng();
    format!("{:032x}", rng.gen::<u128>())
}
