//! The per-dataset constant pool.
//!
//! The pool maps each primitive kind to the set of literal values seen for it
//! across a dataset's source files. It is stored as a single JSON object keyed
//! by canonical kind name, and every save replaces the whole document.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use argstore_common::{PrimitiveKind, PrimitiveValue};
use serde_json::{Number, Value};
use tracing::{debug, info};

use crate::document::DocumentStore;
use crate::error::CacheError;

/// Kind-to-values mapping with set semantics per kind.
pub type ConstantMap = BTreeMap<PrimitiveKind, BTreeSet<PrimitiveValue>>;

/// Name of the constant pool file within a dataset directory.
pub const POOL_FILE: &str = "primitive_arguments.json";

/// Persistent constant pool for one dataset.
pub struct ConstantPool {
    path: PathBuf,
    lock: Mutex<()>,
}

impl ConstantPool {
    /// Creates a pool stored in `dataset_dir`.
    pub fn new(dataset_dir: &Path) -> Self {
        Self {
            path: dataset_dir.join(POOL_FILE),
            lock: Mutex::new(()),
        }
    }

    /// Returns the path of the pool document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the persisted pool.
    ///
    /// Fails if the dataset has never been saved; there is no empty default.
    pub fn load(&self) -> Result<ConstantMap, CacheError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.load_unlocked()
    }

    /// Replaces the persisted pool with `constants`.
    pub fn save(&self, constants: &ConstantMap) -> Result<(), CacheError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.save_unlocked(constants)
    }

    /// Unions per-file maps, saves the result, and returns it as reloaded from disk.
    ///
    /// Only the reloaded value is returned so callers always see exactly what
    /// the store will hand out on the next [`load`](Self::load).
    pub fn merge_from_files<I>(&self, per_file: I) -> Result<ConstantMap, CacheError>
    where
        I: IntoIterator<Item = ConstantMap>,
    {
        let merged = merge_constant_maps(per_file);
        log_counts("merged", &merged);

        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.save_unlocked(&merged)?;
        let reloaded = self.load_unlocked()?;
        log_counts("reloaded", &reloaded);
        Ok(reloaded)
    }

    fn load_unlocked(&self) -> Result<ConstantMap, CacheError> {
        let raw: BTreeMap<String, Vec<Value>> = DocumentStore::load(&self.path)?;
        let mut constants = ConstantMap::new();
        for (name, values) in raw {
            let kind = PrimitiveKind::from_name(&name)
                .ok_or_else(|| CacheError::UnknownKind { name: name.clone() })?;
            let set = constants.entry(kind).or_default();
            for value in &values {
                let text = raw_text(value).ok_or_else(|| CacheError::Malformed {
                    path: self.path.clone(),
                    reason: format!("unsupported {kind} value {value}"),
                })?;
                set.insert(kind.convert(&text)?);
            }
        }
        Ok(constants)
    }

    fn save_unlocked(&self, constants: &ConstantMap) -> Result<(), CacheError> {
        let doc: BTreeMap<&str, Vec<Value>> = constants
            .iter()
            .map(|(kind, values)| (kind.name(), values.iter().map(to_json).collect()))
            .collect();
        DocumentStore::save(&doc, &self.path, false)?;
        debug!(path = %self.path.display(), kinds = doc.len(), "saved constant pool");
        Ok(())
    }
}

/// Per-kind union of `maps`. The result does not depend on iteration order.
pub fn merge_constant_maps<I>(maps: I) -> ConstantMap
where
    I: IntoIterator<Item = ConstantMap>,
{
    let mut merged = ConstantMap::new();
    for map in maps {
        for (kind, values) in map {
            merged.entry(kind).or_default().extend(values);
        }
    }
    merged
}

fn log_counts(stage: &str, constants: &ConstantMap) {
    for (kind, values) in constants {
        info!(stage, kind = %kind, count = values.len(), "constant pool");
    }
}

/// Native JSON form of a value. Non-finite floats become strings.
fn to_json(value: &PrimitiveValue) -> Value {
    match value {
        PrimitiveValue::Short(v) => Value::from(*v),
        PrimitiveValue::Integer(v) => Value::from(*v),
        PrimitiveValue::Long(v) => Value::from(*v),
        PrimitiveValue::Byte(v) => Value::from(*v),
        PrimitiveValue::Boolean(b) => Value::Bool(*b),
        PrimitiveValue::Character(_) | PrimitiveValue::String(_) => Value::String(value.to_raw()),
        // Shortest float text widened to f64, so `1.1f32` is stored as 1.1.
        PrimitiveValue::Float(_) | PrimitiveValue::Double(_) => value
            .to_raw()
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map_or_else(|| Value::String(value.to_raw()), Value::Number),
    }
}

fn raw_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
