//! Per-class function metadata documents.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::info;

use crate::dataset::{is_single_component, validate_name};
use crate::document::DocumentStore;
use crate::error::CacheError;

/// Subdirectory of a dataset holding function metadata.
const FUNCTIONS_DIR: &str = "functions";

/// Stores the function metadata collected for each analyzed class.
///
/// Documents live at `<root>/<dataset>/functions/<package path>/<class>.json`,
/// where the package path is the dotted package name with `.` turned into
/// directory separators. Names that would resolve outside the dataset's
/// `functions` directory are rejected.
pub struct MetadataStore {
    root: PathBuf,
}

impl MetadataStore {
    /// Creates a metadata store under the store root.
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// Returns the document path for a class.
    pub fn class_path(&self, dataset: &str, package: &str, class: &str) -> Result<PathBuf, CacheError> {
        validate_name(dataset)?;
        let invalid = || CacheError::InvalidClassPath {
            package: package.to_string(),
            class: class.to_string(),
        };
        if !is_single_component(class) || class.contains('/') {
            return Err(invalid());
        }
        let mut path = self.root.join(dataset).join(FUNCTIONS_DIR);
        for segment in package.split('.').filter(|s| !s.is_empty()) {
            if !is_single_component(segment) || segment.contains('/') {
                return Err(invalid());
            }
            path.push(segment);
        }
        Ok(path.join(format!("{class}.json")))
    }

    /// Writes the metadata document for a class, replacing any previous one.
    pub fn save_class_functions(
        &self,
        dataset: &str,
        package: &str,
        class: &str,
        metadata: &Value,
    ) -> Result<(), CacheError> {
        let path = self.class_path(dataset, package, class)?;
        info!(dataset, package, class, "writing function metadata");
        DocumentStore::save(metadata, &path, true)
    }

    /// Reads the metadata document for a class.
    pub fn load_class_functions(&self, dataset: &str, package: &str, class: &str) -> Result<Value, CacheError> {
        DocumentStore::load(&self.class_path(dataset, package, class)?)
    }
}
