//! Contracts for the external components the orchestrator drives.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;

use argstore_cache::FuzzRecord;
use argstore_common::PrimitiveKind;

/// Error type returned by collaborators.
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync>;

/// Raw literal text found in one file, grouped by kind.
pub type RawConstants = BTreeMap<PrimitiveKind, BTreeSet<String>>;

/// Extracts the literal constants of one source file.
pub trait ConstantExtractor {
    /// Returns the literals found in `path`.
    fn extract(&self, path: &Path) -> Result<RawConstants, CollaboratorError>;
}

/// Enumerates the callable functions defined in a source file.
pub trait FunctionMetadataProvider {
    /// Returns the functions of `path` in declaration order.
    fn functions_of(&self, dataset: &str, path: &Path) -> Result<Vec<FunctionInfo>, CollaboratorError>;
}

/// Produces argument tuples for a function.
pub trait ArgumentGenerator {
    /// Returns the generated tuples, or `None` if the function cannot be fuzzed.
    fn generate(&self, dataset: &str, function: &FunctionInfo) -> Result<Option<FuzzRecord>, CollaboratorError>;
}

/// Fingerprint of a function's qualified name and parameter types.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ArgumentKey(String);

impl ArgumentKey {
    /// Wraps an existing key string.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Builds `name(type1,type2,...)` from a qualified name and parameter type tags.
    pub fn from_signature<S: AsRef<str>>(qualified_name: &str, param_types: &[S]) -> Self {
        let params: Vec<&str> = param_types.iter().map(AsRef::as_ref).collect();
        Self(format!("{qualified_name}({})", params.join(",")))
    }

    /// Returns the key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArgumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One function reported by a [`FunctionMetadataProvider`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionInfo {
    /// Human-readable signature.
    pub signature: String,
    /// Whether every parameter type is a primitive kind.
    pub eligible: bool,
    /// Cache key; `None` for ineligible functions.
    pub argument_key: Option<ArgumentKey>,
}

impl FunctionInfo {
    /// Describes a function by qualified name and parameter type tags.
    ///
    /// The function is eligible when every tag resolves through
    /// [`PrimitiveKind::from_type_tag`]; only eligible functions get a key.
    pub fn from_signature<S: AsRef<str>>(qualified_name: &str, param_types: &[S]) -> Self {
        let key = ArgumentKey::from_signature(qualified_name, param_types);
        let eligible = param_types
            .iter()
            .all(|tag| PrimitiveKind::from_type_tag(tag.as_ref()).is_some());
        Self {
            signature: key.as_str().to_string(),
            eligible,
            argument_key: eligible.then_some(key),
        }
    }

    /// Returns the key for eligible functions.
    pub fn cache_key(&self) -> Option<&ArgumentKey> {
        if self.eligible {
            self.argument_key.as_ref()
        } else {
            None
        }
    }
}
