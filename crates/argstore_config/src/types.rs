//! Configuration types deserialized from `argstore.toml`.

use serde::Deserialize;
use std::path::PathBuf;

/// The top-level configuration parsed from `argstore.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Store location and document formatting.
    pub store: StoreSection,
    /// Fuzz cache behavior.
    #[serde(default)]
    pub fuzz: FuzzSection,
}

impl StoreConfig {
    /// Creates a configuration rooted at `root` with every other setting at its default.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            store: StoreSection {
                root: root.into(),
                pretty_index: true,
            },
            fuzz: FuzzSection::default(),
        }
    }
}

/// The `[store]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreSection {
    /// Base directory under which every dataset gets its own subdirectory.
    pub root: PathBuf,
    /// Pretty-print the fuzz index document.
    #[serde(default = "default_true")]
    pub pretty_index: bool,
}

/// The `[fuzz]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct FuzzSection {
    /// What happens to the previous blob when a key is written again.
    #[serde(default)]
    pub on_overwrite: OverwritePolicy,
    /// Clear the fuzz cache before a regeneration pass.
    #[serde(default = "default_true")]
    pub reset_before_regenerate: bool,
}

impl Default for FuzzSection {
    fn default() -> Self {
        Self {
            on_overwrite: OverwritePolicy::default(),
            reset_before_regenerate: true,
        }
    }
}

/// Handling of the previously indexed blob when a fuzz key is overwritten.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OverwritePolicy {
    /// Delete the prior blob once the index points at the new token (default).
    #[default]
    Reclaim,
    /// Leave the prior blob on disk, unreachable through the index.
    Orphan,
}

fn default_true() -> bool {
    true
}
