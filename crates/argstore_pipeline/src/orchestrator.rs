//! Batch extraction and fuzz-cache regeneration over many files.

use std::path::{Path, PathBuf};

use argstore_cache::{ConstantMap, DatasetStore, DatasetStoreRegistry, FillOutcome};
use argstore_config::StoreConfig;
use tracing::{debug, error, info};

use crate::collaborators::{
    ArgumentGenerator, ConstantExtractor, FunctionMetadataProvider, RawConstants,
};
use crate::error::PipelineError;

/// Counts from a regeneration pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegenerationSummary {
    /// Files processed.
    pub files: usize,
    /// Functions newly stored in the cache.
    pub stored: usize,
    /// Functions whose key was already cached.
    pub present: usize,
    /// Functions for which the generator produced nothing.
    pub empty: usize,
    /// Ineligible functions.
    pub skipped: usize,
}

impl std::ops::AddAssign for RegenerationSummary {
    fn add_assign(&mut self, other: Self) {
        self.files += other.files;
        self.stored += other.stored;
        self.present += other.present;
        self.empty += other.empty;
        self.skipped += other.skipped;
    }
}

/// Drives the external collaborators and writes their results to dataset stores.
pub struct Orchestrator<'r> {
    registry: &'r DatasetStoreRegistry,
    reset_before_regenerate: bool,
}

impl<'r> Orchestrator<'r> {
    /// Creates an orchestrator that clears the fuzz cache before each regeneration.
    pub fn new(registry: &'r DatasetStoreRegistry) -> Self {
        Self {
            registry,
            reset_before_regenerate: true,
        }
    }

    /// Creates an orchestrator honoring the `[fuzz]` settings of `config`.
    pub fn from_config(registry: &'r DatasetStoreRegistry, config: &StoreConfig) -> Self {
        Self {
            registry,
            reset_before_regenerate: config.fuzz.reset_before_regenerate,
        }
    }

    /// Extracts the constants of every file and merges them into the dataset's pool.
    ///
    /// The first extraction or conversion failure aborts the batch before
    /// anything is saved. Returns the pool as reloaded after the save.
    pub fn extract_and_accumulate<X>(
        &self,
        extractor: &X,
        files: &[PathBuf],
        dataset: &str,
    ) -> Result<ConstantMap, PipelineError>
    where
        X: ConstantExtractor + ?Sized,
    {
        info!(dataset, files = files.len(), "extracting constants");
        let mut per_file = Vec::with_capacity(files.len());
        for path in files {
            let raw = extractor.extract(path).map_err(|source| {
                error!(path = %path.display(), error = %source, "failed to process file");
                PipelineError::Extraction {
                    path: path.clone(),
                    source,
                }
            })?;
            per_file.push(convert_constants(path, raw)?);
        }

        let store = self.registry.get_or_create(dataset)?;
        Ok(store.pool().merge_from_files(per_file)?)
    }

    /// Rebuilds the dataset's fuzz cache from the functions of `files`.
    ///
    /// Runs to completion or stops at the first collaborator or store error.
    pub fn regenerate_fuzz_arguments<M, G>(
        &self,
        provider: &M,
        generator: &G,
        files: &[PathBuf],
        dataset: &str,
    ) -> Result<RegenerationSummary, PipelineError>
    where
        M: FunctionMetadataProvider + ?Sized,
        G: ArgumentGenerator + ?Sized,
    {
        let store = self.registry.get_or_create(dataset)?;
        if self.reset_before_regenerate {
            store.fuzz().delete_all()?;
        }
        info!(dataset, files = files.len(), "generating fuzzed arguments");

        let mut summary = RegenerationSummary::default();
        for path in files {
            summary += self.generate_for_file(&store, provider, generator, path)?;
        }
        info!(
            dataset,
            stored = summary.stored,
            present = summary.present,
            empty = summary.empty,
            skipped = summary.skipped,
            "fuzzed arguments generated"
        );
        Ok(summary)
    }

    /// Fills the cache for the eligible functions of one file.
    pub fn generate_for_file<M, G>(
        &self,
        store: &DatasetStore,
        provider: &M,
        generator: &G,
        path: &Path,
    ) -> Result<RegenerationSummary, PipelineError>
    where
        M: FunctionMetadataProvider + ?Sized,
        G: ArgumentGenerator + ?Sized,
    {
        debug!(path = %path.display(), "generating for file");
        let dataset = store.name();
        let functions = provider
            .functions_of(dataset, path)
            .map_err(|source| PipelineError::Metadata {
                path: path.to_path_buf(),
                source,
            })?;

        let mut summary = RegenerationSummary {
            files: 1,
            ..Default::default()
        };
        for function in &functions {
            let Some(key) = function.cache_key() else {
                debug!(signature = %function.signature, "skipping ineligible function");
                summary.skipped += 1;
                continue;
            };
            let outcome = store.fuzz().put_if_absent_with(key.as_str(), || {
                debug!(key = %key, "generating arguments");
                generator
                    .generate(dataset, function)
                    .map_err(|source| PipelineError::Generation {
                        key: key.clone(),
                        source,
                    })
            })?;
            match outcome {
                FillOutcome::Stored(_) => summary.stored += 1,
                FillOutcome::Present => summary.present += 1,
                FillOutcome::Empty => summary.empty += 1,
            }
        }
        Ok(summary)
    }
}

fn convert_constants(path: &Path, raw: RawConstants) -> Result<ConstantMap, PipelineError> {
    let mut constants = ConstantMap::new();
    for (kind, literals) in raw {
        let values = constants.entry(kind).or_default();
        for literal in &literals {
            let value = kind.convert(literal).map_err(|source| PipelineError::Conversion {
                path: path.to_path_buf(),
                source,
            })?;
            values.insert(value);
        }
    }
    Ok(constants)
}
