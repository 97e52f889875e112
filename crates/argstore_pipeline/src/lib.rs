//! Batch drivers that fill dataset stores from external collaborators.
//!
//! The [`Orchestrator`] runs constant extraction over a file list and merges
//! the results into the dataset's constant pool, and regenerates the fuzz
//! cache by asking a metadata provider for each file's functions and an
//! argument generator for each function not yet cached.

#![warn(missing_docs)]

pub mod collaborators;
pub mod error;
pub mod orchestrator;

pub use collaborators::{
    ArgumentGenerator, ArgumentKey, CollaboratorError, ConstantExtractor, FunctionInfo,
    FunctionMetadataProvider, RawConstants,
};
pub use error::PipelineError;
pub use orchestrator::{Orchestrator, RegenerationSummary};
