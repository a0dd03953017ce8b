use crate::core::io::constraints::ConstraintError;
use crate::core::io::pdb::PdbError;
use crate::core::io::zdock::ZdockError;
use crate::core::models::document::DocumentError;
use crate::core::models::structure::StructureError;
use crate::engine::config::ConfigError;
use crate::engine::error::EngineError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Failed to read result file '{path}': {source}")]
    ResultFile {
        path: PathBuf,
        #[source]
        source: ZdockError,
    },

    #[error("Failed to read structure file '{path}': {source}")]
    StructureFile {
        path: PathBuf,
        #[source]
        source: PdbError,
    },

    #[error("Failed to read constraint file '{path}': {source}")]
    ConstraintFile {
        path: PathBuf,
        #[source]
        source: ConstraintError,
    },

    #[error("Cannot locate file '{path}': {source}")]
    Resolve {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write '{path}': {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write cluster report '{path}': {source}")]
    Report {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to write result document: {0}")]
    WriteDocument(#[from] ZdockError),

    #[error("Failed to write structure: {0}")]
    WriteStructure(#[from] PdbError),

    #[error("Output error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Result document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Structure error: {0}")]
    Structure(#[from] StructureError),
}
