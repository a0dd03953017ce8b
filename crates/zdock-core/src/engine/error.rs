use thiserror::Error;

use crate::core::models::document::DocumentError;
use crate::core::models::record::Dialect;
use crate::core::models::structure::StructureError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid prediction {requested}; valid range 1 - {available}")]
    PredictionOutOfRange { requested: usize, available: usize },

    #[error("Invalid component {requested}; valid range 0 - {}", .available.saturating_sub(1))]
    ComponentOutOfRange { requested: usize, available: usize },

    #[error("Expected a {expected} result document, found a {found} one")]
    DialectMismatch { expected: Dialect, found: Dialect },

    #[error("No constraints specified")]
    NoConstraints,

    #[error("Reference structure contains no atoms")]
    EmptyReference,

    #[error("RMSD cutoff must be a number (found {0})")]
    InvalidCutoff(f64),

    #[error("Chunk size must be at least 1")]
    InvalidChunkSize,

    #[error("Cannot name chunk {0}: chunk suffixes are exhausted")]
    TooManyChunks(usize),

    #[error("Number of predictions must be at least 1")]
    InvalidCount,

    #[error("No result documents to merge")]
    NothingToMerge,

    #[error("Structure error: {source}")]
    Structure {
        #[from]
        source: StructureError,
    },

    #[error("Result document error: {source}")]
    Document {
        #[from]
        source: DocumentError,
    },
}
