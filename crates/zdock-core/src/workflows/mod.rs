//! # Workflows Module
//!
//! End-to-end operations, one per tool. Each loads the result file, locates
//! the structure files it needs and hands the parsed data to the engine.
//!
//! - **Pruning** ([`prune`]) - RMSD clustering of a whole result file
//! - **Complex generation** ([`ligand`], [`multimer`]) - writes the predicted
//!   ligand, complex or multimer for one prediction
//! - **Splitting** ([`split`]) - chunking result files and joining them back
//! - **Constraint filtering** ([`filter`]) and **centroids** ([`centroids`])
//!
//! Structure file names recorded in a result header are resolved relative to
//! the result file; see [`resolve_companion`].

pub mod centroids;
pub mod error;
pub mod filter;
pub mod ligand;
pub mod multimer;
pub mod prune;
pub mod split;

use crate::core::io::pdb::PdbFile;
use crate::core::io::traits::FileFormat;
use crate::core::io::zdock::ZdockFile;
use crate::core::models::document::ResultDocument;
use crate::core::models::structure::Structure;
use error::WorkflowError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Locates a structure file named in the header of the result file at `result_path`.
///
/// Absolute names are used as given; relative names are taken relative to the
/// directory holding the result file. The returned path is canonical.
pub fn resolve_companion(result_path: &Path, name: &str) -> Result<PathBuf, WorkflowError> {
    let candidate = Path::new(name);
    let path = match result_path.parent() {
        Some(dir) if !candidate.is_absolute() => dir.join(candidate),
        _ => candidate.to_path_buf(),
    };
    path.canonicalize()
        .map_err(|source| WorkflowError::Resolve { path, source })
}

/// Picks the explicitly given structure path or resolves the header's file name.
pub(crate) fn structure_path(
    result_path: &Path,
    explicit: Option<&Path>,
    header_name: &str,
) -> Result<PathBuf, WorkflowError> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => resolve_companion(result_path, header_name),
    }
}

pub(crate) fn load_document(path: &Path) -> Result<ResultDocument, WorkflowError> {
    debug!(path = %path.display(), "Reading result file.");
    ZdockFile::read_from_path(path).map_err(|source| WorkflowError::ResultFile {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn load_structure(path: &Path) -> Result<Structure, WorkflowError> {
    debug!(path = %path.display(), "Reading structure file.");
    PdbFile::read_from_path(path).map_err(|source| WorkflowError::StructureFile {
        path: path.to_path_buf(),
        source,
    })
}
