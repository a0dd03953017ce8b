use super::error::WorkflowError;
use super::{load_structure, structure_path};
use crate::core::io::zdock::ZdockFile;
use crate::core::models::structure::{AtomRecord, ModelSelection};
use crate::engine::error::EngineError;
use crate::engine::centroids::{DEFAULT_CENTROID_CHAIN, pose_centroids};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct CentroidOptions {
    /// Number of top predictions to place; capped to the number of records.
    pub count: usize,
    pub ligand: Option<PathBuf>,
    pub chain_id: char,
}

impl Default for CentroidOptions {
    fn default() -> Self {
        Self {
            count: 1,
            ligand: None,
            chain_id: DEFAULT_CENTROID_CHAIN,
        }
    }
}

/// Computes the ligand centroid of each of the top predictions.
///
/// Only the first `count` records of the result file are read.
#[instrument(skip_all, name = "centroids_workflow")]
pub fn run(result_path: &Path, options: &CentroidOptions) -> Result<Vec<AtomRecord>, WorkflowError> {
    if options.count < 1 {
        return Err(EngineError::InvalidCount.into());
    }
    let doc = ZdockFile::read_with_limit_from_path(result_path, options.count).map_err(|source| {
        WorkflowError::ResultFile {
            path: result_path.to_path_buf(),
            source,
        }
    })?;
    let ligand = load_structure(&structure_path(
        result_path,
        options.ligand.as_deref(),
        &doc.second()?.filename,
    )?)?;
    let centroid = ligand.centroid(ModelSelection::First)?;
    let atoms = pose_centroids(&doc, &centroid, options.count, options.chain_id)?;
    info!(count = atoms.len(), "Generated pose centroids.");
    Ok(atoms)
}

pub fn write_centroids(atoms: &[AtomRecord], out: &mut impl Write) -> Result<(), WorkflowError> {
    for atom in atoms {
        writeln!(out, "{atom}")?;
    }
    Ok(())
}
