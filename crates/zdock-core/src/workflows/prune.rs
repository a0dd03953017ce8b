use super::error::WorkflowError;
use super::{load_document, load_structure, structure_path};
use crate::core::models::document::{DocumentRef, ResultDocument};
use crate::core::models::structure::{AtomFilter, ModelSelection, Structure};
use crate::core::utils::geometry::PoseMatrix;
use crate::engine::config::PruningConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use crate::engine::pruning::{ClusterSummary, prune};
use std::path::Path;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone)]
pub struct PruneResult {
    /// The document to write out: representatives only, or every record annotated.
    pub document: ResultDocument,
    pub summaries: Vec<ClusterSummary>,
}

/// Clusters the predictions of the result file at `result_path`.
///
/// The moving structure (the ligand, or the multimer subunit) is read from
/// `structure` when given, otherwise from the file named in the result header.
#[instrument(skip_all, name = "prune_workflow")]
pub fn run(
    result_path: &Path,
    structure: Option<&Path>,
    config: &PruningConfig,
    reporter: &ProgressReporter,
) -> Result<PruneResult, WorkflowError> {
    let doc = load_document(result_path)?;
    let moving_name = match doc.kind() {
        DocumentRef::Pairwise(pairwise) => &pairwise.ligand.filename,
        DocumentRef::Multimer(multimer) => &multimer.structure.filename,
    };
    let moving = load_structure(&structure_path(result_path, structure, moving_name)?)?;
    let reference = reference_matrix(&moving, config.reference_atoms)?;
    info!(
        dialect = %doc.dialect(),
        records = doc.num_predictions(),
        atoms = reference.ncols(),
        cutoff = config.cutoff,
        "Pruning result file."
    );

    let outcome = prune(&doc, &reference, config.cutoff, reporter)?;
    Ok(PruneResult {
        document: outcome.apply(&doc, config.output)?,
        summaries: outcome.summaries(&doc),
    })
}

/// Coordinates of the first model used for RMSD.
///
/// A backbone selection that matches nothing falls back to every atom.
fn reference_matrix(structure: &Structure, filter: AtomFilter) -> Result<PoseMatrix, WorkflowError> {
    let matrix = structure.coordinates(ModelSelection::First, filter)?;
    if matrix.ncols() > 0 {
        return Ok(matrix);
    }
    if filter == AtomFilter::Backbone {
        warn!("No backbone atoms found in the moving structure; using all atoms for RMSD.");
        let matrix = structure.coordinates(ModelSelection::First, AtomFilter::All)?;
        if matrix.ncols() > 0 {
            return Ok(matrix);
        }
    }
    Err(EngineError::EmptyReference.into())
}

/// Writes one CSV row per cluster.
pub fn write_cluster_report(summaries: &[ClusterSummary], path: &Path) -> Result<(), WorkflowError> {
    let report_error = |source| WorkflowError::Report {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(report_error)?;
    for summary in summaries {
        writer.serialize(summary).map_err(report_error)?;
    }
    writer.flush().map_err(|source| WorkflowError::WriteFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}
