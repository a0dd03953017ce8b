use super::error::WorkflowError;
use super::{load_document, load_structure, structure_path};
use crate::core::io::constraints::ConstraintFile;
use crate::core::io::traits::FileFormat;
use crate::core::models::document::{DocumentRef, ResultDocument};
use crate::engine::filter::{ConstraintTargets, filter_by_constraints};
use crate::engine::progress::ProgressReporter;
use std::path::{Path, PathBuf};
use tracing::instrument;

#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    /// Receptor file for pairwise results, or the subunit file for multimer results.
    pub receptor: Option<PathBuf>,
    /// Ligand file for pairwise results; unused for multimer results.
    pub ligand: Option<PathBuf>,
}

/// Keeps the predictions of a result file that satisfy every constraint in
/// `constraints_path`.
#[instrument(skip_all, name = "filter_workflow")]
pub fn run(
    result_path: &Path,
    constraints_path: &Path,
    options: &FilterOptions,
    reporter: &ProgressReporter,
) -> Result<ResultDocument, WorkflowError> {
    let doc = load_document(result_path)?;
    let constraints =
        ConstraintFile::read_from_path(constraints_path).map_err(|source| {
            WorkflowError::ConstraintFile {
                path: constraints_path.to_path_buf(),
                source,
            }
        })?;

    match doc.kind() {
        DocumentRef::Pairwise(pairwise) => {
            let receptor = load_structure(&structure_path(
                result_path,
                options.receptor.as_deref(),
                &pairwise.receptor.filename,
            )?)?;
            let ligand = load_structure(&structure_path(
                result_path,
                options.ligand.as_deref(),
                &pairwise.ligand.filename,
            )?)?;
            let targets = ConstraintTargets::Pairwise {
                receptor: &receptor,
                ligand: &ligand,
            };
            Ok(filter_by_constraints(&doc, &constraints, targets, reporter)?)
        }
        DocumentRef::Multimer(multimer) => {
            let structure = load_structure(&structure_path(
                result_path,
                options.receptor.as_deref(),
                &multimer.structure.filename,
            )?)?;
            let targets = ConstraintTargets::Multimer {
                structure: &structure,
            };
            Ok(filter_by_constraints(&doc, &constraints, targets, reporter)?)
        }
    }
}
