use super::error::WorkflowError;
use super::{load_document, load_structure, structure_path};
use crate::core::io::pdb::PdbFile;
use crate::core::io::traits::FileFormat;
use crate::core::models::structure::{AtomFilter, ModelSelection, Structure};
use crate::engine::error::EngineError;
use crate::engine::transform::PairwiseTransform;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct LigandOptions {
    /// 1-based index of the prediction to build.
    pub prediction: usize,
    /// Also write the receptor, producing the whole complex.
    pub complex: bool,
    pub receptor: Option<PathBuf>,
    pub ligand: Option<PathBuf>,
    /// Write every record of the structure files instead of only ATOM/HETATM.
    pub all_records: bool,
}

impl Default for LigandOptions {
    fn default() -> Self {
        Self {
            prediction: 1,
            complex: false,
            receptor: None,
            ligand: None,
            all_records: false,
        }
    }
}

/// Writes the ligand (and optionally the receptor) as placed by one prediction.
///
/// Only the first model of the ligand is moved.
#[instrument(skip_all, name = "ligand_workflow")]
pub fn run(
    result_path: &Path,
    options: &LigandOptions,
    out: &mut impl Write,
) -> Result<(), WorkflowError> {
    let doc = load_document(result_path)?;
    let transform = PairwiseTransform::from_document(&doc)?;
    let available = doc.num_predictions();
    if options.prediction < 1 || options.prediction > available {
        return Err(EngineError::PredictionOutOfRange {
            requested: options.prediction,
            available,
        }
        .into());
    }
    let record = &doc.records()[options.prediction - 1];

    let ligand_name = &doc.second()?.filename;
    let mut ligand = load_structure(&structure_path(
        result_path,
        options.ligand.as_deref(),
        ligand_name,
    )?)?;
    let receptor = if options.complex {
        let receptor_name = &doc.first().filename;
        Some(load_structure(&structure_path(
            result_path,
            options.receptor.as_deref(),
            receptor_name,
        )?)?)
    } else {
        None
    };

    let coordinates = ligand.coordinates(ModelSelection::First, AtomFilter::All)?;
    let posed = transform.tx_pose(&coordinates, record);
    ligand.set_coordinates(ModelSelection::First, AtomFilter::All, &posed)?;
    info!(
        prediction = options.prediction,
        atoms = posed.ncols(),
        complex = options.complex,
        "Placed ligand."
    );

    write_structure(&ligand, options.all_records, out)?;
    if let Some(receptor) = &receptor {
        write_structure(receptor, options.all_records, out)?;
    }
    Ok(())
}

pub(crate) fn write_structure(
    structure: &Structure,
    all_records: bool,
    out: &mut impl Write,
) -> Result<(), WorkflowError> {
    if all_records {
        PdbFile::write_to(structure, out)?;
    } else {
        PdbFile::write_atoms_to(structure, out)?;
    }
    Ok(())
}
