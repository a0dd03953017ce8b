use super::error::WorkflowError;
use super::ligand::write_structure;
use super::{load_document, load_structure, structure_path};
use crate::core::models::structure::{AtomFilter, ModelSelection};
use crate::core::utils::identifiers::{component_chain_id, max_component_chains};
use crate::engine::error::EngineError;
use crate::engine::transform::MultimerTransform;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct MultimerOptions {
    /// 1-based index of the prediction to build.
    pub prediction: usize,
    /// Component to write; every component when `None`.
    pub component: Option<usize>,
    pub structure: Option<PathBuf>,
    /// Write every record of the structure file instead of only ATOM/HETATM.
    pub all_records: bool,
}

impl Default for MultimerOptions {
    fn default() -> Self {
        Self {
            prediction: 1,
            component: None,
            structure: None,
            all_records: false,
        }
    }
}

/// Writes one component, or the whole ring, of a multimer prediction.
///
/// Component `i` is written with chain id `A..Z a..z` at position `i`. When the
/// whole ring is written, atom serials are renumbered consecutively across it.
#[instrument(skip_all, name = "multimer_workflow")]
pub fn run(
    result_path: &Path,
    options: &MultimerOptions,
    out: &mut impl Write,
) -> Result<(), WorkflowError> {
    let doc = load_document(result_path)?;
    let transform = MultimerTransform::from_document(&doc)?;
    let available = doc.num_predictions();
    if options.prediction < 1 || options.prediction > available {
        return Err(EngineError::PredictionOutOfRange {
            requested: options.prediction,
            available,
        }
        .into());
    }
    let symmetry = transform.symmetry();
    let out_of_range = |requested| EngineError::ComponentOutOfRange {
        requested,
        available: symmetry,
    };
    let components: Vec<usize> = match options.component {
        Some(m) if m >= symmetry || m >= max_component_chains() => return Err(out_of_range(m).into()),
        Some(m) => vec![m],
        None if symmetry > max_component_chains() => {
            return Err(out_of_range(max_component_chains()).into());
        }
        None => (0..symmetry).collect(),
    };
    let record = &doc.records()[options.prediction - 1];

    let mut structure = load_structure(&structure_path(
        result_path,
        options.structure.as_deref(),
        &doc.structure()?.filename,
    )?)?;
    let coordinates = structure.coordinates(ModelSelection::First, AtomFilter::All)?;
    let renumber = options.component.is_none();
    let mut serial = 0;

    for &component in &components {
        let chain_id = component_chain_id(component).ok_or_else(|| out_of_range(component))?;
        let posed = transform.tx_component(&coordinates, record, component)?;
        structure.set_coordinates(ModelSelection::First, AtomFilter::All, &posed)?;
        for atom in structure.atoms_mut() {
            atom.chain_id = chain_id;
            if renumber {
                serial += 1;
                atom.serial = serial;
            }
        }
        write_structure(&structure, options.all_records, out)?;
    }
    info!(
        prediction = options.prediction,
        components = components.len(),
        symmetry,
        "Built multimer."
    );
    Ok(())
}
