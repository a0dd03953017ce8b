use crate::core::models::document::ResultDocument;
use crate::core::models::structure::AtomRecord;
use crate::engine::error::EngineError;
use crate::engine::transform::PairwiseTransform;
use nalgebra::{Point3, Vector3};
use tracing::{debug, instrument};

pub const DEFAULT_CENTROID_CHAIN: char = 'Z';

const CENTROID_ATOM: &str = "N";
const CENTROID_RESIDUE: &str = "HOH";

/// Places the ligand centroid for each of the top `count` predictions.
///
/// Returns one HETATM pseudo-atom per prediction whose serial and residue
/// number are the 1-based rank. `count` is capped to the number of records.
#[instrument(skip_all, name = "centroid_task")]
pub fn pose_centroids(
    doc: &ResultDocument,
    ligand_centroid: &Vector3<f64>,
    count: usize,
    chain_id: char,
) -> Result<Vec<AtomRecord>, EngineError> {
    if count < 1 {
        return Err(EngineError::InvalidCount);
    }
    let transform = PairwiseTransform::from_document(doc)?;
    let count = count.min(doc.num_predictions());
    debug!(count, "Generating pose centroids.");

    let origin = Point3::from(*ligand_centroid);
    Ok(doc
        .records()
        .iter()
        .take(count)
        .enumerate()
        .map(|(i, record)| {
            let rank = i + 1;
            let position = transform.pose_transform(record) * origin;
            AtomRecord::hetatm(
                rank as u32,
                CENTROID_ATOM,
                CENTROID_RESIDUE,
                chain_id,
                rank as i32,
                position,
            )
        })
        .collect())
}
