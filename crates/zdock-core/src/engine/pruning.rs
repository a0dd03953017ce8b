use crate::core::models::document::ResultDocument;
use crate::core::models::record::ResultRecord;
use crate::core::utils::geometry::{PoseMatrix, calculate_rmsd};
use crate::engine::config::ClusterOutput;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::transform::PoseEngine;
use serde::Serialize;
use tracing::{debug, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Component 0 of one multimer pose is compared with components 0 and 2 of
/// another, which sit on either side of component 1 in the ring.
const MULTIMER_MATCH_COMPONENTS: [usize; 2] = [0, 2];

fn rmsd(a: &PoseMatrix, b: &PoseMatrix) -> f64 {
    calculate_rmsd(a, b).unwrap_or(f64::INFINITY)
}

/// Pre-computed pose of one record.
#[derive(Debug, Clone)]
enum CachedPose {
    Single(PoseMatrix),
    /// Components 0 and 2 of a multimer.
    Paired([PoseMatrix; 2]),
}

impl CachedPose {
    fn distance(&self, other: &CachedPose) -> f64 {
        match (self, other) {
            (CachedPose::Single(a), CachedPose::Single(b)) => rmsd(a, b),
            (CachedPose::Paired([seed, _]), CachedPose::Paired([first, last])) => {
                rmsd(seed, first).min(rmsd(seed, last))
            }
            _ => f64::INFINITY,
        }
    }
}

fn compute_pose(
    engine: &PoseEngine,
    reference: &PoseMatrix,
    record: &ResultRecord,
) -> Result<CachedPose, EngineError> {
    match engine {
        PoseEngine::Pairwise(transform) => Ok(CachedPose::Single(transform.tx_pose(reference, record))),
        PoseEngine::Multimer(transform) => {
            let [a, b] = MULTIMER_MATCH_COMPONENTS;
            Ok(CachedPose::Paired([
                transform.tx_component(reference, record, a)?,
                transform.tx_component(reference, record, b)?,
            ]))
        }
    }
}

/// One row of the cluster report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterSummary {
    pub cluster: usize,
    /// 1-based rank of the representative record.
    pub representative: usize,
    pub score: f64,
    pub population: usize,
}

/// Cluster assignment of every record of a pruned document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PruneOutcome {
    cluster_ids: Vec<usize>,
    representatives: Vec<usize>,
}

impl PruneOutcome {
    /// 1-based cluster id of every record, in record order.
    pub fn cluster_ids(&self) -> &[usize] {
        &self.cluster_ids
    }

    /// Record indices (0-based) of the cluster representatives, in record order.
    pub fn representatives(&self) -> &[usize] {
        &self.representatives
    }

    pub fn num_clusters(&self) -> usize {
        self.representatives.len()
    }

    /// Number of records in each cluster, indexed by `cluster id - 1`.
    pub fn populations(&self) -> Vec<usize> {
        let mut populations = vec![0; self.num_clusters()];
        for &id in &self.cluster_ids {
            populations[id - 1] += 1;
        }
        populations
    }

    /// The document reduced to one representative record per cluster.
    pub fn reduced(&self, doc: &ResultDocument) -> Result<ResultDocument, EngineError> {
        let records = self
            .representatives
            .iter()
            .map(|&i| doc.records()[i])
            .collect();
        Ok(doc.with_records(records)?)
    }

    /// The full document with each record's score replaced by its cluster id.
    pub fn annotated(&self, doc: &ResultDocument) -> Result<ResultDocument, EngineError> {
        let records = doc
            .records()
            .iter()
            .zip(&self.cluster_ids)
            .map(|(record, &id)| record.with_score(id as f64))
            .collect();
        Ok(doc.with_records(records)?)
    }

    pub fn apply(&self, doc: &ResultDocument, output: ClusterOutput) -> Result<ResultDocument, EngineError> {
        match output {
            ClusterOutput::Reduced => self.reduced(doc),
            ClusterOutput::Annotated => self.annotated(doc),
        }
    }

    pub fn summaries(&self, doc: &ResultDocument) -> Vec<ClusterSummary> {
        self.representatives
            .iter()
            .zip(self.populations())
            .enumerate()
            .map(|(index, (&representative, population))| ClusterSummary {
                cluster: index + 1,
                representative: representative + 1,
                score: doc.records()[representative].score,
                population,
            })
            .collect()
    }
}

/// Greedy RMSD clustering of the poses in `doc`.
///
/// Records are visited in order; each unassigned record seeds a new cluster
/// and absorbs every later unassigned record whose pose lies within `cutoff`
/// of it. `reference` holds the coordinates of the moving structure (the
/// ligand, or the multimer subunit) in its input frame.
#[instrument(skip_all, name = "pruning_task")]
pub fn prune(
    doc: &ResultDocument,
    reference: &PoseMatrix,
    cutoff: f64,
    reporter: &ProgressReporter,
) -> Result<PruneOutcome, EngineError> {
    if cutoff.is_nan() {
        return Err(EngineError::InvalidCutoff(cutoff));
    }
    let records = doc.records();
    if records.is_empty() {
        info!("Result document has no records; nothing to prune.");
        return Ok(PruneOutcome::default());
    }
    if reference.ncols() == 0 {
        return Err(EngineError::EmptyReference);
    }
    info!(
        records = records.len(),
        atoms = reference.ncols(),
        cutoff,
        dialect = %doc.dialect(),
        "Pruning poses."
    );

    let engine = PoseEngine::for_document(doc);

    reporter.start_phase("Pose pre-computation", records.len());

    #[cfg(not(feature = "parallel"))]
    let iterator = records.iter();

    #[cfg(feature = "parallel")]
    let iterator = records.par_iter();

    let poses: Vec<CachedPose> = iterator
        .map(|record| {
            let pose = compute_pose(&engine, reference, record);
            reporter.report(Progress::TaskIncrement);
            pose
        })
        .collect::<Result<_, _>>()?;
    reporter.finish_phase();

    let n = poses.len();
    let mut cluster_ids = vec![0usize; n];
    let mut representatives = Vec::new();

    reporter.start_phase("Clustering", n);
    for i in 0..n {
        reporter.report(Progress::TaskIncrement);
        if cluster_ids[i] != 0 {
            continue;
        }
        representatives.push(i);
        let id = representatives.len();
        cluster_ids[i] = id;

        let candidates: Vec<usize> = (i + 1..n).filter(|&j| cluster_ids[j] == 0).collect();

        #[cfg(not(feature = "parallel"))]
        let iterator = candidates.iter();

        #[cfg(feature = "parallel")]
        let iterator = candidates.par_iter();

        let members: Vec<usize> = iterator
            .filter(|&&j| poses[i].distance(&poses[j]) < cutoff)
            .copied()
            .collect();

        for j in members {
            cluster_ids[j] = id;
        }
    }
    reporter.finish_phase();

    let outcome = PruneOutcome {
        cluster_ids,
        representatives,
    };
    debug!(populations = ?outcome.populations(), "Cluster populations.");
    info!(
        clusters = outcome.num_clusters(),
        records = n,
        "Pruning complete."
    );
    Ok(outcome)
}
