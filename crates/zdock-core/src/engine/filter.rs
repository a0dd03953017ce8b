use crate::core::models::constraint::Constraint;
use crate::core::models::document::ResultDocument;
use crate::core::models::record::ResultRecord;
use crate::core::models::structure::Structure;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::transform::{MultimerTransform, PairwiseTransform};
use nalgebra::Point3;
use tracing::{info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Structures the constraint atoms are looked up in.
#[derive(Debug, Clone, Copy)]
pub enum ConstraintTargets<'a> {
    /// First atom of each constraint in the receptor, second in the ligand.
    Pairwise {
        receptor: &'a Structure,
        ligand: &'a Structure,
    },
    /// Both atoms in the single multimer subunit.
    Multimer { structure: &'a Structure },
}

/// Atom positions of one constraint in the input frames.
struct ResolvedConstraint<'c> {
    constraint: &'c Constraint,
    first: Point3<f64>,
    second: Point3<f64>,
}

enum Measure {
    Pairwise(PairwiseTransform),
    Multimer(MultimerTransform),
}

impl Measure {
    fn distance(&self, c: &ResolvedConstraint, record: &ResultRecord) -> Result<f64, EngineError> {
        match self {
            Measure::Pairwise(transform) => {
                let moved = transform.pose_transform(record) * c.second;
                Ok((c.first - moved).norm())
            }
            // The first atom is placed on component 1 and the second on both of its neighbours.
            Measure::Multimer(transform) => {
                let first = transform.component_transform(record, 1)? * c.first;
                let left = transform.component_transform(record, 0)? * c.second;
                let right = transform.component_transform(record, 2)? * c.second;
                Ok((first - left).norm().min((first - right).norm()))
            }
        }
    }
}

fn resolve<'c>(
    constraints: &'c [Constraint],
    targets: ConstraintTargets,
) -> Result<Vec<ResolvedConstraint<'c>>, EngineError> {
    let (first_in, second_in) = match targets {
        ConstraintTargets::Pairwise { receptor, ligand } => (receptor, ligand),
        ConstraintTargets::Multimer { structure } => (structure, structure),
    };
    constraints
        .iter()
        .map(|constraint| {
            Ok(ResolvedConstraint {
                constraint,
                first: first_in.find_atom(&constraint.first)?.position,
                second: second_in.find_atom(&constraint.second)?.position,
            })
        })
        .collect()
}

/// Keeps the records whose poses satisfy every distance constraint.
///
/// Record order is preserved.
#[instrument(skip_all, name = "constraint_filter_task")]
pub fn filter_by_constraints(
    doc: &ResultDocument,
    constraints: &[Constraint],
    targets: ConstraintTargets,
    reporter: &ProgressReporter,
) -> Result<ResultDocument, EngineError> {
    if constraints.is_empty() {
        return Err(EngineError::NoConstraints);
    }
    let measure = match targets {
        ConstraintTargets::Pairwise { .. } => Measure::Pairwise(PairwiseTransform::from_document(doc)?),
        ConstraintTargets::Multimer { .. } => Measure::Multimer(MultimerTransform::from_document(doc)?),
    };
    let resolved = resolve(constraints, targets)?;
    info!(
        constraints = resolved.len(),
        records = doc.num_predictions(),
        "Filtering predictions by distance constraints."
    );

    reporter.start_phase("Constraint filtering", doc.num_predictions());

    #[cfg(not(feature = "parallel"))]
    let iterator = doc.records().iter();

    #[cfg(feature = "parallel")]
    let iterator = doc.records().par_iter();

    let verdicts: Vec<bool> = iterator
        .map(|record| {
            reporter.report(Progress::TaskIncrement);
            resolved.iter().try_fold(true, |ok, c| {
                if !ok {
                    return Ok(false);
                }
                let d = measure.distance(c, record)?;
                Ok(c.constraint.is_satisfied_by(d))
            })
        })
        .collect::<Result<_, EngineError>>()?;
    reporter.finish_phase();

    let kept: Vec<ResultRecord> = doc
        .records()
        .iter()
        .zip(verdicts)
        .filter_map(|(record, keep)| keep.then_some(*record))
        .collect();
    info!(kept = kept.len(), "Constraint filtering complete.");
    Ok(doc.with_records(kept)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::constraint::{AtomCoord, ConstraintKind};
    use crate::core::models::document::{GridParameters, HeaderLayout, MultimerDocument, PairwiseDocument};
    use crate::core::models::placement::StructurePlacement;
    use crate::core::models::structure::{AtomRecord, Record};
    use nalgebra::Vector3;

    fn structure(atoms: &[(u32, &str, char, [f64; 3])]) -> Structure {
        Structure::new(
            atoms
                .iter()
                .map(|&(serial, name, chain, [x, y, z])| {
                    Record::Atom(AtomRecord::hetatm(serial, name, "ALA", chain, 1, Point3::new(x, y, z)))
                })
                .collect(),
        )
    }

    fn coord(serial: u32, name: &str, chain: char) -> AtomCoord {
        AtomCoord {
            serial,
            atom_name: name.to_string(),
            residue_name: "ALA".to_string(),
            chain_id: chain,
            residue_seq: 1,
        }
    }

    fn pairwise_doc() -> ResultDocument {
        let origin = |name: &str| StructurePlacement::new(name, Vector3::zeros(), [0.0; 3]);
        PairwiseDocument::new(
            GridParameters {
                box_size: 100,
                spacing: 1.0,
            },
            HeaderLayout::Legacy,
            origin("rec.pdb"),
            origin("lig.pdb"),
            vec![
                ResultRecord::pairwise([0.0; 3], [0, 0, 0], 3.0),
                ResultRecord::pairwise([0.0; 3], [95, 0, 0], 2.0),
                ResultRecord::pairwise([0.0; 3], [90, 0, 0], 1.0),
            ],
        )
        .unwrap()
        .into()
    }

    #[test]
    fn keeps_poses_within_max_distance() {
        let receptor = structure(&[(1, "CA", 'A', [-2.0, 0.0, 0.0])]);
        let ligand = structure(&[(7, "N", 'B', [0.0, 0.0, 0.0])]);
        let constraints = vec![Constraint {
            first: coord(1, "CA", 'A'),
            second: coord(7, "N", 'B'),
            distance: 6.0,
            kind: ConstraintKind::Max,
        }];
        let filtered = filter_by_constraints(
            &pairwise_doc(),
            &constraints,
            ConstraintTargets::Pairwise {
                receptor: &receptor,
                ligand: &ligand,
            },
            &ProgressReporter::new(),
        )
        .unwrap();
        let scores: Vec<f64> = filtered.records().iter().map(|r| r.score).collect();
        // The ligand atom ends up at x = 0, 5 and 10.
        assert_eq!(scores, vec![3.0]);
    }

    #[test]
    fn min_constraint_rejects_close_poses() {
        let receptor = structure(&[(1, "CA", 'A', [-2.0, 0.0, 0.0])]);
        let ligand = structure(&[(7, "N", 'B', [0.0, 0.0, 0.0])]);
        let constraints = vec![Constraint {
            first: coord(1, "CA", 'A'),
            second: coord(7, "N", 'B'),
            distance: 4.0,
            kind: ConstraintKind::Min,
        }];
        let filtered = filter_by_constraints(
            &pairwise_doc(),
            &constraints,
            ConstraintTargets::Pairwise {
                receptor: &receptor,
                ligand: &ligand,
            },
            &ProgressReporter::new(),
        )
        .unwrap();
        let scores: Vec<f64> = filtered.records().iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![2.0, 1.0]);
    }

    #[test]
    fn no_constraints_is_an_error() {
        let s = structure(&[]);
        let result = filter_by_constraints(
            &pairwise_doc(),
            &[],
            ConstraintTargets::Pairwise {
                receptor: &s,
                ligand: &s,
            },
            &ProgressReporter::new(),
        );
        assert_eq!(result, Err(EngineError::NoConstraints));
    }

    #[test]
    fn unknown_atom_is_an_error() {
        let receptor = structure(&[(1, "CA", 'A', [5.0, 0.0, 0.0])]);
        let ligand = structure(&[(7, "N", 'B', [0.0, 0.0, 0.0])]);
        let constraints = vec![Constraint {
            first: coord(1, "CB", 'A'),
            second: coord(7, "N", 'B'),
            distance: 6.0,
            kind: ConstraintKind::Max,
        }];
        let result = filter_by_constraints(
            &pairwise_doc(),
            &constraints,
            ConstraintTargets::Pairwise {
                receptor: &receptor,
                ligand: &ligand,
            },
            &ProgressReporter::new(),
        );
        assert!(matches!(result, Err(EngineError::Structure { .. })));
    }

    #[test]
    fn multimer_distance_uses_nearest_neighbour_component() {
        let doc: ResultDocument = MultimerDocument::new(
            GridParameters {
                box_size: 100,
                spacing: 1.0,
            },
            4,
            StructurePlacement::new("m.pdb", Vector3::zeros(), [0.0; 3]),
            vec![ResultRecord::multimer([0.0, 0.0], [0, 0], 1.0)],
        )
        .unwrap()
        .into();
        // Subunit atom at (1, 0, 0): component n sits at Rz(-n * 90 deg) of it.
        let subunit = structure(&[(1, "CA", 'A', [1.0, 0.0, 0.0])]);
        let constraint = |distance| Constraint {
            first: coord(1, "CA", 'A'),
            second: coord(1, "CA", 'A'),
            distance,
            kind: ConstraintKind::Max,
        };
        let run = |c: Constraint| {
            filter_by_constraints(
                &doc,
                &[c],
                ConstraintTargets::Multimer { structure: &subunit },
                &ProgressReporter::new(),
            )
            .unwrap()
            .num_predictions()
        };
        // Component 1 at (0,-1,0) is sqrt(2) from both neighbours.
        assert_eq!(run(constraint(1.5)), 1);
        assert_eq!(run(constraint(1.4)), 0);
    }
}
