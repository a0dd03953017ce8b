//! Reconstruction of real-space poses from docking result records.
//!
//! The search stores most rotations as the inverse of the rotation it applied,
//! so the compositions below use `reverse = true` wherever the search did.
//! Both engines pre-compute the transforms that do not depend on a record.

use crate::core::models::document::{
    DocumentRef, GridParameters, MultimerDocument, PairwiseDocument, ResultDocument,
};
use crate::core::models::record::{Dialect, ResultRecord};
use crate::core::utils::geometry::{
    PoseMatrix, Transform, apply_transform, boxed_grid_coord, rotation, translation,
};
use crate::engine::error::EngineError;
use nalgebra::Vector3;
use std::f64::consts::PI;

/// Real-space displacement encoded by a record's grid cells.
fn grid_displacement(grid: &GridParameters, record: &ResultRecord) -> Vector3<f64> {
    grid.spacing * boxed_grid_coord(&record.translation, grid.box_size)
}

/// Pose engine for two-body results: moves the ligand into the receptor frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PairwiseTransform {
    grid: GridParameters,
    switched: bool,
    t0: Transform,
    t1: Transform,
    t2: Transform,
    receptor_shift: Transform,
    receptor_unrotate: Option<Transform>,
}

impl PairwiseTransform {
    pub fn new(doc: &PairwiseDocument) -> Self {
        let receptor = &doc.receptor;
        let ligand = &doc.ligand;
        let receptor_unrotate = if doc.layout.is_fixed() {
            None
        } else {
            Some(rotation(&receptor.rotation, true))
        };
        Self {
            grid: doc.grid,
            switched: doc.layout.is_switched(),
            t0: translation(&-ligand.translation) * rotation(&receptor.rotation, false),
            t1: translation(&receptor.translation) * rotation(&ligand.rotation, true),
            t2: rotation(&ligand.rotation, false) * translation(&-ligand.translation),
            receptor_shift: translation(&receptor.translation),
            receptor_unrotate,
        }
    }

    pub fn from_document(doc: &ResultDocument) -> Result<Self, EngineError> {
        doc.as_pairwise()
            .map(Self::new)
            .ok_or(EngineError::DialectMismatch {
                expected: Dialect::Pairwise,
                found: doc.dialect(),
            })
    }

    /// The full transform taking ligand input coordinates to the pose of `record`.
    pub fn pose_transform(&self, record: &ResultRecord) -> Transform {
        let displacement = grid_displacement(&self.grid, record);
        if self.switched {
            self.t1 * rotation(&record.rotation, true) * translation(&displacement) * self.t0
        } else {
            let pose = self.receptor_shift
                * translation(&-displacement)
                * rotation(&record.rotation, false)
                * self.t2;
            match &self.receptor_unrotate {
                Some(unrotate) => unrotate * pose,
                None => pose,
            }
        }
    }

    pub fn tx_pose(&self, matrix: &PoseMatrix, record: &ResultRecord) -> PoseMatrix {
        apply_transform(&self.pose_transform(record), matrix)
    }
}

/// Pose engine for symmetric multimer results: places each component of the ring.
#[derive(Debug, Clone, PartialEq)]
pub struct MultimerTransform {
    grid: GridParameters,
    symmetry: usize,
    beta: f64,
    alpha: f64,
    factor: f64,
    t0: Transform,
}

impl MultimerTransform {
    pub fn new(doc: &MultimerDocument) -> Self {
        let beta = 2.0 * PI / doc.symmetry as f64;
        let alpha = (PI - beta) / 2.0;
        let structure = &doc.structure;
        Self {
            grid: doc.grid,
            symmetry: doc.symmetry,
            beta,
            alpha,
            factor: 1.0 / (2.0 * alpha.cos()),
            t0: rotation(&structure.rotation, true) * translation(&-structure.translation),
        }
    }

    pub fn from_document(doc: &ResultDocument) -> Result<Self, EngineError> {
        doc.as_multimer()
            .map(Self::new)
            .ok_or(EngineError::DialectMismatch {
                expected: Dialect::Multimer,
                found: doc.dialect(),
            })
    }

    pub fn symmetry(&self) -> usize {
        self.symmetry
    }

    /// The transform placing component `n` of the multimer described by `record`.
    pub fn component_transform(
        &self,
        record: &ResultRecord,
        n: usize,
    ) -> Result<Transform, EngineError> {
        if n >= self.symmetry {
            return Err(EngineError::ComponentOutOfRange {
                requested: n,
                available: self.symmetry,
            });
        }
        let scaled = self.factor * grid_displacement(&self.grid, record);
        let displacement = rotation(&[0.0, 0.0, self.alpha], true).rotation * scaled;
        let ring = rotation(&[0.0, 0.0, self.beta * n as f64], true);
        let orient = rotation(&[record.rotation[0], record.rotation[1], 0.0], true);
        Ok(ring * translation(&displacement) * orient * self.t0)
    }

    pub fn tx_component(
        &self,
        matrix: &PoseMatrix,
        record: &ResultRecord,
        n: usize,
    ) -> Result<PoseMatrix, EngineError> {
        Ok(apply_transform(&self.component_transform(record, n)?, matrix))
    }
}

/// A pose engine for either dialect.
#[derive(Debug, Clone, PartialEq)]
pub enum PoseEngine {
    Pairwise(PairwiseTransform),
    Multimer(MultimerTransform),
}

impl PoseEngine {
    pub fn for_document(doc: &ResultDocument) -> Self {
        match doc.kind() {
            DocumentRef::Pairwise(pairwise) => PoseEngine::Pairwise(PairwiseTransform::new(pairwise)),
            DocumentRef::Multimer(multimer) => PoseEngine::Multimer(MultimerTransform::new(multimer)),
        }
    }
}
