//! # ZDOCK++ Core Library
//!
//! Reads ZDOCK and M-ZDOCK docking result files, rebuilds the predicted complexes from them,
//! and reduces large result sets by RMSD clustering.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Stateless data models (`ResultDocument`, `Structure`),
//!   the result-file, PDB and constraint-file formats, and geometry helpers.
//!
//! - **[`engine`]: The Logic Core.** Pose transform engines for both docking dialects,
//!   RMSD pruning, distance-constraint filtering, centroid generation and document splitting.
//!
//! - **[`workflows`]: The Public API.** One entry point per tool. Each loads the result file,
//!   resolves the structure files it names and runs the engine on them.

pub mod core;
pub mod engine;
pub mod workflows;
