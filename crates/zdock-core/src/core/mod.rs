//! # Core Module
//!
//! Stateless building blocks of the toolkit: the data model for docking
//! results and molecular structures, the file formats they are read from and
//! written to, and pure geometry helpers.
//!
//! - **Data model** ([`models`]) - result documents, records, structure placements, PDB structures
//! - **File I/O** ([`io`]) - result-file parser/serializer, PDB reader/writer, constraint files
//! - **Utilities** ([`utils`]) - Euler rotations, grid unwrapping, RMSD, naming rules
//!
//! Nothing in this module keeps state between calls; the [`crate::engine`]
//! layer composes these pieces into pose transforms and clustering.

pub mod io;
pub mod models;
pub mod utils;
