//! Reading and writing of the text formats handled by the toolkit.
//!
//! All formats implement the [`traits::FileFormat`] trait, which provides
//! path-based convenience wrappers around a reader/writer pair:
//!
//! - [`zdock`] - docking result files (pairwise and multimer dialects)
//! - [`pdb`] - fixed-column PDB structures
//! - [`constraints`] - inter-atomic distance constraints

pub mod constraints;
pub mod pdb;
pub mod traits;
pub mod zdock;
