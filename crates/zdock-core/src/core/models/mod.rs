//! # Core Models Module
//!
//! Plain data types shared by the I/O layer and the engine.
//!
//! - [`placement`] - Initial placement of a docked structure (file name, translation, rotation)
//! - [`record`] - A single docking result record and the [`record::Dialect`] it belongs to
//! - [`document`] - The parsed result file: grid, header layout, placements and records
//! - [`structure`] - A molecular structure as an ordered list of PDB records with model ranges
//! - [`constraint`] - Inter-atomic distance restraints used to filter predictions
//!
//! A [`document::ResultDocument`] is either entirely pairwise or entirely multimer; its
//! record list can only be replaced as a whole:
//!
//! ```ignore
//! use zdockpp::core::io::zdock::ZdockFile;
//!
//! let doc = ZdockFile::read_from_path("complex.out")?;
//! let top = doc.with_records(doc.records()[..10].to_vec())?;
//! ```

pub mod constraint;
pub mod document;
pub mod placement;
pub mod record;
pub mod structure;
