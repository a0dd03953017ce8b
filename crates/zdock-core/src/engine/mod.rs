//! # Engine Module
//!
//! Turns parsed result documents into poses and decisions about them.
//!
//! ## Overview
//!
//! - **Pose reconstruction** ([`transform`]) - pairwise and multimer transform engines that
//!   pre-compute the record-independent parts of every pose
//! - **Pruning** ([`pruning`]) - greedy RMSD clustering of all poses in a document
//! - **Constraint filtering** ([`filter`]) - keeps poses that satisfy inter-atomic distance bounds
//! - **Centroids** ([`centroids`]) - pseudo-atoms marking the ligand centre of the top poses
//! - **Splitting** ([`split`]) - chunking and concatenation of result documents
//! - **Configuration** ([`config`]), **progress reporting** ([`progress`]) and
//!   **errors** ([`error`])
//!
//! Work that scales with the number of records runs on `rayon` when the `parallel`
//! feature is enabled. Results are identical either way.

pub mod centroids;
pub mod config;
pub mod error;
pub mod filter;
pub mod progress;
pub mod pruning;
pub mod split;
pub mod transform;
