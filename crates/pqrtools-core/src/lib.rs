//! # pqrtools
//!
//! Residue-level editing of PQR files, the fixed-column ATOM/HETATM text format
//! (coordinates, partial charges and radii) read by Poisson-Boltzmann
//! electrostatics solvers such as APBS.
//!
//! ## Layout
//!
//! - **[`core`]: Format and data models.** The fixed-column line reader, residue
//!   run grouping, the residue index and the per-residue atom-name charge model.
//!
//! - **[`engine`]: Configuration and errors.** Settings shared by the workflows
//!   and the error type they return.
//!
//! - **[`workflows`]: The public operations.** Charge zeroing, single-residue
//!   extraction, and transplanting charges from a model file onto a target file.

pub mod core;
pub mod engine;
pub mod workflows;

#[cfg(test)]
pub(crate) mod test_utils;
