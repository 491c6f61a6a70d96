//! # Workflows Module
//!
//! Top-level operations on PQR files. Each workflow opens at most one input and
//! one output file at a time, streams through the input, and returns a small
//! report describing what it wrote.
//!
//! - **Charge zeroing** ([`zero_charges`]) - Set the charge column of every
//!   record to zero
//! - **Residue extraction** ([`extract`]) - Copy one residue into its own file
//! - **Charge transplantation** ([`transplant`]) - Copy per-atom charges and radii
//!   from a model file onto one residue, or onto a subset of residues across a
//!   whole file

pub mod extract;
pub mod transplant;
pub mod zero_charges;
