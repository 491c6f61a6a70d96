//! # Core Module
//!
//! Stateless building blocks shared by every workflow.
//!
//! - **File I/O** ([`io`]) - Line classification, fixed-column record access and
//!   grouping of records into residue runs
//! - **Data models** ([`models`]) - The residue index of a file and the
//!   atom-name charge model of one residue
//! - **Utilities** ([`utils`]) - Output path derivation

pub mod io;
pub mod models;
pub mod utils;
