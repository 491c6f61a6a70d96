//! Reading of PQR text files.
//!
//! Every line is classified once by [`pqr::PqrReader`]; records keep their
//! original text so that all output can reproduce the first 54 columns
//! verbatim. [`runs::ResidueRuns`] groups consecutive records into residues.

pub mod pqr;
pub mod runs;
