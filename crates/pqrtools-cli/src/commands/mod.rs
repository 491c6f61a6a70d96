pub mod residues;
pub mod zero_charges;
