pub mod atom_model;
pub mod residue_index;
