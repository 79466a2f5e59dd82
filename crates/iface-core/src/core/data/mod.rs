//! Static residue and element property tables.

pub mod amino_acids;
pub mod elements;
