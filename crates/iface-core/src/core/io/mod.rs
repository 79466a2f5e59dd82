//! Provides input functionality for structure file formats.
//!
//! Parsing is a collaborator of the interface engine: it produces the
//! [`MolecularSystem`](crate::core::models::system::MolecularSystem) hierarchy
//! the engine works on, through the [`traits::StructureFile`] contract.

pub mod pdb;
pub mod traits;
