//! # Core Models Module
//!
//! This module contains the data structures used to represent parsed
//! macromolecular structures in IFACE++.
//!
//! ## Overview
//!
//! A [`system::MolecularSystem`] holds one model of a structure. It owns its
//! chains, residues and atoms through slot-map arenas; children refer back to
//! their parents through typed keys ([`ids`]) that are used for lookups only.
//!
//! ## Key Components
//!
//! - [`atom`] - Atom name, element, coordinates and optional SASA annotation
//! - [`residue`] - Residue identity (kind discriminator, number, insertion code) and atoms
//! - [`chain`] - Ordered residues of a chain
//! - [`system`] - One model of a structure with lookup maps
//! - [`ids`] - Unique identifier types for atoms, residues, and chains
//!
//! ## Usage
//!
//! ```ignore
//! use ifacepp::core::models::{atom::Atom, residue::ResidueKind, system::MolecularSystem};
//!
//! let mut system = MolecularSystem::new();
//! let chain_id = system.add_chain('A');
//! let residue_id = system.add_residue(chain_id, 10.into(), ResidueKind::Standard, "LYS")?;
//!
//! let atom = Atom::new("CA", "C", residue_id, Point3::new(0.0, 0.0, 0.0));
//! system.add_atom_to_residue(residue_id, atom)?;
//! ```

pub mod atom;
pub mod chain;
pub mod ids;
pub mod residue;
pub mod system;
