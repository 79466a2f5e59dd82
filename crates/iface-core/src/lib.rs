//! # IFACE++ Core Library
//!
//! A library for characterizing and comparing protein-protein interfaces: residue contact
//! graphs, physico-chemical composition, buried surface area, interface RMSD and the
//! fraction of common contacts between docking poses.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless structure models (`MolecularSystem`), PDB
//!   reading, residue property tables and the collaborator services an interface is
//!   analysed with: neighbor search, solvent-accessible surface area and superposition.
//!
//! - **[`engine`]: The Logic Core.** The `Interface` entity, its lazily built contact map
//!   and the analyses defined on it. The engine talks to the services only through traits.
//!
//! - **[`workflows`]: The Public API.** Complete procedures that build interfaces from
//!   structures and run the engine on them, with validated configuration and progress
//!   reporting.

pub mod core;
pub mod engine;
pub mod workflows;
