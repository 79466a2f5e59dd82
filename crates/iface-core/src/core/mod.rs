//! # Core Module
//!
//! Stateless building blocks of IFACE++: the structure model, file readers,
//! residue and element property tables, and the collaborator services the
//! interface engine is written against.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Arena-backed atoms, residues, chains and systems
//! - **File I/O** ([`io`]) - Reading PDB coordinate files into one system per model
//! - **Property Tables** ([`data`]) - Amino-acid codes, polarity, charge and van der Waals radii
//! - **Neighbor Search** ([`search`]) - Inter-chain residue contacts from atom distances
//! - **Surface Area** ([`surface`]) - Per-atom solvent-accessible surface area services
//! - **Geometry** ([`geometry`]) - Least-squares rigid superposition
//!
//! Every service is exposed as a trait with a default implementation, so the
//! engine can be driven by other providers (e.g. values computed by external
//! programs) without changes.

pub mod data;
pub mod geometry;
pub mod io;
pub mod models;
pub mod search;
pub mod surface;
