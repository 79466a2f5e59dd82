//! # Engine Module
//!
//! The interface analysis engine: an [`interface::Interface`] entity and the
//! analyses defined on it.
//!
//! ## Overview
//!
//! An interface is cut from one model of a structure: a list of residues from
//! two or more chains plus the raw residue contact pairs between them. Every
//! analysis is a method on [`interface::Interface`] and depends on the
//! collaborator services of [`crate::core`] only through their traits.
//!
//! ## Architecture
//!
//! - **Interface Entity** ([`interface`]) - Frozen membership, contact pairs and a lazily built contact map
//! - **Contact Graph** ([`contacts`]) - Symmetric chain -> residue -> partner map
//! - **Composition** ([`composition`]) - Polar, apolar and charged residue fractions
//! - **Burial** ([`surface`]) - Buried surface area from per-atom SASA of the complex and isolated chains
//! - **Geometric Alignment** ([`alignment`]) - Alpha-carbon RMSD after rigid superposition
//! - **Contact Comparison** ([`comparison`]) - Fraction of common contacts between two interfaces
//! - **Error Handling** ([`error`]) - Engine and external-service failures
//!
//! ## Limitations
//!
//! Buried surface area and the fraction of common contacts are only defined
//! for two-chain interfaces; other chain counts fail with
//! [`error::InterfaceError::UnsupportedChainCount`].

pub mod alignment;
pub mod composition;
pub mod comparison;
pub mod contacts;
pub mod error;
pub mod interface;
pub mod surface;
