//! Solvent-accessible surface area services.
//!
//! [`sasa::SurfaceAreaCalculator`] is the contract the interface engine
//! consumes. Two implementations are provided: [`sasa::ShrakeRupley`], which
//! computes areas numerically, and [`annotations::PrecomputedSasa`], which
//! imports per-atom values produced by an external program.

pub mod annotations;
pub mod radii;
pub mod sasa;
