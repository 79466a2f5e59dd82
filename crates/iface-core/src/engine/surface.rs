use super::error::{InterfaceError, ServiceError};
use super::interface::Interface;
use crate::core::models::residue::ResidueKind;
use crate::core::models::system::MolecularSystem;
use crate::core::surface::sasa::SurfaceAreaCalculator;
use serde::Serialize;
use tracing::{info, instrument};

/// Buried surface area of a two-chain interface, in square Angstroms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BuriedSurfaceArea {
    /// `chain_a + chain_b - complex`.
    pub buried: f64,
    pub chain_a: f64,
    pub chain_b: f64,
    pub complex: f64,
}

impl BuriedSurfaceArea {
    /// `[BSA, SASA(A), SASA(B), SASA(complex)]`
    pub fn as_array(&self) -> [f64; 4] {
        [self.buried, self.chain_a, self.chain_b, self.complex]
    }
}

impl Interface<'_> {
    /// Computes `SASA(A) + SASA(B) - SASA(A+B)` for the two interface chains.
    ///
    /// Chains A and B are the interface chains in sorted order. Each surface is
    /// computed on an owned copy of the structure holding only the relevant
    /// chains, so the calculator never sees the caller's system or any third
    /// chain. Only non-hydrogen atoms of standard residues are summed.
    ///
    /// # Errors
    ///
    /// - [`InterfaceError::UnsupportedChainCount`] unless the interface spans exactly two chains.
    /// - [`InterfaceError::ExternalService`] when the calculator fails or leaves a summed atom unannotated.
    #[instrument(skip_all, name = "buried_surface_area", fields(interface = %self.id()))]
    pub fn buried_surface_area<C>(&self, calculator: &C) -> Result<BuriedSurfaceArea, InterfaceError>
    where
        C: SurfaceAreaCalculator + ?Sized,
    {
        let (chain_a, chain_b) = self.require_two_chains()?;

        let sasa_a = surface_of(self.system(), &[chain_a], calculator)?;
        let sasa_b = surface_of(self.system(), &[chain_b], calculator)?;
        let sasa_complex = surface_of(self.system(), &[chain_a, chain_b], calculator)?;

        let result = BuriedSurfaceArea {
            buried: sasa_a + sasa_b - sasa_complex,
            chain_a: sasa_a,
            chain_b: sasa_b,
            complex: sasa_complex,
        };
        info!(
            buried = result.buried,
            chain_a = result.chain_a,
            chain_b = result.chain_b,
            complex = result.complex,
            "Buried surface area computed."
        );
        Ok(result)
    }
}

fn surface_of<C>(
    system: &MolecularSystem,
    chains: &[char],
    calculator: &C,
) -> Result<f64, InterfaceError>
where
    C: SurfaceAreaCalculator + ?Sized,
{
    let mut working_copy = system.extract_chains(chains);
    calculator.annotate(&mut working_copy)?;

    let context: String = chains.iter().collect();
    let mut total = 0.0;
    for (_, residue) in working_copy.residues_iter() {
        if residue.kind != ResidueKind::Standard {
            continue;
        }
        for &atom_id in residue.atoms() {
            let Some(atom) = working_copy.atom(atom_id) else {
                continue;
            };
            if atom.is_hydrogen() {
                continue;
            }
            let sasa = atom.sasa.ok_or_else(|| ServiceError::MissingSasaAnnotation {
                context: context.clone(),
                residue: format!(
                    "{}:{}{}",
                    working_copy.chain_char_of(atom.residue_id).unwrap_or('?'),
                    residue.name,
                    residue.number
                ),
                atom: atom.name.clone(),
            })?;
            total += sasa;
        }
    }
    Ok(total)
}
