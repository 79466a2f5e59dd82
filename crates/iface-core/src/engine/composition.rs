use super::error::InterfaceError;
use super::interface::Interface;
use crate::core::data::amino_acids::{Polarity, is_charge_bearing, one_letter_code, polarity};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResidueClass {
    PolarUncharged,
    Apolar,
    Charged,
}

impl ResidueClass {
    /// Charge takes precedence over polarity.
    pub fn of(code: char) -> Option<Self> {
        if is_charge_bearing(code) {
            return Some(ResidueClass::Charged);
        }
        match polarity(code)? {
            Polarity::Polar => Some(ResidueClass::PolarUncharged),
            Polarity::Apolar => Some(ResidueClass::Apolar),
        }
    }
}

/// Fractions of interface residues per class; they sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Composition {
    pub polar: f64,
    pub apolar: f64,
    pub charged: f64,
}

impl Composition {
    pub fn as_array(&self) -> [f64; 3] {
        [self.polar, self.apolar, self.charged]
    }
}

impl Interface<'_> {
    /// Classifies every standard interface residue as polar-uncharged, apolar
    /// or charged. Waters and hetero groups are not counted.
    ///
    /// # Errors
    ///
    /// [`InterfaceError::EmptyResidueSet`] when the interface has no standard residues,
    /// [`InterfaceError::UnknownResidue`] when a residue name has no one-letter code.
    pub fn composition(&self) -> Result<Composition, InterfaceError> {
        let (mut polar, mut apolar, mut charged) = (0usize, 0usize, 0usize);
        for residue_id in self.standard_residues() {
            let class = self
                .system()
                .residue(residue_id)
                .and_then(|residue| one_letter_code(&residue.name))
                .and_then(ResidueClass::of)
                .ok_or_else(|| InterfaceError::UnknownResidue {
                    residue: self.describe_residue(residue_id),
                })?;
            match class {
                ResidueClass::PolarUncharged => polar += 1,
                ResidueClass::Apolar => apolar += 1,
                ResidueClass::Charged => charged += 1,
            }
        }

        let counted = polar + apolar + charged;
        if counted == 0 {
            return Err(InterfaceError::EmptyResidueSet {
                interface: self.id().to_string(),
            });
        }

        let total = counted as f64;
        debug!(
            interface = %self.id(),
            polar,
            apolar,
            charged,
            skipped = self.len() - counted,
            "Residue composition."
        );
        Ok(Composition {
            polar: polar as f64 / total,
            apolar: apolar as f64 / total,
            charged: charged as f64 / total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::system::MolecularSystem;
    use crate::engine::interface::tests::{add_ca_residue, add_hetero_residue, scenario_system};

    #[test]
    fn classes_follow_charge_then_polarity() {
        assert_eq!(ResidueClass::of('K'), Some(ResidueClass::Charged));
        assert_eq!(ResidueClass::of('H'), Some(ResidueClass::Charged));
        assert_eq!(ResidueClass::of('S'), Some(ResidueClass::PolarUncharged));
        assert_eq!(ResidueClass::of('Y'), Some(ResidueClass::PolarUncharged));
        assert_eq!(ResidueClass::of('L'), Some(ResidueClass::Apolar));
        assert_eq!(ResidueClass::of('G'), Some(ResidueClass::Apolar));
        assert_eq!(ResidueClass::of('X'), None);
    }

    #[test]
    fn scenario_interface_fractions() {
        // LYS, LEU, ASP, SER
        let (system, residues) = scenario_system();
        let interface = Interface::new("x", &system, residues, []).unwrap();
        let composition = interface.composition().unwrap();

        assert!((composition.charged - 0.5).abs() < 1e-12);
        assert!((composition.polar - 0.25).abs() < 1e-12);
        assert!((composition.apolar - 0.25).abs() < 1e-12);
    }

    #[test]
    fn fractions_sum_to_one() {
        let mut system = MolecularSystem::new();
        let names = ["ALA", "GLU", "THR", "TRP", "HIS", "CYS", "GLY"];
        let residues: Vec<_> = names
            .iter()
            .enumerate()
            .map(|(i, name)| add_ca_residue(&mut system, 'A', i as isize, name, [0.0; 3]))
            .collect();
        let interface = Interface::new("x", &system, residues, []).unwrap();
        let sum: f64 = interface.composition().unwrap().as_array().iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn unknown_residue_name_fails() {
        let mut system = MolecularSystem::new();
        let ala = add_ca_residue(&mut system, 'A', 1, "ALA", [0.0; 3]);
        let lig = add_ca_residue(&mut system, 'A', 2, "LIG", [0.0; 3]);
        let interface = Interface::new("x", &system, [ala, lig], []).unwrap();
        assert!(matches!(
            interface.composition(),
            Err(InterfaceError::UnknownResidue { ref residue }) if residue == "A:LIG2"
        ));
    }

    #[test]
    fn waters_and_ligands_are_not_counted() {
        let (mut system, residues) = scenario_system();
        let water = add_hetero_residue(&mut system, 'B', 301, "HOH", [0.0; 3]);
        let ligand = add_hetero_residue(&mut system, 'A', 401, "ATP", [0.0; 3]);
        let mut members = residues.to_vec();
        members.extend([water, ligand]);
        let interface = Interface::new("x", &system, members, []).unwrap();

        let composition = interface.composition().unwrap();
        assert!((composition.charged - 0.5).abs() < 1e-12);
        assert!((composition.polar - 0.25).abs() < 1e-12);

        let only_water = Interface::new("w", &system, [water], []).unwrap();
        assert!(matches!(
            only_water.composition(),
            Err(InterfaceError::EmptyResidueSet { .. })
        ));
    }

    #[test]
    fn empty_interface_fails() {
        let system = MolecularSystem::new();
        let interface = Interface::new("empty", &system, [], []).unwrap();
        assert!(matches!(
            interface.composition(),
            Err(InterfaceError::EmptyResidueSet { .. })
        ));
    }
}
