use super::error::InterfaceError;
use super::interface::Interface;
use crate::core::data::amino_acids::one_letter_code;
use crate::core::geometry::superposition::{Superimposer, Superposition};
use crate::core::models::atom::ALPHA_CARBON_ATOM_NAME;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Atom set used to represent each residue in an RMSD calculation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RmsdMode {
    #[default]
    CAlpha,
    Backbone,
    AllAtom,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RmsdOptions {
    pub mode: RmsdMode,
    /// Pair residues by position without comparing the residue compositions first.
    pub skip_sequence_check: bool,
}

impl Interface<'_> {
    /// RMSD between this (reference) interface and `mobile` after optimal superposition.
    ///
    /// See [`Interface::superpose`].
    pub fn rmsd<S>(
        &self,
        mobile: &Interface<'_>,
        superimposer: &S,
        options: &RmsdOptions,
    ) -> Result<f64, InterfaceError>
    where
        S: Superimposer + ?Sized,
    {
        self.superpose(mobile, superimposer, options)
            .map(|superposition| superposition.rmsd)
    }

    /// Superimposes the alpha carbons of `mobile` onto those of this interface.
    ///
    /// Standard residues are paired by their position in each interface's
    /// residue list; waters and hetero groups are left out. Unless
    /// `options.skip_sequence_check` is set, both interfaces must contain the
    /// same residue types (compared as sorted one-letter codes). With the check
    /// skipped, the longer list is truncated to the shorter one.
    #[instrument(skip_all, name = "interface_rmsd", fields(reference = %self.id(), mobile = %mobile.id()))]
    pub fn superpose<S>(
        &self,
        mobile: &Interface<'_>,
        superimposer: &S,
        options: &RmsdOptions,
    ) -> Result<Superposition, InterfaceError>
    where
        S: Superimposer + ?Sized,
    {
        if options.mode != RmsdMode::CAlpha {
            return Err(InterfaceError::UnimplementedMode(options.mode));
        }

        let reference_len = self.standard_residues().count();
        let mobile_len = mobile.standard_residues().count();

        if !options.skip_sequence_check {
            let reference_sequence = self.sorted_sequence()?;
            let mobile_sequence = mobile.sorted_sequence()?;
            if reference_sequence != mobile_sequence {
                return Err(InterfaceError::SequenceMismatch {
                    reference: reference_sequence,
                    mobile: mobile_sequence,
                });
            }
        } else if reference_len != mobile_len {
            warn!(
                reference = reference_len,
                mobile = mobile_len,
                "Residue counts differ; unpaired residues are ignored."
            );
        }

        let paired = reference_len.min(mobile_len);
        let reference_coords = self.alpha_carbons(paired)?;
        let mobile_coords = mobile.alpha_carbons(paired)?;

        let superposition = superimposer.superimpose(&reference_coords, &mobile_coords)?;
        info!(rmsd = superposition.rmsd, atoms = paired, "Interfaces superimposed.");
        Ok(superposition)
    }

    fn sorted_sequence(&self) -> Result<String, InterfaceError> {
        let mut codes = self
            .standard_residues()
            .map(|residue_id| {
                self.system()
                    .residue(residue_id)
                    .and_then(|residue| one_letter_code(&residue.name))
                    .ok_or_else(|| InterfaceError::UnknownResidue {
                        residue: self.describe_residue(residue_id),
                    })
            })
            .collect::<Result<Vec<char>, _>>()?;
        codes.sort_unstable();
        Ok(codes.into_iter().collect())
    }

    fn alpha_carbons(&self, count: usize) -> Result<Vec<Point3<f64>>, InterfaceError> {
        self.standard_residues()
            .take(count)
            .map(|residue_id| {
                self.system()
                    .residue_atom(residue_id, ALPHA_CARBON_ATOM_NAME)
                    .map(|atom| atom.position)
                    .ok_or_else(|| InterfaceError::MissingAtom {
                        residue: self.describe_residue(residue_id),
                        atom: ALPHA_CARBON_ATOM_NAME,
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::superposition::{KabschSuperimposer, SuperpositionError};
    use crate::core::models::residue::{ResidueKind, ResidueNumber};
    use crate::core::models::system::MolecularSystem;
    use crate::engine::error::ServiceError;
    use crate::engine::interface::tests::{add_ca_residue, add_hetero_residue, scenario_system};
    use nalgebra::{Rotation3, Vector3};

    fn moved_copy(system: &MolecularSystem) -> MolecularSystem {
        let mut copy = system.extract_chains(&system.sorted_chain_ids());
        let rotation = Rotation3::from_euler_angles(0.3, -1.2, 2.0);
        let shift = Vector3::new(5.0, 1.0, -7.0);
        for (_, atom) in copy.atoms_iter_mut() {
            atom.position = rotation * atom.position + shift;
        }
        copy
    }

    #[test]
    fn self_rmsd_is_zero() {
        let (system, residues) = scenario_system();
        let interface = Interface::new("x", &system, residues, []).unwrap();
        let rmsd = interface
            .rmsd(&interface, &KabschSuperimposer, &RmsdOptions::default())
            .unwrap();
        assert!(rmsd.abs() < 1e-9, "got {}", rmsd);
    }

    #[test]
    fn rigid_motion_gives_zero_rmsd() {
        let (system, residues) = scenario_system();
        let moved = moved_copy(&system);
        let moved_residues: Vec<_> = moved.residues_iter().map(|(id, _)| id).collect();

        let reference = Interface::new("ref", &system, residues, []).unwrap();
        let mobile = Interface::new("mob", &moved, moved_residues, []).unwrap();
        let rmsd = reference
            .rmsd(&mobile, &KabschSuperimposer, &RmsdOptions::default())
            .unwrap();
        assert!(rmsd < 1e-6, "got {}", rmsd);
    }

    #[test]
    fn displaced_residue_gives_positive_rmsd() {
        let (system, residues) = scenario_system();
        let mut moved = moved_copy(&system);
        if let Some((_, atom)) = moved.atoms_iter_mut().next() {
            atom.position.x += 2.0;
        }
        let moved_residues: Vec<_> = moved.residues_iter().map(|(id, _)| id).collect();

        let reference = Interface::new("ref", &system, residues, []).unwrap();
        let mobile = Interface::new("mob", &moved, moved_residues, []).unwrap();
        let rmsd = reference
            .rmsd(&mobile, &KabschSuperimposer, &RmsdOptions::default())
            .unwrap();
        assert!(rmsd > 0.1);
    }

    #[test]
    fn sequence_mismatch_is_detected_unless_skipped() {
        let (system, residues) = scenario_system();
        let mut other = MolecularSystem::new();
        let other_residues = vec![
            add_ca_residue(&mut other, 'A', 10, "LYS", [0.0, 0.0, 0.0]),
            add_ca_residue(&mut other, 'A', 11, "LEU", [3.8, 0.0, 0.0]),
            add_ca_residue(&mut other, 'B', 20, "ASP", [0.0, 5.0, 0.0]),
            add_ca_residue(&mut other, 'B', 21, "THR", [3.8, 5.0, 1.0]),
        ];
        let reference = Interface::new("ref", &system, residues, []).unwrap();
        let mobile = Interface::new("mob", &other, other_residues, []).unwrap();

        let result = reference.rmsd(&mobile, &KabschSuperimposer, &RmsdOptions::default());
        assert!(matches!(
            result,
            Err(InterfaceError::SequenceMismatch { ref reference, ref mobile })
                if reference == "DKLS" && mobile == "DKLT"
        ));

        let options = RmsdOptions {
            skip_sequence_check: true,
            ..RmsdOptions::default()
        };
        let rmsd = reference.rmsd(&mobile, &KabschSuperimposer, &options).unwrap();
        assert!(rmsd < 1e-9);
    }

    #[test]
    fn sequence_check_ignores_order() {
        let (system, residues) = scenario_system();
        let reference = Interface::new("ref", &system, residues, []).unwrap();

        // Same alpha-carbon trace, residue names permuted: LYS/LEU and ASP/SER swap.
        let mut permuted = MolecularSystem::new();
        let renamed = [
            add_ca_residue(&mut permuted, 'A', 10, "LEU", [0.0, 0.0, 0.0]),
            add_ca_residue(&mut permuted, 'A', 11, "LYS", [3.8, 0.0, 0.0]),
            add_ca_residue(&mut permuted, 'B', 20, "SER", [0.0, 5.0, 0.0]),
            add_ca_residue(&mut permuted, 'B', 21, "ASP", [3.8, 5.0, 1.0]),
        ];
        let mobile = Interface::new("mob", &permuted, renamed, []).unwrap();

        let rmsd = reference
            .rmsd(&mobile, &KabschSuperimposer, &RmsdOptions::default())
            .unwrap();
        assert!(rmsd < 1e-9);

        // Reordering members keeps the composition but breaks positional pairing.
        let [a10, a11, b20, b21] = residues;
        let shuffled = Interface::new("shuffled", &system, [b21, a10, b20, a11], []).unwrap();
        let rmsd = reference
            .rmsd(&shuffled, &KabschSuperimposer, &RmsdOptions::default())
            .unwrap();
        // Bounded by the unrotated deviation of the shared-centroid point sets.
        assert!(rmsd > 0.1 && rmsd < 4.5, "rmsd = {rmsd}");
    }

    #[test]
    fn waters_are_left_out_of_the_pairing() {
        let (mut system, residues) = scenario_system();
        let water = add_hetero_residue(&mut system, 'B', 301, "HOH", [0.0, -3.0, 0.0]);
        let mut members = residues.to_vec();
        members.insert(1, water);
        let wet = Interface::new("wet", &system, members, []).unwrap();
        let dry_copy = moved_copy(&system);
        let dry_residues = residues.map(|id| {
            let residue = system.residue(id).unwrap();
            let chain = system.chain_char_of(id).unwrap();
            let chain_id = dry_copy.find_chain_by_id(chain).unwrap();
            dry_copy
                .find_residue(chain_id, residue.kind, residue.number)
                .unwrap()
        });
        let dry = Interface::new("dry", &dry_copy, dry_residues, []).unwrap();

        let rmsd = wet
            .rmsd(&dry, &KabschSuperimposer, &RmsdOptions::default())
            .unwrap();
        assert!(rmsd < 1e-6);
    }

    #[test]
    fn missing_alpha_carbon_is_reported() {
        let (mut system, residues) = scenario_system();
        let chain_b = system.find_chain_by_id('B').unwrap();
        let no_ca = system
            .add_residue(chain_b, ResidueNumber::new(22, None), ResidueKind::Standard, "GLY")
            .unwrap();
        system
            .add_atom_to_residue(
                no_ca,
                crate::core::models::atom::Atom::new("N", "N", no_ca, Point3::origin()),
            )
            .unwrap();
        let mut all = residues.to_vec();
        all.push(no_ca);

        let interface = Interface::new("x", &system, all, []).unwrap();
        let result = interface.rmsd(&interface, &KabschSuperimposer, &RmsdOptions::default());
        assert!(matches!(
            result,
            Err(InterfaceError::MissingAtom { ref residue, atom: "CA" }) if residue == "B:GLY22"
        ));
    }

    #[test]
    fn non_calpha_modes_are_unimplemented() {
        let (system, residues) = scenario_system();
        let interface = Interface::new("x", &system, residues, []).unwrap();
        for mode in [RmsdMode::Backbone, RmsdMode::AllAtom] {
            let options = RmsdOptions {
                mode,
                ..RmsdOptions::default()
            };
            assert!(matches!(
                interface.rmsd(&interface, &KabschSuperimposer, &options),
                Err(InterfaceError::UnimplementedMode(m)) if m == mode
            ));
        }
    }

    #[test]
    fn empty_interfaces_fail_in_the_superimposer() {
        let system = MolecularSystem::new();
        let empty = Interface::new("empty", &system, [], []).unwrap();
        assert!(matches!(
            empty.rmsd(&empty, &KabschSuperimposer, &RmsdOptions::default()),
            Err(InterfaceError::ExternalService(ServiceError::Superposition {
                source: SuperpositionError::Empty
            }))
        ));
    }
}
