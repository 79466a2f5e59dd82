use super::ids::ResidueId;
use nalgebra::Point3;

/// Name of the alpha-carbon atom used as a residue's positional representative.
pub const ALPHA_CARBON_ATOM_NAME: &str = "CA";

/// Represents a single atom of a parsed structure.
///
/// Besides its identity and coordinates, an atom can carry a solvent-accessible
/// surface area annotated by a [`SurfaceAreaCalculator`](crate::core::surface::sasa::SurfaceAreaCalculator).
/// `None` means "not annotated", which is distinct from an exposed area of zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The name of the atom (e.g., "CA", "N", "OG1").
    pub name: String,
    /// The element symbol (e.g., "C", "N", "SE"), upper-case.
    pub element: String,
    /// The ID of the parent residue this atom belongs to.
    pub residue_id: ResidueId,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// Solvent-accessible surface area in square Angstroms, if annotated.
    pub sasa: Option<f64>,
}

impl Atom {
    /// Creates a new, unannotated `Atom`.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the atom.
    /// * `element` - The element symbol; stored upper-case.
    /// * `residue_id` - The ID of the residue this atom belongs to.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(name: &str, element: &str, residue_id: ResidueId, position: Point3<f64>) -> Self {
        Self {
            name: name.to_string(),
            element: element.trim().to_ascii_uppercase(),
            residue_id,
            position,
            sasa: None,
        }
    }

    /// Returns `true` for hydrogen and deuterium atoms.
    pub fn is_hydrogen(&self) -> bool {
        matches!(self.element.as_str(), "H" | "D")
    }

    pub fn is_alpha_carbon(&self) -> bool {
        self.name.trim() == ALPHA_CARBON_ATOM_NAME && self.element == "C"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ids::ResidueId;
    use nalgebra::Point3;

    #[test]
    fn new_atom_has_expected_default_fields() {
        let residue_id = ResidueId::default();
        let atom = Atom::new("CA", "c", residue_id, Point3::new(1.0, 2.0, 3.0));

        assert_eq!(atom.name, "CA");
        assert_eq!(atom.element, "C");
        assert_eq!(atom.residue_id, residue_id);
        assert_eq!(atom.position, Point3::new(1.0, 2.0, 3.0));
        assert!(atom.sasa.is_none());
    }

    #[test]
    fn hydrogen_and_deuterium_are_detected_by_element() {
        let residue_id = ResidueId::default();
        assert!(Atom::new("HA", "H", residue_id, Point3::origin()).is_hydrogen());
        assert!(Atom::new("D1", "D", residue_id, Point3::origin()).is_hydrogen());
        assert!(!Atom::new("HG", "HG", residue_id, Point3::origin()).is_hydrogen());
        assert!(!Atom::new("N", "N", residue_id, Point3::origin()).is_hydrogen());
    }

    #[test]
    fn alpha_carbon_requires_carbon_element() {
        let residue_id = ResidueId::default();
        assert!(Atom::new("CA", "C", residue_id, Point3::origin()).is_alpha_carbon());
        // Calcium ions share the atom name.
        assert!(!Atom::new("CA", "CA", residue_id, Point3::origin()).is_alpha_carbon());
        assert!(!Atom::new("CB", "C", residue_id, Point3::origin()).is_alpha_carbon());
    }
}
