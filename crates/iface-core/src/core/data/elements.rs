use phf::{Map, phf_map};

/// Default van der Waals radii in Angstroms, keyed by upper-case element symbol.
static VDW_RADII: Map<&'static str, f64> = phf_map! {
    "H" => 1.20, "D" => 1.20,
    "C" => 1.70, "N" => 1.55, "O" => 1.52, "S" => 1.80, "P" => 1.80, "SE" => 1.90,
    "F" => 1.47, "CL" => 1.75, "BR" => 1.85, "I" => 1.98,
    "NA" => 2.27, "K" => 2.75, "MG" => 1.73, "CA" => 2.31, "ZN" => 1.39,
    "FE" => 1.94, "MN" => 1.97, "CU" => 1.40, "NI" => 1.63, "CO" => 1.92,
};

pub fn default_vdw_radius(element: &str) -> Option<f64> {
    VDW_RADII.get(element.trim().to_ascii_uppercase().as_str()).copied()
}

/// Infers an element symbol from a PDB atom name when the element columns are blank.
///
/// The first alphabetic character is used; hydrogen names with a leading digit
/// ("1HB") still resolve to hydrogen.
pub fn infer_element_from_atom_name(atom_name: &str) -> Option<String> {
    atom_name
        .trim()
        .chars()
        .find(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase().to_string())
}
