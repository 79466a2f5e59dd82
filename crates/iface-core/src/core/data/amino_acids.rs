use phf::{Map, Set, phf_map, phf_set};

/// Three-letter residue names (including common protonation-state and
/// modified-residue aliases) to one-letter amino-acid codes.
static THREE_TO_ONE_LETTER: Map<&'static str, char> = phf_map! {
    "ALA" => 'A', "ARG" => 'R', "ASN" => 'N', "ASP" => 'D', "CYS" => 'C',
    "GLN" => 'Q', "GLU" => 'E', "GLY" => 'G', "HIS" => 'H', "ILE" => 'I',
    "LEU" => 'L', "LYS" => 'K', "MET" => 'M', "PHE" => 'F', "PRO" => 'P',
    "SER" => 'S', "THR" => 'T', "TRP" => 'W', "TYR" => 'Y', "VAL" => 'V',
    // Protonation-state variants used by simulation packages
    "HID" => 'H', "HIE" => 'H', "HIP" => 'H', "HSD" => 'H', "HSE" => 'H', "HSP" => 'H',
    "CYX" => 'C', "CYM" => 'C', "ASH" => 'D', "GLH" => 'E', "LYN" => 'K',
    // Modified residues that keep their parent's identity
    "MSE" => 'M',
};

/// Side-chain polarity of an amino acid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    Polar,
    Apolar,
}

static POLARITY: Map<char, Polarity> = phf_map! {
    // --- Polar ---
    'S' => Polarity::Polar, 'T' => Polarity::Polar, 'N' => Polarity::Polar,
    'Q' => Polarity::Polar, 'Y' => Polarity::Polar, 'C' => Polarity::Polar,
    'H' => Polarity::Polar, 'D' => Polarity::Polar, 'E' => Polarity::Polar,
    'K' => Polarity::Polar, 'R' => Polarity::Polar,
    // --- Apolar ---
    'A' => Polarity::Apolar, 'V' => Polarity::Apolar, 'L' => Polarity::Apolar,
    'I' => Polarity::Apolar, 'M' => Polarity::Apolar, 'F' => Polarity::Apolar,
    'W' => Polarity::Apolar, 'P' => Polarity::Apolar, 'G' => Polarity::Apolar,
};

/// Amino acids whose side chain carries an ionizable group near physiological pH.
static CHARGE_BEARING: Set<char> = phf_set! { 'D', 'E', 'K', 'R', 'H' };

pub fn one_letter_code(residue_name: &str) -> Option<char> {
    THREE_TO_ONE_LETTER
        .get(residue_name.trim().to_ascii_uppercase().as_str())
        .copied()
}

pub fn polarity(code: char) -> Option<Polarity> {
    POLARITY.get(&code.to_ascii_uppercase()).copied()
}

pub fn is_charge_bearing(code: char) -> bool {
    CHARGE_BEARING.contains(&code.to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_letter_code_maps_standard_residues() {
        assert_eq!(one_letter_code("ALA"), Some('A'));
        assert_eq!(one_letter_code("TRP"), Some('W'));
        assert_eq!(one_letter_code("LYS"), Some('K'));
    }

    #[test]
    fn one_letter_code_trims_and_ignores_case() {
        assert_eq!(one_letter_code(" gly "), Some('G'));
        assert_eq!(one_letter_code("Ser"), Some('S'));
    }

    #[test]
    fn one_letter_code_maps_aliases_to_parent_residue() {
        assert_eq!(one_letter_code("HIE"), Some('H'));
        assert_eq!(one_letter_code("CYX"), Some('C'));
        assert_eq!(one_letter_code("MSE"), Some('M'));
    }

    #[test]
    fn one_letter_code_returns_none_for_unknown_names() {
        assert_eq!(one_letter_code("HOH"), None);
        assert_eq!(one_letter_code("XYZ"), None);
        assert_eq!(one_letter_code(""), None);
    }

    #[test]
    fn every_standard_code_has_a_polarity() {
        for code in "ACDEFGHIKLMNPQRSTVWY".chars() {
            assert!(polarity(code).is_some(), "missing polarity for {code}");
        }
        assert_eq!(polarity('X'), None);
    }

    #[test]
    fn charge_bearing_residues_are_all_polar() {
        for code in "ACDEFGHIKLMNPQRSTVWY".chars() {
            if is_charge_bearing(code) {
                assert_eq!(polarity(code), Some(Polarity::Polar));
            }
        }
        assert!(is_charge_bearing('d'));
        assert!(!is_charge_bearing('S'));
    }
}
