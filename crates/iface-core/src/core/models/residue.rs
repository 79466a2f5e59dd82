use super::ids::{AtomId, ChainId};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const WATER_RESIDUE_NAMES: [&str; 4] = ["HOH", "WAT", "DOD", "H2O"];

/// Discriminates standard residues from heteroatom groups and waters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum ResidueKind {
    /// A residue read from `ATOM` records.
    #[default]
    Standard,
    /// A ligand, ion or modified group read from `HETATM` records.
    Hetero,
    /// A solvent molecule.
    Water,
}

impl ResidueKind {
    /// Classifies a residue from its record type and name.
    pub fn classify(is_hetatm: bool, residue_name: &str) -> Self {
        let name = residue_name.trim();
        if WATER_RESIDUE_NAMES.contains(&name) {
            ResidueKind::Water
        } else if is_hetatm {
            ResidueKind::Hetero
        } else {
            ResidueKind::Standard
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid residue kind string: '{0}'")]
pub struct ParseResidueKindError(String);

impl FromStr for ResidueKind {
    type Err = ParseResidueKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" | "atom" => Ok(ResidueKind::Standard),
            "hetero" | "hetatm" => Ok(ResidueKind::Hetero),
            "water" => Ok(ResidueKind::Water),
            _ => Err(ParseResidueKindError(s.to_string())),
        }
    }
}

/// Sequence number plus optional insertion code, e.g. `52` or `52A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResidueNumber {
    pub seq: isize,
    pub icode: Option<char>,
}

impl ResidueNumber {
    pub fn new(seq: isize, icode: Option<char>) -> Self {
        Self { seq, icode }
    }
}

impl From<isize> for ResidueNumber {
    fn from(seq: isize) -> Self {
        Self { seq, icode: None }
    }
}

impl fmt::Display for ResidueNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.icode {
            Some(icode) => write!(f, "{}{}", self.seq, icode),
            None => write!(f, "{}", self.seq),
        }
    }
}

/// Composite residue identifier, unique within a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResidueKey {
    pub kind: ResidueKind,
    pub number: ResidueNumber,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    pub number: ResidueNumber,              // Sequence number and insertion code from source file
    pub kind: ResidueKind,                  // Standard / hetero / water discriminator
    pub name: String,                       // Three-letter residue name (e.g., "ALA", "HOH")
    pub chain_id: ChainId,                  // ID of the parent chain
    pub(crate) atoms: Vec<AtomId>,          // Atoms belonging to this residue, in file order
    atom_name_map: HashMap<String, AtomId>, // Map from atom name to its stable ID
}

impl Residue {
    pub(crate) fn new(
        number: ResidueNumber,
        kind: ResidueKind,
        name: &str,
        chain_id: ChainId,
    ) -> Self {
        Self {
            number,
            kind,
            name: name.trim().to_string(),
            chain_id,
            atoms: Vec::new(),
            atom_name_map: HashMap::new(),
        }
    }

    pub(crate) fn add_atom(&mut self, atom_name: &str, atom_id: AtomId) {
        self.atoms.push(atom_id);
        self.atom_name_map
            .entry(atom_name.trim().to_string())
            .or_insert(atom_id);
    }

    pub fn key(&self) -> ResidueKey {
        ResidueKey {
            kind: self.kind,
            number: self.number,
        }
    }

    pub fn is_standard(&self) -> bool {
        self.kind == ResidueKind::Standard
    }

    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }

    /// Returns the first atom registered under `name`.
    pub fn get_atom_id_by_name(&self, name: &str) -> Option<AtomId> {
        self.atom_name_map.get(name.trim()).copied()
    }
}
