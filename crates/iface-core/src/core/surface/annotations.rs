use super::sasa::{SasaError, SurfaceAreaCalculator};
use crate::core::models::residue::{ResidueKind, ResidueNumber};
use crate::core::models::system::MolecularSystem;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct SasaRecord {
    context: String,
    chain: String,
    resseq: isize,
    #[serde(default)]
    icode: String,
    atom: String,
    sasa: f64,
    #[serde(default)]
    record: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct AtomKey {
    context: String,
    chain: char,
    kind: ResidueKind,
    number: ResidueNumber,
    atom: String,
}

/// Per-atom surface areas produced by an external tool and imported from CSV.
///
/// Columns: `context,chain,resseq,icode,atom,sasa` plus an optional `record`
/// (`atom`, `hetatm` or `water`; blank means a standard residue). `context`
/// lists the sorted chain identifiers of the structure the value was computed
/// on (`A`, `B`, `AB`), so one file can carry both the isolated-chain and the
/// complex values. When annotating, a system's context is derived from its own
/// chains; atoms without a matching row are left unannotated.
#[derive(Debug, Clone, Default)]
pub struct PrecomputedSasa {
    values: HashMap<AtomKey, f64>,
}

impl PrecomputedSasa {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self, SasaError> {
        let path_str = path.to_string_lossy().to_string();
        let reader = csv::Reader::from_path(path).map_err(|e| SasaError::Csv {
            path: path_str.clone(),
            source: e,
        })?;
        Self::from_csv(reader, &path_str)
    }

    pub fn from_reader<R: Read>(reader: R, source_name: &str) -> Result<Self, SasaError> {
        Self::from_csv(csv::Reader::from_reader(reader), source_name)
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>, source_name: &str) -> Result<Self, SasaError> {
        let mut table = Self::new();
        // Data rows start on line 2, after the header.
        for (index, result) in reader.deserialize::<SasaRecord>().enumerate() {
            let record = result.map_err(|e| SasaError::Csv {
                path: source_name.to_string(),
                source: e,
            })?;
            let line = index as u64 + 2;
            let invalid = |message: String| SasaError::InvalidRecord {
                path: source_name.to_string(),
                line,
                message,
            };

            let chain = single_char(&record.chain)
                .ok_or_else(|| invalid(format!("chain '{}' is not a single character", record.chain)))?;
            let icode = match record.icode.trim() {
                "" => None,
                code => Some(
                    single_char(code)
                        .ok_or_else(|| invalid(format!("insertion code '{}' is invalid", code)))?,
                ),
            };
            if !record.sasa.is_finite() || record.sasa < 0.0 {
                return Err(invalid(format!("area {} is not a non-negative number", record.sasa)));
            }
            let kind = match record.record.trim() {
                "" => ResidueKind::Standard,
                value => value.parse().map_err(|e| invalid(format!("{}", e)))?,
            };

            table.insert(
                &record.context,
                chain,
                kind,
                ResidueNumber::new(record.resseq, icode),
                &record.atom,
                record.sasa,
            );
        }
        debug!(source = source_name, entries = table.len(), "Loaded precomputed surface areas.");
        Ok(table)
    }

    /// Adds or replaces one value. The context's chain identifiers are sorted on insertion.
    pub fn insert(
        &mut self,
        context: &str,
        chain: char,
        kind: ResidueKind,
        number: ResidueNumber,
        atom: &str,
        sasa: f64,
    ) {
        self.values.insert(
            AtomKey {
                context: normalize_context(context.chars()),
                chain,
                kind,
                number,
                atom: atom.trim().to_string(),
            },
            sasa,
        );
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SurfaceAreaCalculator for PrecomputedSasa {
    fn annotate(&self, system: &mut MolecularSystem) -> Result<(), SasaError> {
        let context = normalize_context(system.sorted_chain_ids().into_iter());

        let mut lookups = Vec::new();
        for (atom_id, atom) in system.atoms_iter() {
            let Some(residue) = system.residue(atom.residue_id) else {
                continue;
            };
            let Some(chain) = system.chain_char_of(atom.residue_id) else {
                continue;
            };
            let key = AtomKey {
                context: context.clone(),
                chain,
                kind: residue.kind,
                number: residue.number,
                atom: atom.name.trim().to_string(),
            };
            lookups.push((atom_id, self.values.get(&key).copied()));
        }

        let missing = lookups.iter().filter(|(_, v)| v.is_none()).count();
        if missing > 0 {
            warn!(context = %context, missing, "Atoms without a precomputed surface area.");
        }
        for (atom_id, value) in lookups {
            if let Some(atom) = system.atom_mut(atom_id) {
                atom.sasa = value;
            }
        }
        Ok(())
    }
}

fn normalize_context(chains: impl Iterator<Item = char>) -> String {
    let mut ids: Vec<char> = chains.filter(|c| !c.is_whitespace()).collect();
    ids.sort_unstable();
    ids.dedup();
    ids.into_iter().collect()
}

fn single_char(value: &str) -> Option<char> {
    let mut chars = value.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use nalgebra::Point3;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CSV: &str = "\
context,chain,resseq,icode,atom,sasa
A,A,10,,CA,30.0
B,B,20,,CA,25.0
AB,A,10,,CA,12.5
BA,B,20,,CA,7.5
AB,A,11,B,CB,4.0
";

    fn two_chain_system() -> MolecularSystem {
        let mut system = MolecularSystem::new();
        for (chain, seq) in [('A', 10), ('B', 20)] {
            let chain_id = system.add_chain(chain);
            let residue_id = system
                .add_residue(chain_id, ResidueNumber::new(seq, None), ResidueKind::Standard, "ALA")
                .unwrap();
            system
                .add_atom_to_residue(residue_id, Atom::new("CA", "C", residue_id, Point3::origin()))
                .unwrap();
        }
        system
    }

    fn sasa_of(system: &MolecularSystem, chain: char) -> Option<f64> {
        system
            .atoms_iter()
            .find(|(_, a)| system.chain_char_of(a.residue_id) == Some(chain))
            .and_then(|(_, a)| a.sasa)
    }

    #[test]
    fn values_are_selected_by_the_system_chain_context() {
        let table = PrecomputedSasa::from_reader(CSV.as_bytes(), "inline").unwrap();
        assert_eq!(table.len(), 5);

        let complex = two_chain_system();
        let mut annotated = complex.clone();
        table.annotate(&mut annotated).unwrap();
        assert_eq!(sasa_of(&annotated, 'A'), Some(12.5));
        assert_eq!(sasa_of(&annotated, 'B'), Some(7.5));

        let mut chain_a = complex.extract_chains(&['A']);
        table.annotate(&mut chain_a).unwrap();
        assert_eq!(sasa_of(&chain_a, 'A'), Some(30.0));
    }

    #[test]
    fn atoms_without_rows_stay_unannotated() {
        let table = PrecomputedSasa::from_reader(CSV.as_bytes(), "inline").unwrap();
        let mut system = two_chain_system();
        for (_, atom) in system.atoms_iter_mut() {
            atom.sasa = Some(99.0);
        }
        let mut chain_b = system.extract_chains(&['B']);
        let mut table_without_b = PrecomputedSasa::new();
        table_without_b.insert(
            "A",
            'A',
            ResidueKind::Standard,
            ResidueNumber::new(10, None),
            "CA",
            1.0,
        );
        table_without_b.annotate(&mut chain_b).unwrap();
        assert_eq!(sasa_of(&chain_b, 'B'), None);

        table.annotate(&mut chain_b).unwrap();
        assert_eq!(sasa_of(&chain_b, 'B'), Some(25.0));
    }

    #[test]
    fn insertion_codes_are_part_of_the_key() {
        let table = PrecomputedSasa::from_reader(CSV.as_bytes(), "inline").unwrap();
        let key = AtomKey {
            context: "AB".to_string(),
            chain: 'A',
            kind: ResidueKind::Standard,
            number: ResidueNumber::new(11, Some('B')),
            atom: "CB".to_string(),
        };
        assert_eq!(table.values.get(&key), Some(&4.0));
    }

    #[test]
    fn hetero_groups_do_not_collide_with_standard_residues() {
        let data = "\
context,chain,resseq,icode,atom,sasa,record
A,A,10,,CA,30.0,
A,A,10,,CA,5.0,hetatm
";
        let table = PrecomputedSasa::from_reader(data.as_bytes(), "inline").unwrap();
        assert_eq!(table.len(), 2);

        let mut system = two_chain_system().extract_chains(&['A']);
        let chain_id = system.find_chain_by_id('A').unwrap();
        let ligand = system
            .add_residue(chain_id, ResidueNumber::new(10, None), ResidueKind::Hetero, "CA")
            .unwrap();
        system
            .add_atom_to_residue(ligand, Atom::new("CA", "CA", ligand, Point3::origin()))
            .unwrap();
        table.annotate(&mut system).unwrap();

        let area_of = |kind| {
            system
                .atoms_iter()
                .find(|(_, a)| system.residue(a.residue_id).map(|r| r.kind) == Some(kind))
                .and_then(|(_, a)| a.sasa)
        };
        assert_eq!(area_of(ResidueKind::Standard), Some(30.0));
        assert_eq!(area_of(ResidueKind::Hetero), Some(5.0));
    }

    #[test]
    fn unknown_record_type_is_rejected() {
        let data = "context,chain,resseq,icode,atom,sasa,record\nA,A,1,,CA,1.0,ligand\n";
        let result = PrecomputedSasa::from_reader(data.as_bytes(), "inline");
        assert!(matches!(result, Err(SasaError::InvalidRecord { .. })));
    }

    #[test]
    fn multi_character_chain_is_rejected() {
        let data = "context,chain,resseq,icode,atom,sasa\nAB,AB,1,,CA,1.0\n";
        let result = PrecomputedSasa::from_reader(data.as_bytes(), "inline");
        assert!(matches!(result, Err(SasaError::InvalidRecord { .. })));
    }

    #[test]
    fn negative_area_is_rejected() {
        let data = "context,chain,resseq,icode,atom,sasa\nA,A,1,,CA,-1.0\n";
        let result = PrecomputedSasa::from_reader(data.as_bytes(), "inline");
        assert!(matches!(result, Err(SasaError::InvalidRecord { .. })));
    }

    #[test]
    fn malformed_number_is_a_csv_error() {
        let data = "context,chain,resseq,icode,atom,sasa\nA,A,one,,CA,1.0\n";
        let result = PrecomputedSasa::from_reader(data.as_bytes(), "inline");
        assert!(matches!(result, Err(SasaError::Csv { .. })));
    }

    #[test]
    fn load_reads_from_disk() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", CSV).unwrap();
        let table = PrecomputedSasa::load(file.path()).unwrap();
        assert_eq!(table.len(), 5);
    }
}
