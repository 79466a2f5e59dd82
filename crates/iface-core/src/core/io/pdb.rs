use crate::core::data::elements::infer_element_from_atom_name;
use crate::core::io::traits::StructureFile;
use crate::core::models::atom::Atom;
use crate::core::models::residue::{ResidueKind, ResidueNumber};
use crate::core::models::system::MolecularSystem;
use nalgebra::Point3;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::{debug, trace, warn};

const MIN_COORDINATE_LINE_LENGTH: usize = 54;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdbMetadata {
    /// Four-character PDB identifier from the HEADER record, if present.
    pub id_code: Option<String>,
    /// Concatenated TITLE records.
    pub title: Option<String>,
    /// Number of alternate-location atoms that were dropped.
    pub skipped_altlocs: usize,
    /// Number of atoms with a blank chain column, read as chain `A`.
    pub blank_chain_atoms: usize,
    /// Serials of models in which blank-chain atoms share chain `A` with
    /// atoms that name it explicitly.
    pub merged_chain_models: Vec<usize>,
}

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: PdbParseErrorKind,
    },
    #[error("Inconsistent data on line {line}: {message}")]
    Inconsistency { line: usize, message: String },
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Error)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Required field in columns {columns} is empty")]
    MissingRequiredField { columns: String },
    #[error("Line is too short for ATOM/HETATM record (must be at least 54 chars)")]
    LineTooShort,
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end.min(line.len())).unwrap_or("").trim()
}

fn column_char(line: &str, index: usize) -> Option<char> {
    line.get(index..index + 1)
        .and_then(|s| s.chars().next())
        .filter(|c| !c.is_whitespace())
}

fn parse_int(line: &str, start: usize, end: usize, line_num: usize) -> Result<isize, PdbError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidInt {
            columns: format!("{}-{}", start + 1, end),
            value: value.into(),
        },
    })
}

fn parse_float(line: &str, start: usize, end: usize, line_num: usize) -> Result<f64, PdbError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidFloat {
            columns: format!("{}-{}", start + 1, end),
            value: value.into(),
        },
    })
}

const BLANK_CHAIN_FALLBACK: char = 'A';

/// Notices, once per model, when blank and explicit chain `A` atoms meet.
#[derive(Default)]
struct BlankChainTracker {
    blank: bool,
    explicit: bool,
    reported: bool,
}

impl BlankChainTracker {
    /// Returns `true` the first time both sources have been seen.
    fn record(&mut self, chain_column: Option<char>) -> bool {
        match chain_column {
            None => self.blank = true,
            Some(BLANK_CHAIN_FALLBACK) => self.explicit = true,
            Some(_) => return false,
        }
        if self.blank && self.explicit && !self.reported {
            self.reported = true;
            return true;
        }
        false
    }
}

pub struct PdbFile;

impl StructureFile for PdbFile {
    type Metadata = PdbMetadata;
    type Error = PdbError;

    fn read_from(
        reader: &mut impl BufRead,
    ) -> Result<(Vec<MolecularSystem>, Self::Metadata), Self::Error> {
        let mut metadata = PdbMetadata::default();
        let mut models: Vec<MolecularSystem> = Vec::new();
        let mut current = MolecularSystem::new();
        let mut current_has_atoms = false;
        let mut in_model = false;
        let mut chain_a_sources = BlankChainTracker::default();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;
            let record_type = slice_and_trim(&line, 0, 6);

            match record_type {
                "ATOM" | "HETATM" => {
                    if line.len() < MIN_COORDINATE_LINE_LENGTH {
                        return Err(PdbError::Parse {
                            line: line_num,
                            kind: PdbParseErrorKind::LineTooShort,
                        });
                    }

                    let name = slice_and_trim(&line, 12, 16);
                    if name.is_empty() {
                        return Err(PdbError::Parse {
                            line: line_num,
                            kind: PdbParseErrorKind::MissingRequiredField {
                                columns: "13-16".into(),
                            },
                        });
                    }
                    let res_name = slice_and_trim(&line, 17, 20);
                    if res_name.is_empty() {
                        return Err(PdbError::Parse {
                            line: line_num,
                            kind: PdbParseErrorKind::MissingRequiredField {
                                columns: "18-20".into(),
                            },
                        });
                    }

                    let altloc = column_char(&line, 16);
                    let chain_column = column_char(&line, 21);
                    let chain_char = chain_column.unwrap_or(BLANK_CHAIN_FALLBACK);
                    let seq = parse_int(&line, 22, 26, line_num)?;
                    let icode = column_char(&line, 26);
                    let x = parse_float(&line, 30, 38, line_num)?;
                    let y = parse_float(&line, 38, 46, line_num)?;
                    let z = parse_float(&line, 46, 54, line_num)?;

                    let element = match slice_and_trim(&line, 76, 78) {
                        "" => infer_element_from_atom_name(name).ok_or_else(|| {
                            PdbError::Parse {
                                line: line_num,
                                kind: PdbParseErrorKind::MissingRequiredField {
                                    columns: "77-78".into(),
                                },
                            }
                        })?,
                        symbol => symbol.to_string(),
                    };

                    let kind = ResidueKind::classify(record_type == "HETATM", res_name);
                    let number = ResidueNumber::new(seq, icode);

                    let chain_id = current.add_chain(chain_char);
                    let residue_id = current
                        .add_residue(chain_id, number, kind, res_name)
                        .ok_or_else(|| PdbError::Inconsistency {
                            line: line_num,
                            message: format!("chain '{}' vanished during parsing", chain_char),
                        })?;

                    let duplicate = current
                        .residue(residue_id)
                        .and_then(|residue| residue.get_atom_id_by_name(name))
                        .is_some();
                    if duplicate {
                        if altloc.is_some() {
                            trace!(line = line_num, atom = name, "Skipping alternate location.");
                            metadata.skipped_altlocs += 1;
                            continue;
                        }
                        warn!(
                            line = line_num,
                            atom = name,
                            residue = %number,
                            chain = %chain_char,
                            "Duplicate atom name within residue; keeping both atoms."
                        );
                    }

                    if chain_column.is_none() {
                        metadata.blank_chain_atoms += 1;
                    }
                    if chain_a_sources.record(chain_column) {
                        warn!(
                            line = line_num,
                            model = current.model_serial(),
                            "Atoms without a chain identifier are merged into an explicit chain A."
                        );
                        metadata.merged_chain_models.push(current.model_serial());
                    }

                    let atom = Atom::new(name, &element, residue_id, Point3::new(x, y, z));
                    current.add_atom_to_residue(residue_id, atom);
                    current_has_atoms = true;
                }
                "MODEL" => {
                    if in_model {
                        return Err(PdbError::Inconsistency {
                            line: line_num,
                            message: "MODEL record without a preceding ENDMDL".into(),
                        });
                    }
                    if current_has_atoms {
                        models.push(std::mem::take(&mut current));
                        current_has_atoms = false;
                    }
                    let serial = line
                        .split_whitespace()
                        .nth(1)
                        .and_then(|s| s.parse::<usize>().ok())
                        .unwrap_or(models.len() + 1);
                    current = MolecularSystem::with_model_serial(serial);
                    chain_a_sources = BlankChainTracker::default();
                    in_model = true;
                }
                "ENDMDL" => {
                    in_model = false;
                    if current_has_atoms {
                        let next_serial = current.model_serial() + 1;
                        models.push(std::mem::replace(
                            &mut current,
                            MolecularSystem::with_model_serial(next_serial),
                        ));
                        current_has_atoms = false;
                    }
                    chain_a_sources = BlankChainTracker::default();
                }
                "HEADER" => {
                    let id_code = slice_and_trim(&line, 62, 66);
                    if !id_code.is_empty() {
                        metadata.id_code = Some(id_code.to_string());
                    }
                }
                "TITLE" => {
                    let text = slice_and_trim(&line, 10, 80);
                    let title = metadata.title.get_or_insert_with(String::new);
                    if !title.is_empty() {
                        title.push(' ');
                    }
                    title.push_str(text);
                }
                "END" => break,
                _ => {}
            }
        }

        if current_has_atoms {
            models.push(current);
        }
        if models.is_empty() {
            return Err(PdbError::MissingRecord("ATOM/HETATM records".into()));
        }

        debug!(
            models = models.len(),
            skipped_altlocs = metadata.skipped_altlocs,
            "Parsed PDB structure."
        );
        Ok((models, metadata))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::{BufReader, Cursor, Write};

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn atom_line(
        record: &str,
        serial: usize,
        name: &str,
        altloc: char,
        res_name: &str,
        chain: char,
        seq: isize,
        icode: char,
        position: [f64; 3],
        element: &str,
    ) -> String {
        format!(
            "{:<6}{:>5} {:<4}{}{:>3} {}{:>4}{}   {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {:>2}",
            record,
            serial,
            name,
            altloc,
            res_name,
            chain,
            seq,
            icode,
            position[0],
            position[1],
            position[2],
            1.0,
            0.0,
            element
        )
    }

    fn read(content: &str) -> Result<(Vec<MolecularSystem>, PdbMetadata), PdbError> {
        PdbFile::read_from(&mut BufReader::new(Cursor::new(content.to_string())))
    }

    fn two_chain_content() -> String {
        [
            "HEADER    COMPLEX                                 01-JAN-00   1ABC              ".to_string(),
            "TITLE     A TEST COMPLEX".to_string(),
            atom_line("ATOM", 1, "N", ' ', "LYS", 'A', 10, ' ', [0.0, 0.0, 0.0], "N"),
            atom_line("ATOM", 2, "CA", ' ', "LYS", 'A', 10, ' ', [1.5, 0.0, 0.0], "C"),
            atom_line("ATOM", 3, "HA", ' ', "LYS", 'A', 10, ' ', [1.9, 1.0, 0.0], "H"),
            atom_line("ATOM", 4, "CA", 'A', "SER", 'A', 11, ' ', [3.0, 0.0, 0.0], "C"),
            atom_line("ATOM", 5, "CA", 'B', "SER", 'A', 11, ' ', [3.1, 0.1, 0.0], "C"),
            atom_line("ATOM", 6, "CA", ' ', "GLY", 'A', 11, 'A', [4.5, 0.0, 0.0], "C"),
            "TER".to_string(),
            atom_line("ATOM", 7, "CA", ' ', "ASP", 'B', 20, ' ', [0.0, 4.0, 0.0], ""),
            atom_line("HETATM", 8, "O", ' ', "HOH", 'B', 301, ' ', [0.0, 9.0, 0.0], "O"),
            atom_line("HETATM", 9, "ZN", ' ', "ZN", 'B', 302, ' ', [0.0, 7.0, 0.0], "ZN"),
            "END".to_string(),
        ]
        .join("\n")
    }

    #[test]
    fn reads_chains_residues_and_atoms() {
        let (models, metadata) = read(&two_chain_content()).unwrap();
        assert_eq!(models.len(), 1);
        let system = &models[0];

        assert_eq!(metadata.id_code.as_deref(), Some("1ABC"));
        assert_eq!(metadata.title.as_deref(), Some("A TEST COMPLEX"));
        assert_eq!(system.sorted_chain_ids(), vec!['A', 'B']);
        assert_eq!(system.residues_iter().count(), 6);
        assert_eq!(system.atoms_iter().count(), 8);

        let chain_a = system.find_chain_by_id('A').unwrap();
        let lys = system
            .find_residue(chain_a, ResidueKind::Standard, ResidueNumber::new(10, None))
            .unwrap();
        let ca = system.residue_atom(lys, "CA").unwrap();
        assert_eq!(ca.position, Point3::new(1.5, 0.0, 0.0));
        assert!(system.residue_atom(lys, "HA").unwrap().is_hydrogen());
    }

    #[test]
    fn insertion_codes_create_distinct_residues() {
        let (models, _) = read(&two_chain_content()).unwrap();
        let system = &models[0];
        let chain_a = system.find_chain_by_id('A').unwrap();

        let ser = system
            .find_residue(chain_a, ResidueKind::Standard, ResidueNumber::new(11, None))
            .unwrap();
        let gly = system
            .find_residue(chain_a, ResidueKind::Standard, ResidueNumber::new(11, Some('A')))
            .unwrap();
        assert_eq!(system.residue(ser).unwrap().name, "SER");
        assert_eq!(system.residue(gly).unwrap().name, "GLY");
    }

    #[test]
    fn keeps_first_alternate_location_only() {
        let (models, metadata) = read(&two_chain_content()).unwrap();
        let system = &models[0];
        let chain_a = system.find_chain_by_id('A').unwrap();
        let ser = system
            .find_residue(chain_a, ResidueKind::Standard, ResidueNumber::new(11, None))
            .unwrap();

        assert_eq!(metadata.skipped_altlocs, 1);
        assert_eq!(system.residue(ser).unwrap().atoms().len(), 1);
        assert_eq!(
            system.residue_atom(ser, "CA").unwrap().position,
            Point3::new(3.0, 0.0, 0.0)
        );
    }

    #[test]
    fn classifies_hetero_and_water_residues() {
        let (models, _) = read(&two_chain_content()).unwrap();
        let system = &models[0];
        let chain_b = system.find_chain_by_id('B').unwrap();

        assert!(
            system
                .find_residue(chain_b, ResidueKind::Water, ResidueNumber::new(301, None))
                .is_some()
        );
        assert!(
            system
                .find_residue(chain_b, ResidueKind::Hetero, ResidueNumber::new(302, None))
                .is_some()
        );
    }

    #[test]
    fn infers_element_when_columns_are_blank() {
        let (models, _) = read(&two_chain_content()).unwrap();
        let system = &models[0];
        let chain_b = system.find_chain_by_id('B').unwrap();
        let asp = system
            .find_residue(chain_b, ResidueKind::Standard, ResidueNumber::new(20, None))
            .unwrap();
        assert_eq!(system.residue_atom(asp, "CA").unwrap().element, "C");
    }

    #[test]
    fn splits_models_into_separate_systems() {
        let content = [
            "MODEL        1".to_string(),
            atom_line("ATOM", 1, "CA", ' ', "ALA", 'A', 1, ' ', [0.0, 0.0, 0.0], "C"),
            "ENDMDL".to_string(),
            "MODEL        2".to_string(),
            atom_line("ATOM", 1, "CA", ' ', "ALA", 'A', 1, ' ', [1.0, 0.0, 0.0], "C"),
            "ENDMDL".to_string(),
            "END".to_string(),
        ]
        .join("\n");

        let (models, _) = read(&content).unwrap();
        assert_eq!(models.len(), 2);
        assert_eq!(models[0].model_serial(), 1);
        assert_eq!(models[1].model_serial(), 2);
        let (_, atom) = models[1].atoms_iter().next().unwrap();
        assert_eq!(atom.position.x, 1.0);
    }

    #[test]
    fn blank_chain_merging_with_chain_a_is_recorded() {
        let content = [
            "MODEL        1".to_string(),
            atom_line("ATOM", 1, "CA", ' ', "ALA", ' ', 1, ' ', [0.0, 0.0, 0.0], "C"),
            atom_line("ATOM", 2, "CA", ' ', "GLY", ' ', 2, ' ', [3.8, 0.0, 0.0], "C"),
            "ENDMDL".to_string(),
            "MODEL        2".to_string(),
            atom_line("ATOM", 1, "CA", ' ', "ALA", 'A', 1, ' ', [0.0, 0.0, 0.0], "C"),
            atom_line("HETATM", 2, "O", ' ', "HOH", ' ', 301, ' ', [0.0, 3.0, 0.0], "O"),
            atom_line("HETATM", 3, "O", ' ', "HOH", ' ', 302, ' ', [0.0, 6.0, 0.0], "O"),
            "ENDMDL".to_string(),
        ]
        .join("\n");

        let (models, metadata) = read(&content).unwrap();
        assert_eq!(models[0].sorted_chain_ids(), vec!['A']);
        assert_eq!(metadata.blank_chain_atoms, 4);
        assert_eq!(metadata.merged_chain_models, vec![2]);
    }

    #[test]
    fn nested_model_records_are_rejected() {
        let content = [
            "MODEL        1".to_string(),
            atom_line("ATOM", 1, "CA", ' ', "ALA", 'A', 1, ' ', [0.0, 0.0, 0.0], "C"),
            "MODEL        2".to_string(),
        ]
        .join("\n");
        assert!(matches!(
            read(&content),
            Err(PdbError::Inconsistency { line: 3, .. })
        ));
    }

    #[test]
    fn invalid_coordinate_reports_line_number() {
        let mut line = atom_line("ATOM", 1, "CA", ' ', "ALA", 'A', 1, ' ', [0.0, 0.0, 0.0], "C");
        line.replace_range(30..38, "   abcde");
        let content = format!("REMARK test\n{}", line);

        match read(&content) {
            Err(PdbError::Parse {
                line: 2,
                kind: PdbParseErrorKind::InvalidFloat { columns, value },
            }) => {
                assert_eq!(columns, "31-38");
                assert_eq!(value, "abcde");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn short_coordinate_line_is_rejected() {
        let result = read("ATOM      1  CA  ALA A   1       0.000");
        assert!(matches!(
            result,
            Err(PdbError::Parse {
                line: 1,
                kind: PdbParseErrorKind::LineTooShort
            })
        ));
    }

    #[test]
    fn file_without_atoms_is_an_error() {
        assert!(matches!(
            read("HEADER    EMPTY\nEND"),
            Err(PdbError::MissingRecord(_))
        ));
    }

    #[test]
    fn read_from_path_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", two_chain_content()).unwrap();
        let (models, _) = PdbFile::read_from_path(file.path()).unwrap();
        assert_eq!(models[0].atoms_iter().count(), 8);
    }
}
