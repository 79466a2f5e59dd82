use crate::core::models::ids::ResidueId;
use crate::core::models::residue::ResidueKind;
use crate::core::models::system::MolecularSystem;
use kiddo::{KdTree, SquaredEuclidean};
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_CONTACT_CUTOFF: f64 = 5.0;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ContactSearchError {
    #[error("Contact cutoff must be a positive distance, got {0}")]
    InvalidCutoff(f64),
    #[error("Chain '{0}' does not exist in the structure")]
    UnknownChain(char),
}

/// A neighbor-search service producing residue contact pairs between chains.
pub trait ContactSearch {
    /// Returns deduplicated residue pairs from two different chains among `chains`.
    ///
    /// Each pair is oriented so that its first residue belongs to the chain
    /// with the smaller identifier.
    fn find_contacts(
        &self,
        system: &MolecularSystem,
        chains: &[char],
    ) -> Result<Vec<(ResidueId, ResidueId)>, ContactSearchError>;
}

/// Atom-distance contact search backed by a KD-tree.
///
/// Two residues are in contact when any pair of their atoms lies within
/// `cutoff` Angstroms. Hydrogens are ignored when `heavy_atoms_only` is set,
/// hetero groups and waters unless `include_hetero` is set.
#[derive(Debug, Clone, Copy)]
pub struct KdTreeContactSearch {
    pub cutoff: f64,
    pub heavy_atoms_only: bool,
    pub include_hetero: bool,
}

impl Default for KdTreeContactSearch {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_CONTACT_CUTOFF,
            heavy_atoms_only: true,
            include_hetero: false,
        }
    }
}

struct IndexedAtom {
    chain: char,
    residue_id: ResidueId,
    chain_position: usize,
}

impl ContactSearch for KdTreeContactSearch {
    fn find_contacts(
        &self,
        system: &MolecularSystem,
        chains: &[char],
    ) -> Result<Vec<(ResidueId, ResidueId)>, ContactSearchError> {
        if !self.cutoff.is_finite() || self.cutoff <= 0.0 {
            return Err(ContactSearchError::InvalidCutoff(self.cutoff));
        }

        let mut positions: Vec<[f64; 3]> = Vec::new();
        let mut indexed: Vec<IndexedAtom> = Vec::new();
        for &chain_char in chains {
            let chain = system
                .find_chain_by_id(chain_char)
                .and_then(|id| system.chain(id))
                .ok_or(ContactSearchError::UnknownChain(chain_char))?;
            for (chain_position, &residue_id) in chain.residues().iter().enumerate() {
                let Some(residue) = system.residue(residue_id) else {
                    continue;
                };
                if residue.kind != ResidueKind::Standard && !self.include_hetero {
                    continue;
                }
                for &atom_id in residue.atoms() {
                    let Some(atom) = system.atom(atom_id) else {
                        continue;
                    };
                    if self.heavy_atoms_only && atom.is_hydrogen() {
                        continue;
                    }
                    positions.push([atom.position.x, atom.position.y, atom.position.z]);
                    indexed.push(IndexedAtom {
                        chain: chain_char,
                        residue_id,
                        chain_position,
                    });
                }
            }
        }

        if positions.is_empty() {
            return Ok(Vec::new());
        }

        let tree: KdTree<f64, 3> = (&positions).into();
        let cutoff_sq = self.cutoff * self.cutoff;

        // Ordered by (chain, position in chain) of both partners for deterministic output.
        let mut pairs: BTreeSet<((char, usize), (char, usize))> = BTreeSet::new();
        let mut ids = HashMap::new();
        for (index, query) in positions.iter().enumerate() {
            let a = &indexed[index];
            for neighbor in tree.within_unsorted::<SquaredEuclidean>(query, cutoff_sq) {
                let b = &indexed[neighbor.item as usize];
                if a.chain >= b.chain {
                    continue;
                }
                let key_a = (a.chain, a.chain_position);
                let key_b = (b.chain, b.chain_position);
                ids.insert(key_a, a.residue_id);
                ids.insert(key_b, b.residue_id);
                pairs.insert((key_a, key_b));
            }
        }

        let contacts: Vec<(ResidueId, ResidueId)> = pairs
            .into_iter()
            .filter_map(|(a, b)| Some((*ids.get(&a)?, *ids.get(&b)?)))
            .collect();
        debug!(
            atoms = positions.len(),
            pairs = contacts.len(),
            cutoff = self.cutoff,
            "Contact search finished."
        );
        Ok(contacts)
    }
}
