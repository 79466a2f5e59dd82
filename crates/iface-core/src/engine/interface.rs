use super::contacts::ContactMap;
use super::error::InterfaceError;
use crate::core::models::ids::ResidueId;
use crate::core::models::system::MolecularSystem;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::OnceLock;
use tracing::debug;

/// Residues of two or more chains judged to be in contact, with their raw contact pairs.
///
/// An `Interface` borrows the [`MolecularSystem`] it was cut from. Membership
/// and contact pairs are frozen at construction; the derived [`ContactMap`]
/// is computed on first use and cached for the lifetime of the instance.
///
/// Residue order is significant: RMSD calculations pair the residues of two
/// interfaces by position in this list.
#[derive(Debug)]
pub struct Interface<'s> {
    id: String,
    system: &'s MolecularSystem,
    residues: Vec<ResidueId>,
    chains: BTreeMap<char, Vec<ResidueId>>,
    residue_chains: HashMap<ResidueId, char>,
    contact_pairs: Vec<(ResidueId, ResidueId)>,
    contact_map: OnceLock<ContactMap>,
}

impl<'s> Interface<'s> {
    /// Creates an interface from member residues and raw contact pairs.
    ///
    /// Duplicate residues are dropped (first occurrence wins), as are pairs
    /// repeated in either orientation.
    ///
    /// # Errors
    ///
    /// Returns [`InterfaceError::ResidueNotInSystem`] for residue ids unknown to
    /// `system`, and [`InterfaceError::InvalidContactPair`] for a pair whose
    /// members are not both interface residues of two different chains.
    pub fn new(
        id: impl Into<String>,
        system: &'s MolecularSystem,
        residues: impl IntoIterator<Item = ResidueId>,
        contact_pairs: impl IntoIterator<Item = (ResidueId, ResidueId)>,
    ) -> Result<Self, InterfaceError> {
        let mut members = Vec::new();
        let mut chains: BTreeMap<char, Vec<ResidueId>> = BTreeMap::new();
        let mut residue_chains = HashMap::new();

        for residue_id in residues {
            if residue_chains.contains_key(&residue_id) {
                continue;
            }
            let chain = system
                .chain_char_of(residue_id)
                .ok_or(InterfaceError::ResidueNotInSystem(residue_id))?;
            residue_chains.insert(residue_id, chain);
            chains.entry(chain).or_default().push(residue_id);
            members.push(residue_id);
        }

        let mut interface = Self {
            id: id.into(),
            system,
            residues: members,
            chains,
            residue_chains,
            contact_pairs: Vec::new(),
            contact_map: OnceLock::new(),
        };

        let mut seen = HashSet::new();
        for (first, second) in contact_pairs {
            let invalid = |reason| InterfaceError::InvalidContactPair {
                first: interface.describe_residue(first),
                second: interface.describe_residue(second),
                reason,
            };
            let (Some(first_chain), Some(second_chain)) =
                (interface.chain_of(first), interface.chain_of(second))
            else {
                return Err(invalid("residue is not a member of the interface"));
            };
            if first_chain == second_chain {
                return Err(invalid("both residues belong to the same chain"));
            }
            let unordered = if first <= second {
                (first, second)
            } else {
                (second, first)
            };
            if seen.insert(unordered) {
                interface.contact_pairs.push((first, second));
            }
        }

        debug!(
            interface = %interface.id,
            residues = interface.residues.len(),
            chains = interface.chains.len(),
            pairs = interface.contact_pairs.len(),
            "Interface assembled."
        );
        Ok(interface)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn system(&self) -> &'s MolecularSystem {
        self.system
    }

    /// Member residues in insertion order.
    pub fn residues(&self) -> &[ResidueId] {
        &self.residues
    }

    /// Member residues read from standard records, in insertion order.
    ///
    /// Waters and hetero groups can be interface members when the contact
    /// search includes them; they are skipped by composition and RMSD.
    pub fn standard_residues(&self) -> impl Iterator<Item = ResidueId> + '_ {
        self.residues.iter().copied().filter(|&residue_id| {
            self.system
                .residue(residue_id)
                .is_some_and(|residue| residue.is_standard())
        })
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// Chain identifiers in sorted order.
    pub fn chain_ids(&self) -> Vec<char> {
        self.chains.keys().copied().collect()
    }

    pub fn chain_residues(&self, chain_id: char) -> Option<&[ResidueId]> {
        self.chains.get(&chain_id).map(Vec::as_slice)
    }

    pub fn chain_of(&self, residue_id: ResidueId) -> Option<char> {
        self.residue_chains.get(&residue_id).copied()
    }

    pub fn contact_pairs(&self) -> &[(ResidueId, ResidueId)] {
        &self.contact_pairs
    }

    /// The symmetric contact map, built from the contact pairs on first access.
    pub fn contact_map(&self) -> &ContactMap {
        self.contact_map.get_or_init(|| {
            debug!(interface = %self.id, "Building contact map.");
            ContactMap::build(
                self.chains.keys().copied(),
                &self.contact_pairs,
                &self.residue_chains,
            )
        })
    }

    /// Human-readable residue label such as `A:LYS52A`.
    pub fn describe_residue(&self, residue_id: ResidueId) -> String {
        match (
            self.system.chain_char_of(residue_id),
            self.system.residue(residue_id),
        ) {
            (Some(chain), Some(residue)) => format!("{}:{}{}", chain, residue.name, residue.number),
            _ => format!("{:?}", residue_id),
        }
    }

    pub(crate) fn require_two_chains(&self) -> Result<(char, char), InterfaceError> {
        let mut chains = self.chains.keys().copied();
        match (chains.next(), chains.next(), chains.next()) {
            (Some(a), Some(b), None) => Ok((a, b)),
            _ => Err(InterfaceError::UnsupportedChainCount {
                interface: self.id.clone(),
                found: self.chains.len(),
            }),
        }
    }
}
