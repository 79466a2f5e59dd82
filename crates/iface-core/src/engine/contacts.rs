use crate::core::models::ids::ResidueId;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Contacts of the residues of one chain, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainContacts {
    order: Vec<ResidueId>,
    partners: HashMap<ResidueId, Vec<ResidueId>>,
}

impl ChainContacts {
    pub fn partners(&self, residue_id: ResidueId) -> Option<&[ResidueId]> {
        self.partners.get(&residue_id).map(Vec::as_slice)
    }

    /// Residues with at least one partner, each with its ordered partner list.
    pub fn iter(&self) -> impl Iterator<Item = (ResidueId, &[ResidueId])> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.partners.get(id).map(|p| (*id, p.as_slice())))
    }

    pub fn residue_count(&self) -> usize {
        self.order.len()
    }

    /// Number of residue-partner relationships recorded for this chain.
    pub fn contact_count(&self) -> usize {
        self.partners.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn push(&mut self, residue_id: ResidueId, partner_id: ResidueId) {
        let partners = self.partners.entry(residue_id).or_insert_with(|| {
            self.order.push(residue_id);
            Vec::new()
        });
        partners.push(partner_id);
    }
}

/// Symmetric per-chain contact map: chain id -> residue -> partner residues.
///
/// Every chain of the interface has an entry, possibly empty. If residue `b`
/// is a partner of `a`, then `a` is a partner of `b` under `b`'s chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactMap {
    chains: BTreeMap<char, ChainContacts>,
}

impl ContactMap {
    /// Builds the map from raw residue pairs.
    ///
    /// `chain_of` must resolve both members of every pair; pairs it cannot
    /// resolve are ignored. Partner lists keep the order in which partners
    /// are first seen and never contain duplicates, whatever the pair order
    /// or orientation.
    pub fn build(
        chain_ids: impl IntoIterator<Item = char>,
        pairs: &[(ResidueId, ResidueId)],
        chain_of: &HashMap<ResidueId, char>,
    ) -> Self {
        let mut chains: BTreeMap<char, ChainContacts> = chain_ids
            .into_iter()
            .map(|c| (c, ChainContacts::default()))
            .collect();
        let mut seen: HashSet<(ResidueId, ResidueId)> = HashSet::with_capacity(pairs.len() * 2);

        for &(first, second) in pairs {
            let (Some(&first_chain), Some(&second_chain)) =
                (chain_of.get(&first), chain_of.get(&second))
            else {
                continue;
            };
            if seen.insert((first, second)) {
                chains.entry(first_chain).or_default().push(first, second);
            }
            if seen.insert((second, first)) {
                chains.entry(second_chain).or_default().push(second, first);
            }
        }

        Self { chains }
    }

    pub fn chain(&self, chain_id: char) -> Option<&ChainContacts> {
        self.chains.get(&chain_id)
    }

    pub fn chains(&self) -> impl Iterator<Item = (char, &ChainContacts)> {
        self.chains.iter().map(|(c, contacts)| (*c, contacts))
    }

    pub fn partners(&self, chain_id: char, residue_id: ResidueId) -> Option<&[ResidueId]> {
        self.chains.get(&chain_id)?.partners(residue_id)
    }
}
