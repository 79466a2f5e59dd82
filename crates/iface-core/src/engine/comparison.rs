use super::error::InterfaceError;
use super::interface::Interface;
use crate::core::models::residue::ResidueKey;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, instrument};

/// Residue key -> sorted `(chain, key)` partners for one chain of an interface.
pub type NumberedContacts = BTreeMap<ResidueKey, BTreeSet<(char, ResidueKey)>>;

impl Interface<'_> {
    /// Contacts of `chain_id` keyed by residue identity instead of arena ids,
    /// so that interfaces cut from different structures can be compared.
    pub fn numbered_contacts(&self, chain_id: char) -> NumberedContacts {
        let system = self.system();
        let key_of = |id| system.residue(id).map(|residue| residue.key());
        let partner_of = |id| Some((self.chain_of(id)?, key_of(id)?));

        let mut numbered = NumberedContacts::new();
        if let Some(contacts) = self.contact_map().chain(chain_id) {
            for (residue_id, partners) in contacts.iter() {
                let Some(key) = key_of(residue_id) else {
                    continue;
                };
                numbered
                    .entry(key)
                    .or_default()
                    .extend(partners.iter().filter_map(|&p| partner_of(p)));
            }
        }
        numbered
    }

    /// Fraction of this (reference) interface's contacts that `mobile` also has.
    ///
    /// Contacts are counted on a single representative chain, the smallest
    /// chain identifier the two interfaces have in common; because contact
    /// maps are symmetric this covers every contact of a two-chain interface.
    /// Residues are matched by chain, number, insertion code and kind.
    ///
    /// # Errors
    ///
    /// - [`InterfaceError::UnsupportedChainCount`] unless both interfaces span exactly two chains.
    /// - [`InterfaceError::NoCommonChain`] when they share no chain identifier.
    /// - [`InterfaceError::EmptyContactSet`] when the reference has no contacts on that chain.
    ///
    /// A `mobile` interface without any contact pairs shares none of the
    /// reference contacts and scores 0.0 whatever its chain count.
    #[instrument(skip_all, name = "fcc", fields(reference = %self.id(), mobile = %mobile.id()))]
    pub fn fcc(&self, mobile: &Interface<'_>) -> Result<f64, InterfaceError> {
        let (first_chain, _) = self.require_two_chains()?;
        if mobile.contact_pairs().is_empty() {
            self.total_contacts(first_chain)?;
            debug!("Mobile interface has no contacts.");
            return Ok(0.0);
        }
        mobile.require_two_chains()?;

        let reference_chains = self.chain_ids();
        let mobile_chains = mobile.chain_ids();
        let chain = reference_chains
            .iter()
            .find(|c| mobile_chains.contains(c))
            .copied()
            .ok_or_else(|| InterfaceError::NoCommonChain {
                reference: reference_chains.clone(),
                mobile: mobile_chains.clone(),
            })?;

        let reference_contacts = self.numbered_contacts(chain);
        let mobile_contacts = mobile.numbered_contacts(chain);
        let total = self.total_contacts(chain)?;

        let common: usize = reference_contacts
            .iter()
            .filter_map(|(key, partners)| {
                mobile_contacts
                    .get(key)
                    .map(|other| partners.intersection(other).count())
            })
            .sum();

        debug!(chain = %chain, common, total, "Counted common contacts.");
        Ok(common as f64 / total as f64)
    }

    fn total_contacts(&self, chain: char) -> Result<usize, InterfaceError> {
        let total = self
            .contact_map()
            .chain(chain)
            .map_or(0, |contacts| contacts.contact_count());
        if total == 0 {
            return Err(InterfaceError::EmptyContactSet {
                interface: self.id().to_string(),
                chain,
            });
        }
        Ok(total)
    }
}
