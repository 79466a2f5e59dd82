use super::atom::Atom;
use super::chain::Chain;
use super::ids::{AtomId, ChainId, ResidueId};
use super::residue::{Residue, ResidueKind, ResidueNumber};
use slotmap::SlotMap;
use std::collections::HashMap;

/// Represents one model of a parsed structure: its chains, residues and atoms.
///
/// Ownership is strictly top-down: the system owns every chain, residue and atom
/// through slot maps, while child-to-parent links (`Residue::chain_id`,
/// `Atom::residue_id`) are plain keys used for lookups only.
#[derive(Debug, Clone, Default)]
pub struct MolecularSystem {
    /// Serial number of the model this system was read from (1 when the file has no MODEL records).
    model_serial: usize,
    /// Primary storage for atoms using a slot map for efficient ID management.
    atoms: SlotMap<AtomId, Atom>,
    /// Primary storage for residues using a slot map for efficient ID management.
    residues: SlotMap<ResidueId, Residue>,
    /// Primary storage for chains using a slot map for efficient ID management.
    chains: SlotMap<ChainId, Chain>,
    /// Lookup map for finding residues by chain ID, residue kind and residue number.
    residue_id_map: HashMap<(ChainId, ResidueKind, ResidueNumber), ResidueId>,
    /// Lookup map for finding chains by their single-character identifier.
    chain_id_map: HashMap<char, ChainId>,
}

impl MolecularSystem {
    /// Creates a new, empty molecular system for model 1.
    pub fn new() -> Self {
        Self::with_model_serial(1)
    }

    /// Creates a new, empty molecular system tagged with a model serial number.
    pub fn with_model_serial(model_serial: usize) -> Self {
        Self {
            model_serial,
            ..Self::default()
        }
    }

    pub fn model_serial(&self) -> usize {
        self.model_serial
    }

    /// Retrieves an immutable reference to an atom by its ID.
    ///
    /// # Return
    ///
    /// Returns `Some(&Atom)` if the atom exists, otherwise `None`.
    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    /// Retrieves a mutable reference to an atom by its ID.
    pub fn atom_mut(&mut self, id: AtomId) -> Option<&mut Atom> {
        self.atoms.get_mut(id)
    }

    /// Returns an iterator over all atoms in the system.
    ///
    /// # Return
    ///
    /// An iterator yielding `(AtomId, &Atom)` pairs.
    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atoms.iter()
    }

    /// Returns a mutable iterator over all atoms in the system.
    pub fn atoms_iter_mut(&mut self) -> impl Iterator<Item = (AtomId, &mut Atom)> {
        self.atoms.iter_mut()
    }

    /// Retrieves an immutable reference to a residue by its ID.
    pub fn residue(&self, id: ResidueId) -> Option<&Residue> {
        self.residues.get(id)
    }

    /// Returns an iterator over all residues in the system.
    pub fn residues_iter(&self) -> impl Iterator<Item = (ResidueId, &Residue)> {
        self.residues.iter()
    }

    /// Retrieves an immutable reference to a chain by its ID.
    pub fn chain(&self, id: ChainId) -> Option<&Chain> {
        self.chains.get(id)
    }

    /// Returns an iterator over all chains in the system, in insertion order.
    pub fn chains_iter(&self) -> impl Iterator<Item = (ChainId, &Chain)> {
        self.chains.iter()
    }

    /// Returns the single-character identifiers of all chains, sorted.
    pub fn sorted_chain_ids(&self) -> Vec<char> {
        let mut ids: Vec<char> = self.chain_id_map.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Finds a chain ID by its single-character identifier.
    ///
    /// # Return
    ///
    /// Returns `Some(ChainId)` if the chain exists, otherwise `None`.
    pub fn find_chain_by_id(&self, id: char) -> Option<ChainId> {
        self.chain_id_map.get(&id).copied()
    }

    /// Finds a residue ID by its chain, kind and residue number.
    ///
    /// # Arguments
    ///
    /// * `chain_id` - The ID of the chain containing the residue.
    /// * `kind` - The standard/hetero/water discriminator of the residue.
    /// * `number` - The sequence number and insertion code of the residue.
    ///
    /// # Return
    ///
    /// Returns `Some(ResidueId)` if the residue exists, otherwise `None`.
    pub fn find_residue(
        &self,
        chain_id: ChainId,
        kind: ResidueKind,
        number: ResidueNumber,
    ) -> Option<ResidueId> {
        self.residue_id_map.get(&(chain_id, kind, number)).copied()
    }

    /// Returns the single-character identifier of the chain owning a residue.
    pub fn chain_char_of(&self, residue_id: ResidueId) -> Option<char> {
        let residue = self.residues.get(residue_id)?;
        self.chains.get(residue.chain_id).map(|chain| chain.id)
    }

    /// Returns the atom of a residue with the given name, if present.
    pub fn residue_atom(&self, residue_id: ResidueId, atom_name: &str) -> Option<&Atom> {
        self.residues
            .get(residue_id)?
            .get_atom_id_by_name(atom_name)
            .and_then(|atom_id| self.atoms.get(atom_id))
    }

    /// Adds a new chain to the system or returns the existing one.
    ///
    /// This method is idempotent; if a chain with the given ID already exists,
    /// it returns the existing chain ID without creating a duplicate.
    pub fn add_chain(&mut self, id: char) -> ChainId {
        *self
            .chain_id_map
            .entry(id)
            .or_insert_with(|| self.chains.insert(Chain::new(id)))
    }

    /// Adds a new residue to a chain or returns the existing one.
    ///
    /// This method is idempotent on `(chain, kind, number)`.
    ///
    /// # Arguments
    ///
    /// * `chain_id` - The ID of the chain to add the residue to.
    /// * `number` - The sequence number and insertion code of the residue.
    /// * `kind` - The standard/hetero/water discriminator.
    /// * `name` - The three-letter name of the residue.
    ///
    /// # Return
    ///
    /// Returns `Some(ResidueId)` if successful, otherwise `None` (if the chain doesn't exist).
    pub fn add_residue(
        &mut self,
        chain_id: ChainId,
        number: ResidueNumber,
        kind: ResidueKind,
        name: &str,
    ) -> Option<ResidueId> {
        let chain = self.chains.get_mut(chain_id)?;
        let key = (chain_id, kind, number);

        let residue_id = *self.residue_id_map.entry(key).or_insert_with(|| {
            let residue = Residue::new(number, kind, name, chain_id);
            self.residues.insert(residue)
        });

        if !chain.residues.contains(&residue_id) {
            chain.residues.push(residue_id);
        }

        Some(residue_id)
    }

    /// Adds an atom to a specific residue.
    ///
    /// # Return
    ///
    /// Returns `Some(AtomId)` if successful, otherwise `None` (if the residue doesn't exist).
    pub fn add_atom_to_residue(&mut self, residue_id: ResidueId, atom: Atom) -> Option<AtomId> {
        let name = atom.name.clone();
        let residue = self.residues.get_mut(residue_id)?;
        let atom_id = self.atoms.insert(Atom {
            residue_id,
            ..atom
        });
        residue.add_atom(&name, atom_id);
        Some(atom_id)
    }

    /// Builds an independent copy of the system restricted to the given chains.
    ///
    /// Chains are copied in the order given; identifiers that do not exist are
    /// ignored. The copy receives fresh keys and carries over atom annotations,
    /// so it can be mutated (e.g. re-annotated with SASA values) without
    /// affecting `self`.
    ///
    /// # Arguments
    ///
    /// * `chain_ids` - The single-character identifiers of the chains to keep.
    ///
    /// # Return
    ///
    /// A new `MolecularSystem` with the same model serial.
    pub fn extract_chains(&self, chain_ids: &[char]) -> MolecularSystem {
        let mut extracted = MolecularSystem::with_model_serial(self.model_serial);

        for &chain_char in chain_ids {
            let Some(chain) = self
                .find_chain_by_id(chain_char)
                .and_then(|id| self.chains.get(id))
            else {
                continue;
            };
            let new_chain_id = extracted.add_chain(chain_char);

            for &residue_id in chain.residues() {
                let Some(residue) = self.residues.get(residue_id) else {
                    continue;
                };
                let Some(new_residue_id) =
                    extracted.add_residue(new_chain_id, residue.number, residue.kind, &residue.name)
                else {
                    continue;
                };
                for &atom_id in residue.atoms() {
                    if let Some(atom) = self.atoms.get(atom_id) {
                        extracted.add_atom_to_residue(new_residue_id, atom.clone());
                    }
                }
            }
        }

        extracted
    }
}
