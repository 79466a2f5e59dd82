use super::config::ChainSelection;
use super::error::WorkflowError;
use crate::core::models::ids::ResidueId;
use crate::core::models::system::MolecularSystem;
use crate::core::search::ContactSearch;
use crate::engine::interface::Interface;
use itertools::Itertools;
use tracing::{info, instrument};

/// Resolves a chain selection against a structure into sorted, unique chain ids.
pub fn resolve_chains(
    system: &MolecularSystem,
    selection: &ChainSelection,
) -> Result<Vec<char>, WorkflowError> {
    let chains = match selection {
        ChainSelection::All => system.sorted_chain_ids(),
        ChainSelection::Explicit(ids) => {
            if let Some(&missing) = ids
                .iter()
                .find(|&&id| system.find_chain_by_id(id).is_none())
            {
                return Err(WorkflowError::UnknownChain(missing));
            }
            ids.iter().copied().sorted_unstable().dedup().collect()
        }
    };
    if chains.len() < 2 {
        return Err(WorkflowError::NotEnoughChains { found: chains });
    }
    Ok(chains)
}

/// Builds the interface between the given chains of one structure.
///
/// Member residues are the residues that take part in at least one contact,
/// ordered by chain identifier and then by their position in the chain, so
/// that two models of the same molecule produce positionally paired lists.
#[instrument(skip_all, name = "build_interface")]
pub fn build_interface<'s, S>(
    system: &'s MolecularSystem,
    chains: &[char],
    search: &S,
    id: impl Into<String>,
) -> Result<Interface<'s>, WorkflowError>
where
    S: ContactSearch + ?Sized,
{
    let id = id.into();
    let pairs = search.find_contacts(system, chains)?;

    let residues: Vec<ResidueId> = pairs
        .iter()
        .flat_map(|&(a, b)| [a, b])
        .unique()
        .sorted_by_key(|&residue_id| residue_order(system, residue_id))
        .collect();

    let interface = Interface::new(id, system, residues, pairs)?;
    info!(
        interface = %interface.id(),
        chains = ?interface.chain_ids(),
        residues = interface.len(),
        contacts = interface.contact_pairs().len(),
        "Interface built."
    );
    Ok(interface)
}

fn residue_order(system: &MolecularSystem, residue_id: ResidueId) -> (char, usize) {
    let chain = system.residue(residue_id).and_then(|r| system.chain(r.chain_id));
    (
        chain.map(|c| c.id).unwrap_or(char::MAX),
        chain
            .and_then(|c| c.position_of(residue_id))
            .unwrap_or(usize::MAX),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::search::KdTreeContactSearch;
    use crate::engine::interface::tests::add_ca_residue;

    fn two_chain_system() -> MolecularSystem {
        let mut system = MolecularSystem::new();
        // Chain B is declared first to check the ordering.
        add_ca_residue(&mut system, 'B', 5, "ASP", [0.0, 3.5, 0.0]);
        add_ca_residue(&mut system, 'B', 6, "GLY", [60.0, 0.0, 0.0]);
        add_ca_residue(&mut system, 'A', 2, "LYS", [3.0, 0.0, 0.0]);
        add_ca_residue(&mut system, 'A', 1, "SER", [0.0, 0.0, 0.0]);
        system
    }

    #[test]
    fn resolve_all_chains_sorted() {
        let system = two_chain_system();
        assert_eq!(
            resolve_chains(&system, &ChainSelection::All).unwrap(),
            vec!['A', 'B']
        );
    }

    #[test]
    fn resolve_explicit_chains_validates_ids() {
        let system = two_chain_system();
        assert_eq!(
            resolve_chains(&system, &ChainSelection::Explicit(vec!['B', 'A', 'B'])).unwrap(),
            vec!['A', 'B']
        );
        assert!(matches!(
            resolve_chains(&system, &ChainSelection::Explicit(vec!['A', 'Q'])),
            Err(WorkflowError::UnknownChain('Q'))
        ));
        assert!(matches!(
            resolve_chains(&system, &ChainSelection::Explicit(vec!['A', 'A'])),
            Err(WorkflowError::NotEnoughChains { .. })
        ));
    }

    #[test]
    fn single_chain_structure_cannot_form_an_interface() {
        let mut system = MolecularSystem::new();
        add_ca_residue(&mut system, 'A', 1, "ALA", [0.0; 3]);
        assert!(matches!(
            resolve_chains(&system, &ChainSelection::All),
            Err(WorkflowError::NotEnoughChains { .. })
        ));
    }

    #[test]
    fn residues_are_ordered_by_chain_then_position() {
        let system = two_chain_system();
        let interface =
            build_interface(&system, &['A', 'B'], &KdTreeContactSearch::default(), "complex")
                .unwrap();

        let labels: Vec<String> = interface
            .residues()
            .iter()
            .map(|&id| interface.describe_residue(id))
            .collect();
        // Chain A residues keep file order (2 before 1); the distant B6 is not a member.
        assert_eq!(labels, vec!["A:LYS2", "A:SER1", "B:ASP5"]);
        assert_eq!(interface.contact_pairs().len(), 2);
        assert_eq!(interface.id(), "complex");
    }

    #[test]
    fn search_errors_are_propagated() {
        let system = two_chain_system();
        let search = KdTreeContactSearch {
            cutoff: -1.0,
            ..KdTreeContactSearch::default()
        };
        assert!(matches!(
            build_interface(&system, &['A', 'B'], &search, "x"),
            Err(WorkflowError::ContactSearch(_))
        ));
    }
}
