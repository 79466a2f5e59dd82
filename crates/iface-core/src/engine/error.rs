use thiserror::Error;

use super::alignment::RmsdMode;
use crate::core::geometry::superposition::SuperpositionError;
use crate::core::models::ids::ResidueId;
use crate::core::surface::sasa::SasaError;

/// Failures of the collaborators the engine delegates to.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Surface area service failed: {source}")]
    Sasa {
        #[from]
        source: SasaError,
    },

    #[error("Superposition service failed: {source}")]
    Superposition {
        #[from]
        source: SuperpositionError,
    },

    #[error("Atom {atom} of residue {residue} has no surface area annotation (context '{context}')")]
    MissingSasaAnnotation {
        context: String,
        residue: String,
        atom: String,
    },
}

#[derive(Debug, Error)]
pub enum InterfaceError {
    #[error(
        "Residue sequences differ between interfaces (reference '{reference}', mobile '{mobile}')"
    )]
    SequenceMismatch { reference: String, mobile: String },

    #[error("Interface '{interface}' spans {found} chains, but exactly 2 are supported")]
    UnsupportedChainCount { interface: String, found: usize },

    #[error("Interface '{interface}' has no contacts on chain '{chain}'")]
    EmptyContactSet { interface: String, chain: char },

    #[error("Residue {residue} has no known one-letter code")]
    UnknownResidue { residue: String },

    #[error("Interface '{interface}' has no residues")]
    EmptyResidueSet { interface: String },

    #[error("Interfaces share no chain (reference {reference:?}, mobile {mobile:?})")]
    NoCommonChain {
        reference: Vec<char>,
        mobile: Vec<char>,
    },

    #[error("Residue {residue} has no '{atom}' atom")]
    MissingAtom { residue: String, atom: &'static str },

    #[error("Invalid contact pair ({first}, {second}): {reason}")]
    InvalidContactPair {
        first: String,
        second: String,
        reason: &'static str,
    },

    #[error("Residue {0:?} does not belong to the structure")]
    ResidueNotInSystem(ResidueId),

    #[error("RMSD mode {0:?} is not implemented")]
    UnimplementedMode(RmsdMode),

    #[error("External service error: {0}")]
    ExternalService(#[from] ServiceError),
}

impl From<SasaError> for InterfaceError {
    fn from(err: SasaError) -> Self {
        InterfaceError::ExternalService(err.into())
    }
}

impl From<SuperpositionError> for InterfaceError {
    fn from(err: SuperpositionError) -> Self {
        InterfaceError::ExternalService(err.into())
    }
}
