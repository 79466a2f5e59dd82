use super::config::ConfigError;
use crate::core::search::ContactSearchError;
use crate::core::surface::radii::RadiiLoadError;
use crate::core::surface::sasa::SasaError;
use crate::engine::error::InterfaceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Chain '{0}' does not exist in the structure")]
    UnknownChain(char),

    #[error("An interface needs at least 2 chains, but only {found:?} were selected")]
    NotEnoughChains { found: Vec<char> },

    #[error("Residue {residue} has no counterpart in '{structure}'")]
    MissingResidue { residue: String, structure: String },

    #[error("Contact search failed: {0}")]
    ContactSearch(#[from] ContactSearchError),

    #[error("Failed to load van der Waals radii: {0}")]
    Radii(#[from] RadiiLoadError),

    #[error("Surface area service failed: {0}")]
    Sasa(#[from] SasaError),

    #[error(transparent)]
    Interface(#[from] InterfaceError),
}
