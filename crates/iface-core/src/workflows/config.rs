use super::error::WorkflowError;
use crate::core::search::KdTreeContactSearch;
use crate::core::surface::annotations::PrecomputedSasa;
use crate::core::surface::radii::RadiiTable;
use crate::core::surface::sasa::{ShrakeRupley, SurfaceAreaCalculator};
use crate::engine::alignment::{RmsdMode, RmsdOptions};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidValue {
        parameter: &'static str,
        reason: String,
    },
}

/// Which chains of a structure take part in the interface.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ChainSelection {
    /// Every chain of the structure.
    #[default]
    All,
    /// The listed chain identifiers; each must exist.
    Explicit(Vec<char>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactConfig {
    pub cutoff: f64,
    pub heavy_atoms_only: bool,
    pub include_hetero: bool,
}

impl ContactConfig {
    pub fn search(&self) -> KdTreeContactSearch {
        KdTreeContactSearch {
            cutoff: self.cutoff,
            heavy_atoms_only: self.heavy_atoms_only,
            include_hetero: self.include_hetero,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SasaConfig {
    pub probe_radius: f64,
    pub sphere_points: usize,
    pub radii_path: Option<PathBuf>,
    pub timeout: Option<Duration>,
    pub include_hetero: bool,
    /// Per-atom values to import instead of computing them.
    pub precomputed_path: Option<PathBuf>,
}

impl SasaConfig {
    /// Instantiates the configured surface-area service, loading any files it needs.
    pub fn calculator(&self) -> Result<Box<dyn SurfaceAreaCalculator + Send + Sync>, WorkflowError> {
        if let Some(path) = &self.precomputed_path {
            return Ok(Box::new(PrecomputedSasa::load(path)?));
        }
        let radii = match &self.radii_path {
            Some(path) => RadiiTable::load(path)?,
            None => RadiiTable::default(),
        };
        Ok(Box::new(ShrakeRupley {
            probe_radius: self.probe_radius,
            n_points: self.sphere_points,
            radii,
            timeout: self.timeout,
            include_hetero: self.include_hetero,
        }))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub contacts: ContactConfig,
    pub sasa: SasaConfig,
    pub chains: ChainSelection,
    pub rmsd: RmsdOptions,
}

#[derive(Default)]
pub struct AnalysisConfigBuilder {
    contact_cutoff: Option<f64>,
    heavy_atoms_only: Option<bool>,
    include_hetero_contacts: Option<bool>,
    probe_radius: Option<f64>,
    sphere_points: Option<usize>,
    radii_path: Option<PathBuf>,
    sasa_timeout: Option<Duration>,
    include_hetero_sasa: Option<bool>,
    precomputed_sasa_path: Option<PathBuf>,
    chains: Option<ChainSelection>,
    rmsd_mode: Option<RmsdMode>,
    skip_sequence_check: Option<bool>,
}

impl AnalysisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contact_cutoff(mut self, cutoff: f64) -> Self {
        self.contact_cutoff = Some(cutoff);
        self
    }
    pub fn heavy_atoms_only(mut self, enabled: bool) -> Self {
        self.heavy_atoms_only = Some(enabled);
        self
    }
    pub fn include_hetero_contacts(mut self, enabled: bool) -> Self {
        self.include_hetero_contacts = Some(enabled);
        self
    }
    pub fn probe_radius(mut self, radius: f64) -> Self {
        self.probe_radius = Some(radius);
        self
    }
    pub fn sphere_points(mut self, n: usize) -> Self {
        self.sphere_points = Some(n);
        self
    }
    pub fn radii_path(mut self, path: Option<PathBuf>) -> Self {
        self.radii_path = path;
        self
    }
    pub fn sasa_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.sasa_timeout = timeout;
        self
    }
    pub fn include_hetero_sasa(mut self, enabled: bool) -> Self {
        self.include_hetero_sasa = Some(enabled);
        self
    }
    pub fn precomputed_sasa_path(mut self, path: Option<PathBuf>) -> Self {
        self.precomputed_sasa_path = path;
        self
    }
    pub fn chains(mut self, selection: ChainSelection) -> Self {
        self.chains = Some(selection);
        self
    }
    pub fn rmsd_mode(mut self, mode: RmsdMode) -> Self {
        self.rmsd_mode = Some(mode);
        self
    }
    pub fn skip_sequence_check(mut self, skip: bool) -> Self {
        self.skip_sequence_check = Some(skip);
        self
    }

    pub fn build(self) -> Result<AnalysisConfig, ConfigError> {
        let contacts = ContactConfig {
            cutoff: self
                .contact_cutoff
                .ok_or(ConfigError::MissingParameter("contact_cutoff"))?,
            heavy_atoms_only: self.heavy_atoms_only.unwrap_or(true),
            include_hetero: self.include_hetero_contacts.unwrap_or(false),
        };
        if !contacts.cutoff.is_finite() || contacts.cutoff <= 0.0 {
            return Err(ConfigError::InvalidValue {
                parameter: "contact_cutoff",
                reason: format!("must be a positive distance, got {}", contacts.cutoff),
            });
        }

        let sasa = SasaConfig {
            probe_radius: self
                .probe_radius
                .ok_or(ConfigError::MissingParameter("probe_radius"))?,
            sphere_points: self
                .sphere_points
                .ok_or(ConfigError::MissingParameter("sphere_points"))?,
            radii_path: self.radii_path,
            timeout: self.sasa_timeout,
            include_hetero: self.include_hetero_sasa.unwrap_or(false),
            precomputed_path: self.precomputed_sasa_path,
        };
        if !sasa.probe_radius.is_finite() || sasa.probe_radius < 0.0 {
            return Err(ConfigError::InvalidValue {
                parameter: "probe_radius",
                reason: format!("must be non-negative, got {}", sasa.probe_radius),
            });
        }
        if sasa.sphere_points == 0 {
            return Err(ConfigError::InvalidValue {
                parameter: "sphere_points",
                reason: "must be at least 1".to_string(),
            });
        }

        let chains = self
            .chains
            .ok_or(ConfigError::MissingParameter("chains"))?;
        if let ChainSelection::Explicit(ids) = &chains {
            if ids.len() < 2 {
                return Err(ConfigError::InvalidValue {
                    parameter: "chains",
                    reason: format!("an interface needs at least 2 chains, got {}", ids.len()),
                });
            }
        }

        Ok(AnalysisConfig {
            contacts,
            sasa,
            chains,
            rmsd: RmsdOptions {
                mode: self.rmsd_mode.unwrap_or_default(),
                skip_sequence_check: self.skip_sequence_check.unwrap_or(false),
            },
        })
    }
}
