use crate::error::{CliError, Result};
use ifacepp::engine::alignment::RmsdMode;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileContactsConfig {
    pub cutoff: Option<f64>,
    pub heavy_atoms_only: Option<bool>,
    pub include_hetero: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileSasaConfig {
    pub probe_radius: Option<f64>,
    pub sphere_points: Option<usize>,
    pub radii_path: Option<PathBuf>,
    pub timeout_secs: Option<f64>,
    pub include_hetero: Option<bool>,
    pub precomputed_path: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileRmsdConfig {
    pub mode: Option<RmsdMode>,
    pub skip_sequence_check: Option<bool>,
}

/// The optional TOML configuration file. Every field may be omitted.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub chains: Option<Vec<char>>,
    pub contacts: Option<FileContactsConfig>,
    pub sasa: Option<FileSasaConfig>,
    pub rmsd: Option<FileRmsdConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;

        // Relative data paths are resolved against the config file's directory.
        if let Some(base) = path.parent() {
            if let Some(sasa) = config.sasa.as_mut() {
                for entry in [&mut sasa.radii_path, &mut sasa.precomputed_path] {
                    if let Some(p) = entry.as_mut().filter(|p| p.is_relative()) {
                        *p = base.join(&*p);
                    }
                }
            }
        }
        Ok(config)
    }
}
