pub mod analyze;
pub mod compare;

use crate::error::{CliError, Result};
use ifacepp::core::io::pdb::PdbFile;
use ifacepp::core::io::traits::StructureFile;
use ifacepp::core::models::system::MolecularSystem;
use std::path::Path;
use tracing::{info, warn};

/// Reads every model of a PDB file, or only the one with serial `model`.
pub(crate) fn read_models(path: &Path, model: Option<usize>) -> Result<Vec<MolecularSystem>> {
    info!("Loading structure from {:?}", path);
    let (models, metadata) =
        PdbFile::read_from_path(path).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
    if metadata.skipped_altlocs > 0 {
        warn!(
            "Ignored {} alternate-location atoms in {:?}.",
            metadata.skipped_altlocs, path
        );
    }
    if !metadata.merged_chain_models.is_empty() {
        warn!(
            "Atoms without a chain identifier were merged into chain A of model(s) {:?} in {:?}.",
            metadata.merged_chain_models, path
        );
    }
    match model {
        None => Ok(models),
        Some(serial) => {
            let available: Vec<usize> = models.iter().map(|m| m.model_serial()).collect();
            models
                .into_iter()
                .find(|m| m.model_serial() == serial)
                .map(|m| vec![m])
                .ok_or_else(|| {
                    CliError::Argument(format!(
                        "Model {} not found in {:?} (available: {:?})",
                        serial, path, available
                    ))
                })
        }
    }
}

/// Labels a structure by its file stem, suffixed with `#serial` when the
/// file holds several models.
pub(crate) fn structure_label(path: &Path, system: &MolecularSystem, multi_model: bool) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    if multi_model {
        format!("{}#{}", stem, system.model_serial())
    } else {
        stem
    }
}
