use super::{read_models, structure_label};
use crate::cli::CompareArgs;
use crate::config::build_config;
use crate::display;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use ifacepp::core::geometry::superposition::KabschSuperimposer;
use ifacepp::core::models::system::MolecularSystem;
use ifacepp::workflows::compare::{Pose, PoseComparison};
use ifacepp::workflows::{self, progress::ProgressReporter};
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

#[derive(Serialize)]
struct PoseRow<'a> {
    pose: &'a str,
    fcc: Option<f64>,
    irmsd: Option<f64>,
    error: Option<String>,
}

impl<'a> From<&'a PoseComparison> for PoseRow<'a> {
    fn from(result: &'a PoseComparison) -> Self {
        let errors: Vec<String> = [("fcc", &result.fcc), ("irmsd", &result.rmsd)]
            .into_iter()
            .filter_map(|(metric, value)| value.as_ref().err().map(|e| format!("{}: {}", metric, e)))
            .collect();
        Self {
            pose: &result.label,
            fcc: result.fcc.as_ref().ok().copied(),
            irmsd: result.rmsd.as_ref().ok().copied(),
            error: (!errors.is_empty()).then(|| errors.join("; ")),
        }
    }
}

pub fn run(args: CompareArgs) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let config = build_config(&args.config, None, Some(&args.rmsd))?;

    let reference = read_models(&args.reference, Some(args.reference_model))?
        .into_iter()
        .next()
        .ok_or_else(|| CliError::Argument("Reference structure has no models".to_string()))?;

    let mut loaded: Vec<(String, MolecularSystem)> = Vec::new();
    for path in &args.poses {
        let models = read_models(path, None)?;
        let multi_model = models.len() > 1;
        for system in models {
            loaded.push((structure_label(path, &system, multi_model), system));
        }
    }
    let poses: Vec<Pose<'_>> = loaded
        .iter()
        .map(|(label, system)| Pose {
            label: label.as_str(),
            system,
        })
        .collect();
    info!("Comparing {} pose(s) against {:?}.", poses.len(), args.reference);

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let results = workflows::compare::run(
        &reference,
        &poses,
        &config,
        &KabschSuperimposer,
        &reporter,
    )?;

    print!("{}", display::format_comparisons(&results));

    let failed = results
        .iter()
        .filter(|r| r.fcc.is_err() && r.rmsd.is_err())
        .count();
    if failed > 0 {
        warn!("{} of {} pose(s) could not be scored.", failed, results.len());
    }

    if let Some(path) = &args.output {
        write_rows(path, &results)?;
        println!("Scores written to: {}", path.display());
    }
    Ok(())
}

fn write_rows(path: &Path, results: &[PoseComparison]) -> Result<()> {
    let to_output_error = |e: csv::Error| CliError::Output {
        path: path.to_path_buf(),
        source: e.into(),
    };
    let mut writer = csv::Writer::from_path(path).map_err(to_output_error)?;
    for result in results {
        writer
            .serialize(PoseRow::from(result))
            .map_err(to_output_error)?;
    }
    writer.flush()?;
    Ok(())
}
