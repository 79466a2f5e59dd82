use super::build::{build_interface, resolve_chains};
use super::config::AnalysisConfig;
use super::error::WorkflowError;
use super::progress::{Progress, ProgressReporter};
use crate::core::geometry::superposition::Superimposer;
use crate::core::models::system::MolecularSystem;
use crate::core::search::ContactSearch;
use crate::engine::interface::Interface;
use serde::Serialize;
use tracing::{info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A structure to compare against the reference, e.g. one docking pose or NMR model.
#[derive(Debug, Clone, Copy)]
pub struct Pose<'a> {
    pub label: &'a str,
    pub system: &'a MolecularSystem,
}

/// Similarity of one pose to the reference interface.
///
/// The two measures fail independently; a failure is recorded as its message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoseComparison {
    pub label: String,
    pub fcc: Result<f64, String>,
    pub rmsd: Result<f64, String>,
}

/// Compares every pose with the interface of `reference`.
///
/// Each pose's interface is built from its own contacts between the chains
/// selected on the reference. The fraction of common contacts compares the
/// two contact sets; the RMSD is taken over the reference interface residues,
/// located in the pose by chain and residue number.
///
/// Only a failure to build the reference interface aborts the run.
#[instrument(skip_all, name = "compare_workflow")]
pub fn run<S>(
    reference: &MolecularSystem,
    poses: &[Pose<'_>],
    config: &AnalysisConfig,
    superimposer: &S,
    reporter: &ProgressReporter,
) -> Result<Vec<PoseComparison>, WorkflowError>
where
    S: Superimposer + Sync + ?Sized,
{
    reporter.report(Progress::PhaseStart {
        name: "Reference Interface",
    });
    let chains = resolve_chains(reference, &config.chains)?;
    let search = config.contacts.search();
    let reference_interface = build_interface(reference, &chains, &search, "reference")?;
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart {
        name: "Comparing Poses",
    });
    reporter.report(Progress::TaskStart {
        total_steps: poses.len() as u64,
    });

    let compare_one = |pose: &Pose<'_>| {
        let comparison = compare_pose(
            &reference_interface,
            pose,
            &chains,
            &search,
            superimposer,
            config,
        );
        reporter.report(Progress::TaskIncrement {
            label: pose.label.to_string(),
        });
        comparison
    };

    #[cfg(not(feature = "parallel"))]
    let results: Vec<PoseComparison> = poses.iter().map(compare_one).collect();

    #[cfg(feature = "parallel")]
    let results: Vec<PoseComparison> = poses.par_iter().map(compare_one).collect();

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    let failed = results
        .iter()
        .filter(|r| r.fcc.is_err() || r.rmsd.is_err())
        .count();
    info!(poses = results.len(), failed, "Comparison complete.");
    Ok(results)
}

fn compare_pose<C, S>(
    reference: &Interface<'_>,
    pose: &Pose<'_>,
    chains: &[char],
    search: &C,
    superimposer: &S,
    config: &AnalysisConfig,
) -> PoseComparison
where
    C: ContactSearch + ?Sized,
    S: Superimposer + ?Sized,
{
    let fcc = build_interface(pose.system, chains, search, pose.label)
        .and_then(|mobile| Ok(reference.fcc(&mobile)?))
        .map_err(|e| e.to_string());

    let rmsd = matching_interface(reference, pose)
        .and_then(|mobile| Ok(reference.rmsd(&mobile, superimposer, &config.rmsd)?))
        .map_err(|e| e.to_string());

    if let Err(message) = fcc.as_ref().and(rmsd.as_ref()) {
        warn!(pose = pose.label, error = %message, "Pose comparison incomplete.");
    }

    PoseComparison {
        label: pose.label.to_string(),
        fcc,
        rmsd,
    }
}

/// The residues of `pose` with the same chain, kind and number as the
/// standard residues of the reference interface, in reference order.
pub fn matching_interface<'p>(
    reference: &Interface<'_>,
    pose: &Pose<'p>,
) -> Result<Interface<'p>, WorkflowError> {
    let mut residues = Vec::with_capacity(reference.len());
    for residue_id in reference.standard_residues() {
        let located = reference
            .system()
            .residue(residue_id)
            .zip(reference.chain_of(residue_id))
            .and_then(|(residue, chain)| {
                let chain_id = pose.system.find_chain_by_id(chain)?;
                pose.system
                    .find_residue(chain_id, residue.kind, residue.number)
            });
        match located {
            Some(id) => residues.push(id),
            None => {
                return Err(WorkflowError::MissingResidue {
                    residue: reference.describe_residue(residue_id),
                    structure: pose.label.to_string(),
                });
            }
        }
    }
    Ok(Interface::new(pose.label, pose.system, residues, [])?)
}
