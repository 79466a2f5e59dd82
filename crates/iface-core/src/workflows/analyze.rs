use super::build::{build_interface, resolve_chains};
use super::config::AnalysisConfig;
use super::error::WorkflowError;
use super::progress::{Progress, ProgressReporter};
use crate::core::models::system::MolecularSystem;
use crate::core::surface::sasa::SurfaceAreaCalculator;
use crate::engine::composition::Composition;
use crate::engine::surface::BuriedSurfaceArea;
use serde::Serialize;
use tracing::{info, instrument, warn};

/// Summary of a single interface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterfaceReport {
    pub id: String,
    pub model: usize,
    pub chains: Vec<char>,
    pub residue_count: usize,
    pub contact_count: usize,
    pub composition: Composition,
    /// `None` when the interface does not span exactly two chains.
    pub bsa: Option<BuriedSurfaceArea>,
}

/// Builds the interface of `system` and characterizes its composition and burial.
#[instrument(skip_all, name = "analyze_workflow")]
pub fn run<C>(
    system: &MolecularSystem,
    id: &str,
    config: &AnalysisConfig,
    calculator: &C,
    reporter: &ProgressReporter,
) -> Result<InterfaceReport, WorkflowError>
where
    C: SurfaceAreaCalculator + ?Sized,
{
    reporter.report(Progress::PhaseStart {
        name: "Contact Search",
    });
    let chains = resolve_chains(system, &config.chains)?;
    let interface = build_interface(system, &chains, &config.contacts.search(), id)?;
    reporter.report(Progress::PhaseFinish);

    let composition = interface.composition()?;

    let bsa = if interface.chain_ids().len() == 2 {
        reporter.report(Progress::PhaseStart {
            name: "Surface Area",
        });
        let bsa = interface.buried_surface_area(calculator)?;
        reporter.report(Progress::PhaseFinish);
        Some(bsa)
    } else {
        warn!(
            chains = ?interface.chain_ids(),
            "Buried surface area is only defined for two-chain interfaces; skipping."
        );
        None
    };

    let report = InterfaceReport {
        id: interface.id().to_string(),
        model: system.model_serial(),
        chains: interface.chain_ids(),
        residue_count: interface.len(),
        contact_count: interface.contact_pairs().len(),
        composition,
        bsa,
    };
    info!(
        residues = report.residue_count,
        contacts = report.contact_count,
        "Analysis complete."
    );
    Ok(report)
}
