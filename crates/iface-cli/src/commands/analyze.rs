use super::{read_models, structure_label};
use crate::cli::AnalyzeArgs;
use crate::config::build_config;
use crate::display;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use ifacepp::workflows::{self, analyze::InterfaceReport, progress::ProgressReporter};
use serde::Serialize;
use std::path::Path;
use tracing::info;

#[derive(Serialize)]
struct AnalysisOutput<'a> {
    source: String,
    interfaces: &'a [InterfaceReport],
}

pub fn run(args: AnalyzeArgs) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let config = build_config(&args.config, Some(&args.sasa), None)?;
    let calculator = config.sasa.calculator()?;

    let models = read_models(&args.input, args.model)?;
    let multi_model = args.model.is_none() && models.len() > 1;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let mut reports = Vec::with_capacity(models.len());
    for system in &models {
        let id = structure_label(&args.input, system, multi_model);
        info!("Analyzing interface '{}'...", id);
        let report =
            workflows::analyze::run(system, &id, &config, calculator.as_ref(), &reporter)?;
        println!("{}", display::format_report(&report));
        reports.push(report);
    }

    if let Some(path) = &args.output {
        write_reports(path, &args.input, &reports)?;
        println!("Reports written to: {}", path.display());
    }
    Ok(())
}

fn write_reports(path: &Path, source: &Path, reports: &[InterfaceReport]) -> Result<()> {
    let output = AnalysisOutput {
        source: source.display().to_string(),
        interfaces: reports,
    };
    let text = toml::to_string(&output).map_err(|e| CliError::Output {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    std::fs::write(path, text).map_err(|e| CliError::Output {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{ConfigArgs, SasaArgs};
    use crate::commands::tests::write_complex;

    #[test]
    fn every_model_is_reported_to_the_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_complex(dir.path(), "ensemble.pdb", &[0.0, 0.5]);
        let output = dir.path().join("report.toml");

        run(AnalyzeArgs {
            input,
            model: None,
            output: Some(output.clone()),
            config: ConfigArgs::default(),
            sasa: SasaArgs {
                sphere_points: Some(50),
                ..SasaArgs::default()
            },
        })
        .unwrap();

        let text = std::fs::read_to_string(&output).unwrap();
        assert_eq!(text.matches("[[interfaces]]").count(), 2);
        assert!(text.contains("id = \"ensemble#1\""));
        assert!(text.contains("id = \"ensemble#2\""));
        assert!(text.contains("buried"));
    }

    #[test]
    fn single_chain_selection_is_rejected_before_reading() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(AnalyzeArgs {
            input: dir.path().join("never-read.pdb"),
            model: None,
            output: None,
            config: ConfigArgs {
                chains: Some("A".to_string()),
                ..ConfigArgs::default()
            },
            sasa: SasaArgs::default(),
        });
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
