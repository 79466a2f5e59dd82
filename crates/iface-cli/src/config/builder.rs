use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use crate::cli::{ConfigArgs, RmsdArgs, SasaArgs};
use crate::error::{CliError, Result};
use crate::utils::parser;
use ifacepp::engine::alignment::RmsdMode;
use ifacepp::workflows::config::{AnalysisConfig, AnalysisConfigBuilder, ChainSelection};
use std::str::FromStr;
use std::time::Duration;

/// Merges defaults, the config file, `--set` values and dedicated flags, in
/// increasing order of precedence.
pub fn build_config(
    args: &ConfigArgs,
    sasa_args: Option<&SasaArgs>,
    rmsd_args: Option<&RmsdArgs>,
) -> Result<AnalysisConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = match &args.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    let file_config = apply_set_values(file_config, &args.set_values)?;

    let contacts = file_config.contacts.unwrap_or_default();
    let sasa = file_config.sasa.unwrap_or_default();
    let rmsd = file_config.rmsd.unwrap_or_default();

    let chains = match &args.chains {
        Some(list) => Some(
            parser::parse_chain_list(list).map_err(|e| CliError::Argument(e.to_string()))?,
        ),
        None => file_config.chains,
    };
    let chains = chains.map_or(ChainSelection::All, ChainSelection::Explicit);

    let contact_cutoff = args
        .cutoff
        .or(contacts.cutoff)
        .unwrap_or(defaults.contact_cutoff);

    let probe_radius = sasa_args
        .and_then(|a| a.probe_radius)
        .or(sasa.probe_radius)
        .unwrap_or(defaults.probe_radius);
    let sphere_points = sasa_args
        .and_then(|a| a.sphere_points)
        .or(sasa.sphere_points)
        .unwrap_or(defaults.sphere_points);
    let radii_path = sasa_args.and_then(|a| a.radii.clone()).or(sasa.radii_path);
    let precomputed_path = sasa_args
        .and_then(|a| a.precomputed_sasa.clone())
        .or(sasa.precomputed_path);
    let timeout = sasa_args
        .and_then(|a| a.sasa_timeout)
        .or(sasa.timeout_secs)
        .map(|secs| {
            Duration::try_from_secs_f64(secs).map_err(|_| {
                CliError::Config(format!(
                    "SASA timeout must be a non-negative number of seconds, got {}",
                    secs
                ))
            })
        })
        .transpose()?;

    let rmsd_mode = rmsd_args
        .and_then(|a| a.rmsd_mode)
        .map(RmsdMode::from)
        .or(rmsd.mode)
        .unwrap_or_default();
    let skip_sequence_check = rmsd_args.is_some_and(|a| a.skip_sequence_check)
        || rmsd
            .skip_sequence_check
            .unwrap_or(defaults.skip_sequence_check);

    AnalysisConfigBuilder::new()
        .contact_cutoff(contact_cutoff)
        .heavy_atoms_only(
            contacts
                .heavy_atoms_only
                .unwrap_or(defaults.heavy_atoms_only),
        )
        .include_hetero_contacts(
            contacts
                .include_hetero
                .unwrap_or(defaults.include_hetero_contacts),
        )
        .probe_radius(probe_radius)
        .sphere_points(sphere_points)
        .radii_path(radii_path)
        .precomputed_sasa_path(precomputed_path)
        .sasa_timeout(timeout)
        .include_hetero_sasa(sasa.include_hetero.unwrap_or(defaults.include_hetero_sasa))
        .chains(chains)
        .rmsd_mode(rmsd_mode)
        .skip_sequence_check(skip_sequence_check)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for pair in set_values {
        let (key, value) =
            parser::parse_key_value(pair).map_err(|e| CliError::Config(e.to_string()))?;

        match key {
            "chains" => {
                config.chains = Some(
                    parser::parse_chain_list(value).map_err(|e| CliError::Config(e.to_string()))?,
                );
            }
            "contacts.cutoff" => {
                config.contacts.get_or_insert_with(Default::default).cutoff =
                    Some(parse_value(key, value, "float")?);
            }
            "contacts.heavy-atoms-only" => {
                config
                    .contacts
                    .get_or_insert_with(Default::default)
                    .heavy_atoms_only = Some(parse_value(key, value, "boolean")?);
            }
            "contacts.include-hetero" => {
                config
                    .contacts
                    .get_or_insert_with(Default::default)
                    .include_hetero = Some(parse_value(key, value, "boolean")?);
            }
            "sasa.probe-radius" => {
                config.sasa.get_or_insert_with(Default::default).probe_radius =
                    Some(parse_value(key, value, "float")?);
            }
            "sasa.sphere-points" => {
                config.sasa.get_or_insert_with(Default::default).sphere_points =
                    Some(parse_value(key, value, "integer")?);
            }
            "sasa.timeout-secs" => {
                config.sasa.get_or_insert_with(Default::default).timeout_secs =
                    Some(parse_value(key, value, "float")?);
            }
            "sasa.include-hetero" => {
                config.sasa.get_or_insert_with(Default::default).include_hetero =
                    Some(parse_value(key, value, "boolean")?);
            }
            "rmsd.skip-sequence-check" => {
                config
                    .rmsd
                    .get_or_insert_with(Default::default)
                    .skip_sequence_check = Some(parse_value(key, value, "boolean")?);
            }
            "rmsd.mode" => {
                let mode = match value {
                    "c-alpha" => RmsdMode::CAlpha,
                    "backbone" => RmsdMode::Backbone,
                    "all-atom" => RmsdMode::AllAtom,
                    _ => {
                        return Err(CliError::Config(format!(
                            "Invalid value for {}: '{}'. Expected 'c-alpha', 'backbone' or 'all-atom'.",
                            key, value
                        )));
                    }
                };
                config.rmsd.get_or_insert_with(Default::default).mode = Some(mode);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
