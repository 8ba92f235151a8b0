use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::AnalysisArgs;
use crate::error::{CliError, Result};
use std::path::Path;
use topoconflict::core::io::source::CsvOptions;
use topoconflict::engine::config::{AnalysisConfigBuilder, BondEndpointCheck, ConfigError};

/// Resolves the effective configuration.
///
/// Command-line flags win over `--set` values, which win over the config file, which wins
/// over the built-in defaults.
pub fn build_config(args: &AnalysisArgs, output: Option<&Path>, pretty: bool) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let analysis_file = file_config.analysis.take().unwrap_or_default();
    let input_file = file_config.input.take().unwrap_or_default();
    let output_file = file_config.output.take().unwrap_or_default();

    let bond_endpoint_check: BondEndpointCheck = args
        .bond_check
        .as_deref()
        .or(analysis_file.bond_endpoint_check.as_deref())
        .unwrap_or(defaults.bond_endpoint_check.as_str())
        .parse()
        .map_err(|e: ConfigError| CliError::Config(e.to_string()))?;

    let warn_on_length_overflow = analysis_file
        .warn_on_length_overflow
        .unwrap_or(defaults.warn_on_length_overflow);

    let fail_fast = if args.fail_fast {
        true
    } else {
        analysis_file.fail_fast.unwrap_or(defaults.fail_fast)
    };

    let delimiter = args
        .delimiter
        .or(input_file.delimiter)
        .unwrap_or(defaults.delimiter);
    let delimiter = delimiter_byte(delimiter)?;

    let pretty = if pretty {
        true
    } else {
        output_file.pretty.unwrap_or(defaults.pretty)
    };

    let analysis = AnalysisConfigBuilder::new()
        .bond_endpoint_check(bond_endpoint_check)
        .warn_on_length_overflow(warn_on_length_overflow)
        .fail_fast(fail_fast)
        .build();

    Ok(AppConfig {
        input_path: args.input.clone(),
        output_path: output.map(Path::to_path_buf),
        csv: CsvOptions { delimiter },
        pretty,
        analysis,
    })
}

fn delimiter_byte(delimiter: char) -> Result<u8> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        Err(CliError::Config(format!(
            "Delimiter must be a single ASCII character, got '{}'",
            delimiter
        )))
    }
}

fn parse_bool(key: &str, value_str: &str) -> Result<bool> {
    value_str.trim().parse().map_err(|_| {
        CliError::Config(format!("Invalid boolean value for {}: {}", key, value_str))
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    if set_values.is_empty() {
        return Ok(config);
    }
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key {
            "analysis.bond-endpoint-check" => {
                config
                    .analysis
                    .get_or_insert_with(Default::default)
                    .bond_endpoint_check = Some(value_str.to_string());
            }
            "analysis.warn-on-length-overflow" => {
                config
                    .analysis
                    .get_or_insert_with(Default::default)
                    .warn_on_length_overflow = Some(parse_bool(key, value_str)?);
            }
            "analysis.fail-fast" => {
                config
                    .analysis
                    .get_or_insert_with(Default::default)
                    .fail_fast = Some(parse_bool(key, value_str)?);
            }
            "input.delimiter" => {
                let mut chars = value_str.chars();
                let (Some(c), None) = (chars.next(), chars.next()) else {
                    return Err(CliError::Config(format!(
                        "Invalid character value for {}: {}",
                        key, value_str
                    )));
                };
                config.input.get_or_insert_with(Default::default).delimiter = Some(c);
            }
            "output.pretty" => {
                config.output.get_or_insert_with(Default::default).pretty =
                    Some(parse_bool(key, value_str)?);
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
