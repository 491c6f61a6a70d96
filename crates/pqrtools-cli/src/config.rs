pub mod defaults;
pub mod models;

use crate::cli::{Cli, Commands};
use crate::error::{CliError, Result};
use crate::utils::parser;
use defaults::DefaultsConfig;
use models::AppConfig;
use pqrtools::engine::config as core_config;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialZeroChargesConfig {
    #[serde(rename = "keep-hetatm")]
    keep_hetatm: Option<bool>,
    #[serde(rename = "keep-other-lines")]
    keep_other_lines: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialTransplantConfig {
    #[serde(rename = "fallback-suffix")]
    fallback_suffix: Option<String>,
    #[serde(rename = "write-residue-files")]
    write_residue_files: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialOutputConfig {
    directory: Option<PathBuf>,
    #[serde(rename = "model-tag")]
    model_tag: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialAppConfig {
    #[serde(rename = "zero-charges")]
    zero_charges: Option<PartialZeroChargesConfig>,
    transplant: Option<PartialTransplantConfig>,
    output: Option<PartialOutputConfig>,
}

impl PartialAppConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Reads `path` when given, otherwise starts from an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Resolves the final configuration. Precedence, lowest first: built-in
    /// defaults, the config file, `-S` overrides, dedicated command flags.
    pub fn merge_with_cli(mut self, cli: &Cli) -> Result<AppConfig> {
        self.apply_set_values(&cli.set_values)?;

        let defaults = DefaultsConfig::default();
        let zero = self.zero_charges.take().unwrap_or_default();
        let transplant = self.transplant.take().unwrap_or_default();
        let output = self.output.take().unwrap_or_default();

        let mut zero_charges = core_config::ZeroChargeConfig {
            keep_hetatm: zero.keep_hetatm.unwrap_or(defaults.keep_hetatm),
            keep_other_lines: zero.keep_other_lines.unwrap_or(defaults.keep_other_lines),
        };
        let mut write_residue_files = transplant
            .write_residue_files
            .unwrap_or(defaults.write_residue_files);
        let mut output_dir = output.directory;

        match &cli.command {
            Commands::ZeroCharges(args) => {
                zero_charges.keep_hetatm |= args.keep_hetatm;
                zero_charges.keep_other_lines |= args.keep_other_lines;
            }
            Commands::Residues(args) => {
                if args.no_residue_files {
                    write_residue_files = false;
                }
                if let Some(dir) = &args.output_dir {
                    output_dir = Some(dir.clone());
                }
            }
        }

        let transplant_config = core_config::TransplantConfigBuilder::new()
            .fallback_suffix(
                transplant
                    .fallback_suffix
                    .unwrap_or(defaults.fallback_suffix),
            )
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        let model_tag = output.model_tag.unwrap_or(defaults.model_tag);
        if model_tag.trim().is_empty() || model_tag.contains(['/', '\\']) {
            return Err(CliError::Config(format!(
                "`output.model-tag` must be a non-empty file name fragment, got '{}'",
                model_tag
            )));
        }

        Ok(AppConfig {
            zero_charges,
            transplant: transplant_config,
            write_residue_files,
            output_dir,
            model_tag,
        })
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let (key, value_str) =
                parser::split_key_value(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;
            let parse_bool = |value: &str| {
                parser::parse_bool(key, value).map_err(|e| CliError::Config(e.to_string()))
            };

            match key {
                "zero-charges.keep-hetatm" => {
                    self.zero_charges
                        .get_or_insert_with(Default::default)
                        .keep_hetatm = Some(parse_bool(value_str)?);
                }
                "zero-charges.keep-other-lines" => {
                    self.zero_charges
                        .get_or_insert_with(Default::default)
                        .keep_other_lines = Some(parse_bool(value_str)?);
                }
                "transplant.fallback-suffix" => {
                    self.transplant
                        .get_or_insert_with(Default::default)
                        .fallback_suffix = Some(value_str.to_string());
                }
                "transplant.write-residue-files" => {
                    self.transplant
                        .get_or_insert_with(Default::default)
                        .write_residue_files = Some(parse_bool(value_str)?);
                }
                "output.directory" => {
                    self.output.get_or_insert_with(Default::default).directory =
                        Some(PathBuf::from(value_str));
                }
                "output.model-tag" => {
                    self.output.get_or_insert_with(Default::default).model_tag =
                        Some(value_str.to_string());
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}
