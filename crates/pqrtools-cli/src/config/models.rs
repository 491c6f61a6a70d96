use pqrtools::engine::config as core_config;
use std::path::PathBuf;

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub zero_charges: core_config::ZeroChargeConfig,
    pub transplant: core_config::TransplantConfig,
    pub write_residue_files: bool,
    pub output_dir: Option<PathBuf>,
    pub model_tag: String,
}
