use pqrtools::core::io::pqr::ZERO_CHARGE_RADIUS_SUFFIX;

pub struct DefaultsConfig {
    pub keep_hetatm: bool,
    pub keep_other_lines: bool,
    pub fallback_suffix: String,
    pub write_residue_files: bool,
    pub model_tag: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            keep_hetatm: false,
            keep_other_lines: false,
            fallback_suffix: ZERO_CHARGE_RADIUS_SUFFIX.to_string(),
            write_residue_files: true,
            model_tag: "m".to_string(),
        }
    }
}
