use crate::core::io::pqr::ZERO_CHARGE_RADIUS_SUFFIX;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Fallback charge/radius suffix must contain at least one non-blank character")]
    InvalidFallbackSuffix,
}

/// Controls which lines survive charge zeroing.
///
/// The defaults narrow the output to `ATOM` records only: `HETATM` records and
/// every other line are dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZeroChargeConfig {
    pub keep_hetatm: bool,      // Zero and keep HETATM records as well
    pub keep_other_lines: bool, // Copy non-record lines through unchanged
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransplantConfig {
    /// Written from column 54 on for target atoms absent from the model.
    pub fallback_suffix: String,
}

impl Default for TransplantConfig {
    fn default() -> Self {
        Self {
            fallback_suffix: ZERO_CHARGE_RADIUS_SUFFIX.to_string(),
        }
    }
}

#[derive(Default)]
pub struct TransplantConfigBuilder {
    fallback_suffix: Option<String>,
}

impl TransplantConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fallback_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.fallback_suffix = Some(suffix.into());
        self
    }

    pub fn build(self) -> Result<TransplantConfig, ConfigError> {
        let fallback_suffix = self
            .fallback_suffix
            .unwrap_or_else(|| ZERO_CHARGE_RADIUS_SUFFIX.to_string());
        if fallback_suffix.trim().is_empty() {
            return Err(ConfigError::InvalidFallbackSuffix);
        }
        Ok(TransplantConfig { fallback_suffix })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_charge_defaults_drop_everything_but_atom_records() {
        let config = ZeroChargeConfig::default();
        assert!(!config.keep_hetatm);
        assert!(!config.keep_other_lines);
    }

    #[test]
    fn builder_defaults_to_zero_charge_and_radius() {
        let config = TransplantConfigBuilder::new().build().unwrap();
        assert_eq!(config, TransplantConfig::default());
        assert_eq!(config.fallback_suffix.trim(), "0.0000 0.0000");
    }

    #[test]
    fn builder_accepts_custom_fallback_suffix() {
        let config = TransplantConfigBuilder::new()
            .fallback_suffix("  0.0000 1.5000")
            .build()
            .unwrap();
        assert_eq!(config.fallback_suffix, "  0.0000 1.5000");
    }

    #[test]
    fn builder_rejects_blank_fallback_suffix() {
        let result = TransplantConfigBuilder::new().fallback_suffix("   ").build();
        assert_eq!(result, Err(ConfigError::InvalidFallbackSuffix));
    }
}
