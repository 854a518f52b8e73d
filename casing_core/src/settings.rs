//! # Calculation Settings
//!
//! Well-independent constants that an engineer may want to tune. Defaults
//! reproduce the standard method exactly, so an empty settings file changes
//! nothing.
//!
//! ```toml
//! # casing.toml
//! pore_gradient_psi_ft = 0.465
//! buoyancy_density_ppg = 65.4
//! ```
//!
//! ```rust
//! use casing_core::settings::CalcSettings;
//!
//! let settings = CalcSettings::from_toml_str("pore_gradient_psi_ft = 0.5").unwrap();
//! assert_eq!(settings.pore_gradient_psi_ft, 0.5);
//! assert_eq!(settings.buoyancy_density_ppg, 65.4);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{DEFAULT_BUOYANCY_DENSITY, DEFAULT_PORE_GRADIENT};

/// Tunable constants used by the per-section calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcSettings {
    /// Formation pore-pressure gradient used for MASP (psi/ft)
    pub pore_gradient_psi_ft: f64,

    /// Reference density for the neutral-point buoyancy factor (ppg)
    pub buoyancy_density_ppg: f64,
}

impl Default for CalcSettings {
    fn default() -> Self {
        CalcSettings {
            pore_gradient_psi_ft: DEFAULT_PORE_GRADIENT,
            buoyancy_density_ppg: DEFAULT_BUOYANCY_DENSITY,
        }
    }
}

impl CalcSettings {
    /// Validate settings values.
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.pore_gradient_psi_ft >= 0.0) {
            return Err(CalcError::invalid_input(
                "pore_gradient_psi_ft",
                self.pore_gradient_psi_ft.to_string(),
                "Pore gradient cannot be negative",
            ));
        }
        if !(self.buoyancy_density_ppg > 0.0) {
            return Err(CalcError::invalid_input(
                "buoyancy_density_ppg",
                self.buoyancy_density_ppg.to_string(),
                "Buoyancy density must be positive",
            ));
        }
        Ok(())
    }

    /// Parse and validate settings from TOML text. Missing keys keep defaults.
    pub fn from_toml_str(contents: &str) -> CalcResult<Self> {
        let settings: CalcSettings = toml::from_str(contents)
            .map_err(|e| CalcError::serialization(format!("Invalid settings TOML: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file.
    pub fn load_from_file(path: &Path) -> CalcResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CalcError::file_error("read settings", path.display().to_string(), e.to_string()))?;
        let settings = Self::from_toml_str(&contents)?;
        tracing::debug!(path = %path.display(), ?settings, "loaded calculation settings");
        Ok(settings)
    }

    /// Render settings as TOML.
    pub fn to_toml_string(&self) -> CalcResult<String> {
        toml::to_string(self).map_err(|e| CalcError::serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_validate() {
        let settings = CalcSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.pore_gradient_psi_ft, 0.465);
        assert_eq!(settings.buoyancy_density_ppg, 65.4);
    }

    #[test]
    fn test_empty_toml_produces_defaults() {
        let settings = CalcSettings::from_toml_str("").unwrap();
        assert_eq!(settings, CalcSettings::default());
    }

    #[test]
    fn test_partial_toml_override() {
        let settings = CalcSettings::from_toml_str("buoyancy_density_ppg = 65.5").unwrap();
        assert_eq!(settings.buoyancy_density_ppg, 65.5);
        assert_eq!(settings.pore_gradient_psi_ft, 0.465);
    }

    #[test]
    fn test_validation_rejects_zero_density() {
        let err = CalcSettings::from_toml_str("buoyancy_density_ppg = 0.0").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_roundtrip_toml() {
        let settings = CalcSettings {
            pore_gradient_psi_ft: 0.47,
            buoyancy_density_ppg: 65.0,
        };
        let text = settings.to_toml_string().unwrap();
        assert_eq!(CalcSettings::from_toml_str(&text).unwrap(), settings);
    }
}
