//! Analysis Configuration - every divergence-method parameter as a TOML value
//!
//! Each section implements `Default` with the published parameter values, so
//! an empty (or missing) config file reproduces the reference analysis exactly.
//! The config is an explicit record handed to the pipeline; nothing here is
//! process-global.

use super::defaults::{
    CONFIG_ENV_VAR, DEFAULT_ATHY_DECAY_CONSTANT, DEFAULT_ATHY_SURFACE_TRANSIT_TIME,
    DEFAULT_CALIBRATION_SWITCH_DEPTH_M, DEFAULT_DIVERGENCE_REFERENCE_DEPTH_M,
    DEFAULT_EATON_EXPONENT, DEFAULT_NORMAL_PRESSURE_GRADIENT, DEFAULT_RKB_M,
    DEFAULT_TROUGHTON_COEFFICIENT, DEFAULT_TROUGHTON_EXPONENT,
    DEFAULT_TROUGHTON_SURFACE_DENSITY, DEFAULT_WATER_DEPTH_M, LOCAL_CONFIG_FILE,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for one geopressure analysis.
///
/// Load with `AnalysisConfig::load()` which searches:
/// 1. `$GEOPRESSURE_CONFIG` env var
/// 2. `./geopressure.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Well identification
    #[serde(default)]
    pub well: WellInfo,

    /// Rig and water column geometry
    #[serde(default)]
    pub geometry: GeometryConfig,

    /// Troughton density-with-depth law
    #[serde(default)]
    pub troughton: TroughtonConfig,

    /// Athy normal compaction trend
    #[serde(default)]
    pub athy: AthyConfig,

    /// Divergence factor gating
    #[serde(default)]
    pub divergence: DivergenceConfig,

    /// Eaton pore pressure model
    #[serde(default)]
    pub eaton: EatonConfig,

    /// Pore pressure calibration
    #[serde(default)]
    pub calibration: CalibrationConfig,
}

impl AnalysisConfig {
    /// Load configuration using the standard search order:
    /// 1. `$GEOPRESSURE_CONFIG` environment variable
    /// 2. `./geopressure.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), well = %config.well.name, "Loaded analysis config from GEOPRESSURE_CONFIG");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from GEOPRESSURE_CONFIG, falling back");
                    }
                }
            } else {
                warn!(path = %path, "GEOPRESSURE_CONFIG points to non-existent file, falling back");
            }
        }

        // 2. Check ./geopressure.toml
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!(well = %config.well.name, "Loaded analysis config from ./geopressure.toml");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./geopressure.toml, using defaults");
                }
            }
        }

        // 3. Defaults
        info!("No geopressure.toml found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate a TOML document.
    ///
    /// Unknown keys are reported as warnings only; existing files keep working.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in &super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(PathBuf::from("<inline>"), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Render the config as pretty TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Write the config to `path` as TOML.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Saved analysis config");
        Ok(())
    }

    /// Validate the configuration for impossible values.
    ///
    /// Rules:
    /// - Every numeric parameter must be finite
    /// - Troughton exponent must not be -1 (overburden integral divides by c + 1)
    /// - Eaton exponent must be > 0
    /// - Surface transit time must be > 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        for (name, value) in self.numeric_fields() {
            if !value.is_finite() {
                errors.push(format!("{name} must be a finite number (got {value})"));
            }
        }

        let t = &self.troughton;
        if t.exponent.is_finite() && (t.exponent + 1.0).abs() < f64::EPSILON {
            errors.push(
                "troughton.exponent = -1 makes the overburden integral singular (divides by c + 1)"
                    .to_string(),
            );
        }

        if self.eaton.exponent.is_finite() && self.eaton.exponent <= 0.0 {
            errors.push(format!(
                "eaton.exponent = {:.3} must be > 0",
                self.eaton.exponent
            ));
        }

        if self.athy.surface_transit_time.is_finite() && self.athy.surface_transit_time <= 0.0 {
            errors.push(format!(
                "athy.surface_transit_time = {:.3} must be > 0 (normal trend is divided into)",
                self.athy.surface_transit_time
            ));
        }

        let (range_errors, range_warnings) = super::validation::validate_physical_ranges(self);
        errors.extend(range_errors);
        for w in &range_warnings {
            warn!("{}", w);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Flattened, immutable parameter view used by the pipeline stages.
    pub fn model_parameters(&self) -> ModelParameters {
        ModelParameters {
            rkb_m: self.geometry.rkb_m,
            water_depth_m: self.geometry.water_depth_m,
            mudline_depth_m: self.geometry.mudline_depth_m(),
            surface_density: self.troughton.surface_density,
            troughton_coefficient: self.troughton.coefficient,
            troughton_exponent: self.troughton.exponent,
            surface_transit_time: self.athy.surface_transit_time,
            athy_decay_constant: self.athy.decay_constant,
            divergence_reference_depth_m: self.divergence.reference_depth_m,
            normal_pressure_gradient: self.eaton.normal_pressure_gradient,
            eaton_exponent: self.eaton.exponent,
            calibration_switch_depth_m: self.calibration.switch_depth_m,
        }
    }

    fn numeric_fields(&self) -> [(&'static str, f64); 11] {
        [
            ("geometry.rkb_m", self.geometry.rkb_m),
            ("geometry.water_depth_m", self.geometry.water_depth_m),
            ("troughton.surface_density", self.troughton.surface_density),
            ("troughton.coefficient", self.troughton.coefficient),
            ("troughton.exponent", self.troughton.exponent),
            ("athy.surface_transit_time", self.athy.surface_transit_time),
            ("athy.decay_constant", self.athy.decay_constant),
            ("divergence.reference_depth_m", self.divergence.reference_depth_m),
            ("eaton.normal_pressure_gradient", self.eaton.normal_pressure_gradient),
            ("eaton.exponent", self.eaton.exponent),
            ("calibration.switch_depth_m", self.calibration.switch_depth_m),
        ]
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config parse error ({}): {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config validation failed:\n  - {}", .0.join("\n  - "))]
    Validation(Vec<String>),
}

// ============================================================================
// Model Parameters
// ============================================================================

/// Immutable parameter set consumed by the pipeline, one per run.
///
/// Mirrors [`AnalysisConfig`] with the derived mudline depth
/// `z = water_depth + rkb` precomputed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelParameters {
    pub rkb_m: f64,
    pub water_depth_m: f64,
    /// Reference depth `z` below the rotary table: water depth + RKB.
    pub mudline_depth_m: f64,
    /// Troughton `po`
    pub surface_density: f64,
    /// Troughton `k`
    pub troughton_coefficient: f64,
    /// Troughton `c`
    pub troughton_exponent: f64,
    /// Athy `dtco`
    pub surface_transit_time: f64,
    /// Athy `c1`
    pub athy_decay_constant: f64,
    /// `prf`: the divergence ratio only applies strictly below this depth
    pub divergence_reference_depth_m: f64,
    /// Eaton `ppn`
    pub normal_pressure_gradient: f64,
    pub eaton_exponent: f64,
    /// `ms`: calibrated pore pressure uses mud weight at and below this depth
    pub calibration_switch_depth_m: f64,
}

impl Default for ModelParameters {
    fn default() -> Self {
        AnalysisConfig::default().model_parameters()
    }
}

// ============================================================================
// Well Info
// ============================================================================

/// Identification metadata. Not used for logic, but appears in logs and reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellInfo {
    /// Well name / identifier
    #[serde(default = "default_well_name")]
    pub name: String,

    /// Field name
    #[serde(default)]
    pub field: String,
}

fn default_well_name() -> String {
    "DEFAULT".to_string()
}

impl Default for WellInfo {
    fn default() -> Self {
        Self {
            name: default_well_name(),
            field: String::new(),
        }
    }
}

// ============================================================================
// Geometry
// ============================================================================

/// Offshore geometry: depths are measured from the rotary table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryConfig {
    /// Rotary kelly bushing elevation above sea level (m)
    #[serde(default = "default_rkb")]
    pub rkb_m: f64,

    /// Water depth (m)
    #[serde(default = "default_water_depth")]
    pub water_depth_m: f64,
}

impl GeometryConfig {
    /// Depth of the mudline below the rotary table (`z`).
    pub fn mudline_depth_m(&self) -> f64 {
        self.water_depth_m + self.rkb_m
    }
}

fn default_rkb() -> f64 { DEFAULT_RKB_M }
fn default_water_depth() -> f64 { DEFAULT_WATER_DEPTH_M }

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            rkb_m: default_rkb(),
            water_depth_m: default_water_depth(),
        }
    }
}

// ============================================================================
// Troughton
// ============================================================================

/// `rho(D) = po + k * (D - z)^c`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TroughtonConfig {
    /// Surface density `po` (g/cm³)
    #[serde(default = "default_surface_density")]
    pub surface_density: f64,

    /// Compaction coefficient `k`
    #[serde(default = "default_troughton_coefficient")]
    pub coefficient: f64,

    /// Compaction exponent `c`
    #[serde(default = "default_troughton_exponent")]
    pub exponent: f64,
}

fn default_surface_density() -> f64 { DEFAULT_TROUGHTON_SURFACE_DENSITY }
fn default_troughton_coefficient() -> f64 { DEFAULT_TROUGHTON_COEFFICIENT }
fn default_troughton_exponent() -> f64 { DEFAULT_TROUGHTON_EXPONENT }

impl Default for TroughtonConfig {
    fn default() -> Self {
        Self {
            surface_density: default_surface_density(),
            coefficient: default_troughton_coefficient(),
            exponent: default_troughton_exponent(),
        }
    }
}

// ============================================================================
// Athy
// ============================================================================

/// `DTN(D) = dtco * exp(c1 * (D - z))`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthyConfig {
    /// Transit time at the mudline `dtco`
    #[serde(default = "default_surface_transit_time")]
    pub surface_transit_time: f64,

    /// Exponential decay constant `c1` (1/m)
    #[serde(default = "default_decay_constant")]
    pub decay_constant: f64,
}

fn default_surface_transit_time() -> f64 { DEFAULT_ATHY_SURFACE_TRANSIT_TIME }
fn default_decay_constant() -> f64 { DEFAULT_ATHY_DECAY_CONSTANT }

impl Default for AthyConfig {
    fn default() -> Self {
        Self {
            surface_transit_time: default_surface_transit_time(),
            decay_constant: default_decay_constant(),
        }
    }
}

// ============================================================================
// Divergence
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DivergenceConfig {
    /// Reference depth `prf` (m). Above or at it the divergence factor is 1.
    #[serde(default = "default_divergence_reference_depth")]
    pub reference_depth_m: f64,
}

fn default_divergence_reference_depth() -> f64 { DEFAULT_DIVERGENCE_REFERENCE_DEPTH_M }

impl Default for DivergenceConfig {
    fn default() -> Self {
        Self {
            reference_depth_m: default_divergence_reference_depth(),
        }
    }
}

// ============================================================================
// Eaton
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EatonConfig {
    /// Normal pore pressure gradient `ppn` (g/cm³)
    #[serde(default = "default_normal_pressure_gradient")]
    pub normal_pressure_gradient: f64,

    /// Eaton exponent applied to DTN / DTSH
    #[serde(default = "default_eaton_exponent")]
    pub exponent: f64,
}

fn default_normal_pressure_gradient() -> f64 { DEFAULT_NORMAL_PRESSURE_GRADIENT }
fn default_eaton_exponent() -> f64 { DEFAULT_EATON_EXPONENT }

impl Default for EatonConfig {
    fn default() -> Self {
        Self {
            normal_pressure_gradient: default_normal_pressure_gradient(),
            exponent: default_eaton_exponent(),
        }
    }
}

// ============================================================================
// Calibration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationConfig {
    /// Depth `ms` (m) from which mud weight replaces the Eaton estimate.
    #[serde(default = "default_switch_depth")]
    pub switch_depth_m: f64,
}

fn default_switch_depth() -> f64 { DEFAULT_CALIBRATION_SWITCH_DEPTH_M }

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            switch_depth_m: default_switch_depth(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = AnalysisConfig::default();
        assert!(config.validate().is_ok(), "Default config must always validate");
    }

    #[test]
    fn test_empty_toml_produces_defaults() {
        let config: AnalysisConfig = toml::from_str("").expect("empty TOML should parse");
        assert_eq!(config.geometry.rkb_m, 30.2);
        assert_eq!(config.geometry.water_depth_m, 3014.0);
        assert_eq!(config.troughton.surface_density, 1.95);
        assert_eq!(config.athy.decay_constant, -0.0004);
        assert_eq!(config.divergence.reference_depth_m, 3329.0);
        assert_eq!(config.calibration.switch_depth_m, 1784.0);
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn test_partial_toml_override() {
        let toml_str = r#"
[well]
name = "L-2DL"

[eaton]
exponent = 1.2
"#;
        let config = AnalysisConfig::from_toml_str(toml_str).expect("partial TOML should parse");
        assert_eq!(config.well.name, "L-2DL");
        assert_eq!(config.eaton.exponent, 1.2);
        // Non-overridden values retain defaults
        assert_eq!(config.eaton.normal_pressure_gradient, 1.03);
        assert_eq!(config.troughton.exponent, 0.5);
    }

    #[test]
    fn test_mudline_depth_is_water_depth_plus_rkb() {
        let params = AnalysisConfig::default().model_parameters();
        assert!((params.mudline_depth_m - 3044.2).abs() < 1e-9);
    }

    #[test]
    fn test_validation_rejects_singular_troughton_exponent() {
        let mut config = AnalysisConfig::default();
        config.troughton.exponent = -1.0;
        let result = config.validate();
        assert!(result.is_err(), "c = -1 must be rejected");
        if let Err(ConfigError::Validation(errors)) = result {
            assert!(errors.iter().any(|e| e.contains("troughton.exponent")));
        }
    }

    #[test]
    fn test_validation_rejects_non_finite() {
        let mut config = AnalysisConfig::default();
        config.calibration.switch_depth_m = f64::NAN;
        let result = config.validate();
        assert!(result.is_err(), "NaN parameters must be rejected");
        if let Err(ConfigError::Validation(errors)) = result {
            assert!(errors.iter().any(|e| e.contains("calibration.switch_depth_m")));
        }
    }

    #[test]
    fn test_validation_rejects_non_positive_eaton_exponent() {
        let mut config = AnalysisConfig::default();
        config.eaton.exponent = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_roundtrip_toml() {
        let original = AnalysisConfig::default();
        let toml_str = original.to_toml().expect("serialization should work");
        assert!(toml_str.contains("[geometry]"), "Missing [geometry] section");
        assert!(toml_str.contains("[calibration]"), "Missing [calibration] section");
        let roundtripped: AnalysisConfig =
            toml::from_str(&toml_str).expect("deserialization should work");
        assert_eq!(original, roundtripped);
    }

    #[test]
    fn test_validation_error_lists_every_problem() {
        let mut config = AnalysisConfig::default();
        config.eaton.exponent = -1.0;
        config.athy.surface_transit_time = 0.0;
        let err = config.validate().expect_err("two problems expected");
        let text = err.to_string();
        assert!(text.contains("eaton.exponent"));
        assert!(text.contains("athy.surface_transit_time"));
    }
}
