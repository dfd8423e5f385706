//! Config Validation Tests
//!
//! Typo detection on unknown keys, physical range checks, and loading of
//! analysis configs from disk. Exercised independently from the pipeline.

use geopressure::config::validation::{
    known_config_keys, suggest_correction, validate_physical_ranges, validate_unknown_keys,
};
use geopressure::config::{AnalysisConfig, ConfigError};
use std::io::Write;

// ============================================================================
// Typo Detection
// ============================================================================

#[test]
fn typo_in_eaton_section_warns_with_suggestion() {
    let toml_str = r#"
[eaton]
normal_presure_gradient = 1.05
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1, "Expected exactly 1 warning");
    assert!(warnings[0].field.contains("normal_presure_gradient"));
    assert_eq!(
        warnings[0].suggestion.as_deref(),
        Some("eaton.normal_pressure_gradient"),
        "Should suggest the correct spelling"
    );
}

#[test]
fn valid_config_produces_zero_warnings() {
    let toml_str = r#"
[well]
name = "Pozo-1"
field = "Deepwater Block 7"

[geometry]
rkb_m = 25.0
water_depth_m = 1500.0

[troughton]
surface_density = 1.9
coefficient = 0.012
exponent = 0.6

[athy]
surface_transit_time = 175.0
decay_constant = -0.00035

[divergence]
reference_depth_m = 2500.0

[eaton]
normal_pressure_gradient = 1.03
exponent = 0.6

[calibration]
switch_depth_m = 1800.0
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert!(
        warnings.is_empty(),
        "Valid config should produce 0 warnings, got: {:?}",
        warnings.iter().map(|w| &w.field).collect::<Vec<_>>()
    );
}

#[test]
fn unknown_section_warns() {
    let warnings = validate_unknown_keys("[ipr]\nreservoir_pressure = 3500.0\n");
    assert!(warnings.iter().any(|w| w.field == "ipr"));
    assert!(warnings.iter().any(|w| w.field == "ipr.reservoir_pressure"));
}

#[test]
fn multiple_typos_all_warned() {
    let toml_str = r#"
[well]
naem = "Test"

[athy]
decay_constnt = -0.0004
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 2, "Expected 2 warnings for 2 typos, got {}", warnings.len());
}

#[test]
fn empty_toml_produces_zero_warnings() {
    assert!(validate_unknown_keys("").is_empty());
}

#[test]
fn known_keys_set_is_complete() {
    // Every key of the serialized defaults must be known
    let toml_str = AnalysisConfig::default()
        .to_toml()
        .expect("Default config should serialize");
    let warnings = validate_unknown_keys(&toml_str);
    assert!(
        warnings.is_empty(),
        "Default config serialization should produce 0 unknown-key warnings, got: {:?}",
        warnings.iter().map(|w| &w.field).collect::<Vec<_>>()
    );
}

#[test]
fn suggest_correction_finds_close_match() {
    let known = known_config_keys();
    assert_eq!(
        suggest_correction("geometry.water_depht_m", &known).as_deref(),
        Some("geometry.water_depth_m")
    );
}

#[test]
fn unknown_keys_do_not_block_loading() {
    let config = AnalysisConfig::from_toml_str("[troughton]\ncoeficient = 0.5\n")
        .expect("typos only warn");
    assert_eq!(config, AnalysisConfig::default());
}

// ============================================================================
// Range Validation
// ============================================================================

#[test]
fn non_positive_surface_density_is_error() {
    let mut config = AnalysisConfig::default();
    config.troughton.surface_density = 0.0;
    let (errors, _) = validate_physical_ranges(&config);
    assert!(errors.iter().any(|e| e.contains("troughton.surface_density")));
    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
}

#[test]
fn unusual_surface_density_is_warning() {
    let mut config = AnalysisConfig::default();
    config.troughton.surface_density = 3.5;
    let (errors, warnings) = validate_physical_ranges(&config);
    assert!(errors.is_empty());
    assert!(warnings.iter().any(|w| w.field == "troughton.surface_density"));
    assert!(config.validate().is_ok(), "warnings never fail validation");
}

#[test]
fn reference_depth_above_mudline_is_warning() {
    let mut config = AnalysisConfig::default();
    config.divergence.reference_depth_m = 100.0;
    let (errors, warnings) = validate_physical_ranges(&config);
    assert!(errors.is_empty());
    assert!(warnings.iter().any(|w| w.field == "divergence.reference_depth_m"));
}

#[test]
fn singular_troughton_exponent_is_error() {
    let mut config = AnalysisConfig::default();
    config.troughton.exponent = -1.0;
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("troughton.exponent"), "{err}");
}

#[test]
fn all_defaults_pass_validation() {
    assert!(AnalysisConfig::default().validate().is_ok());
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn load_from_file_applies_overrides() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "[divergence]\nreference_depth_m = 3500.0").expect("write");

    let config = AnalysisConfig::load_from_file(file.path()).expect("valid config");
    assert_eq!(config.divergence.reference_depth_m, 3500.0);
    assert_eq!(config.eaton.normal_pressure_gradient, 1.03);
}

#[test]
fn load_from_file_reports_parse_errors() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "[eaton\nexponent = ").expect("write");

    let err = AnalysisConfig::load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(..)), "{err}");
}

#[test]
fn load_from_missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = AnalysisConfig::load_from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(..)));
}

#[test]
fn save_then_load_roundtrip() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("geopressure.toml");

    let mut config = AnalysisConfig::default();
    config.well.name = "Pozo-2".to_string();
    config.calibration.switch_depth_m = 2100.0;
    config.save_to_file(&path).expect("save");

    let loaded = AnalysisConfig::load_from_file(&path).expect("load");
    assert_eq!(loaded, config);
}
