//! Config validation: unknown-key detection with Levenshtein suggestions
//! and physical range checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for AnalysisConfig.
///
/// Maintained manually to match the struct hierarchy in analysis_config.rs.
/// Any new field added to AnalysisConfig must be added here too.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [well]
        "well",
        "well.name",
        "well.field",
        // [geometry]
        "geometry",
        "geometry.rkb_m",
        "geometry.water_depth_m",
        // [troughton]
        "troughton",
        "troughton.surface_density",
        "troughton.coefficient",
        "troughton.exponent",
        // [athy]
        "athy",
        "athy.surface_transit_time",
        "athy.decay_constant",
        // [divergence]
        "divergence",
        "divergence.reference_depth_m",
        // [eaton]
        "eaton",
        "eaton.normal_pressure_gradient",
        "eaton.exponent",
        // [calibration]
        "calibration",
        "calibration.switch_depth_m",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Compute the Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a.chars().count();
    }

    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
///
/// Ties resolve to the lexicographically smallest key so suggestions are stable.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (levenshtein(unknown, k), k))
        .filter(|(dist, _)| *dist <= 3)
        .min()
        .map(|(_, k)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// This does NOT fail on unknown keys, it only warns.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are handled by serde later
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Physical Range Validation
// ============================================================================

/// Validate physical ranges on a parsed AnalysisConfig.
///
/// Returns (errors, warnings). Errors are impossible values that must
/// prevent a run; warnings are suspicious but not fatal.
pub fn validate_physical_ranges(
    config: &super::AnalysisConfig,
) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    // Water depth: a negative water column is meaningless
    if config.geometry.water_depth_m < 0.0 {
        errors.push(format!(
            "geometry.water_depth_m = {:.1} cannot be negative",
            config.geometry.water_depth_m
        ));
    }

    // Surface density must be a plausible bulk density
    let po = config.troughton.surface_density;
    if po <= 0.0 {
        errors.push(format!(
            "troughton.surface_density = {po:.3} must be > 0 g/cm3"
        ));
    } else if !(1.0..=3.0).contains(&po) {
        warnings.push(ValidationWarning {
            field: "troughton.surface_density".to_string(),
            message: format!("troughton.surface_density = {po:.3} is outside typical range (1.0-3.0 g/cm3)"),
            suggestion: None,
        });
    }

    // Normal pressure gradient: seawater-ish
    let ppn = config.eaton.normal_pressure_gradient;
    if ppn <= 0.0 {
        errors.push(format!(
            "eaton.normal_pressure_gradient = {ppn:.3} must be > 0"
        ));
    } else if !(0.9..=1.2).contains(&ppn) {
        warnings.push(ValidationWarning {
            field: "eaton.normal_pressure_gradient".to_string(),
            message: format!("eaton.normal_pressure_gradient = {ppn:.3} is outside typical range (0.9-1.2)"),
            suggestion: None,
        });
    }

    // RKB: below sea level is unusual but not impossible (land rigs in depressions)
    if config.geometry.rkb_m < 0.0 {
        warnings.push(ValidationWarning {
            field: "geometry.rkb_m".to_string(),
            message: format!("geometry.rkb_m = {:.1} is below sea level", config.geometry.rkb_m),
            suggestion: None,
        });
    }

    // Athy decay: transit time should shorten with burial
    if config.athy.decay_constant > 0.0 {
        warnings.push(ValidationWarning {
            field: "athy.decay_constant".to_string(),
            message: format!(
                "athy.decay_constant = {:.5} is positive; normal trend will increase with depth",
                config.athy.decay_constant
            ),
            suggestion: None,
        });
    }

    // Reference depth shallower than the mudline disables nothing but is suspicious
    if config.divergence.reference_depth_m < config.geometry.mudline_depth_m() {
        warnings.push(ValidationWarning {
            field: "divergence.reference_depth_m".to_string(),
            message: format!(
                "divergence.reference_depth_m = {:.1} is above the mudline ({:.1})",
                config.divergence.reference_depth_m,
                config.geometry.mudline_depth_m()
            ),
            suggestion: None,
        });
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein("athy", "athy"), 0);
    }

    #[test]
    fn test_levenshtein_one_edit() {
        assert_eq!(levenshtein("exponnt", "exponent"), 1);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
    }

    #[test]
    fn test_walk_toml_keys_nested() {
        let toml: toml::Value = r#"
            [eaton]
            exponent = 0.5
        "#
        .parse()
        .unwrap();
        let keys = walk_toml_keys(&toml, "");
        assert!(keys.contains(&"eaton".to_string()));
        assert!(keys.contains(&"eaton.exponent".to_string()));
    }

    #[test]
    fn test_typo_key_produces_warning_with_suggestion() {
        let toml_str = r#"
[troughton]
coeficient = 0.02
"#;
        let warnings = validate_unknown_keys(toml_str);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].field.contains("coeficient"));
        assert_eq!(
            warnings[0].suggestion.as_deref(),
            Some("troughton.coefficient")
        );
    }

    #[test]
    fn test_suggest_correction_no_match_for_garbage() {
        let known = known_config_keys();
        assert!(suggest_correction("completely_unrelated_garbage_key_xyz", &known).is_none());
    }

    #[test]
    fn test_physical_range_defaults_clean() {
        let config = crate::config::AnalysisConfig::default();
        let (errors, warnings) = validate_physical_ranges(&config);
        assert!(errors.is_empty(), "Defaults should produce no errors: {errors:?}");
        assert!(warnings.is_empty(), "Defaults should produce no warnings: {warnings:?}");
    }

    #[test]
    fn test_negative_water_depth_is_error() {
        let mut config = crate::config::AnalysisConfig::default();
        config.geometry.water_depth_m = -10.0;
        let (errors, _) = validate_physical_ranges(&config);
        assert!(errors.iter().any(|e| e.contains("water_depth_m")));
    }

    #[test]
    fn test_positive_athy_decay_warns() {
        let mut config = crate::config::AnalysisConfig::default();
        config.athy.decay_constant = 0.0002;
        let (errors, warnings) = validate_physical_ranges(&config);
        assert!(errors.is_empty());
        assert!(warnings.iter().any(|w| w.field == "athy.decay_constant"));
    }
}
