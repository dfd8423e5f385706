//! Model constants and parameter defaults.
//!
//! Centralises the magic numbers of the divergence method. The tunable
//! values are only the *defaults* of [`AnalysisConfig`](super::AnalysisConfig);
//! the fixed constants are part of the published formulas and are not exposed
//! as configuration.

// ============================================================================
// Tunable parameter defaults
// ============================================================================

/// Rotary kelly bushing height above sea level (m).
pub const DEFAULT_RKB_M: f64 = 30.2;

/// Water depth (m).
pub const DEFAULT_WATER_DEPTH_M: f64 = 3014.0;

/// Troughton surface density `po` (g/cm³).
pub const DEFAULT_TROUGHTON_SURFACE_DENSITY: f64 = 1.95;

/// Troughton compaction coefficient `k`.
pub const DEFAULT_TROUGHTON_COEFFICIENT: f64 = 0.01;

/// Troughton compaction exponent `c`.
pub const DEFAULT_TROUGHTON_EXPONENT: f64 = 0.5;

/// Athy surface transit time `dtco` (µs per unit length).
pub const DEFAULT_ATHY_SURFACE_TRANSIT_TIME: f64 = 180.0;

/// Athy decay constant `c1` (1/m). Negative: transit time falls with burial.
pub const DEFAULT_ATHY_DECAY_CONSTANT: f64 = -0.0004;

/// Depth below which the divergence ratio is applied (`prf`, m).
pub const DEFAULT_DIVERGENCE_REFERENCE_DEPTH_M: f64 = 3329.0;

/// Normal (hydrostatic) pore pressure gradient `ppn` (g/cm³).
pub const DEFAULT_NORMAL_PRESSURE_GRADIENT: f64 = 1.03;

/// Eaton exponent.
pub const DEFAULT_EATON_EXPONENT: f64 = 0.5;

/// Depth at which calibrated pore pressure switches to mud weight (`ms`, m).
pub const DEFAULT_CALIBRATION_SWITCH_DEPTH_M: f64 = 1784.0;

// ============================================================================
// Fixed formula constants
// ============================================================================

/// Transit time to compressional velocity conversion (`Vp = K / DTC`).
pub const VELOCITY_CONVERSION: f64 = 304_878.05;

/// Gardner coefficient.
pub const GARDNER_COEFFICIENT: f64 = 0.31;

/// Gardner exponent.
pub const GARDNER_EXPONENT: f64 = 0.25;

/// Overburden stress unit conversion.
pub const OVERBURDEN_STRESS_FACTOR: f64 = 0.145;

/// Gravitational acceleration used by the overburden integral (m/s²).
pub const GRAVITY: f64 = 9.81;

/// Stress to density-equivalent gradient conversion.
pub const GRADIENT_CONVERSION: f64 = 1.422;

/// Safety margin subtracted from mud weight in the calibrated zone.
pub const MUD_WEIGHT_CALIBRATION_OFFSET: f64 = 0.03;

/// Parameter V log coefficient.
pub const PARAM_V_LOG_COEFFICIENT: f64 = 0.0645;

/// Parameter V intercept.
pub const PARAM_V_INTERCEPT: f64 = -0.067;

/// Forward moving-average window, in samples (the current row plus 100 ahead).
pub const MOVING_AVERAGE_WINDOW: usize = 101;

// ============================================================================
// Config discovery
// ============================================================================

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "GEOPRESSURE_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "geopressure.toml";
