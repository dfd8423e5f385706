//! Pore pressure and fracture pressure models
//!
//! All pressures are density-equivalent gradients (g/cm³), the same units as
//! mud weight and the overburden gradient.

use crate::config::defaults::{
    MUD_WEIGHT_CALIBRATION_OFFSET, PARAM_V_INTERCEPT, PARAM_V_LOG_COEFFICIENT,
};
use crate::config::ModelParameters;

// ============================================================================
// Pore Pressure
// ============================================================================

/// Eaton pore pressure from the sonic divergence
///
/// Formula: Pp = GSV − (GSV − ppn) × (DTN / DTSH)^n
///
/// Where:
/// - GSV = overburden gradient
/// - ppn = normal pressure gradient
/// - DTN / DTSH = normal over shale trend (1 above the reference depth)
/// - n = Eaton exponent
///
/// DTSH = 0 gives a non-finite result; it cannot happen with positive
/// transit times since the divergence factor is then positive.
pub fn eaton_pore_pressure(
    overburden_gradient: f64,
    normal_trend: f64,
    shale_trend: f64,
    params: &ModelParameters,
) -> f64 {
    let trend_ratio = normal_trend / shale_trend;
    overburden_gradient
        - (overburden_gradient - params.normal_pressure_gradient)
            * trend_ratio.powf(params.eaton_exponent)
}

/// Calibrated pore pressure
///
/// Shallower than `ms` the Eaton estimate is kept; at and below `ms` it is
/// replaced outright by mud weight minus a 0.03 margin. No blending.
pub fn calibrated_pore_pressure(
    depth: f64,
    uncalibrated: f64,
    mud_weight: f64,
    params: &ModelParameters,
) -> f64 {
    if depth < params.calibration_switch_depth_m {
        uncalibrated
    } else {
        mud_weight - MUD_WEIGHT_CALIBRATION_OFFSET
    }
}

// ============================================================================
// Fracture Pressure
// ============================================================================

/// Depth-dependent Poisson-like parameter V
///
/// Formula: V = 0.0645 × ln(D) − 0.067
///
/// NaN for negative depth, −∞ at zero.
pub fn parameter_v(depth: f64) -> f64 {
    PARAM_V_LOG_COEFFICIENT * depth.ln() + PARAM_V_INTERCEPT
}

/// Fracture pressure
///
/// Formula: Pf = Pp + V / (1 − V) × (GSV − Pp)
///
/// Uses the uncalibrated pore pressure, so the mud-weight calibration never
/// feeds back into the fracture gradient.
pub fn fracture_pressure(uncalibrated_pore_pressure: f64, param_v: f64, overburden_gradient: f64) -> f64 {
    uncalibrated_pore_pressure
        + param_v / (1.0 - param_v) * (overburden_gradient - uncalibrated_pore_pressure)
}
