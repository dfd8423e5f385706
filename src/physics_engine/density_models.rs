//! Velocity, bulk density and overburden models
//!
//! - Compressional velocity from sonic transit time
//! - Gardner density from velocity
//! - Troughton compaction density below the mudline
//! - Closed-form overburden stress and its density-equivalent gradient

use crate::config::defaults::{
    GARDNER_COEFFICIENT, GARDNER_EXPONENT, GRADIENT_CONVERSION, GRAVITY,
    OVERBURDEN_STRESS_FACTOR, VELOCITY_CONVERSION,
};
use crate::config::ModelParameters;

// ============================================================================
// Velocity
// ============================================================================

/// Compressional velocity from transit time
///
/// Formula: Vp = 304878.05 / DTC
///
/// Zero transit time yields ±∞; the caller records that as a division
/// singularity rather than rejecting the log.
pub fn velocity_from_transit_time(transit_time: f64) -> f64 {
    VELOCITY_CONVERSION / transit_time
}

// ============================================================================
// Density
// ============================================================================

/// Gardner bulk density
///
/// Formula: ρ = 0.31 × Vp^0.25
///
/// NaN for negative velocity. Not clamped: a negative Vp means the transit
/// time was negative, which must stay visible downstream.
pub fn gardner_density(velocity: f64) -> f64 {
    GARDNER_COEFFICIENT * velocity.powf(GARDNER_EXPONENT)
}

/// Troughton compaction density
///
/// Formula: ρ = po + k × max(D − z, 0)^c
///
/// Where:
/// - D = measured depth (m)
/// - z = mudline depth, water depth + RKB (m)
/// - po, k, c = Troughton surface density, coefficient, exponent
///
/// Above the mudline the compaction term is clamped to zero, so the result
/// never drops below `po`.
pub fn troughton_density(depth: f64, params: &ModelParameters) -> f64 {
    let burial = (depth - params.mudline_depth_m).max(0.0);
    params.surface_density + params.troughton_coefficient * burial.powf(params.troughton_exponent)
}

// ============================================================================
// Overburden
// ============================================================================

/// Overburden (vertical) stress
///
/// Closed-form integral of the Troughton law from surface to `depth`:
///
/// Formula: SV = 0.145 × (po·g·D + k·g·D^(c+1) / (c+1))
///
/// The integral runs unclamped from zero depth, unlike
/// [`troughton_density`]. Both forms are kept as published.
pub fn overburden_stress(depth: f64, params: &ModelParameters) -> f64 {
    let c1 = params.troughton_exponent + 1.0;
    OVERBURDEN_STRESS_FACTOR
        * (params.surface_density * GRAVITY * depth
            + params.troughton_coefficient * GRAVITY * depth.powf(c1) / c1)
}

/// Overburden gradient as density equivalent
///
/// Formula: GSV = SV / (D × 1.422)
pub fn overburden_gradient(stress: f64, depth: f64) -> f64 {
    stress / (depth * GRADIENT_CONVERSION)
}
