//! Physics Engine Module
//!
//! Deterministic formulas of the divergence method. Every function here is a
//! pure per-row or per-column calculation; the only sequential state is the
//! [`DivergenceRatchet`].
//!
//! ## Stages
//! - `density_models` - velocity, Gardner and Troughton density, overburden
//! - `compaction` - forward moving average, Athy trend, divergence ratchet
//! - `pressure_models` - Eaton pore pressure, calibration, parameter V, fracture pressure
//! - `window` - mud-weight operating window summary

pub mod compaction;
pub mod density_models;
pub mod pressure_models;
pub mod window;

pub use compaction::{
    divergence_area, divergence_factor, divergence_onset_depth, divergence_ratio,
    forward_moving_average, normal_compaction_trend, ratchet_divergence_ratios,
    shale_transit_time_trend, DivergenceRatchet,
};
pub use density_models::{
    gardner_density, overburden_gradient, overburden_stress, troughton_density,
    velocity_from_transit_time,
};
pub use pressure_models::{
    calibrated_pore_pressure, eaton_pore_pressure, fracture_pressure, parameter_v,
};
pub use window::{
    classify_mud_weight, classify_row, curve_range, summarize, CurveRange, MudWeightStatus,
    NarrowestWindow, OperatingWindowSummary,
};
