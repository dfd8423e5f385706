//! Geopressure: divergence-method pore and fracture pressure profiling
//!
//! Computes a geopressure profile along a wellbore from a depth-indexed sonic
//! log {Depth, DTC, MW} by comparing the observed transit-time trend against
//! a normal-compaction trend.
//!
//! ## Architecture
//!
//! - **Config**: the analysis parameter set, loaded from TOML and validated
//! - **Types**: validated input log, derived profile, row diagnostics
//! - **Physics Engine**: density, overburden, trend, divergence and pressure formulas
//! - **Pipeline**: runs the eight stages in fixed order over one log
//! - **Acquisition / Report**: CSV input and CSV / JSON / text output

pub mod acquisition;
pub mod config;
pub mod physics_engine;
pub mod pipeline;
pub mod report;
pub mod types;

// Re-export the run entry points
pub use config::{AnalysisConfig, ConfigError, ModelParameters};
pub use pipeline::{Pipeline, PipelineError};

// Re-export commonly used types
pub use types::{
    GeopressureProfile, GeopressureRow, InputError, LogSample, ProfileColumn, RowDiagnostic,
    SingularityKind, Stage, WellLog,
};

pub use physics_engine::{summarize, MudWeightStatus, OperatingWindowSummary};
