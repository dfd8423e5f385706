//! Shared data structures for divergence-method geopressure analysis
//!
//! - `WellLog` / `LogSample`: validated, depth-ordered input table (Depth, DTC, MW)
//! - `GeopressureProfile` / `GeopressureRow`: derived curves, one row per sample
//! - `RowDiagnostic`: row-level numeric singularities recorded during a run

mod profile;
mod well_log;

pub use profile::*;
pub use well_log::*;
