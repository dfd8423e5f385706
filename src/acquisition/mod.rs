//! Well log acquisition module
//!
//! Materializes a depth-indexed table {Depth, DTC, MW} from CSV files. The
//! pipeline itself never parses; it only consumes a validated `WellLog`.

pub mod csv_log;

pub use csv_log::{parse_well_log, read_well_log, LoadError};
