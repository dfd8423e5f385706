//! Report writers for derived profiles
//!
//! - CSV: the profile table with named columns
//! - JSON: metadata, parameter snapshot, summary, diagnostics and rows
//! - Text: operating window summary for the terminal

pub mod csv_writer;
pub mod json;
pub mod summary;

pub use csv_writer::write_profile_csv;
pub use json::{write_profile_json, ProfileReport, ReportMetadata};
pub use summary::render_summary;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error writing report: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error writing report: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error writing report: {0}")]
    Json(#[from] serde_json::Error),
}
