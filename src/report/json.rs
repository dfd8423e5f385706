//! Profile export as a JSON document with run metadata

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::{ModelParameters, WellInfo};
use crate::physics_engine::{summarize, OperatingWindowSummary};
use crate::types::{GeopressureProfile, GeopressureRow, RowDiagnostic};

use super::ReportError;

#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub generator: &'static str,
    pub version: &'static str,
    pub well: String,
    pub field: String,
    pub generated_at: DateTime<Utc>,
}

/// Full run output. Non-finite values serialize as `null`.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileReport<'a> {
    pub metadata: ReportMetadata,
    pub parameters: &'a ModelParameters,
    pub summary: OperatingWindowSummary,
    pub diagnostics: &'a [RowDiagnostic],
    pub rows: &'a [GeopressureRow],
}

impl<'a> ProfileReport<'a> {
    pub fn new(profile: &'a GeopressureProfile, parameters: &'a ModelParameters, well: &WellInfo) -> Self {
        Self {
            metadata: ReportMetadata {
                generator: env!("CARGO_PKG_NAME"),
                version: env!("CARGO_PKG_VERSION"),
                well: well.name.clone(),
                field: well.field.clone(),
                generated_at: Utc::now(),
            },
            parameters,
            summary: summarize(profile),
            diagnostics: profile.diagnostics(),
            rows: profile.rows(),
        }
    }
}

/// Pretty-printed JSON.
pub fn write_profile_json<W: Write>(report: &ProfileReport<'_>, mut sink: W) -> Result<(), ReportError> {
    serde_json::to_writer_pretty(&mut sink, report)?;
    writeln!(sink)?;
    sink.flush()?;
    Ok(())
}
