//! Pipeline Coordinator - runs the eight stages over one well log

use std::time::Instant;

use thiserror::Error;
use tracing::{info, warn};

use super::stages::{self, ColumnTable, DiagnosticLog};
use crate::config::{AnalysisConfig, ConfigError, ModelParameters};
use crate::types::{GeopressureProfile, InputError, WellLog};

/// Errors that stop a run before any stage executes.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Input(#[from] InputError),
}

/// Divergence-method pipeline bound to one immutable parameter set.
///
/// Holds no state between runs: `run` is a deterministic transform of the
/// input log, so running the same log twice yields identical profiles.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    params: ModelParameters,
    well_name: String,
}

impl Pipeline {
    /// Validate the config and capture its parameters.
    pub fn new(config: &AnalysisConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        Ok(Self {
            params: config.model_parameters(),
            well_name: config.well.name.clone(),
        })
    }

    /// Build from a pre-flattened parameter set without re-validating.
    pub fn with_parameters(params: ModelParameters) -> Self {
        Self {
            params,
            well_name: String::new(),
        }
    }

    pub const fn parameters(&self) -> &ModelParameters {
        &self.params
    }

    /// Run all stages in order and return the derived profile.
    ///
    /// Row-level numeric singularities never abort the run; they surface as
    /// non-finite values plus a [`RowDiagnostic`](crate::types::RowDiagnostic).
    pub fn run(&self, log: &WellLog) -> GeopressureProfile {
        let started = Instant::now();
        let (top, base) = log.depth_range();
        info!(
            well = %self.well_name,
            samples = log.len(),
            top_m = top,
            base_m = base,
            "Running divergence-method pipeline"
        );

        let mut table = ColumnTable::from_log(log);
        let mut diag = DiagnosticLog::default();

        stages::velocity(&mut table, &mut diag);
        stages::gardner(&mut table, &mut diag);
        stages::troughton(&mut table, &self.params, &mut diag);
        stages::overburden(&mut table, &self.params, &mut diag);
        stages::trend(&mut table, &self.params, &mut diag);
        stages::divergence(&mut table, &self.params, &mut diag);
        stages::pore_pressure(&mut table, &self.params, &mut diag);
        stages::fracture(&mut table, &mut diag);

        let profile = table.into_profile(diag.into_entries());

        if profile.has_singularities() {
            let first = &profile.diagnostics()[0];
            warn!(
                count = profile.diagnostics().len(),
                first = %first,
                "Rows hit numeric singularities; affected values are non-finite"
            );
        }

        info!(
            rows = profile.len(),
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Pipeline complete"
        );
        profile
    }

    /// Validate three raw columns (Depth, DTC, MW) and run.
    pub fn run_columns(
        &self,
        depth: &[f64],
        transit_time: &[f64],
        mud_weight: &[f64],
    ) -> Result<GeopressureProfile, PipelineError> {
        let log = WellLog::from_columns(depth, transit_time, mud_weight)?;
        Ok(self.run(&log))
    }
}
