//! The eight stages, each filling its columns of the working table
//!
//! Stages run strictly in order. Every stage except the trend smoother and
//! the divergence ratchet is a pure per-row map; those two walk the rows in
//! increasing-depth order and must see the whole table.

use tracing::debug;

use crate::config::defaults::MOVING_AVERAGE_WINDOW;
use crate::config::ModelParameters;
use crate::physics_engine::{
    calibrated_pore_pressure, divergence_factor, divergence_ratio, eaton_pore_pressure,
    forward_moving_average, fracture_pressure, gardner_density, normal_compaction_trend,
    overburden_gradient, overburden_stress, parameter_v, shale_transit_time_trend,
    troughton_density, velocity_from_transit_time, DivergenceRatchet,
};
use crate::types::{
    GeopressureProfile, GeopressureRow, ProfileColumn, RowDiagnostic, SingularityKind, Stage,
    WellLog,
};

use crate::types::SingularityKind::{DivisionSingularity, DomainSingularity};

// ============================================================================
// Working table
// ============================================================================

/// Column-major table under construction. Owned by a single run.
#[derive(Debug, Default)]
pub(crate) struct ColumnTable {
    pub depth: Vec<f64>,
    pub transit_time: Vec<f64>,
    pub mud_weight: Vec<f64>,
    pub velocity: Vec<f64>,
    pub gardner_density: Vec<f64>,
    pub troughton_density: Vec<f64>,
    pub overburden_stress: Vec<f64>,
    pub overburden_gradient: Vec<f64>,
    pub moving_avg_transit_time: Vec<f64>,
    pub normal_compaction_trend: Vec<f64>,
    pub divergence_ratio: Vec<f64>,
    pub divergence_factor: Vec<f64>,
    pub shale_transit_time_trend: Vec<f64>,
    pub uncalibrated_pore_pressure: Vec<f64>,
    pub calibrated_pore_pressure: Vec<f64>,
    pub param_v: Vec<f64>,
    pub fracture_pressure: Vec<f64>,
}

impl ColumnTable {
    pub fn from_log(log: &WellLog) -> Self {
        Self {
            depth: log.depths(),
            transit_time: log.transit_times(),
            mud_weight: log.mud_weights(),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.depth.len()
    }

    /// Zip the finished columns into rows.
    pub fn into_profile(self, diagnostics: Vec<RowDiagnostic>) -> GeopressureProfile {
        let rows = (0..self.len())
            .map(|i| GeopressureRow {
                depth: self.depth[i],
                transit_time: self.transit_time[i],
                mud_weight: self.mud_weight[i],
                velocity: self.velocity[i],
                gardner_density: self.gardner_density[i],
                troughton_density: self.troughton_density[i],
                overburden_stress: self.overburden_stress[i],
                overburden_gradient: self.overburden_gradient[i],
                moving_avg_transit_time: self.moving_avg_transit_time[i],
                normal_compaction_trend: self.normal_compaction_trend[i],
                divergence_ratio: self.divergence_ratio[i],
                divergence_factor: self.divergence_factor[i],
                shale_transit_time_trend: self.shale_transit_time_trend[i],
                uncalibrated_pore_pressure: self.uncalibrated_pore_pressure[i],
                calibrated_pore_pressure: self.calibrated_pore_pressure[i],
                param_v: self.param_v[i],
                fracture_pressure: self.fracture_pressure[i],
            })
            .collect();
        GeopressureProfile::new(rows, diagnostics)
    }
}

// ============================================================================
// Diagnostics
// ============================================================================

/// Collects row diagnostics as stages run.
///
/// A value is flagged only where it turns non-finite from finite inputs, so
/// each singularity is reported once at its origin and not again in every
/// downstream column it contaminates.
#[derive(Debug, Default)]
pub(crate) struct DiagnosticLog {
    entries: Vec<RowDiagnostic>,
}

impl DiagnosticLog {
    #[allow(clippy::too_many_arguments)]
    fn check(
        &mut self,
        row: usize,
        depth: f64,
        stage: Stage,
        column: ProfileColumn,
        inputs: &[f64],
        output: f64,
        kind: SingularityKind,
    ) {
        if !output.is_finite() && inputs.iter().all(|v| v.is_finite()) {
            self.entries.push(RowDiagnostic {
                row,
                depth,
                stage,
                column,
                kind,
            });
        }
    }

    pub fn count_for(&self, stage: Stage) -> usize {
        self.entries.iter().filter(|d| d.stage == stage).count()
    }

    pub fn into_entries(mut self) -> Vec<RowDiagnostic> {
        self.entries.sort_by_key(|d| (d.row, d.stage));
        self.entries
    }
}

// ============================================================================
// Stages
// ============================================================================

/// Stage 1: Vp from DTC.
pub(crate) fn velocity(table: &mut ColumnTable, diag: &mut DiagnosticLog) {
    table.velocity = table
        .transit_time
        .iter()
        .map(|&dtc| velocity_from_transit_time(dtc))
        .collect();

    for i in 0..table.len() {
        diag.check(
            i,
            table.depth[i],
            Stage::Velocity,
            ProfileColumn::Velocity,
            &[table.transit_time[i]],
            table.velocity[i],
            DivisionSingularity,
        );
    }
    debug!(
        stage = %Stage::Velocity,
        singular = diag.count_for(Stage::Velocity),
        "Velocity computed"
    );
}

/// Stage 2: Gardner density from Vp.
pub(crate) fn gardner(table: &mut ColumnTable, diag: &mut DiagnosticLog) {
    table.gardner_density = table.velocity.iter().map(|&vp| gardner_density(vp)).collect();

    for i in 0..table.len() {
        diag.check(
            i,
            table.depth[i],
            Stage::GardnerDensity,
            ProfileColumn::GardnerDensity,
            &[table.velocity[i]],
            table.gardner_density[i],
            DomainSingularity,
        );
    }
    debug!(stage = %Stage::GardnerDensity, "Gardner density computed");
}

/// Stage 3: Troughton density, clamped above the mudline.
pub(crate) fn troughton(table: &mut ColumnTable, params: &ModelParameters, diag: &mut DiagnosticLog) {
    table.troughton_density = table
        .depth
        .iter()
        .map(|&d| troughton_density(d, params))
        .collect();

    for i in 0..table.len() {
        diag.check(
            i,
            table.depth[i],
            Stage::TroughtonDensity,
            ProfileColumn::TroughtonDensity,
            &[table.depth[i]],
            table.troughton_density[i],
            DomainSingularity,
        );
    }
    debug!(
        stage = %Stage::TroughtonDensity,
        mudline_m = params.mudline_depth_m,
        "Troughton density computed"
    );
}

/// Stage 4: overburden stress and gradient.
pub(crate) fn overburden(table: &mut ColumnTable, params: &ModelParameters, diag: &mut DiagnosticLog) {
    table.overburden_stress = table
        .depth
        .iter()
        .map(|&d| overburden_stress(d, params))
        .collect();
    table.overburden_gradient = table
        .overburden_stress
        .iter()
        .zip(&table.depth)
        .map(|(&sv, &d)| overburden_gradient(sv, d))
        .collect();

    for i in 0..table.len() {
        let depth = table.depth[i];
        diag.check(
            i,
            depth,
            Stage::Overburden,
            ProfileColumn::OverburdenStress,
            &[depth],
            table.overburden_stress[i],
            DomainSingularity,
        );
        diag.check(
            i,
            depth,
            Stage::Overburden,
            ProfileColumn::OverburdenGradient,
            &[table.overburden_stress[i], depth],
            table.overburden_gradient[i],
            DivisionSingularity,
        );
    }
    debug!(stage = %Stage::Overburden, "Overburden computed");
}

/// Stage 5: forward moving average of DTC and the Athy normal trend.
///
/// The average of finite transit times is always finite, so only the Athy
/// trend is checked.
pub(crate) fn trend(table: &mut ColumnTable, params: &ModelParameters, diag: &mut DiagnosticLog) {
    table.moving_avg_transit_time = forward_moving_average(&table.transit_time, MOVING_AVERAGE_WINDOW);
    table.normal_compaction_trend = table
        .depth
        .iter()
        .map(|&d| normal_compaction_trend(d, params))
        .collect();

    for i in 0..table.len() {
        diag.check(
            i,
            table.depth[i],
            Stage::Trend,
            ProfileColumn::NormalCompactionTrend,
            &[table.depth[i]],
            table.normal_compaction_trend[i],
            DomainSingularity,
        );
    }
    debug!(
        stage = %Stage::Trend,
        window = MOVING_AVERAGE_WINDOW,
        "Trend computed"
    );
}

/// Stage 6: ratcheted divergence ratio, divergence factor, shale trend.
///
/// The ratchet is the only sequential state in the pipeline: rows are folded
/// in increasing-depth order and the running maximum crosses every row.
pub(crate) fn divergence(table: &mut ColumnTable, params: &ModelParameters, diag: &mut DiagnosticLog) {
    let n = table.len();
    let mut ratchet = DivergenceRatchet::new();
    let mut ratcheted = Vec::with_capacity(n);
    let mut factors = Vec::with_capacity(n);
    let mut shale = Vec::with_capacity(n);

    for i in 0..n {
        let depth = table.depth[i];
        let avg = table.moving_avg_transit_time[i];
        let dtn = table.normal_compaction_trend[i];

        let ratio = divergence_ratio(avg, dtn);
        diag.check(
            i,
            depth,
            Stage::Divergence,
            ProfileColumn::DivergenceRatio,
            &[avg, dtn],
            ratio,
            DivisionSingularity,
        );

        let held = ratchet.push(ratio);
        let factor = divergence_factor(depth, held, params);
        let dtsh = shale_transit_time_trend(factor, dtn);
        diag.check(
            i,
            depth,
            Stage::Divergence,
            ProfileColumn::ShaleTransitTimeTrend,
            &[factor, dtn],
            dtsh,
            DomainSingularity,
        );

        ratcheted.push(held);
        factors.push(factor);
        shale.push(dtsh);
    }

    table.divergence_ratio = ratcheted;
    table.divergence_factor = factors;
    table.shale_transit_time_trend = shale;

    debug!(
        stage = %Stage::Divergence,
        reference_depth_m = params.divergence_reference_depth_m,
        final_ratio = ?ratchet.current(),
        "Divergence computed"
    );
}

/// Stage 7: Eaton pore pressure and mud-weight calibration.
pub(crate) fn pore_pressure(table: &mut ColumnTable, params: &ModelParameters, diag: &mut DiagnosticLog) {
    let n = table.len();
    let mut uncalibrated = Vec::with_capacity(n);
    let mut calibrated = Vec::with_capacity(n);

    for i in 0..n {
        let depth = table.depth[i];
        let gsv = table.overburden_gradient[i];
        let dtn = table.normal_compaction_trend[i];
        let dtsh = table.shale_transit_time_trend[i];

        let pp = eaton_pore_pressure(gsv, dtn, dtsh, params);
        let kind = if dtsh == 0.0 {
            DivisionSingularity
        } else {
            DomainSingularity
        };
        diag.check(
            i,
            depth,
            Stage::PorePressure,
            ProfileColumn::UncalibratedPorePressure,
            &[gsv, dtn, dtsh],
            pp,
            kind,
        );

        uncalibrated.push(pp);
        calibrated.push(calibrated_pore_pressure(depth, pp, table.mud_weight[i], params));
    }

    table.uncalibrated_pore_pressure = uncalibrated;
    table.calibrated_pore_pressure = calibrated;

    debug!(
        stage = %Stage::PorePressure,
        switch_depth_m = params.calibration_switch_depth_m,
        "Pore pressure computed"
    );
}

/// Stage 8: parameter V and fracture pressure from the uncalibrated pore pressure.
pub(crate) fn fracture(table: &mut ColumnTable, diag: &mut DiagnosticLog) {
    let n = table.len();
    let mut v_column = Vec::with_capacity(n);
    let mut pf_column = Vec::with_capacity(n);

    for i in 0..n {
        let depth = table.depth[i];
        let pp = table.uncalibrated_pore_pressure[i];
        let gsv = table.overburden_gradient[i];

        let v = parameter_v(depth);
        diag.check(
            i,
            depth,
            Stage::FracturePressure,
            ProfileColumn::ParamV,
            &[depth],
            v,
            DomainSingularity,
        );

        let pf = fracture_pressure(pp, v, gsv);
        diag.check(
            i,
            depth,
            Stage::FracturePressure,
            ProfileColumn::FracturePressure,
            &[pp, v, gsv],
            pf,
            DivisionSingularity,
        );

        v_column.push(v);
        pf_column.push(pf);
    }

    table.param_v = v_column;
    table.fracture_pressure = pf_column;

    debug!(stage = %Stage::FracturePressure, "Fracture pressure computed");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[[f64; 3]]) -> ColumnTable {
        ColumnTable::from_log(&WellLog::from_rows(rows).expect("valid log"))
    }

    #[test]
    fn test_zero_transit_time_flagged_once_at_velocity() {
        let mut t = table(&[[3000.0, 0.0, 1.2], [3100.0, 95.0, 1.25]]);
        let mut diag = DiagnosticLog::default();
        velocity(&mut t, &mut diag);
        gardner(&mut t, &mut diag);

        let entries = diag.into_entries();
        assert_eq!(entries.len(), 1, "{entries:?}");
        assert_eq!(entries[0].row, 0);
        assert_eq!(entries[0].stage, Stage::Velocity);
        assert_eq!(entries[0].kind, SingularityKind::DivisionSingularity);
        assert!(t.gardner_density[0].is_infinite());
    }

    #[test]
    fn test_negative_transit_time_flagged_at_gardner() {
        let mut t = table(&[[3000.0, -90.0, 1.2]]);
        let mut diag = DiagnosticLog::default();
        velocity(&mut t, &mut diag);
        gardner(&mut t, &mut diag);

        let entries = diag.into_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].column, ProfileColumn::GardnerDensity);
        assert_eq!(entries[0].kind, SingularityKind::DomainSingularity);
    }

    #[test]
    fn test_non_finite_input_is_not_a_singularity() {
        let mut t = table(&[[3000.0, f64::NAN, 1.2]]);
        let mut diag = DiagnosticLog::default();
        velocity(&mut t, &mut diag);
        assert!(t.velocity[0].is_nan());
        assert!(diag.into_entries().is_empty());
    }

    #[test]
    fn test_zero_depth_flags_gradient_and_param_v() {
        let params = ModelParameters::default();
        let mut t = table(&[[0.0, 100.0, 1.0], [10.0, 100.0, 1.0]]);
        let mut diag = DiagnosticLog::default();
        velocity(&mut t, &mut diag);
        gardner(&mut t, &mut diag);
        troughton(&mut t, &params, &mut diag);
        overburden(&mut t, &params, &mut diag);
        trend(&mut t, &params, &mut diag);
        divergence(&mut t, &params, &mut diag);
        pore_pressure(&mut t, &params, &mut diag);
        fracture(&mut t, &mut diag);

        let entries = diag.into_entries();
        let columns: Vec<ProfileColumn> = entries.iter().map(|d| d.column).collect();
        assert_eq!(
            columns,
            vec![ProfileColumn::OverburdenGradient, ProfileColumn::ParamV]
        );
        assert!(entries.iter().all(|d| d.row == 0));
        assert_eq!(entries[0].kind, SingularityKind::DivisionSingularity);
        assert_eq!(entries[1].kind, SingularityKind::DomainSingularity);
    }
}
