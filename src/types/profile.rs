//! Derived geopressure profile: one output row per input depth sample

use serde::Serialize;
use std::fmt;

// ============================================================================
// Columns
// ============================================================================

/// Output curves in their published column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ProfileColumn {
    Depth,
    TransitTime,
    MudWeight,
    Velocity,
    GardnerDensity,
    TroughtonDensity,
    OverburdenStress,
    OverburdenGradient,
    MovingAvgTransitTime,
    NormalCompactionTrend,
    DivergenceRatio,
    DivergenceFactor,
    ShaleTransitTimeTrend,
    UncalibratedPorePressure,
    CalibratedPorePressure,
    ParamV,
    FracturePressure,
}

impl ProfileColumn {
    pub const ALL: [Self; 17] = [
        Self::Depth,
        Self::TransitTime,
        Self::MudWeight,
        Self::Velocity,
        Self::GardnerDensity,
        Self::TroughtonDensity,
        Self::OverburdenStress,
        Self::OverburdenGradient,
        Self::MovingAvgTransitTime,
        Self::NormalCompactionTrend,
        Self::DivergenceRatio,
        Self::DivergenceFactor,
        Self::ShaleTransitTimeTrend,
        Self::UncalibratedPorePressure,
        Self::CalibratedPorePressure,
        Self::ParamV,
        Self::FracturePressure,
    ];

    /// Header name used by the CSV and JSON writers.
    pub const fn header(self) -> &'static str {
        match self {
            Self::Depth => "Depth",
            Self::TransitTime => "TransitTime",
            Self::MudWeight => "MudWeight",
            Self::Velocity => "Velocity",
            Self::GardnerDensity => "GardnerDensity",
            Self::TroughtonDensity => "TroughtonDensity",
            Self::OverburdenStress => "OverburdenStress",
            Self::OverburdenGradient => "OverburdenGradient",
            Self::MovingAvgTransitTime => "MovingAvgTransitTime",
            Self::NormalCompactionTrend => "NormalCompactionTrend",
            Self::DivergenceRatio => "DivergenceRatio",
            Self::DivergenceFactor => "DivergenceFactor",
            Self::ShaleTransitTimeTrend => "ShaleTransitTimeTrend",
            Self::UncalibratedPorePressure => "UncalibratedPorePressure",
            Self::CalibratedPorePressure => "CalibratedPorePressure",
            Self::ParamV => "ParamV",
            Self::FracturePressure => "FracturePressure",
        }
    }
}

impl fmt::Display for ProfileColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

// ============================================================================
// Row
// ============================================================================

/// All curves at one depth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GeopressureRow {
    pub depth: f64,
    pub transit_time: f64,
    pub mud_weight: f64,
    /// Vp from DTC
    pub velocity: f64,
    pub gardner_density: f64,
    pub troughton_density: f64,
    /// SV
    pub overburden_stress: f64,
    /// GSV, density-equivalent overburden gradient
    pub overburden_gradient: f64,
    pub moving_avg_transit_time: f64,
    /// DTN (Athy)
    pub normal_compaction_trend: f64,
    /// Ratcheted DTC average / DTN
    pub divergence_ratio: f64,
    pub divergence_factor: f64,
    /// DTSH
    pub shale_transit_time_trend: f64,
    pub uncalibrated_pore_pressure: f64,
    pub calibrated_pore_pressure: f64,
    pub param_v: f64,
    pub fracture_pressure: f64,
}

impl GeopressureRow {
    pub const fn get(&self, column: ProfileColumn) -> f64 {
        match column {
            ProfileColumn::Depth => self.depth,
            ProfileColumn::TransitTime => self.transit_time,
            ProfileColumn::MudWeight => self.mud_weight,
            ProfileColumn::Velocity => self.velocity,
            ProfileColumn::GardnerDensity => self.gardner_density,
            ProfileColumn::TroughtonDensity => self.troughton_density,
            ProfileColumn::OverburdenStress => self.overburden_stress,
            ProfileColumn::OverburdenGradient => self.overburden_gradient,
            ProfileColumn::MovingAvgTransitTime => self.moving_avg_transit_time,
            ProfileColumn::NormalCompactionTrend => self.normal_compaction_trend,
            ProfileColumn::DivergenceRatio => self.divergence_ratio,
            ProfileColumn::DivergenceFactor => self.divergence_factor,
            ProfileColumn::ShaleTransitTimeTrend => self.shale_transit_time_trend,
            ProfileColumn::UncalibratedPorePressure => self.uncalibrated_pore_pressure,
            ProfileColumn::CalibratedPorePressure => self.calibrated_pore_pressure,
            ProfileColumn::ParamV => self.param_v,
            ProfileColumn::FracturePressure => self.fracture_pressure,
        }
    }

    /// Values in [`ProfileColumn::ALL`] order.
    pub fn values(&self) -> [f64; 17] {
        ProfileColumn::ALL.map(|c| self.get(c))
    }

    /// True when every curve in the row is finite.
    pub fn is_finite(&self) -> bool {
        self.values().iter().all(|v| v.is_finite())
    }
}

// ============================================================================
// Stages and diagnostics
// ============================================================================

/// The eight pipeline stages, in the only order they may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Stage {
    Velocity,
    GardnerDensity,
    TroughtonDensity,
    Overburden,
    Trend,
    Divergence,
    PorePressure,
    FracturePressure,
}

impl Stage {
    pub const ORDER: [Self; 8] = [
        Self::Velocity,
        Self::GardnerDensity,
        Self::TroughtonDensity,
        Self::Overburden,
        Self::Trend,
        Self::Divergence,
        Self::PorePressure,
        Self::FracturePressure,
    ];
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Velocity => "velocity",
            Self::GardnerDensity => "gardner_density",
            Self::TroughtonDensity => "troughton_density",
            Self::Overburden => "overburden",
            Self::Trend => "trend",
            Self::Divergence => "divergence",
            Self::PorePressure => "pore_pressure",
            Self::FracturePressure => "fracture_pressure",
        };
        f.write_str(name)
    }
}

/// Kind of numeric singularity that produced a non-finite value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SingularityKind {
    /// Division by zero: zero transit time, zero depth, zero DTSH, V = 1
    DivisionSingularity,
    /// Argument outside a function's domain: fractional power of a negative
    /// base, logarithm of a non-positive depth, overflow
    DomainSingularity,
}

impl fmt::Display for SingularityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DivisionSingularity => f.write_str("DivisionSingularity"),
            Self::DomainSingularity => f.write_str("DomainSingularity"),
        }
    }
}

/// A row whose value first turned non-finite at `stage` while its inputs were finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RowDiagnostic {
    pub row: usize,
    pub depth: f64,
    pub stage: Stage,
    pub column: ProfileColumn,
    pub kind: SingularityKind,
}

impl fmt::Display for RowDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {} at {:.2} m: {} in {} ({})",
            self.row, self.depth, self.kind, self.column, self.stage
        )
    }
}

// ============================================================================
// Profile
// ============================================================================

/// The derived table: the only artifact of a pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeopressureProfile {
    rows: Vec<GeopressureRow>,
    diagnostics: Vec<RowDiagnostic>,
}

impl GeopressureProfile {
    pub fn new(rows: Vec<GeopressureRow>, diagnostics: Vec<RowDiagnostic>) -> Self {
        Self { rows, diagnostics }
    }

    pub fn rows(&self) -> &[GeopressureRow] {
        &self.rows
    }

    pub fn diagnostics(&self) -> &[RowDiagnostic] {
        &self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// One curve as a column vector.
    pub fn curve(&self, column: ProfileColumn) -> Vec<f64> {
        self.rows.iter().map(|r| r.get(column)).collect()
    }

    /// True if any row hit a singularity.
    pub fn has_singularities(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Rows with no diagnostics and every curve finite, for rendering.
    pub fn clean_rows(&self) -> impl Iterator<Item = (usize, &GeopressureRow)> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(i, row)| row.is_finite() && !self.diagnostics.iter().any(|d| d.row == *i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(depth: f64) -> GeopressureRow {
        GeopressureRow {
            depth,
            transit_time: 90.0,
            mud_weight: 1.2,
            velocity: 3387.5,
            gardner_density: 2.36,
            troughton_density: 1.95,
            overburden_stress: 9879.5,
            overburden_gradient: 2.31,
            moving_avg_transit_time: 95.0,
            normal_compaction_trend: 183.2,
            divergence_ratio: 0.52,
            divergence_factor: 1.0,
            shale_transit_time_trend: 183.2,
            uncalibrated_pore_pressure: 1.03,
            calibrated_pore_pressure: 1.17,
            param_v: 0.449,
            fracture_pressure: 1.8,
        }
    }

    #[test]
    fn test_values_follow_column_order() {
        let r = row(3000.0);
        let values = r.values();
        assert_eq!(values[0], 3000.0);
        assert_eq!(values[16], r.fracture_pressure);
        for (i, column) in ProfileColumn::ALL.iter().enumerate() {
            assert_eq!(values[i], r.get(*column));
        }
    }

    #[test]
    fn test_clean_rows_skip_diagnosed_and_non_finite() {
        let mut bad = row(3100.0);
        bad.param_v = f64::NAN;
        let diagnosed = row(3200.0);
        let profile = GeopressureProfile::new(
            vec![row(3000.0), bad, diagnosed],
            vec![RowDiagnostic {
                row: 2,
                depth: 3200.0,
                stage: Stage::Velocity,
                column: ProfileColumn::Velocity,
                kind: SingularityKind::DivisionSingularity,
            }],
        );
        let clean: Vec<usize> = profile.clean_rows().map(|(i, _)| i).collect();
        assert_eq!(clean, vec![0]);
        assert!(profile.has_singularities());
    }

    #[test]
    fn test_stage_order_is_sorted() {
        let mut sorted = Stage::ORDER;
        sorted.sort();
        assert_eq!(sorted, Stage::ORDER);
    }
}
