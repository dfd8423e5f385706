//! Operating window analysis
//!
//! The safe mud-weight window at each depth is bounded below by the
//! calibrated pore pressure and above by the fracture pressure. This module
//! classifies the mud weight actually used against that window and condenses
//! a profile into a summary for reports.

use serde::Serialize;

use super::compaction::{divergence_area, divergence_onset_depth};
use crate::types::{GeopressureProfile, GeopressureRow, ProfileColumn};

/// Mud weight position relative to `[Pp_cal, Pf]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MudWeightStatus {
    /// Below pore pressure: influx risk
    Underbalanced,
    WithinWindow,
    /// Above fracture pressure: losses risk
    AboveFracture,
    /// Any bound or the mud weight itself is non-finite
    Undefined,
}

/// Classify one row's mud weight. Both window bounds are inclusive.
pub fn classify_mud_weight(mud_weight: f64, pore_pressure: f64, fracture_pressure: f64) -> MudWeightStatus {
    if !(mud_weight.is_finite() && pore_pressure.is_finite() && fracture_pressure.is_finite()) {
        MudWeightStatus::Undefined
    } else if mud_weight < pore_pressure {
        MudWeightStatus::Underbalanced
    } else if mud_weight > fracture_pressure {
        MudWeightStatus::AboveFracture
    } else {
        MudWeightStatus::WithinWindow
    }
}

/// Classify a profile row.
pub fn classify_row(row: &GeopressureRow) -> MudWeightStatus {
    classify_mud_weight(row.mud_weight, row.calibrated_pore_pressure, row.fracture_pressure)
}

/// Finite min / max of one curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurveRange {
    pub column: ProfileColumn,
    pub min: f64,
    pub max: f64,
}

/// Shallowest point where Pf − Pp_cal is smallest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NarrowestWindow {
    pub depth: f64,
    pub pore_pressure: f64,
    pub fracture_pressure: f64,
    pub width: f64,
}

/// Condensed view of a profile for reports and the CLI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperatingWindowSummary {
    pub rows: usize,
    pub diagnostics: usize,
    pub depth_top: f64,
    pub depth_base: f64,
    pub underbalanced: usize,
    pub within_window: usize,
    pub above_fracture: usize,
    pub undefined: usize,
    pub narrowest_window: Option<NarrowestWindow>,
    /// First depth where the divergence factor exceeds 1
    pub divergence_onset_depth: Option<f64>,
    /// Area between the shale and normal trends (transit time × m)
    pub divergence_area: f64,
    pub curve_ranges: Vec<CurveRange>,
}

impl OperatingWindowSummary {
    /// Share of classifiable rows where the mud weight sat inside the window.
    pub fn within_window_fraction(&self) -> Option<f64> {
        let classified = self.underbalanced + self.within_window + self.above_fracture;
        (classified > 0).then(|| self.within_window as f64 / classified as f64)
    }
}

/// Finite min / max of a curve; `None` when no value is finite.
pub fn curve_range(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Summarise a profile.
pub fn summarize(profile: &GeopressureProfile) -> OperatingWindowSummary {
    let rows = profile.rows();

    let mut underbalanced = 0;
    let mut within_window = 0;
    let mut above_fracture = 0;
    let mut undefined = 0;
    let mut narrowest: Option<NarrowestWindow> = None;

    for row in rows {
        match classify_row(row) {
            MudWeightStatus::Underbalanced => underbalanced += 1,
            MudWeightStatus::WithinWindow => within_window += 1,
            MudWeightStatus::AboveFracture => above_fracture += 1,
            MudWeightStatus::Undefined => undefined += 1,
        }

        let width = row.fracture_pressure - row.calibrated_pore_pressure;
        if width.is_finite() && narrowest.map_or(true, |n| width < n.width) {
            narrowest = Some(NarrowestWindow {
                depth: row.depth,
                pore_pressure: row.calibrated_pore_pressure,
                fracture_pressure: row.fracture_pressure,
                width,
            });
        }
    }

    let depths = profile.curve(ProfileColumn::Depth);
    let curve_ranges = ProfileColumn::ALL
        .iter()
        .filter_map(|&column| {
            curve_range(&profile.curve(column)).map(|(min, max)| CurveRange { column, min, max })
        })
        .collect();

    OperatingWindowSummary {
        rows: rows.len(),
        diagnostics: profile.diagnostics().len(),
        depth_top: depths.first().copied().unwrap_or(f64::NAN),
        depth_base: depths.last().copied().unwrap_or(f64::NAN),
        underbalanced,
        within_window,
        above_fracture,
        undefined,
        narrowest_window: narrowest,
        divergence_onset_depth: divergence_onset_depth(
            &depths,
            &profile.curve(ProfileColumn::DivergenceFactor),
        ),
        divergence_area: divergence_area(
            &depths,
            &profile.curve(ProfileColumn::NormalCompactionTrend),
            &profile.curve(ProfileColumn::ShaleTransitTimeTrend),
        ),
        curve_ranges,
    }
}
