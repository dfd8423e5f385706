//! Compaction trend and divergence detection
//!
//! The observed transit-time trend (a forward moving average of DTC) is
//! compared against the Athy normal-compaction trend. Their ratio is carried
//! through a monotone ratchet: once shale departs from the normal trend it
//! never returns, so the divergence ratio can only grow with depth.

use crate::config::ModelParameters;

// ============================================================================
// Trend Stage
// ============================================================================

/// Forward moving average over `[i, min(i + window - 1, N - 1)]`
///
/// The window looks ahead (deeper), not back, and is truncated at the end
/// of the table: the last row averages only itself. Computed in one backward
/// sweep with a running sum, so cost is O(N) regardless of window size.
///
/// Non-finite samples poison exactly the windows that contain them. While
/// one is inside the window the average is recomputed from the slice, which
/// keeps the running sum clean once it leaves.
pub fn forward_moving_average(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    let window = window.max(1);
    let mut averages = vec![f64::NAN; n];

    let mut sum = 0.0;
    let mut non_finite = 0usize;

    for i in (0..n).rev() {
        let entering = values[i];
        if entering.is_finite() {
            sum += entering;
        } else {
            non_finite += 1;
        }

        if let Some(&leaving) = values.get(i + window) {
            if leaving.is_finite() {
                sum -= leaving;
            } else {
                non_finite -= 1;
            }
        }

        let end = (i + window).min(n);
        let count = (end - i) as f64;
        averages[i] = if non_finite > 0 {
            values[i..end].iter().sum::<f64>() / count
        } else {
            sum / count
        };
    }

    averages
}

/// Athy normal-compaction transit-time trend
///
/// Formula: DTN = dtco × exp(c1 × (D − z))
///
/// Where:
/// - dtco = surface transit time
/// - c1 = decay constant (negative: transit time shortens with burial)
/// - z = mudline depth
pub fn normal_compaction_trend(depth: f64, params: &ModelParameters) -> f64 {
    params.surface_transit_time * (params.athy_decay_constant * (depth - params.mudline_depth_m)).exp()
}

// ============================================================================
// Divergence Stage
// ============================================================================

/// Observed-to-normal transit time ratio before ratcheting.
pub fn divergence_ratio(moving_average: f64, normal_trend: f64) -> f64 {
    moving_average / normal_trend
}

/// Running-maximum accumulator over divergence ratios
///
/// The first pushed ratio is taken as is. After that a ratio replaces the
/// held value only when strictly greater, so a NaN ratio leaves the held
/// value unchanged and a NaN first ratio is held for the rest of the run.
/// Ratios must be pushed in increasing-depth order.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DivergenceRatchet {
    current: Option<f64>,
}

impl DivergenceRatchet {
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// Feed the next ratio and return the ratcheted value for that row.
    pub fn push(&mut self, ratio: f64) -> f64 {
        let next = match self.current {
            None => ratio,
            Some(previous) if ratio > previous => ratio,
            Some(previous) => previous,
        };
        self.current = Some(next);
        next
    }

    /// Value held after the last push; `None` before the first.
    pub const fn current(&self) -> Option<f64> {
        self.current
    }
}

/// Ratchet a whole ratio column in row order.
pub fn ratchet_divergence_ratios(ratios: &[f64]) -> Vec<f64> {
    let mut ratchet = DivergenceRatchet::new();
    ratios.iter().map(|&ratio| ratchet.push(ratio)).collect()
}

/// Divergence factor: the ratcheted ratio strictly below `prf`, else 1.0
///
/// A sharp threshold with no blending across the reference depth.
pub fn divergence_factor(depth: f64, ratcheted_ratio: f64, params: &ModelParameters) -> f64 {
    if depth > params.divergence_reference_depth_m {
        ratcheted_ratio
    } else {
        1.0
    }
}

/// Shale transit-time trend
///
/// Formula: DTSH = factor × DTN
pub fn shale_transit_time_trend(divergence_factor: f64, normal_trend: f64) -> f64 {
    divergence_factor * normal_trend
}

// ============================================================================
// Divergence summaries
// ============================================================================

/// Area between DTSH and DTN over depth (transit time × m)
///
/// Trapezoidal rule over consecutive rows. Segments with a non-finite
/// endpoint are skipped.
pub fn divergence_area(depths: &[f64], normal_trend: &[f64], shale_trend: &[f64]) -> f64 {
    let gaps: Vec<f64> = shale_trend
        .iter()
        .zip(normal_trend)
        .map(|(dtsh, dtn)| dtsh - dtn)
        .collect();

    depths
        .windows(2)
        .zip(gaps.windows(2))
        .filter(|(d, g)| d.iter().chain(g.iter()).all(|v| v.is_finite()))
        .map(|(d, g)| 0.5 * (g[0] + g[1]) * (d[1] - d[0]))
        .sum()
}

/// Depth of the first row whose divergence factor exceeds 1.
pub fn divergence_onset_depth(depths: &[f64], factors: &[f64]) -> Option<f64> {
    depths
        .iter()
        .zip(factors)
        .find(|(_, &factor)| factor > 1.0)
        .map(|(&depth, _)| depth)
}
