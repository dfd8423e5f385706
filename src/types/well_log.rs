//! Depth-indexed sonic log input

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of input columns: Depth, DTC, MW.
pub const INPUT_COLUMNS: usize = 3;

/// One depth sample of the input table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogSample {
    /// Measured depth below the rotary table (m)
    pub depth: f64,
    /// Compressional transit time DTC (µs per unit length)
    pub transit_time: f64,
    /// Mud weight (g/cm³ equivalent gradient)
    pub mud_weight: f64,
}

impl LogSample {
    pub const fn new(depth: f64, transit_time: f64, mud_weight: f64) -> Self {
        Self {
            depth,
            transit_time,
            mud_weight,
        }
    }
}

/// Structural problems that reject a table before any stage runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("Row {row}: expected 3 columns (Depth, DTC, MW), got {found}")]
    ColumnCount { row: usize, found: usize },

    #[error("Header '{header}' does not name the columns in order Depth, DTC, MW")]
    ColumnOrder { header: String },

    #[error("Column lengths differ: depth={depth}, transit_time={transit_time}, mud_weight={mud_weight}")]
    ColumnLength {
        depth: usize,
        transit_time: usize,
        mud_weight: usize,
    },

    #[error("Row {row}: cannot parse {column} value '{value}'")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("Well log contains no samples")]
    Empty,

    #[error("Row {row}: depth {depth} is not a finite number")]
    NonFiniteDepth { row: usize, depth: f64 },

    #[error("Row {row}: depth {depth} does not increase past {previous}")]
    NonIncreasingDepth { row: usize, depth: f64, previous: f64 },
}

/// A validated input table: non-empty, finite depths, strictly increasing.
///
/// Transit time and mud weight are deliberately not range-checked here; a bad
/// value in one row propagates through that row and is reported as a row
/// diagnostic instead of rejecting the whole log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WellLog {
    samples: Vec<LogSample>,
}

impl WellLog {
    /// Validate and wrap an ordered list of samples.
    pub fn new(samples: Vec<LogSample>) -> Result<Self, InputError> {
        if samples.is_empty() {
            return Err(InputError::Empty);
        }

        let mut previous: Option<f64> = None;
        for (row, sample) in samples.iter().enumerate() {
            if !sample.depth.is_finite() {
                return Err(InputError::NonFiniteDepth {
                    row,
                    depth: sample.depth,
                });
            }
            if let Some(prev) = previous {
                if sample.depth <= prev {
                    return Err(InputError::NonIncreasingDepth {
                        row,
                        depth: sample.depth,
                        previous: prev,
                    });
                }
            }
            previous = Some(sample.depth);
        }

        Ok(Self { samples })
    }

    /// Build from three parallel columns in the fixed order Depth, DTC, MW.
    pub fn from_columns(
        depth: &[f64],
        transit_time: &[f64],
        mud_weight: &[f64],
    ) -> Result<Self, InputError> {
        if depth.len() != transit_time.len() || depth.len() != mud_weight.len() {
            return Err(InputError::ColumnLength {
                depth: depth.len(),
                transit_time: transit_time.len(),
                mud_weight: mud_weight.len(),
            });
        }
        let samples = depth
            .iter()
            .zip(transit_time)
            .zip(mud_weight)
            .map(|((&d, &dtc), &mw)| LogSample::new(d, dtc, mw))
            .collect();
        Self::new(samples)
    }

    /// Build from row-major records; every record must hold exactly three values.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, InputError> {
        let mut samples = Vec::with_capacity(rows.len());
        for (row, record) in rows.iter().enumerate() {
            let values = record.as_ref();
            let [depth, transit_time, mud_weight] = values else {
                return Err(InputError::ColumnCount {
                    row,
                    found: values.len(),
                });
            };
            samples.push(LogSample::new(*depth, *transit_time, *mud_weight));
        }
        Self::new(samples)
    }

    pub fn samples(&self) -> &[LogSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false for a constructed log; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Shallowest and deepest sample depth.
    pub fn depth_range(&self) -> (f64, f64) {
        let first = self.samples.first().map_or(f64::NAN, |s| s.depth);
        let last = self.samples.last().map_or(f64::NAN, |s| s.depth);
        (first, last)
    }

    pub fn depths(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.depth).collect()
    }

    pub fn transit_times(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.transit_time).collect()
    }

    pub fn mud_weights(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.mud_weight).collect()
    }
}
