//! Well log ingestion from CSV files
//!
//! Expected CSV format (header optional):
//! Depth,DTC,MW
//!
//! Columns are positional. A first record that does not parse as numbers is
//! taken as the header and must name the columns in order (common LAS-style
//! mnemonics accepted, case-insensitive); any later non-numeric field is an
//! error.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::types::{InputError, WellLog, INPUT_COLUMNS};

const COLUMN_NAMES: [&str; INPUT_COLUMNS] = ["Depth", "DTC", "MW"];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to open well log ({}): {}", .path.display(), .source)]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Input(#[from] InputError),
}

/// Read a well log from a CSV file on disk.
pub fn read_well_log(path: &Path) -> Result<WellLog, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let log = parse_well_log(file)?;
    info!(
        path = %path.display(),
        samples = log.len(),
        "Loaded well log from CSV"
    );
    Ok(log)
}

/// Parse a well log from any CSV source.
pub fn parse_well_log<R: Read>(source: R) -> Result<WellLog, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(source);

    let mut rows: Vec<[f64; INPUT_COLUMNS]> = Vec::new();
    let mut header_seen = false;

    for result in reader.records() {
        let record = result?;
        if record.iter().all(str::is_empty) {
            continue;
        }

        let row = rows.len();
        if record.len() != INPUT_COLUMNS {
            return Err(InputError::ColumnCount {
                row,
                found: record.len(),
            }
            .into());
        }

        match parse_record(&record, row) {
            Ok(values) => rows.push(values),
            Err(_) if rows.is_empty() && !header_seen => {
                check_header(&record)?;
                debug!(header = ?record, "Skipping header row");
                header_seen = true;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(WellLog::from_rows(rows.as_slice())?)
}

/// Accepted header mnemonics per column, matched as lowercase prefixes.
const HEADER_ALIASES: [&[&str]; INPUT_COLUMNS] = [
    &["depth", "dept", "md"],
    &["dtc", "dt", "transit", "sonic"],
    &["mw", "mud"],
];

fn check_header(record: &csv::StringRecord) -> Result<(), InputError> {
    let in_order = record.iter().zip(HEADER_ALIASES).all(|(name, aliases)| {
        let name = name.to_lowercase();
        aliases.iter().any(|alias| name.starts_with(alias))
    });
    if in_order {
        Ok(())
    } else {
        Err(InputError::ColumnOrder {
            header: record.iter().collect::<Vec<_>>().join(","),
        })
    }
}

fn parse_record(record: &csv::StringRecord, row: usize) -> Result<[f64; INPUT_COLUMNS], InputError> {
    let mut values = [0.0; INPUT_COLUMNS];
    for (slot, (field, column)) in values.iter_mut().zip(record.iter().zip(COLUMN_NAMES)) {
        *slot = field.parse::<f64>().map_err(|_| InputError::InvalidNumber {
            row,
            column,
            value: field.to_string(),
        })?;
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_header() {
        let data = "Depth,DTC,MW\n3000,90,1.2\n3100,95,1.25\n";
        let log = parse_well_log(data.as_bytes()).expect("valid csv");
        assert_eq!(log.len(), 2);
        assert_eq!(log.samples()[1].transit_time, 95.0);
    }

    #[test]
    fn test_parse_without_header_and_blank_lines() {
        let data = "3000, 90, 1.2\n\n3100, 95, 1.25\n";
        let log = parse_well_log(data.as_bytes()).expect("valid csv");
        assert_eq!(log.depths(), vec![3000.0, 3100.0]);
    }

    #[test]
    fn test_non_numeric_after_data_rejected() {
        let data = "3000,90,1.2\n3100,abc,1.25\n";
        let err = parse_well_log(data.as_bytes()).unwrap_err();
        assert!(
            matches!(
                err,
                LoadError::Input(InputError::InvalidNumber { row: 1, column: "DTC", .. })
            ),
            "{err}"
        );
    }

    #[test]
    fn test_header_aliases_accepted() {
        let data = "DEPT,DT,MW\n3000,90,1.2\n";
        assert!(parse_well_log(data.as_bytes()).is_ok());
    }

    #[test]
    fn test_header_out_of_order_rejected() {
        let data = "MW,Depth,DTC\n1.2,3000,90\n";
        let err = parse_well_log(data.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Input(InputError::ColumnOrder { .. })), "{err}");
    }

    #[test]
    fn test_extra_column_rejected() {
        let data = "3000,90,1.2,7\n";
        let err = parse_well_log(data.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Input(InputError::ColumnCount { row: 0, found: 4 })
        ));
    }

    #[test]
    fn test_header_only_is_empty() {
        let err = parse_well_log("Depth,DTC,MW\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Input(InputError::Empty)));
    }

    #[test]
    fn test_missing_file() {
        let err = read_well_log(Path::new("/nonexistent/log.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
    }
}
