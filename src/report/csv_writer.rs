//! Profile export as CSV, one row per depth in the published column order

use std::io::Write;

use crate::types::{GeopressureProfile, ProfileColumn};

use super::ReportError;

/// Write the profile with a header row. Non-finite values are written as
/// `NaN`, `inf` or `-inf`.
pub fn write_profile_csv<W: Write>(profile: &GeopressureProfile, sink: W) -> Result<(), ReportError> {
    let mut writer = csv::Writer::from_writer(sink);
    writer.write_record(ProfileColumn::ALL.iter().map(|c| c.header()))?;
    for row in profile.rows() {
        writer.write_record(row.values().iter().map(f64::to_string))?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelParameters;
    use crate::pipeline::Pipeline;

    #[test]
    fn test_csv_header_and_row_count() {
        let profile = Pipeline::with_parameters(ModelParameters::default())
            .run_columns(&[3000.0, 3100.0], &[90.0, 95.0], &[1.2, 1.25])
            .expect("valid input");
        let mut buffer = Vec::new();
        write_profile_csv(&profile, &mut buffer).expect("write");
        let text = String::from_utf8(buffer).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Depth,TransitTime,MudWeight,Velocity"));
        assert!(lines[0].ends_with("ParamV,FracturePressure"));
        assert!(lines[1].starts_with("3000,90,1.2,"));
        assert_eq!(lines[1].split(',').count(), 17);
    }
}
