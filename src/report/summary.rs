//! Plain-text operating window summary for the terminal

use std::fmt::Write;

use crate::physics_engine::OperatingWindowSummary;

fn depth_or_dash(depth: Option<f64>) -> String {
    depth.map_or_else(|| "-".to_string(), |d| format!("{d:.1} m"))
}

/// Render a summary block.
pub fn render_summary(well: &str, summary: &OperatingWindowSummary) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(out, "Geopressure summary: {well}");
    let _ = writeln!(
        out,
        "  Interval:         {:.1} - {:.1} m ({} rows, {} diagnostics)",
        summary.depth_top, summary.depth_base, summary.rows, summary.diagnostics
    );
    let _ = writeln!(
        out,
        "  Mud weight:       {} within window, {} underbalanced, {} above fracture, {} undefined",
        summary.within_window, summary.underbalanced, summary.above_fracture, summary.undefined
    );
    if let Some(fraction) = summary.within_window_fraction() {
        let _ = writeln!(out, "  Within window:    {:.1}%", fraction * 100.0);
    }
    match summary.narrowest_window {
        Some(w) => {
            let _ = writeln!(
                out,
                "  Narrowest window: {:.3} at {:.1} m (Pp {:.3}, Pf {:.3})",
                w.width, w.depth, w.pore_pressure, w.fracture_pressure
            );
        }
        None => {
            let _ = writeln!(out, "  Narrowest window: -");
        }
    }
    let _ = writeln!(
        out,
        "  Divergence onset: {}",
        depth_or_dash(summary.divergence_onset_depth)
    );
    let _ = writeln!(out, "  Divergence area:  {:.1}", summary.divergence_area);
    for range in &summary.curve_ranges {
        let _ = writeln!(
            out,
            "    {:<26} {:>12.4} .. {:<12.4}",
            range.column.header(),
            range.min,
            range.max
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelParameters;
    use crate::physics_engine::summarize;
    use crate::pipeline::Pipeline;

    #[test]
    fn test_render_summary_mentions_counts() {
        let profile = Pipeline::with_parameters(ModelParameters::default())
            .run_columns(&[3000.0, 3100.0], &[90.0, 95.0], &[1.2, 1.25])
            .expect("valid input");
        let text = render_summary("W-1", &summarize(&profile));
        assert!(text.contains("W-1"));
        assert!(text.contains("2 rows, 0 diagnostics"));
        assert!(text.contains("Divergence onset: -"));
        assert!(text.contains("FracturePressure"));
    }
}
