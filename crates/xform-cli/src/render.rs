//! Output rendering for `xform apply`.

use std::fmt::Write;

use xform_engine::{Point3, Result, TransformResponse, TransformResult};

use crate::config::{OutputConfig, OutputFormat};

/// Render an engine outcome in the configured format.
pub fn render(outcome: &Result<TransformResult>, output: &OutputConfig) -> serde_json::Result<String> {
    match output.format {
        OutputFormat::Json => {
            let response = match outcome {
                Ok(result) => result.to_response(),
                Err(err) => TransformResponse::failure(err.to_string()),
            };
            response.to_json(output.pretty)
        }
        OutputFormat::Text => Ok(match outcome {
            Ok(result) => render_text(result, output.precision),
            Err(err) => format!("error: {err}"),
        }),
    }
}

/// Human-readable rendering of a result with `precision` decimals.
pub fn render_text(result: &TransformResult, precision: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Original point:    {}",
        format_point(&result.original_point, precision)
    );
    let _ = writeln!(
        out,
        "Transformed point: {}",
        format_point(&result.transformed_point, precision)
    );
    let _ = writeln!(
        out,
        "Displacement:      {}",
        format_number(result.displacement(), precision)
    );
    let _ = writeln!(out, "Transformation matrix (4x4):");

    let rows = result.composite.to_rows();
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|v| format_number(*v, precision)).collect())
        .collect();
    let width = cells.iter().flatten().map(String::len).max().unwrap_or(0);
    for row in &cells {
        let line: Vec<String> = row.iter().map(|c| format!("{c:>width$}")).collect();
        let _ = writeln!(out, "  [{}]", line.join("  "));
    }
    out.truncate(out.trim_end().len());
    out
}

fn format_point(p: &Point3, precision: usize) -> String {
    let coords: Vec<String> = p.coords.iter().map(|v| format_number(*v, precision)).collect();
    format!("[{}]", coords.join(", "))
}

/// Fixed-point formatting that never prints a negative zero.
pub fn format_number(value: f64, precision: usize) -> String {
    let text = format!("{value:.precision$}");
    match text.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => text,
    }
}
