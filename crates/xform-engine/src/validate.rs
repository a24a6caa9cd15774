//! Input validation.
//!
//! Turns wire operation entries into typed [`Operation`]s and checks that every
//! number reaching the matrix builder is finite. Nothing is coerced: a string,
//! `null` or boolean where a number belongs is an error, never zero.

use serde_json::Value;
use xform_ir::{Axis, Operation};
use xform_math::Point3;

use crate::error::{Result, ValidationError};

const COORDINATES: [&str; 3] = ["x", "y", "z"];
const OFFSETS: [&str; 3] = ["dx", "dy", "dz"];
const FACTORS: [&str; 3] = ["sx", "sy", "sz"];

/// Check that every coordinate of a typed point is finite.
pub fn validate_point(point: &Point3) -> Result<()> {
    for (name, v) in COORDINATES.iter().zip(point.coords.iter()) {
        if !v.is_finite() {
            return Err(ValidationError::point(format!(
                "{name} is not a finite number ({v})"
            )));
        }
    }
    Ok(())
}

/// Read a point from its wire form `[x, y, z]`.
pub fn point_from_value(value: &Value) -> Result<Point3> {
    let items = match value {
        Value::Null => return Err(ValidationError::point("point is missing")),
        Value::Array(items) => items,
        other => {
            return Err(ValidationError::point(format!(
                "expected an array of three numbers, got {other}"
            )))
        }
    };
    if items.len() != 3 {
        return Err(ValidationError::point(format!(
            "expected 3 coordinates, got {}",
            items.len()
        )));
    }
    let mut coords = [0.0; 3];
    for (i, item) in items.iter().enumerate() {
        coords[i] = finite_number(item)
            .map_err(|why| ValidationError::point(format!("{} {why}", COORDINATES[i])))?;
    }
    Ok(Point3::new(coords[0], coords[1], coords[2]))
}

/// Check that every parameter of a typed operation is finite.
pub fn validate_operation(index: usize, op: &Operation) -> Result<()> {
    let kind = op.kind();
    match op {
        Operation::Translate(values) => check_triple(index, kind, &OFFSETS, values),
        Operation::Scale(values) => check_triple(index, kind, &FACTORS, values),
        Operation::Rotate { angle, .. } => {
            if angle.is_finite() {
                Ok(())
            } else {
                Err(ValidationError::params(
                    index,
                    kind,
                    format!("angle is not a finite number ({angle})"),
                ))
            }
        }
    }
}

/// Validate a typed operation list, stopping at the first bad entry.
pub fn validate_operations(operations: &[Operation]) -> Result<()> {
    operations
        .iter()
        .enumerate()
        .try_for_each(|(index, op)| validate_operation(index, op))
}

/// Parse one wire entry, `{"type": ..., "params": ...}`, into a typed operation.
///
/// A missing `params` field reads as `null`. An entry that is not an object
/// is reported as an invalid operation type.
pub fn parse_operation(index: usize, entry: &Value) -> Result<Operation> {
    let Value::Object(fields) = entry else {
        return Err(ValidationError::InvalidOperationType {
            index,
            kind: entry.to_string(),
        });
    };
    let tag = fields.get("type").unwrap_or(&Value::Null);
    let params = fields.get("params").unwrap_or(&Value::Null);
    let invalid_type = || ValidationError::InvalidOperationType {
        index,
        kind: tag.to_string(),
    };
    let Value::String(kind) = tag else {
        return Err(invalid_type());
    };
    match kind.as_str() {
        "translate" => Ok(Operation::Translate(parse_triple(
            index, "translate", &OFFSETS, params,
        )?)),
        "scale" => Ok(Operation::Scale(parse_triple(
            index, "scale", &FACTORS, params,
        )?)),
        "rotate" => parse_rotation(index, params),
        _ => Err(invalid_type()),
    }
}

/// Parse a wire operation list, stopping at the first bad entry.
///
/// `null` (the field was absent or explicitly null) is an empty list.
pub fn parse_operations(list: &Value) -> Result<Vec<Operation>> {
    let entries = match list {
        Value::Null => return Ok(Vec::new()),
        Value::Array(entries) => entries,
        other => {
            return Err(ValidationError::InvalidOperationList {
                reason: format!("expected an array of operations, got {other}"),
            })
        }
    };
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_operation(index, entry))
        .collect()
}

fn check_triple(
    index: usize,
    kind: &'static str,
    names: &[&str; 3],
    values: &[f64; 3],
) -> Result<()> {
    for (name, v) in names.iter().zip(values) {
        if !v.is_finite() {
            return Err(ValidationError::params(
                index,
                kind,
                format!("{name} is not a finite number ({v})"),
            ));
        }
    }
    Ok(())
}

fn parse_triple(
    index: usize,
    kind: &'static str,
    names: &[&str; 3],
    params: &Value,
) -> Result<[f64; 3]> {
    let items = match params {
        Value::Null => return Err(ValidationError::params(index, kind, "params are missing")),
        Value::Array(items) => items,
        other => {
            return Err(ValidationError::params(
                index,
                kind,
                format!("expected an array of three numbers, got {other}"),
            ))
        }
    };
    if items.len() != 3 {
        return Err(ValidationError::params(
            index,
            kind,
            format!("expected 3 values, got {}", items.len()),
        ));
    }
    let mut out = [0.0; 3];
    for (i, item) in items.iter().enumerate() {
        out[i] = finite_number(item)
            .map_err(|why| ValidationError::params(index, kind, format!("{} {why}", names[i])))?;
    }
    Ok(out)
}

fn parse_rotation(index: usize, params: &Value) -> Result<Operation> {
    const KIND: &str = "rotate";
    let fields = match params {
        Value::Null => return Err(ValidationError::params(index, KIND, "params are missing")),
        Value::Object(fields) => fields,
        other => {
            return Err(ValidationError::params(
                index,
                KIND,
                format!("expected an object with axis and angle, got {other}"),
            ))
        }
    };
    let axis = match fields.get("axis") {
        None | Some(Value::Null) => {
            return Err(ValidationError::params(index, KIND, "axis is missing"))
        }
        Some(Value::String(token)) => Axis::from_token(token).ok_or_else(|| {
            ValidationError::params(
                index,
                KIND,
                format!("unrecognized axis {token:?}, expected \"x\", \"y\" or \"z\""),
            )
        })?,
        Some(other) => {
            return Err(ValidationError::params(
                index,
                KIND,
                format!("axis is not a string ({other})"),
            ))
        }
    };
    let angle = finite_number(fields.get("angle").unwrap_or(&Value::Null))
        .map_err(|why| ValidationError::params(index, KIND, format!("angle {why}")))?;
    Ok(Operation::Rotate { axis, angle })
}

fn finite_number(value: &Value) -> std::result::Result<f64, String> {
    match value {
        Value::Number(n) => match n.as_f64() {
            Some(v) if v.is_finite() => Ok(v),
            _ => Err(format!("is not a finite number ({n})")),
        },
        Value::Null => Err("is missing".to_string()),
        other => Err(format!("is not a number ({other})")),
    }
}
