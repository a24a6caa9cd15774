//! Building transform requests from files, stdin, or inline arguments.

use anyhow::{Context, Result};
use serde_json::{json, Number, Value};
use std::io::Read;
use std::path::Path;
use xform_ir::{OperationDescriptor, TransformRequest};

/// Read a JSON request from `path`, or from stdin when `path` is `-`.
pub fn read_request(path: &Path) -> Result<TransformRequest> {
    let text = if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read request from stdin")?;
        text
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read request {}", path.display()))?
    };
    TransformRequest::from_json(&text).context("request is not a valid transform payload")
}

/// Build a request from `--point x,y,z` and repeated `--op` specs.
///
/// Tokens are passed through untyped so the engine reports malformed values
/// the same way it does for JSON input.
pub fn build_request(point: Option<&str>, ops: &[String]) -> TransformRequest {
    let descriptors: Vec<OperationDescriptor> =
        ops.iter().map(|spec| parse_op_spec(spec)).collect();
    TransformRequest::from_descriptors(point.map_or(Value::Null, scalar_list), &descriptors)
}

/// Parse `translate:dx,dy,dz`, `scale:sx,sy,sz` or `rotate:axis:degrees`.
pub fn parse_op_spec(spec: &str) -> OperationDescriptor {
    let Some((kind, rest)) = spec.split_once(':') else {
        return OperationDescriptor::new(spec, Value::Null);
    };
    let params = if kind == "rotate" {
        match rest.split_once(':') {
            Some((axis, angle)) => json!({ "axis": axis, "angle": scalar(angle) }),
            None => json!({ "axis": rest }),
        }
    } else {
        scalar_list(rest)
    };
    OperationDescriptor::new(kind, params)
}

fn scalar_list(text: &str) -> Value {
    Value::Array(text.split(',').map(scalar).collect())
}

// Anything that is not a finite number stays a string and is rejected downstream.
fn scalar(token: &str) -> Value {
    let token = token.trim();
    token
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map_or_else(|| Value::String(token.to_string()), Value::Number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use xform_engine::{apply_request, Axis, Operation, ValidationError};

    #[test]
    fn inline_request_matches_typed_request() {
        let built = build_request(
            Some("1,-2, 3.5"),
            &[
                "translate:1,0,0".to_string(),
                "rotate:z:90".to_string(),
                "scale:2,2,0.5".to_string(),
            ],
        );
        let typed = TransformRequest::new(
            [1.0, -2.0, 3.5],
            &[
                Operation::Translate([1.0, 0.0, 0.0]),
                Operation::Rotate {
                    axis: Axis::Z,
                    angle: 90.0,
                },
                Operation::Scale([2.0, 2.0, 0.5]),
            ],
        );
        assert_eq!(built, typed);
    }

    #[test]
    fn malformed_tokens_reach_the_engine() {
        let request = build_request(Some("1,2,3"), &["translate:1,abc,0".to_string()]);
        assert!(matches!(
            apply_request(&request),
            Err(ValidationError::InvalidOperationParams { index: 0, .. })
        ));

        let request = build_request(Some("1,nan,3"), &[]);
        assert!(matches!(
            apply_request(&request),
            Err(ValidationError::InvalidPoint { .. })
        ));

        let request = build_request(Some("0,0,0"), &["shear:1,0,0".to_string()]);
        assert!(matches!(
            apply_request(&request),
            Err(ValidationError::InvalidOperationType { .. })
        ));
    }

    #[test]
    fn rotate_spec_without_angle() {
        let d = parse_op_spec("rotate:x");
        assert_eq!(d.params, json!({ "axis": "x" }));
        let d = parse_op_spec("scale");
        assert!(d.params.is_null());
    }

    #[test]
    fn missing_point_is_null() {
        assert!(build_request(None, &[]).point.is_null());
    }
}
