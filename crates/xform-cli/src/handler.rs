//! Request handling: validation, engine call, and logging around it.

use tracing::{debug, error, info, warn};
use xform_engine::validate::{parse_operations, point_from_value};
use xform_engine::{Operation, Result, TransformRequest, TransformResult};

use crate::config::EngineConfig;

/// Run one request through the engine.
pub fn handle(request: &TransformRequest, config: &EngineConfig) -> Result<TransformResult> {
    debug!(
        operations = request.transformations.as_array().map_or(0, Vec::len),
        point = %request.point,
        "handling transform request"
    );
    let outcome = parse_and_apply(request, config);
    match &outcome {
        Ok(result) => info!(
            transformed = ?result.transformed_point.coords.as_slice(),
            displacement = result.displacement(),
            "transform applied"
        ),
        Err(err) => error!(%err, "rejected transform request"),
    }
    outcome
}

fn parse_and_apply(request: &TransformRequest, config: &EngineConfig) -> Result<TransformResult> {
    let point = point_from_value(&request.point)?;
    let operations = parse_operations(&request.transformations)?;
    if config.warn_degenerate_scale {
        for (index, factors) in degenerate_scales(&operations) {
            warn!(index, ?factors, "scale factor is zero or negative");
        }
    }
    let result = xform_engine::apply(&point, &operations)?;
    if config.warn_degenerate_scale && is_singular(&result) {
        warn!("composite transform is not invertible");
    }
    Ok(result)
}

/// True when the composite collapses space and has no inverse.
pub fn is_singular(result: &TransformResult) -> bool {
    result.composite.inverse().is_none()
}

/// Scale operations with a zero (collapsing) or negative (mirroring) factor.
pub fn degenerate_scales(operations: &[Operation]) -> Vec<(usize, [f64; 3])> {
    operations
        .iter()
        .enumerate()
        .filter_map(|(index, op)| match op {
            Operation::Scale(factors) if factors.iter().any(|f| *f <= 0.0) => {
                Some((index, *factors))
            }
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use xform_engine::{Axis, Point3, ValidationError};

    #[test]
    fn flags_zero_and_negative_factors() {
        let ops = [
            Operation::Scale([1.0, 1.0, 1.0]),
            Operation::Scale([1.0, 0.0, 1.0]),
            Operation::Rotate {
                axis: Axis::X,
                angle: 0.0,
            },
            Operation::Scale([-1.0, 2.0, 2.0]),
        ];
        let found = degenerate_scales(&ops);
        assert_eq!(found, vec![(1, [1.0, 0.0, 1.0]), (3, [-1.0, 2.0, 2.0])]);
    }

    #[test]
    fn degenerate_scale_is_still_applied() {
        let request =
            TransformRequest::new([2.0, 3.0, 4.0], &[Operation::Scale([0.0, -1.0, 1.0])]);
        let result = handle(&request, &EngineConfig::default()).unwrap();
        assert_eq!(result.transformed_point, Point3::new(0.0, -3.0, 4.0));
    }

    #[test]
    fn singular_composite_is_detected() {
        let collapsing = TransformRequest::new(
            [1.0, 1.0, 1.0],
            &[
                Operation::Translate([1.0, 2.0, 3.0]),
                Operation::Scale([1.0, 0.0, 1.0]),
            ],
        );
        let result = handle(&collapsing, &EngineConfig::default()).unwrap();
        assert!(is_singular(&result));
        assert_eq!(result.transformed_point, Point3::new(2.0, 0.0, 4.0));

        let mirroring =
            TransformRequest::new([1.0, 1.0, 1.0], &[Operation::Scale([-1.0, 2.0, 2.0])]);
        let result = handle(&mirroring, &EngineConfig::default()).unwrap();
        assert!(!is_singular(&result));
    }

    #[test]
    fn malformed_lists_are_rejected() {
        let request =
            TransformRequest::from_json(r#"{"point": [0, 0, 0], "transformations": [5]}"#).unwrap();
        assert!(matches!(
            handle(&request, &EngineConfig::default()),
            Err(ValidationError::InvalidOperationType { index: 0, .. })
        ));

        let request =
            TransformRequest::from_json(r#"{"point": [0, 0, 0], "transformations": "scale"}"#)
                .unwrap();
        assert!(matches!(
            handle(&request, &EngineConfig::default()),
            Err(ValidationError::InvalidOperationList { .. })
        ));
    }

    #[test]
    fn errors_pass_through() {
        let request = TransformRequest::new(
            [0.0, 0.0, 0.0],
            &[Operation::Translate([f64::INFINITY, 0.0, 0.0])],
        );
        assert!(matches!(
            handle(&request, &EngineConfig::default()),
            Err(ValidationError::InvalidOperationParams { index: 0, .. })
        ));
    }
}
