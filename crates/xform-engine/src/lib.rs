#![warn(missing_docs)]

//! Stateless 3D affine transformation engine.
//!
//! Given a point and an ordered list of operations (translate, rotate about a
//! principal axis, scale), the engine builds one 4x4 homogeneous matrix per
//! operation, composes them in list order, and applies the composite to the
//! point. Every call is independent: no state is kept between invocations,
//! so the functions here can be called from any number of threads at once.
//!
//! # Example
//!
//! ```rust
//! use xform_engine::{apply, Axis, Operation, Point3};
//!
//! let ops = [
//!     Operation::Translate([1.0, 0.0, 0.0]),
//!     Operation::Rotate { axis: Axis::Z, angle: 90.0 },
//! ];
//! let result = apply(&Point3::origin(), &ops).unwrap();
//! assert!((result.transformed_point.y - 1.0).abs() < 1e-12);
//! ```

pub mod build;
pub mod compose;
pub mod error;
pub mod validate;

pub use error::{Result, ValidationError};
pub use xform_ir::{Axis, Operation, TransformRequest, TransformResponse};
pub use xform_math::{Point3, Tolerance, Transform};

/// Outcome of one engine invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformResult {
    /// The input point.
    pub original_point: Point3,
    /// The point after the composite transform.
    pub transformed_point: Point3,
    /// The composite matrix.
    pub composite: Transform,
    /// Homogeneous component of the transformed point, not renormalized.
    pub w: f64,
}

impl TransformResult {
    /// Euclidean distance between the original and transformed point.
    pub fn displacement(&self) -> f64 {
        (self.transformed_point - self.original_point).norm()
    }

    /// Wire payload for this result.
    pub fn to_response(&self) -> TransformResponse {
        TransformResponse::success(
            point_array(&self.original_point),
            point_array(&self.transformed_point),
            self.composite.to_rows(),
        )
    }
}

fn point_array(p: &Point3) -> [f64; 3] {
    [p.x, p.y, p.z]
}

/// Validate `point` and `operations`, compose, and apply.
///
/// The point is checked first, then each operation in order; the first
/// violation is returned and no matrix math runs.
pub fn apply(point: &Point3, operations: &[Operation]) -> Result<TransformResult> {
    validate::validate_point(point)?;
    validate::validate_operations(operations)?;
    run(point, operations)
}

/// Parse a wire request into typed input and [`apply`] it.
pub fn apply_request(request: &TransformRequest) -> Result<TransformResult> {
    let point = validate::point_from_value(&request.point)?;
    let operations = validate::parse_operations(&request.transformations)?;
    run(&point, &operations)
}

/// Answer a wire request with a success or failure payload.
pub fn respond(request: &TransformRequest) -> TransformResponse {
    match apply_request(request) {
        Ok(result) => result.to_response(),
        Err(err) => TransformResponse::failure(err.to_string()),
    }
}

fn run(point: &Point3, operations: &[Operation]) -> Result<TransformResult> {
    let composite = compose::compose_checked(operations)?;
    let applied = compose::apply_to_point(&composite, point);
    if !applied.point.coords.iter().all(|v| v.is_finite()) {
        return Err(ValidationError::point(
            "point is out of range for the composite transform",
        ));
    }
    Ok(TransformResult {
        original_point: *point,
        transformed_point: applied.point,
        composite,
        w: applied.w,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displacement_of_translation() {
        let result = apply(
            &Point3::new(1.0, 1.0, 1.0),
            &[Operation::Translate([3.0, 4.0, 0.0])],
        )
        .unwrap();
        assert!((result.displacement() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn typed_and_wire_paths_agree() {
        let ops = [
            Operation::Scale([2.0, 2.0, 2.0]),
            Operation::Rotate {
                axis: Axis::Y,
                angle: 37.5,
            },
            Operation::Translate([0.1, -0.2, 0.3]),
        ];
        let point = Point3::new(1.5, -2.0, 0.25);
        let typed = apply(&point, &ops).unwrap();
        let wire = apply_request(&TransformRequest::new([1.5, -2.0, 0.25], &ops)).unwrap();
        assert_eq!(typed, wire);
    }

    #[test]
    fn point_checked_before_operations() {
        let err = apply(
            &Point3::new(f64::NAN, 0.0, 0.0),
            &[Operation::Scale([f64::NAN, 1.0, 1.0])],
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidPoint { .. }));
    }

    #[test]
    fn transformed_overflow_is_rejected() {
        let err = apply(
            &Point3::new(1e300, 0.0, 0.0),
            &[Operation::Scale([1e10, 1.0, 1.0])],
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidPoint { .. }));
    }

    #[test]
    fn respond_builds_payloads() {
        let ok = respond(&TransformRequest::new(
            [0.0, 0.0, 0.0],
            &[Operation::Translate([1.0, 2.0, 3.0])],
        ));
        match ok {
            TransformResponse::Success(body) => {
                assert!(body.success);
                assert_eq!(body.transformed_point, [1.0, 2.0, 3.0]);
                assert_eq!(body.transformation_matrix[0][3], 1.0);
            }
            TransformResponse::Failure(body) => panic!("unexpected failure: {}", body.error),
        }

        let err = respond(&TransformRequest::new([f64::NAN, 0.0, 0.0], &[]));
        match err {
            TransformResponse::Failure(body) => {
                assert!(!body.success);
                assert!(body.error.starts_with("invalid point"));
            }
            TransformResponse::Success(_) => panic!("expected failure"),
        }
    }
}
