//! Composition of operation lists and application to points.

use xform_ir::Operation;
use xform_math::{Point3, Transform};

use crate::build::operation_matrix;
use crate::error::{Result, ValidationError};

/// Fold an operation list into one matrix.
///
/// Each operation is left-multiplied onto the accumulator, so the first
/// operation in the list is the rightmost factor and acts on the point first.
/// An empty list yields the identity.
pub fn compose(operations: &[Operation]) -> Transform {
    operations.iter().fold(Transform::identity(), |acc, op| {
        operation_matrix(op).then(&acc)
    })
}

/// Like [`compose`], but fails at the first operation whose product leaves
/// the finite range of `f64`.
pub fn compose_checked(operations: &[Operation]) -> Result<Transform> {
    let mut acc = Transform::identity();
    for (index, op) in operations.iter().enumerate() {
        acc = operation_matrix(op).then(&acc);
        if !acc.is_finite() {
            return Err(ValidationError::params(
                index,
                op.kind(),
                "composite matrix overflowed to a non-finite value",
            ));
        }
    }
    Ok(acc)
}

/// A point after multiplication by a composite matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Applied {
    /// `(x', y', z')`.
    pub point: Point3,
    /// The homogeneous component, kept as computed.
    pub w: f64,
}

/// Lift `point` to `[x, y, z, 1]`, multiply by `transform`, and read back.
///
/// `w` is not renormalized: for a well-formed affine composite it is exactly 1.
pub fn apply_to_point(transform: &Transform, point: &Point3) -> Applied {
    let v = transform.apply_homogeneous(point);
    Applied {
        point: Point3::new(v.x, v.y, v.z),
        w: v.w,
    }
}
