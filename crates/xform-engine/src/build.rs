//! Operation-to-matrix builder.

use std::f64::consts::PI;

use xform_ir::{Axis, Operation};
use xform_math::Transform;

/// Convert degrees to radians as `deg * PI / 180`. No range reduction.
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// The 4x4 homogeneous matrix for a single operation.
///
/// Parameters are expected to be finite; see [`crate::validate`].
pub fn operation_matrix(op: &Operation) -> Transform {
    match *op {
        Operation::Translate([dx, dy, dz]) => Transform::translation(dx, dy, dz),
        Operation::Scale([sx, sy, sz]) => Transform::scale(sx, sy, sz),
        Operation::Rotate { axis, angle } => rotation_matrix(axis, angle),
    }
}

/// Right-handed rotation about a principal axis by `degrees`.
pub fn rotation_matrix(axis: Axis, degrees: f64) -> Transform {
    let theta = degrees_to_radians(degrees);
    match axis {
        Axis::X => Transform::rotation_x(theta),
        Axis::Y => Transform::rotation_y(theta),
        Axis::Z => Transform::rotation_z(theta),
    }
}
