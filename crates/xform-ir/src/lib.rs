//! Wire representation for the xform ecosystem.
//!
//! This crate defines the request and response payloads exchanged with the
//! transformation engine, plus the strongly typed [`Operation`] sum type.
//!
//! Requests arrive loosely shaped: the operation list is kept as raw JSON whose
//! entries should look like [`OperationDescriptor`]s, a `type` tag and a
//! `params` value whose shape depends on the tag. Nothing is typed here so
//! that the engine can report exactly which entry or field was malformed.
//! Converting entries into [`Operation`]s is the engine's job.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

/// Principal axis for a rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// The X axis.
    X,
    /// The Y axis.
    Y,
    /// The Z axis.
    Z,
}

impl Axis {
    /// Parse an axis token. Only the exact lowercase tokens `x`, `y`, `z` match.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "x" => Some(Self::X),
            "y" => Some(Self::Y),
            "z" => Some(Self::Z),
            _ => None,
        }
    }

    /// The wire token for this axis.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One affine operation. Position in the list is its only identity.
///
/// Serializes to the same `{"type": ..., "params": ...}` shape as
/// [`OperationDescriptor`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "params", rename_all = "lowercase")]
pub enum Operation {
    /// Translation by `[dx, dy, dz]`.
    Translate([f64; 3]),
    /// Rotation about a principal axis.
    Rotate {
        /// Axis of rotation.
        axis: Axis,
        /// Angle in degrees. Not normalized.
        angle: f64,
    },
    /// Non-uniform scale by `[sx, sy, sz]`. Zero and negative factors are valid.
    Scale([f64; 3]),
}

impl Operation {
    /// Wire tag of this operation.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Translate(_) => "translate",
            Self::Rotate { .. } => "rotate",
            Self::Scale(_) => "scale",
        }
    }
}

/// An operation as it appears on the wire, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationDescriptor {
    /// The operation tag. Expected to be a string; anything else is rejected
    /// by the engine.
    #[serde(rename = "type", default)]
    pub kind: Value,
    /// Tag-dependent parameters. `Null` when absent.
    #[serde(default)]
    pub params: Value,
}

impl OperationDescriptor {
    /// Build a descriptor from a raw tag and parameter value.
    pub fn new(kind: impl Into<String>, params: Value) -> Self {
        Self {
            kind: Value::String(kind.into()),
            params,
        }
    }

    /// The `{"type": ..., "params": ...}` object for this descriptor.
    pub fn to_value(&self) -> Value {
        json!({ "type": self.kind, "params": self.params })
    }
}

impl From<&Operation> for OperationDescriptor {
    fn from(op: &Operation) -> Self {
        // NaN and infinities become JSON null here and are rejected on parse.
        let params = match op {
            Operation::Translate(d) | Operation::Scale(d) => json!(d),
            Operation::Rotate { axis, angle } => json!({ "axis": axis, "angle": angle }),
        };
        Self::new(op.kind(), params)
    }
}

/// A transform request: one point and an ordered list of operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformRequest {
    /// The point, expected as `[x, y, z]`. `Null` when absent.
    #[serde(default)]
    pub point: Value,
    /// Operations in application order, expected as an array of descriptor
    /// objects. `Null` when absent, which the engine reads as empty.
    #[serde(default)]
    pub transformations: Value,
}

impl TransformRequest {
    /// Build a request from an already typed point and operation list.
    pub fn new(point: [f64; 3], operations: &[Operation]) -> Self {
        let descriptors: Vec<OperationDescriptor> =
            operations.iter().map(OperationDescriptor::from).collect();
        Self::from_descriptors(json!(point), &descriptors)
    }

    /// Build a request from a raw point value and untyped descriptors.
    pub fn from_descriptors(point: Value, descriptors: &[OperationDescriptor]) -> Self {
        Self {
            point,
            transformations: Value::Array(
                descriptors.iter().map(OperationDescriptor::to_value).collect(),
            ),
        }
    }

    /// Deserialize from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Successful transform payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformSuccess {
    /// Always `true`.
    pub success: bool,
    /// The input point.
    pub original_point: [f64; 3],
    /// The point after the composite transform.
    pub transformed_point: [f64; 3],
    /// The composite 4x4 matrix, row-major.
    pub transformation_matrix: [[f64; 4]; 4],
}

/// Failed transform payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformFailure {
    /// Always `false`.
    pub success: bool,
    /// Human-readable error message.
    pub error: String,
}

/// Response to a [`TransformRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransformResponse {
    /// The transform was applied.
    Success(TransformSuccess),
    /// The request was rejected.
    Failure(TransformFailure),
}

impl TransformResponse {
    /// Build a success payload.
    pub fn success(
        original_point: [f64; 3],
        transformed_point: [f64; 3],
        transformation_matrix: [[f64; 4]; 4],
    ) -> Self {
        Self::Success(TransformSuccess {
            success: true,
            original_point,
            transformed_point,
            transformation_matrix,
        })
    }

    /// Build a failure payload.
    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure(TransformFailure {
            success: false,
            error: error.into(),
        })
    }

    /// Serialize to JSON, pretty-printed or compact.
    pub fn to_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

/// Liveness payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// `"healthy"` when the service can answer.
    pub status: String,
    /// Free-form description.
    pub message: String,
}

impl HealthStatus {
    /// The status reported by a running service.
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            message: "Vector Transformation API is running".to_string(),
        }
    }
}
