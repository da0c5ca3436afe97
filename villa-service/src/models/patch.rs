//! Field-level patch documents for partial villa updates.
//!
//! The wire format follows JSON Patch (RFC 6902) restricted to the flat
//! villa fields:
//!
//! ```json
//! [{ "op": "replace", "path": "/name", "value": "Sea View" }]
//! ```
//!
//! Operations are applied in order to a copy of the stored villa. The copy is
//! returned only when every operation succeeds, so the caller can validate it
//! as a whole before committing.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use utoipa::ToSchema;

use super::Villa;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    Add,
    Remove,
    Replace,
    Move,
    Copy,
    Test,
}

impl std::fmt::Display for PatchOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PatchOp::Add => "add",
            PatchOp::Remove => "remove",
            PatchOp::Replace => "replace",
            PatchOp::Move => "move",
            PatchOp::Copy => "copy",
            PatchOp::Test => "test",
        };
        f.write_str(name)
    }
}

/// One field-level change. `move` and `copy` parse but are rejected on apply.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PatchOperation {
    pub op: PatchOp,
    #[schema(example = "/name")]
    pub path: String,
    #[serde(default)]
    #[schema(value_type = Option<Object>, example = "Sea View")]
    pub value: Option<Value>,
}

/// An ordered list of operations, deserialized from a JSON array.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct VillaPatch(pub Vec<PatchOperation>);

#[derive(Debug, Error, PartialEq)]
pub enum PatchError {
    #[error("Unknown patch path '{0}'")]
    UnknownPath(String),

    #[error("Operation '{op}' on '{path}' requires a value")]
    MissingValue { op: PatchOp, path: String },

    #[error("Invalid value for '{path}': expected {expected}")]
    InvalidValue {
        path: String,
        expected: &'static str,
    },

    #[error("Operation '{0}' is not supported")]
    Unsupported(PatchOp),

    #[error("Test failed for '{0}'")]
    TestFailed(String),

    #[error("Villa id cannot be changed")]
    ImmutableId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Id,
    Name,
    Occupancy,
    Sqft,
}

impl Field {
    fn parse(path: &str) -> Result<Self, PatchError> {
        let segment = path
            .strip_prefix('/')
            .ok_or_else(|| PatchError::UnknownPath(path.to_string()))?;

        match segment.to_ascii_lowercase().as_str() {
            "id" => Ok(Field::Id),
            "name" => Ok(Field::Name),
            "occupancy" => Ok(Field::Occupancy),
            "sqft" => Ok(Field::Sqft),
            _ => Err(PatchError::UnknownPath(path.to_string())),
        }
    }
}

impl VillaPatch {
    /// Apply every operation to a copy of `villa`.
    pub fn apply(&self, villa: &Villa) -> Result<Villa, PatchError> {
        let mut patched = villa.clone();
        for operation in &self.0 {
            apply_operation(&mut patched, operation)?;
        }
        Ok(patched)
    }
}

fn apply_operation(villa: &mut Villa, operation: &PatchOperation) -> Result<(), PatchError> {
    let field = Field::parse(&operation.path)?;

    match operation.op {
        PatchOp::Add | PatchOp::Replace => {
            let value = required_value(operation)?;
            set_field(villa, field, &operation.path, value)
        }
        PatchOp::Remove => reset_field(villa, field),
        PatchOp::Test => {
            let value = required_value(operation)?;
            if field_equals(villa, field, value) {
                Ok(())
            } else {
                Err(PatchError::TestFailed(operation.path.clone()))
            }
        }
        PatchOp::Move | PatchOp::Copy => Err(PatchError::Unsupported(operation.op)),
    }
}

fn required_value(operation: &PatchOperation) -> Result<&Value, PatchError> {
    operation
        .value
        .as_ref()
        .ok_or_else(|| PatchError::MissingValue {
            op: operation.op,
            path: operation.path.clone(),
        })
}

fn set_field(villa: &mut Villa, field: Field, path: &str, value: &Value) -> Result<(), PatchError> {
    let invalid = |expected| PatchError::InvalidValue {
        path: path.to_string(),
        expected,
    };

    match field {
        Field::Id => match value.as_i64() {
            Some(id) if id == villa.id => Ok(()),
            Some(_) => Err(PatchError::ImmutableId),
            None => Err(invalid("an integer")),
        },
        Field::Name => {
            villa.name = value.as_str().ok_or_else(|| invalid("a string"))?.to_string();
            Ok(())
        }
        Field::Occupancy => {
            villa.occupancy = value
                .as_i64()
                .and_then(|n| i32::try_from(n).ok())
                .ok_or_else(|| invalid("a 32-bit integer"))?;
            Ok(())
        }
        Field::Sqft => {
            villa.sqft = value.as_f64().ok_or_else(|| invalid("a number"))?;
            Ok(())
        }
    }
}

fn reset_field(villa: &mut Villa, field: Field) -> Result<(), PatchError> {
    match field {
        Field::Id => return Err(PatchError::ImmutableId),
        Field::Name => villa.name.clear(),
        Field::Occupancy => villa.occupancy = 0,
        Field::Sqft => villa.sqft = 0.0,
    }
    Ok(())
}

fn field_equals(villa: &Villa, field: Field, value: &Value) -> bool {
    match field {
        Field::Id => value.as_i64() == Some(villa.id),
        Field::Name => value.as_str() == Some(villa.name.as_str()),
        Field::Occupancy => value.as_i64() == Some(i64::from(villa.occupancy)),
        Field::Sqft => value.as_f64() == Some(villa.sqft),
    }
}
