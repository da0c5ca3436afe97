use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// A stored villa. `id` is assigned by the repository and never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Villa {
    #[schema(example = 1)]
    pub id: i64,
    #[validate(
        length(min = 1, max = 30, message = "Name must be 1-30 characters"),
        custom(function = "not_blank")
    )]
    #[schema(example = "Pool View")]
    pub name: String,
    #[schema(example = 4)]
    pub occupancy: i32,
    #[schema(example = 100.0)]
    pub sqft: f64,
}

impl Villa {
    /// Case-insensitive name comparison used for uniqueness checks.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    /// Overwrite the mutable fields from a full-replace payload.
    pub fn apply(&mut self, dto: VillaDto) {
        self.name = dto.name;
        self.occupancy = dto.occupancy;
        self.sqft = dto.sqft;
    }
}

/// Request payload for create and full update.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct VillaDto {
    /// Must be 0 or omitted on create; must match the path id on update.
    #[serde(default)]
    #[schema(example = 0)]
    pub id: i64,
    #[validate(
        length(min = 1, max = 30, message = "Name must be 1-30 characters"),
        custom(function = "not_blank")
    )]
    #[schema(example = "Beach View", max_length = 30)]
    pub name: String,
    #[serde(default)]
    pub occupancy: i32,
    #[serde(default)]
    pub sqft: f64,
}

impl VillaDto {
    pub fn into_villa(self, id: i64) -> Villa {
        Villa {
            id,
            name: self.name,
            occupancy: self.occupancy,
            sqft: self.sqft,
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("Name is required".into()));
    }
    Ok(())
}
