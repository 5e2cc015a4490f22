//! Equipment catalog model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::enums::EquipmentCategory;

/// Equipment type from the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EquipmentType {
    pub id: i32,
    /// Name of the equipment type (e.g. "Wound Vac")
    pub name: String,
    pub category: EquipmentCategory,
    /// Informational count of units the hospital owns
    pub owned_quantity: i32,
}

impl std::fmt::Display for EquipmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

fn validate_equipment_name(name: &str) -> Result<(), ValidationError> {
    super::trimmed_length(name, 100, "Equipment name must be 1 to 100 characters")
}

/// Create equipment type request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEquipmentType {
    #[validate(custom(function = "validate_equipment_name"))]
    pub name: String,
    pub category: EquipmentCategory,
    #[validate(range(min = 0, message = "Owned quantity cannot be negative"))]
    pub owned_quantity: Option<i32>,
}

/// Update equipment type request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateEquipmentType {
    #[validate(custom(function = "validate_equipment_name"))]
    pub name: Option<String>,
    pub category: Option<EquipmentCategory>,
    #[validate(range(min = 0, message = "Owned quantity cannot be negative"))]
    pub owned_quantity: Option<i32>,
}
