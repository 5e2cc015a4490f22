//! Floor model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Hospital floor equipment can be deployed on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Floor {
    pub id: i32,
    /// Unique display label (e.g. "ICU", "4 West")
    pub name: String,
}

impl std::fmt::Display for Floor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

fn validate_floor_name(name: &str) -> Result<(), ValidationError> {
    super::trimmed_length(name, 50, "Floor name must be 1 to 50 characters")
}

/// Create or rename a floor
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct FloorPayload {
    #[validate(custom(function = "validate_floor_name"))]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_rejects_empty_name() {
        let payload = FloorPayload { name: String::new() };
        assert!(payload.validate().is_err());

        let payload = FloorPayload { name: "ICU".into() };
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_payload_checks_trimmed_name() {
        let blank = FloorPayload { name: "   ".into() };
        assert!(blank.validate().is_err());

        let padded = FloorPayload { name: format!("  {}  ", "a".repeat(50)) };
        assert!(padded.validate().is_ok());

        let long = FloorPayload { name: "a".repeat(51) };
        assert!(long.validate().is_err());
    }
}
