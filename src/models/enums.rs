//! Shared domain enums stored as text codes

use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgTypeInfo, Decode, Encode, Postgres};
use utoipa::ToSchema;

/// Implements text-column persistence for an enum exposing `as_str` and `FromStr`.
macro_rules! text_code_sqlx {
    ($ty:ty) => {
        impl sqlx::Type<Postgres> for $ty {
            fn type_info() -> PgTypeInfo {
                <String as sqlx::Type<Postgres>>::type_info()
            }

            fn compatible(ty: &PgTypeInfo) -> bool {
                <String as sqlx::Type<Postgres>>::compatible(ty)
            }
        }

        impl<'r> Decode<'r, Postgres> for $ty {
            fn decode(
                value: sqlx::postgres::PgValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                let s: &str = Decode::<Postgres>::decode(value)?;
                s.parse().map_err(|e: String| e.into())
            }
        }

        impl Encode<'_, Postgres> for $ty {
            fn encode_by_ref(
                &self,
                buf: &mut sqlx::postgres::PgArgumentBuffer,
            ) -> sqlx::encode::IsNull {
                <&str as Encode<Postgres>>::encode(self.as_str(), buf)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// EquipmentCategory
// ---------------------------------------------------------------------------

/// Equipment classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EquipmentCategory {
    WoundCare,
    Bariatric,
}

impl EquipmentCategory {
    pub const ALL: [EquipmentCategory; 2] = [EquipmentCategory::WoundCare, EquipmentCategory::Bariatric];

    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentCategory::WoundCare => "WOUND_CARE",
            EquipmentCategory::Bariatric => "BARIATRIC",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EquipmentCategory::WoundCare => "Wound Care",
            EquipmentCategory::Bariatric => "Bariatric",
        }
    }
}

impl std::fmt::Display for EquipmentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for EquipmentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "WOUND_CARE" => Ok(EquipmentCategory::WoundCare),
            "BARIATRIC" => Ok(EquipmentCategory::Bariatric),
            _ => Err(format!("Invalid equipment category: {}", s)),
        }
    }
}

text_code_sqlx!(EquipmentCategory);

// ---------------------------------------------------------------------------
// OwnershipType
// ---------------------------------------------------------------------------

/// Whether a deployed unit belongs to the hospital or is rented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OwnershipType {
    Owned,
    Rental,
}

impl OwnershipType {
    pub const ALL: [OwnershipType; 2] = [OwnershipType::Owned, OwnershipType::Rental];

    /// Stored code, also used as the CSV "Ownership" column
    pub fn as_str(&self) -> &'static str {
        match self {
            OwnershipType::Owned => "OWNED",
            OwnershipType::Rental => "RENTAL",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OwnershipType::Owned => "Owned",
            OwnershipType::Rental => "Rental",
        }
    }
}

impl std::fmt::Display for OwnershipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OwnershipType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OWNED" => Ok(OwnershipType::Owned),
            "RENTAL" => Ok(OwnershipType::Rental),
            _ => Err(format!("Invalid ownership type: {}", s)),
        }
    }
}

text_code_sqlx!(OwnershipType);

/// Code/label pair offered to forms
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl From<EquipmentCategory> for Choice {
    fn from(c: EquipmentCategory) -> Self {
        Choice {
            value: c.as_str().to_string(),
            label: c.label().to_string(),
        }
    }
}

impl From<OwnershipType> for Choice {
    fn from(o: OwnershipType) -> Self {
        Choice {
            value: o.as_str().to_string(),
            label: o.label().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ownership_parse() {
        assert_eq!("RENTAL".parse::<OwnershipType>(), Ok(OwnershipType::Rental));
        assert_eq!("owned".parse::<OwnershipType>(), Ok(OwnershipType::Owned));
        assert!("LEASED".parse::<OwnershipType>().is_err());
    }

    #[test]
    fn test_category_codes() {
        assert_eq!(EquipmentCategory::WoundCare.as_str(), "WOUND_CARE");
        assert_eq!(
            "bariatric".parse::<EquipmentCategory>(),
            Ok(EquipmentCategory::Bariatric)
        );
        assert_eq!(EquipmentCategory::WoundCare.to_string(), "Wound Care");
    }

    #[test]
    fn test_serde_uses_stored_codes() {
        assert_eq!(
            serde_json::to_value(OwnershipType::Owned).unwrap(),
            serde_json::json!("OWNED")
        );
        let category: EquipmentCategory = serde_json::from_str("\"WOUND_CARE\"").unwrap();
        assert_eq!(category, EquipmentCategory::WoundCare);
    }
}
