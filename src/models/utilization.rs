//! Utilization record model and derived cost metrics.
//!
//! `total_days` and `total_cost` are never stored: an active record keeps
//! accruing cost, so both are recomputed against an explicit `today`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::enums::{Choice, OwnershipType};
use super::equipment_type::EquipmentType;
use super::floor::Floor;
use super::floor_segment::{FloorSegmentView, SegmentInput};
use crate::error::{field_errors_from, FieldError};

/// Inclusive day count from `start` to `end` (or `today` while still active), at least 1.
pub fn total_days(start: NaiveDate, end: Option<NaiveDate>, today: NaiveDate) -> i64 {
    let effective_end = end.unwrap_or(today);
    ((effective_end - start).num_days() + 1).max(1)
}

/// Daily rate multiplied by the inclusive day count, unrounded.
pub fn total_cost(daily_cost: Decimal, days: i64) -> Decimal {
    daily_cost * Decimal::from(days)
}

/// Utilization record joined with its equipment and floor names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UtilizationRecord {
    pub id: i32,
    pub equipment_type_id: i32,
    pub equipment_name: String,
    /// Current floor; may lag behind the latest floor segment
    pub floor_id: i32,
    pub floor_name: String,
    pub start_date: NaiveDate,
    /// `None` while the equipment is still in use
    pub end_date: Option<NaiveDate>,
    #[schema(value_type = String, example = "45.00")]
    pub daily_cost: Decimal,
    pub ownership_type: OwnershipType,
}

impl UtilizationRecord {
    pub fn is_active(&self) -> bool {
        self.end_date.is_none()
    }

    pub fn status(&self) -> &'static str {
        if self.is_active() {
            "Active"
        } else {
            "Inactive"
        }
    }

    pub fn total_days(&self, today: NaiveDate) -> i64 {
        total_days(self.start_date, self.end_date, today)
    }

    pub fn total_cost(&self, today: NaiveDate) -> Decimal {
        total_cost(self.daily_cost, self.total_days(today))
    }

    /// Attach the metrics computed for `today`
    pub fn into_view(self, today: NaiveDate) -> UtilizationView {
        let total_days = self.total_days(today);
        UtilizationView {
            total_cost: total_cost(self.daily_cost, total_days),
            total_days,
            status: self.status().to_string(),
            summary: self.to_string(),
            record: self,
        }
    }
}

impl std::fmt::Display for UtilizationRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} utilized on {} from {} to ",
            self.equipment_name, self.floor_name, self.start_date
        )?;
        match self.end_date {
            Some(end) => write!(f, "{}", end),
            None => write!(f, "Present"),
        }
    }
}

/// Record as returned to clients, with derived metrics
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UtilizationView {
    #[serde(flatten)]
    pub record: UtilizationRecord,
    pub status: String,
    pub total_days: i64,
    #[schema(value_type = String, example = "450.00")]
    pub total_cost: Decimal,
    pub summary: String,
}

/// A record with its floor movements
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UtilizationDetail {
    pub record: UtilizationView,
    pub segments: Vec<FloorSegmentView>,
}

/// Choices offered when entering or editing a record
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecordFormOptions {
    pub floors: Vec<Floor>,
    pub equipment_types: Vec<EquipmentType>,
    pub ownership_types: Vec<Choice>,
    /// Prefilled start date for new records
    pub default_start_date: NaiveDate,
}

/// Delete confirmation payload
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DeleteConfirmation {
    pub record: UtilizationView,
    pub message: String,
}

fn validate_daily_cost(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::new("negative")
            .with_message("Daily cost cannot be negative.".into()));
    }
    if value.normalize().scale() > 2 {
        return Err(ValidationError::new("decimal_places")
            .with_message("Ensure that there are no more than 2 decimal places.".into()));
    }
    if value.trunc().abs() >= Decimal::from(100_000_000) {
        return Err(ValidationError::new("max_digits")
            .with_message("Ensure that there are no more than 8 digits before the decimal point.".into()));
    }
    Ok(())
}

/// Full set of editable record fields (create payload, and the result of applying an update)
#[derive(Debug, Clone, PartialEq, Deserialize, Validate, ToSchema)]
pub struct CreateUtilizationRecord {
    pub equipment_type_id: i32,
    pub floor_id: i32,
    pub ownership_type: OwnershipType,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    #[validate(custom(function = "validate_daily_cost"))]
    #[schema(value_type = String, example = "45.00")]
    pub daily_cost: Decimal,
}

impl CreateUtilizationRecord {
    /// All problems with the record's own fields
    pub fn field_errors(&self) -> Vec<FieldError> {
        let mut errors = match self.validate() {
            Ok(()) => Vec::new(),
            Err(e) => field_errors_from(&e),
        };
        if let Some(end) = self.end_date {
            if end < self.start_date {
                errors.push(FieldError::record(
                    "end_date",
                    "Utilization end date cannot be before start date.",
                ));
            }
        }
        errors
    }
}

/// Update request: absent fields are left unchanged, `"end_date": null` reopens the record.
///
/// When `segments` is present it replaces the record's floor movements as a whole.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateUtilizationRecord {
    pub equipment_type_id: Option<i32>,
    pub floor_id: Option<i32>,
    pub ownership_type: Option<OwnershipType>,
    pub start_date: Option<NaiveDate>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>, format = Date)]
    pub end_date: Option<Option<NaiveDate>>,
    #[schema(value_type = Option<String>, example = "45.00")]
    pub daily_cost: Option<Decimal>,
    pub segments: Option<Vec<SegmentInput>>,
}

impl UpdateUtilizationRecord {
    pub fn apply_to(&self, current: &UtilizationRecord) -> CreateUtilizationRecord {
        CreateUtilizationRecord {
            equipment_type_id: self.equipment_type_id.unwrap_or(current.equipment_type_id),
            floor_id: self.floor_id.unwrap_or(current.floor_id),
            ownership_type: self.ownership_type.unwrap_or(current.ownership_type),
            start_date: self.start_date.unwrap_or(current.start_date),
            end_date: self.end_date.unwrap_or(current.end_date),
            daily_cost: self.daily_cost.unwrap_or(current.daily_cost),
        }
    }
}
