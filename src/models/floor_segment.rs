//! Floor segment model: one stretch of time a utilization spent on a floor

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Floor segment joined with its floor name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct FloorSegment {
    pub id: i32,
    pub utilization_record_id: i32,
    pub floor_id: i32,
    pub floor_name: String,
    /// Day the equipment was moved to the floor
    pub start_date: NaiveDate,
    /// Day it was moved off; `None` while it is still there
    pub end_date: Option<NaiveDate>,
}

impl std::fmt::Display for FloorSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Moved to {}: {} to ", self.floor_name, self.start_date)?;
        match self.end_date {
            Some(end) => write!(f, "{}", end),
            None => write!(f, "Present"),
        }
    }
}

/// Segment as returned to clients
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FloorSegmentView {
    #[serde(flatten)]
    pub segment: FloorSegment,
    pub summary: String,
}

impl From<FloorSegment> for FloorSegmentView {
    fn from(segment: FloorSegment) -> Self {
        Self {
            summary: segment.to_string(),
            segment,
        }
    }
}

/// Submitted segment row of an edit.
///
/// `id` refers to an existing segment of the same record; rows without one are
/// created. Rows flagged `delete` are removed and skipped by validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SegmentInput {
    pub id: Option<i32>,
    pub floor_id: i32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub delete: bool,
}

impl From<&FloorSegment> for SegmentInput {
    fn from(segment: &FloorSegment) -> Self {
        Self {
            id: Some(segment.id),
            floor_id: segment.floor_id,
            start_date: segment.start_date,
            end_date: segment.end_date,
            delete: false,
        }
    }
}

/// Validated segment writes applied together with the parent record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentChanges {
    /// Existing segment ids to delete
    pub remove: Vec<i32>,
    /// Rows to keep: updated in place when they carry an id, inserted otherwise
    pub keep: Vec<SegmentInput>,
}
