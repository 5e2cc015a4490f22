//! Floor segment validation.
//!
//! A piece of equipment can only be on one floor at a time, and every floor
//! segment must sit inside the dates of the utilization record it belongs to.
//! Everything here is pure: it inspects a proposed edit and reports what is
//! wrong with it, leaving persistence to the caller.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::{
    error::FieldError,
    models::floor_segment::{FloorSegment, SegmentChanges, SegmentInput},
};

pub const OVERLAP_MESSAGE: &str = "This floor segment overlaps with another segment. \
     Equipment cannot be on multiple floors at the same time.";

/// Date range of a proposed segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentSpan {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

impl SegmentSpan {
    pub fn new(start: NaiveDate, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }
}

impl From<&SegmentInput> for SegmentSpan {
    fn from(input: &SegmentInput) -> Self {
        Self::new(input.start_date, input.end_date)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentField {
    StartDate,
    EndDate,
}

impl SegmentField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentField::StartDate => "start_date",
            SegmentField::EndDate => "end_date",
        }
    }
}

/// Problem found on the segment at `index` of the validated slice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentError {
    pub index: usize,
    pub field: SegmentField,
    pub message: String,
}

impl SegmentError {
    fn new(index: usize, field: SegmentField, message: impl Into<String>) -> Self {
        Self {
            index,
            field,
            message: message.into(),
        }
    }
}

impl From<SegmentError> for FieldError {
    fn from(e: SegmentError) -> Self {
        FieldError {
            segment: Some(e.index),
            field: e.field.as_str().to_string(),
            message: e.message,
        }
    }
}

/// Check segments against the parent record's bounds and against each other.
///
/// Segments with a bounds or ordering error are left out of the overlap scan.
/// Open segments extend through `today`. Both end days are inclusive, so a
/// segment ending on the day another starts overlaps it. Every overlapping
/// pair is reported on both of its segments.
pub fn validate_segments(
    parent_start: NaiveDate,
    parent_end: Option<NaiveDate>,
    segments: &[SegmentSpan],
    today: NaiveDate,
) -> Vec<SegmentError> {
    let mut errors = Vec::new();
    let mut candidates = Vec::with_capacity(segments.len());

    for (index, segment) in segments.iter().enumerate() {
        let before = errors.len();

        if segment.start < parent_start {
            errors.push(SegmentError::new(
                index,
                SegmentField::StartDate,
                format!(
                    "Start date cannot be before equipment utilization start date ({}).",
                    parent_start
                ),
            ));
        }

        if let (Some(parent_end), Some(end)) = (parent_end, segment.end) {
            if end > parent_end {
                errors.push(SegmentError::new(
                    index,
                    SegmentField::EndDate,
                    format!(
                        "End date cannot be after equipment utilization end date ({}).",
                        parent_end
                    ),
                ));
            }
        }

        if let Some(end) = segment.end {
            if segment.start > end {
                errors.push(SegmentError::new(
                    index,
                    SegmentField::EndDate,
                    "Segment end date cannot be before start date.",
                ));
            }
        }

        if errors.len() == before {
            candidates.push((index, segment.start, segment.end.unwrap_or(today)));
        }
    }

    for (i, &(first, s1, e1)) in candidates.iter().enumerate() {
        for &(second, s2, e2) in &candidates[i + 1..] {
            if s1 <= e2 && s2 <= e1 {
                errors.push(SegmentError::new(first, SegmentField::StartDate, OVERLAP_MESSAGE));
                errors.push(SegmentError::new(second, SegmentField::StartDate, OVERLAP_MESSAGE));
            }
        }
    }

    errors
}

/// Segment edit resolved against what is stored
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentPlan {
    pub changes: SegmentChanges,
    /// Reference, unknown-id and validation errors keyed by submitted position
    pub errors: Vec<FieldError>,
}

/// Resolve a submitted segment list (or the stored one when nothing was submitted)
/// into writes, validating the surviving rows against the parent's bounds.
///
/// Submitted rows are authoritative: stored segments missing from the list are removed.
pub fn plan_segment_changes(
    existing: &[FloorSegment],
    submitted: Option<&[SegmentInput]>,
    parent_start: NaiveDate,
    parent_end: Option<NaiveDate>,
    today: NaiveDate,
) -> SegmentPlan {
    let rows: Vec<SegmentInput> = match submitted {
        Some(rows) => rows.to_vec(),
        None => existing.iter().map(SegmentInput::from).collect(),
    };

    let known: HashSet<i32> = existing.iter().map(|s| s.id).collect();
    let mut seen = HashSet::new();
    let mut errors = Vec::new();
    let mut remove = Vec::new();
    let mut keep = Vec::new();
    let mut positions = Vec::new();

    for (position, row) in rows.iter().enumerate() {
        if let Some(id) = row.id {
            if !known.contains(&id) {
                errors.push(FieldError {
                    segment: Some(position),
                    field: "id".to_string(),
                    message: format!("Floor segment {} does not belong to this utilization record.", id),
                });
                continue;
            }
            if !seen.insert(id) {
                errors.push(FieldError {
                    segment: Some(position),
                    field: "id".to_string(),
                    message: format!("Floor segment {} is listed more than once.", id),
                });
                continue;
            }
        }

        if row.delete {
            if let Some(id) = row.id {
                remove.push(id);
            }
            continue;
        }

        positions.push(position);
        keep.push(row.clone());
    }

    for segment in existing {
        if !seen.contains(&segment.id) {
            remove.push(segment.id);
        }
    }

    let spans: Vec<SegmentSpan> = keep.iter().map(SegmentSpan::from).collect();
    errors.extend(
        validate_segments(parent_start, parent_end, &spans, today)
            .into_iter()
            .map(|e| {
                let mut field_error = FieldError::from(e);
                field_error.segment = field_error.segment.map(|i| positions[i]);
                field_error
            }),
    );

    SegmentPlan {
        changes: SegmentChanges { remove, keep },
        errors,
    }
}
