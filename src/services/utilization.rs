//! Utilization record service: entry, edits with floor movements, deletion

use std::sync::Arc;

use crate::{
    clock::Clock,
    error::{AppError, AppResult},
    models::{
        enums::{Choice, OwnershipType},
        floor_segment::FloorSegmentView,
        report::RecordQuery,
        utilization::{
            CreateUtilizationRecord, DeleteConfirmation, RecordFormOptions, UpdateUtilizationRecord,
            UtilizationDetail, UtilizationView,
        },
    },
    repository::Repository,
    services::segments::plan_segment_changes,
};

#[derive(Clone)]
pub struct UtilizationService {
    repository: Repository,
    clock: Arc<dyn Clock>,
}

impl UtilizationService {
    pub fn new(repository: Repository, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Floors, equipment types and ownership choices for the entry form
    pub async fn form_options(&self) -> AppResult<RecordFormOptions> {
        Ok(RecordFormOptions {
            floors: self.repository.floors.list().await?,
            equipment_types: self.repository.equipment_types.list().await?,
            ownership_types: OwnershipType::ALL.into_iter().map(Choice::from).collect(),
            default_start_date: self.clock.today(),
        })
    }

    /// Admin listing, newest first
    pub async fn list(&self, query: &RecordQuery) -> AppResult<Vec<UtilizationView>> {
        let today = self.clock.today();
        let records = self.repository.utilization.search(query).await?;
        Ok(records.into_iter().map(|r| r.into_view(today)).collect())
    }

    pub async fn get_detail(&self, id: i32) -> AppResult<UtilizationDetail> {
        let record = self.repository.utilization.get_by_id(id).await?;
        let segments = self.repository.segments.list_for_record(id).await?;
        Ok(UtilizationDetail {
            record: record.into_view(self.clock.today()),
            segments: segments.into_iter().map(FloorSegmentView::from).collect(),
        })
    }

    /// Validate and store a new record
    pub async fn create(&self, data: &CreateUtilizationRecord) -> AppResult<UtilizationView> {
        let errors = data.field_errors();
        if !errors.is_empty() {
            return Err(AppError::InvalidFields(errors));
        }

        let id = self.repository.utilization.create(data).await?;
        let record = self.repository.utilization.get_by_id(id).await?;

        tracing::info!(
            record_id = id,
            equipment = %record.equipment_name,
            floor = %record.floor_name,
            ownership = %record.ownership_type,
            "Utilization record created"
        );

        Ok(record.into_view(self.clock.today()))
    }

    /// Apply field changes and the segment list atomically.
    ///
    /// Record and segment problems are reported together; nothing is written
    /// unless both are clean.
    pub async fn update(&self, id: i32, data: &UpdateUtilizationRecord) -> AppResult<UtilizationDetail> {
        let current = self.repository.utilization.get_by_id(id).await?;
        let existing = self.repository.segments.list_for_record(id).await?;
        let merged = data.apply_to(&current);
        let today = self.clock.today();

        let mut errors = merged.field_errors();
        let plan = plan_segment_changes(
            &existing,
            data.segments.as_deref(),
            merged.start_date,
            merged.end_date,
            today,
        );
        errors.extend(plan.errors);

        if !errors.is_empty() {
            tracing::debug!(record_id = id, errors = errors.len(), "Rejected utilization update");
            return Err(AppError::InvalidFields(errors));
        }

        self.repository
            .utilization
            .save_with_segments(id, &merged, &plan.changes)
            .await?;

        tracing::info!(
            record_id = id,
            segments_removed = plan.changes.remove.len(),
            segments_kept = plan.changes.keep.len(),
            "Utilization record updated"
        );

        self.get_detail(id).await
    }

    /// What a delete would remove
    pub async fn confirm_delete(&self, id: i32) -> AppResult<DeleteConfirmation> {
        let record = self.repository.utilization.get_by_id(id).await?;
        let segments = self.repository.segments.list_for_record(id).await?.len();
        let message = format!(
            "Delete \"{}\"? This also removes {} floor segment(s).",
            record, segments
        );
        Ok(DeleteConfirmation {
            record: record.into_view(self.clock.today()),
            message,
        })
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.utilization.delete(id).await?;
        tracing::info!(record_id = id, "Utilization record deleted");
        Ok(())
    }
}
