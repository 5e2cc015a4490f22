//! Utilization record entry, editing and deletion endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        report::RecordQuery,
        utilization::{
            CreateUtilizationRecord, DeleteConfirmation, RecordFormOptions, UpdateUtilizationRecord,
            UtilizationDetail, UtilizationView,
        },
    },
};

use super::{ApiJson, ApiQuery};

/// Choices for the entry form
#[utoipa::path(
    get,
    path = "/add",
    tag = "utilization",
    responses(
        (status = 200, description = "Floors, equipment types and ownership choices", body = RecordFormOptions)
    )
)]
pub async fn add_form(State(state): State<crate::AppState>) -> AppResult<Json<RecordFormOptions>> {
    let options = state.services.utilization.form_options().await?;
    Ok(Json(options))
}

/// Record a new utilization
#[utoipa::path(
    post,
    path = "/add",
    tag = "utilization",
    request_body = CreateUtilizationRecord,
    responses(
        (status = 201, description = "Record created", body = UtilizationView),
        (status = 400, description = "Unknown floor or equipment type", body = crate::error::ErrorResponse),
        (status = 422, description = "Invalid fields", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_record(
    State(state): State<crate::AppState>,
    ApiJson(data): ApiJson<CreateUtilizationRecord>,
) -> AppResult<(StatusCode, Json<UtilizationView>)> {
    let record = state.services.utilization.create(&data).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Record with its floor segments, for editing
#[utoipa::path(
    get,
    path = "/update/{id}",
    tag = "utilization",
    params(("id" = i32, Path, description = "Utilization record ID")),
    responses(
        (status = 200, description = "Record details", body = UtilizationDetail),
        (status = 404, description = "Record not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_record(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<UtilizationDetail>> {
    let detail = state.services.utilization.get_detail(id).await?;
    Ok(Json(detail))
}

/// Update a record and its floor segments together
#[utoipa::path(
    post,
    path = "/update/{id}",
    tag = "utilization",
    params(("id" = i32, Path, description = "Utilization record ID")),
    request_body = UpdateUtilizationRecord,
    responses(
        (status = 200, description = "Record updated", body = UtilizationDetail),
        (status = 404, description = "Record not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Invalid fields or segments", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_record(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    ApiJson(data): ApiJson<UpdateUtilizationRecord>,
) -> AppResult<Json<UtilizationDetail>> {
    let detail = state.services.utilization.update(id, &data).await?;
    Ok(Json(detail))
}

/// Confirm what a delete would remove
#[utoipa::path(
    get,
    path = "/delete/{id}",
    tag = "utilization",
    params(("id" = i32, Path, description = "Utilization record ID")),
    responses(
        (status = 200, description = "Delete confirmation", body = DeleteConfirmation),
        (status = 404, description = "Record not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn confirm_delete(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<DeleteConfirmation>> {
    let confirmation = state.services.utilization.confirm_delete(id).await?;
    Ok(Json(confirmation))
}

/// Delete a record and its floor segments
#[utoipa::path(
    post,
    path = "/delete/{id}",
    tag = "utilization",
    params(("id" = i32, Path, description = "Utilization record ID")),
    responses(
        (status = 204, description = "Record deleted"),
        (status = 404, description = "Record not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_record(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.utilization.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// All records, newest first
#[utoipa::path(
    get,
    path = "/records",
    tag = "utilization",
    params(RecordQuery),
    responses(
        (status = 200, description = "Record list", body = Vec<UtilizationView>)
    )
)]
pub async fn list_records(
    State(state): State<crate::AppState>,
    ApiQuery(query): ApiQuery<RecordQuery>,
) -> AppResult<Json<Vec<UtilizationView>>> {
    let records = state.services.utilization.list(&query).await?;
    Ok(Json(records))
}
