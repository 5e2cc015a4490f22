//! Floor catalog endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::floor::{Floor, FloorPayload},
};

use super::{ApiJson, CascadeDeleteResponse};

/// List all floors
#[utoipa::path(
    get,
    path = "/floors",
    tag = "floors",
    responses(
        (status = 200, description = "Floor list", body = Vec<Floor>)
    )
)]
pub async fn list_floors(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Floor>>> {
    let floors = state.services.floors.list().await?;
    Ok(Json(floors))
}

/// Get floor by ID
#[utoipa::path(
    get,
    path = "/floors/{id}",
    tag = "floors",
    params(("id" = i32, Path, description = "Floor ID")),
    responses(
        (status = 200, description = "Floor details", body = Floor),
        (status = 404, description = "Floor not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_floor(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Floor>> {
    let floor = state.services.floors.get_by_id(id).await?;
    Ok(Json(floor))
}

/// Create floor
#[utoipa::path(
    post,
    path = "/floors",
    tag = "floors",
    request_body = FloorPayload,
    responses(
        (status = 201, description = "Floor created", body = Floor),
        (status = 409, description = "Name already taken", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_floor(
    State(state): State<crate::AppState>,
    ApiJson(data): ApiJson<FloorPayload>,
) -> AppResult<(StatusCode, Json<Floor>)> {
    let floor = state.services.floors.create(&data).await?;
    Ok((StatusCode::CREATED, Json(floor)))
}

/// Rename floor
#[utoipa::path(
    put,
    path = "/floors/{id}",
    tag = "floors",
    params(("id" = i32, Path, description = "Floor ID")),
    request_body = FloorPayload,
    responses(
        (status = 200, description = "Floor updated", body = Floor)
    )
)]
pub async fn update_floor(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    ApiJson(data): ApiJson<FloorPayload>,
) -> AppResult<Json<Floor>> {
    let floor = state.services.floors.update(id, &data).await?;
    Ok(Json(floor))
}

/// Delete floor with all utilization records on it
#[utoipa::path(
    delete,
    path = "/floors/{id}",
    tag = "floors",
    params(("id" = i32, Path, description = "Floor ID")),
    responses(
        (status = 200, description = "Floor deleted", body = CascadeDeleteResponse)
    )
)]
pub async fn delete_floor(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<CascadeDeleteResponse>> {
    let records_removed = state.services.floors.delete(id).await?;
    Ok(Json(CascadeDeleteResponse { records_removed }))
}
