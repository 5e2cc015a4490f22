//! Equipment catalog endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::equipment_type::{CreateEquipmentType, EquipmentType, UpdateEquipmentType},
};

use super::{ApiJson, CascadeDeleteResponse};

/// List all equipment types
#[utoipa::path(
    get,
    path = "/equipment-types",
    tag = "equipment",
    responses(
        (status = 200, description = "Equipment type list", body = Vec<EquipmentType>)
    )
)]
pub async fn list_equipment_types(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<EquipmentType>>> {
    let equipment = state.services.equipment_types.list().await?;
    Ok(Json(equipment))
}

/// Get equipment type by ID
#[utoipa::path(
    get,
    path = "/equipment-types/{id}",
    tag = "equipment",
    params(("id" = i32, Path, description = "Equipment type ID")),
    responses(
        (status = 200, description = "Equipment type details", body = EquipmentType),
        (status = 404, description = "Equipment type not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_equipment_type(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<EquipmentType>> {
    let equipment = state.services.equipment_types.get_by_id(id).await?;
    Ok(Json(equipment))
}

/// Create equipment type
#[utoipa::path(
    post,
    path = "/equipment-types",
    tag = "equipment",
    request_body = CreateEquipmentType,
    responses(
        (status = 201, description = "Equipment type created", body = EquipmentType)
    )
)]
pub async fn create_equipment_type(
    State(state): State<crate::AppState>,
    ApiJson(data): ApiJson<CreateEquipmentType>,
) -> AppResult<(StatusCode, Json<EquipmentType>)> {
    let equipment = state.services.equipment_types.create(&data).await?;
    Ok((StatusCode::CREATED, Json(equipment)))
}

/// Update equipment type
#[utoipa::path(
    put,
    path = "/equipment-types/{id}",
    tag = "equipment",
    params(("id" = i32, Path, description = "Equipment type ID")),
    request_body = UpdateEquipmentType,
    responses(
        (status = 200, description = "Equipment type updated", body = EquipmentType)
    )
)]
pub async fn update_equipment_type(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    ApiJson(data): ApiJson<UpdateEquipmentType>,
) -> AppResult<Json<EquipmentType>> {
    let equipment = state.services.equipment_types.update(id, &data).await?;
    Ok(Json(equipment))
}

/// Delete equipment type with all of its utilization records
#[utoipa::path(
    delete,
    path = "/equipment-types/{id}",
    tag = "equipment",
    params(("id" = i32, Path, description = "Equipment type ID")),
    responses(
        (status = 200, description = "Equipment type deleted", body = CascadeDeleteResponse)
    )
)]
pub async fn delete_equipment_type(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<CascadeDeleteResponse>> {
    let records_removed = state.services.equipment_types.delete(id).await?;
    Ok(Json(CascadeDeleteResponse { records_removed }))
}
