//! API handlers for the equipment utilization REST endpoints

pub mod equipment_types;
pub mod floors;
pub mod health;
pub mod openapi;
pub mod reports;
pub mod utilization;

use axum::extract::{FromRequest, FromRequestParts};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppError;

/// JSON body extractor whose failures render as `ErrorResponse`
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Query string extractor whose failures render as `ErrorResponse`
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

/// Result of deleting a catalog entry
#[derive(Debug, Serialize, ToSchema)]
pub struct CascadeDeleteResponse {
    /// Utilization records removed along with the entry
    pub records_removed: i64,
}
