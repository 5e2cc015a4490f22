//! Dashboard, history and CSV export endpoints

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};

use crate::{
    error::AppResult,
    models::report::{ActiveFilter, DashboardReport, HistoryFilter, HistoryReport},
};

use super::ApiQuery;

/// Active equipment with cost totals
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "reports",
    params(ActiveFilter),
    responses(
        (status = 200, description = "Active utilization overview", body = DashboardReport)
    )
)]
pub async fn dashboard(
    State(state): State<crate::AppState>,
    ApiQuery(filter): ApiQuery<ActiveFilter>,
) -> AppResult<Json<DashboardReport>> {
    let report = state.services.reports.dashboard(&filter).await?;
    Ok(Json(report))
}

/// Ended utilizations
#[utoipa::path(
    get,
    path = "/history",
    tag = "reports",
    params(HistoryFilter),
    responses(
        (status = 200, description = "Historical utilization overview", body = HistoryReport),
        (status = 400, description = "Malformed filter value")
    )
)]
pub async fn history(
    State(state): State<crate::AppState>,
    ApiQuery(filter): ApiQuery<HistoryFilter>,
) -> AppResult<Json<HistoryReport>> {
    let report = state.services.reports.history(&filter).await?;
    Ok(Json(report))
}

/// Download the active records as CSV
#[utoipa::path(
    get,
    path = "/export_csv",
    tag = "reports",
    params(ActiveFilter),
    responses(
        (status = 200, description = "CSV attachment", content_type = "text/csv", body = String)
    )
)]
pub async fn export_csv(
    State(state): State<crate::AppState>,
    ApiQuery(filter): ApiQuery<ActiveFilter>,
) -> AppResult<impl IntoResponse> {
    let body = state.services.reports.export_csv(&filter).await?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        state.config.reporting.export_filename
    );
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}
