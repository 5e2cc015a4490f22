//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{equipment_types, floors, health, reports, utilization};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "MedEquip API",
        version = "1.0.0",
        description = "Medical equipment utilization tracking REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Reports
        reports::dashboard,
        reports::history,
        reports::export_csv,
        // Utilization records
        utilization::add_form,
        utilization::create_record,
        utilization::get_record,
        utilization::update_record,
        utilization::confirm_delete,
        utilization::delete_record,
        utilization::list_records,
        // Floors
        floors::list_floors,
        floors::get_floor,
        floors::create_floor,
        floors::update_floor,
        floors::delete_floor,
        // Equipment types
        equipment_types::list_equipment_types,
        equipment_types::get_equipment_type,
        equipment_types::create_equipment_type,
        equipment_types::update_equipment_type,
        equipment_types::delete_equipment_type,
    ),
    components(
        schemas(
            // Catalog
            crate::models::enums::EquipmentCategory,
            crate::models::enums::OwnershipType,
            crate::models::enums::Choice,
            crate::models::floor::Floor,
            crate::models::floor::FloorPayload,
            crate::models::equipment_type::EquipmentType,
            crate::models::equipment_type::CreateEquipmentType,
            crate::models::equipment_type::UpdateEquipmentType,
            // Utilization
            crate::models::utilization::UtilizationRecord,
            crate::models::utilization::UtilizationView,
            crate::models::utilization::UtilizationDetail,
            crate::models::utilization::CreateUtilizationRecord,
            crate::models::utilization::UpdateUtilizationRecord,
            crate::models::utilization::RecordFormOptions,
            crate::models::utilization::DeleteConfirmation,
            crate::models::floor_segment::FloorSegment,
            crate::models::floor_segment::FloorSegmentView,
            crate::models::floor_segment::SegmentInput,
            // Reports
            crate::models::report::HistorySort,
            crate::models::report::ChartPoint,
            crate::models::report::FilterOptions,
            crate::models::report::DashboardReport,
            crate::models::report::HistoryReport,
            // Misc
            crate::api::CascadeDeleteResponse,
            health::HealthResponse,
            // Errors
            crate::error::FieldError,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "reports", description = "Dashboard, history and CSV export"),
        (name = "utilization", description = "Utilization record management"),
        (name = "floors", description = "Floor catalog"),
        (name = "equipment", description = "Equipment type catalog")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
