//! MedEquip Server - medical equipment utilization tracking
//!
//! REST API server for recording where equipment is used and what it costs.

use anyhow::Context;
use axum::{
    routing::get,
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use medequip_server::{
    api,
    clock::{Clock, FixedClock, SystemClock},
    config::AppConfig,
    repository::Repository,
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("medequip_server={},tower_http=debug", config.logging.level).into()
    });

    let json = config.logging.format.eq_ignore_ascii_case("json");

    // Keep the guard alive so buffered file output is flushed on exit
    let (file_layer, _file_guard) = match config.logging.file.as_deref() {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "medequip-server.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer()))
        .with(file_layer)
        .init();

    tracing::info!("Starting MedEquip Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database migrations completed");

    let clock: Arc<dyn Clock> = match config.reporting.fixed_today {
        Some(date) => {
            tracing::warn!("Clock pinned to {}", date);
            Arc::new(FixedClock(date))
        }
        None => Arc::new(SystemClock),
    };

    // Save server address before moving config
    let addr = SocketAddr::new(
        config.server.host.parse().context("Invalid host address")?,
        config.server.port,
    );

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, clock);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Reports
        .route("/dashboard", get(api::reports::dashboard))
        .route("/history", get(api::reports::history))
        .route("/export_csv", get(api::reports::export_csv))
        // Utilization records
        .route(
            "/add",
            get(api::utilization::add_form).post(api::utilization::create_record),
        )
        .route(
            "/update/:id",
            get(api::utilization::get_record).post(api::utilization::update_record),
        )
        .route(
            "/delete/:id",
            get(api::utilization::confirm_delete).post(api::utilization::delete_record),
        )
        .route("/records", get(api::utilization::list_records))
        // Floors
        .route(
            "/floors",
            get(api::floors::list_floors).post(api::floors::create_floor),
        )
        .route(
            "/floors/:id",
            get(api::floors::get_floor)
                .put(api::floors::update_floor)
                .delete(api::floors::delete_floor),
        )
        // Equipment types
        .route(
            "/equipment-types",
            get(api::equipment_types::list_equipment_types)
                .post(api::equipment_types::create_equipment_type),
        )
        .route(
            "/equipment-types/:id",
            get(api::equipment_types::get_equipment_type)
                .put(api::equipment_types::update_equipment_type)
                .delete(api::equipment_types::delete_equipment_type),
        )
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}
