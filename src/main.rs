//! LabWatch Server - Lab Equipment Tracking System
//!
//! A Rust REST API server for tracking shared lab equipment: usage logs,
//! repair tickets, asset status reconciliation and the scheduling timeline.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use labwatch_server::{
    api,
    config::AppConfig,
    repository::Repository,
    services::{clock::SystemClock, Services},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing; an optional daily-rolled file sink runs alongside
    // stdout when logging.directory is set
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("labwatch_server={},tower_http=debug", config.logging.level).into());

    let file_layer = config.logging.directory.as_ref().map(|dir| {
        let appender = tracing_appender::rolling::daily(dir, "labwatch.log");
        tracing_subscriber::fmt::layer().with_ansi(false).with_writer(appender)
    });

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting LabWatch Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(
        repository,
        config.timeline.clone(),
        config.holidays.clone(),
        config.alerts.clone(),
        Arc::new(SystemClock),
    );

    // Heal any stale asset statuses left behind by a crashed writer
    if let Err(e) = services.reconcile.reconcile_all().await {
        tracing::warn!("Startup status reconciliation failed: {}", e);
    }

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

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
        // Assets
        .route("/assets", get(api::assets::list_assets))
        .route("/assets", post(api::assets::create_asset))
        .route("/assets/reconcile", post(api::assets::reconcile_assets))
        .route("/assets/:id", get(api::assets::get_asset))
        .route("/assets/:id", put(api::assets::update_asset))
        .route("/assets/:id", delete(api::assets::delete_asset))
        // Usage logs
        .route("/usage-logs", get(api::usage_logs::list_usage_logs))
        .route("/usage-logs", post(api::usage_logs::create_usage_log))
        .route("/usage-logs/:id", get(api::usage_logs::get_usage_log))
        .route("/usage-logs/:id", put(api::usage_logs::update_usage_log))
        .route("/usage-logs/:id", delete(api::usage_logs::delete_usage_log))
        .route(
            "/usage-logs/:id/configs/:config_id",
            delete(api::usage_logs::remove_usage_log_config),
        )
        // Repair tickets
        .route("/repair-tickets", get(api::repairs::list_tickets))
        .route("/repair-tickets", post(api::repairs::create_ticket))
        .route("/repair-tickets/:id", get(api::repairs::get_ticket))
        .route("/repair-tickets/:id", put(api::repairs::update_ticket))
        .route("/repair-tickets/:id", delete(api::repairs::delete_ticket))
        .route(
            "/repair-tickets/:id/transition",
            post(api::repairs::transition_ticket),
        )
        // Timeline
        .route("/timeline", get(api::timeline::get_timeline))
        // Projects
        .route("/projects", get(api::projects::list_projects))
        .route("/projects", post(api::projects::create_project))
        .route("/projects/:id", get(api::projects::get_project))
        .route("/projects/:id", put(api::projects::update_project))
        .route("/projects/:id", delete(api::projects::delete_project))
        // Test profiles
        .route("/test-profiles", get(api::projects::list_test_profiles))
        .route("/test-profiles", post(api::projects::create_test_profile))
        .route("/test-profiles/:id", get(api::projects::get_test_profile))
        .route("/test-profiles/:id", put(api::projects::update_test_profile))
        .route("/test-profiles/:id", delete(api::projects::delete_test_profile))
        // Statistics
        .route("/stats", get(api::stats::get_stats))
        // Settings
        .route("/settings", get(api::settings::get_settings))
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
