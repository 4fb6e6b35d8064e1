//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{assets, health, projects, repairs, settings, stats, timeline, usage_logs};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LabWatch API",
        version = "0.3.0",
        description = "Lab Equipment Usage Tracking REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Assets
        assets::list_assets,
        assets::get_asset,
        assets::create_asset,
        assets::update_asset,
        assets::delete_asset,
        assets::reconcile_assets,
        // Usage logs
        usage_logs::list_usage_logs,
        usage_logs::get_usage_log,
        usage_logs::create_usage_log,
        usage_logs::update_usage_log,
        usage_logs::delete_usage_log,
        usage_logs::remove_usage_log_config,
        // Repair tickets
        repairs::list_tickets,
        repairs::get_ticket,
        repairs::create_ticket,
        repairs::update_ticket,
        repairs::transition_ticket,
        repairs::delete_ticket,
        // Timeline
        timeline::get_timeline,
        // Projects
        projects::list_projects,
        projects::get_project,
        projects::create_project,
        projects::update_project,
        projects::delete_project,
        projects::list_test_profiles,
        projects::get_test_profile,
        projects::create_test_profile,
        projects::update_test_profile,
        projects::delete_test_profile,
        // Stats
        stats::get_stats,
        // Settings
        settings::get_settings,
    ),
    components(
        schemas(
            // Enums
            crate::models::enums::AssetType,
            crate::models::enums::AssetStatus,
            crate::models::enums::UsageStatus,
            crate::models::enums::RepairStatus,
            crate::models::enums::DayKind,
            // Assets
            crate::models::asset::Asset,
            crate::models::asset::CreateAsset,
            crate::models::asset::UpdateAsset,
            crate::models::asset::StatusWrite,
            assets::ReconcileResponse,
            // Usage logs
            crate::models::usage_log::UsageLog,
            crate::models::usage_log::CreateUsageLog,
            crate::models::usage_log::UpdateUsageLog,
            usage_logs::UsageLogResponse,
            usage_logs::UsageLogDeleted,
            usage_logs::ConfigRemoved,
            // Repair tickets
            crate::models::repair_ticket::RepairTicket,
            crate::models::repair_ticket::TicketTransition,
            crate::models::repair_ticket::CreateRepairTicket,
            crate::models::repair_ticket::UpdateRepairTicket,
            crate::models::repair_ticket::TransitionRepairTicket,
            crate::models::repair_ticket::TicketOutcome,
            repairs::TicketDeleted,
            // Timeline
            crate::models::timeline::TimelineView,
            crate::models::timeline::CalendarDay,
            crate::models::timeline::AssetLane,
            crate::models::timeline::TimelineBar,
            // Projects
            crate::models::project::Project,
            crate::models::project::ProjectConfig,
            crate::models::project::NewProjectConfig,
            crate::models::project::CreateProject,
            crate::models::project::UpdateProject,
            crate::models::project::TestProfile,
            crate::models::project::CreateTestProfile,
            crate::models::project::UpdateTestProfile,
            // Stats
            stats::StatsOverview,
            stats::CalibrationAlert,
            stats::LongOccupancyAlert,
            // Settings
            settings::SettingsResponse,
            settings::TimelineSettings,
            settings::AlertSettings,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "assets", description = "Asset management and status reconciliation"),
        (name = "usage-logs", description = "Usage log management"),
        (name = "repairs", description = "Repair ticket lifecycle"),
        (name = "timeline", description = "Scrollable timeline render feed"),
        (name = "projects", description = "Projects and test profiles"),
        (name = "stats", description = "Dashboard statistics"),
        (name = "settings", description = "Effective server settings")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
