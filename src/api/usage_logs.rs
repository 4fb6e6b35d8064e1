//! Usage log endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::asset::StatusWrite,
    models::usage_log::{CreateUsageLog, UpdateUsageLog, UsageLog},
};

use super::validate_body;

/// Query parameters for usage log listing
#[derive(Debug, Deserialize, IntoParams)]
pub struct UsageLogListQuery {
    pub asset_id: Option<Uuid>,
}

/// Mutation response: the record plus any asset-status corrections that
/// committed with it
#[derive(Serialize, ToSchema)]
pub struct UsageLogResponse {
    pub log: UsageLog,
    pub asset_status_writes: Vec<StatusWrite>,
}

/// Deletion response
#[derive(Serialize, ToSchema)]
pub struct UsageLogDeleted {
    pub asset_status_writes: Vec<StatusWrite>,
}

/// Config-removal response; `log` is absent when removing the last config
/// deleted the record
#[derive(Serialize, ToSchema)]
pub struct ConfigRemoved {
    pub log: Option<UsageLog>,
    pub asset_status_writes: Vec<StatusWrite>,
}

/// List usage logs
#[utoipa::path(
    get,
    path = "/usage-logs",
    tag = "usage-logs",
    params(UsageLogListQuery),
    responses(
        (status = 200, description = "Usage log list", body = Vec<UsageLog>)
    )
)]
pub async fn list_usage_logs(
    State(state): State<crate::AppState>,
    Query(query): Query<UsageLogListQuery>,
) -> AppResult<Json<Vec<UsageLog>>> {
    Ok(Json(state.services.usage_logs.list(query.asset_id).await?))
}

/// Get one usage log
#[utoipa::path(
    get,
    path = "/usage-logs/{id}",
    tag = "usage-logs",
    params(("id" = Uuid, Path, description = "Usage log ID")),
    responses(
        (status = 200, description = "Usage log", body = UsageLog),
        (status = 404, description = "Usage log not found")
    )
)]
pub async fn get_usage_log(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UsageLog>> {
    Ok(Json(state.services.usage_logs.get(id).await?))
}

/// Create a usage log (reserve an asset)
#[utoipa::path(
    post,
    path = "/usage-logs",
    tag = "usage-logs",
    request_body = CreateUsageLog,
    responses(
        (status = 201, description = "Usage log created", body = UsageLogResponse),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Asset not found")
    )
)]
pub async fn create_usage_log(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateUsageLog>,
) -> AppResult<(StatusCode, Json<UsageLogResponse>)> {
    validate_body(&request)?;
    let (log, write) = state.services.usage_logs.create(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(UsageLogResponse {
            log,
            asset_status_writes: write.into_iter().collect(),
        }),
    ))
}

/// Update a usage log
#[utoipa::path(
    put,
    path = "/usage-logs/{id}",
    tag = "usage-logs",
    params(("id" = Uuid, Path, description = "Usage log ID")),
    request_body = UpdateUsageLog,
    responses(
        (status = 200, description = "Usage log updated", body = UsageLogResponse),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Usage log not found")
    )
)]
pub async fn update_usage_log(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateUsageLog>,
) -> AppResult<Json<UsageLogResponse>> {
    validate_body(&request)?;
    let (log, writes) = state.services.usage_logs.update(id, request).await?;
    Ok(Json(UsageLogResponse {
        log,
        asset_status_writes: writes,
    }))
}

/// Delete a usage log
#[utoipa::path(
    delete,
    path = "/usage-logs/{id}",
    tag = "usage-logs",
    params(("id" = Uuid, Path, description = "Usage log ID")),
    responses(
        (status = 200, description = "Usage log deleted", body = UsageLogDeleted),
        (status = 404, description = "Usage log not found")
    )
)]
pub async fn delete_usage_log(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UsageLogDeleted>> {
    let write = state.services.usage_logs.delete(id).await?;
    Ok(Json(UsageLogDeleted {
        asset_status_writes: write.into_iter().collect(),
    }))
}

/// Remove one selected config from a usage log
#[utoipa::path(
    delete,
    path = "/usage-logs/{id}/configs/{config_id}",
    tag = "usage-logs",
    params(
        ("id" = Uuid, Path, description = "Usage log ID"),
        ("config_id" = Uuid, Path, description = "Selected config ID")
    ),
    responses(
        (status = 200, description = "Config removed", body = ConfigRemoved),
        (status = 404, description = "Usage log or config not found")
    )
)]
pub async fn remove_usage_log_config(
    State(state): State<crate::AppState>,
    Path((id, config_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ConfigRemoved>> {
    let (log, write) = state.services.usage_logs.remove_config(id, config_id).await?;
    Ok(Json(ConfigRemoved {
        log,
        asset_status_writes: write.into_iter().collect(),
    }))
}
