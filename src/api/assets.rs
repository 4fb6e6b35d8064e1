//! Asset management endpoints

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
    models::asset::{Asset, CreateAsset, StatusWrite, UpdateAsset},
    models::enums::{AssetStatus, AssetType},
};

use super::validate_body;

/// Query parameters for asset listing
#[derive(Debug, Deserialize, IntoParams)]
pub struct AssetListQuery {
    pub asset_type: Option<AssetType>,
    pub status: Option<AssetStatus>,
}

/// Reconciliation sweep response
#[derive(Serialize, ToSchema)]
pub struct ReconcileResponse {
    /// Corrective writes that were applied
    pub writes: Vec<StatusWrite>,
}

/// List assets
#[utoipa::path(
    get,
    path = "/assets",
    tag = "assets",
    params(AssetListQuery),
    responses(
        (status = 200, description = "Asset list", body = Vec<Asset>)
    )
)]
pub async fn list_assets(
    State(state): State<crate::AppState>,
    Query(query): Query<AssetListQuery>,
) -> AppResult<Json<Vec<Asset>>> {
    let assets = state
        .services
        .assets
        .list(query.asset_type, query.status)
        .await?;
    Ok(Json(assets))
}

/// Get one asset
#[utoipa::path(
    get,
    path = "/assets/{id}",
    tag = "assets",
    params(("id" = Uuid, Path, description = "Asset ID")),
    responses(
        (status = 200, description = "Asset", body = Asset),
        (status = 404, description = "Asset not found")
    )
)]
pub async fn get_asset(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Asset>> {
    Ok(Json(state.services.assets.get(id).await?))
}

/// Create an asset
#[utoipa::path(
    post,
    path = "/assets",
    tag = "assets",
    request_body = CreateAsset,
    responses(
        (status = 201, description = "Asset created", body = Asset),
        (status = 400, description = "Invalid request")
    )
)]
pub async fn create_asset(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateAsset>,
) -> AppResult<(StatusCode, Json<Asset>)> {
    validate_body(&request)?;
    let asset = state.services.assets.create(request).await?;
    Ok((StatusCode::CREATED, Json(asset)))
}

/// Update an asset
#[utoipa::path(
    put,
    path = "/assets/{id}",
    tag = "assets",
    params(("id" = Uuid, Path, description = "Asset ID")),
    request_body = UpdateAsset,
    responses(
        (status = 200, description = "Asset updated", body = Asset),
        (status = 404, description = "Asset not found")
    )
)]
pub async fn update_asset(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateAsset>,
) -> AppResult<Json<Asset>> {
    validate_body(&request)?;
    Ok(Json(state.services.assets.update(id, request).await?))
}

/// Delete an asset
#[utoipa::path(
    delete,
    path = "/assets/{id}",
    tag = "assets",
    params(("id" = Uuid, Path, description = "Asset ID")),
    responses(
        (status = 204, description = "Asset deleted"),
        (status = 404, description = "Asset not found")
    )
)]
pub async fn delete_asset(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.assets.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Run the full asset status reconciliation sweep
#[utoipa::path(
    post,
    path = "/assets/reconcile",
    tag = "assets",
    responses(
        (status = 200, description = "Sweep completed", body = ReconcileResponse)
    )
)]
pub async fn reconcile_assets(
    State(state): State<crate::AppState>,
) -> AppResult<Json<ReconcileResponse>> {
    let writes = state.services.reconcile.reconcile_all().await?;
    Ok(Json(ReconcileResponse { writes }))
}
