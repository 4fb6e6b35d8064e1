//! Asset management service

use uuid::Uuid;

use crate::{
    error::AppResult,
    models::asset::{Asset, CreateAsset, UpdateAsset},
    models::enums::{AssetStatus, AssetType},
    repository::Repository,
};

#[derive(Clone)]
pub struct AssetsService {
    repository: Repository,
}

impl AssetsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List assets with optional filters
    pub async fn list(
        &self,
        asset_type: Option<AssetType>,
        status: Option<AssetStatus>,
    ) -> AppResult<Vec<Asset>> {
        self.repository.assets.list(asset_type, status).await
    }

    /// Get one asset
    pub async fn get(&self, id: Uuid) -> AppResult<Asset> {
        self.repository.assets.get_by_id(id).await
    }

    /// Create a new asset
    pub async fn create(&self, data: CreateAsset) -> AppResult<Asset> {
        self.repository.assets.create(&data).await
    }

    /// Update an asset's descriptive fields (and, for manual overrides, its
    /// status; the next reconcile pass re-derives chamber statuses anyway)
    pub async fn update(&self, id: Uuid, data: UpdateAsset) -> AppResult<Asset> {
        self.repository.assets.update(id, &data).await
    }

    /// Delete an asset
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.assets.delete(id).await
    }
}
