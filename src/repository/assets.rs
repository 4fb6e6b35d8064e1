//! Assets repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres, Transaction};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::asset::{Asset, CreateAsset, UpdateAsset},
    models::enums::{AssetStatus, AssetType},
    scheduling::parse_instant,
};

#[derive(Clone)]
pub struct AssetsRepository {
    pool: Pool<Postgres>,
}

impl AssetsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List assets, optionally filtered by type and/or status
    pub async fn list(
        &self,
        asset_type: Option<AssetType>,
        status: Option<AssetStatus>,
    ) -> AppResult<Vec<Asset>> {
        let assets = sqlx::query_as::<_, Asset>(
            r#"
            SELECT * FROM assets
            WHERE ($1::smallint IS NULL OR asset_type = $1)
              AND ($2::smallint IS NULL OR status = $2)
            ORDER BY name
            "#,
        )
        .bind(asset_type.map(|t| t as i16))
        .bind(status.map(|s| s as i16))
        .fetch_all(&self.pool)
        .await?;
        Ok(assets)
    }

    /// Get asset by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Asset> {
        sqlx::query_as::<_, Asset>("SELECT * FROM assets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", id)))
    }

    /// Get asset by ID inside an open transaction
    pub async fn get_by_id_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> AppResult<Asset> {
        sqlx::query_as::<_, Asset>("SELECT * FROM assets WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", id)))
    }

    /// Create a new asset
    pub async fn create(&self, data: &CreateAsset) -> AppResult<Asset> {
        let calibration = data
            .calibration_date
            .as_deref()
            .and_then(parse_instant);

        let asset = sqlx::query_as::<_, Asset>(
            r#"
            INSERT INTO assets (
                id, asset_type, name, status, category, asset_code, description,
                location, serial_number, manufacturer, model, owner, tags,
                calibration_date, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.asset_type)
        .bind(&data.name)
        .bind(data.status.unwrap_or(AssetStatus::Available))
        .bind(&data.category)
        .bind(&data.asset_code)
        .bind(&data.description)
        .bind(&data.location)
        .bind(&data.serial_number)
        .bind(&data.manufacturer)
        .bind(&data.model)
        .bind(&data.owner)
        .bind(&data.tags)
        .bind(calibration)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(asset)
    }

    /// Update an asset (read-merge-write; absent fields keep their value)
    pub async fn update(&self, id: Uuid, data: &UpdateAsset) -> AppResult<Asset> {
        let current = self.get_by_id(id).await?;

        let calibration = match data.calibration_date.as_deref() {
            Some(s) => parse_instant(s).or(current.calibration_date),
            None => current.calibration_date,
        };

        let asset = sqlx::query_as::<_, Asset>(
            r#"
            UPDATE assets SET
                name = $2, status = $3, category = $4, asset_code = $5,
                description = $6, location = $7, serial_number = $8,
                manufacturer = $9, model = $10, owner = $11, tags = $12,
                calibration_date = $13, updated_at = $14
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(data.name.as_ref().unwrap_or(&current.name))
        .bind(data.status.unwrap_or(current.status))
        .bind(data.category.as_ref().or(current.category.as_ref()))
        .bind(data.asset_code.as_ref().or(current.asset_code.as_ref()))
        .bind(data.description.as_ref().or(current.description.as_ref()))
        .bind(data.location.as_ref().or(current.location.as_ref()))
        .bind(data.serial_number.as_ref().or(current.serial_number.as_ref()))
        .bind(data.manufacturer.as_ref().or(current.manufacturer.as_ref()))
        .bind(data.model.as_ref().or(current.model.as_ref()))
        .bind(data.owner.as_ref().or(current.owner.as_ref()))
        .bind(data.tags.as_ref().or(current.tags.as_ref()))
        .bind(calibration)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(asset)
    }

    /// Delete an asset
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM assets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Asset {} not found", id)));
        }
        Ok(())
    }

    /// Write a corrective status inside an open transaction
    pub async fn set_status_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
        status: AssetStatus,
    ) -> AppResult<()> {
        sqlx::query("UPDATE assets SET status = $2, updated_at = $3 WHERE id = $1")
            .bind(id)
            .bind(status)
            .bind(Utc::now())
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}
