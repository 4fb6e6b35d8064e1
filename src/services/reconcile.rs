//! Asset status reconciliation service
//!
//! Applies the pure plans from `scheduling::reconcile`. The full sweep is
//! always re-derived from a fresh read of the complete state (never from a
//! cached snapshot) and is safe to re-run: a second pass over its own output
//! writes nothing.

use std::sync::Arc;

use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::asset::StatusWrite,
    repository::Repository,
    scheduling::{plan_asset_status, plan_status_writes},
};

use super::clock::Clock;

#[derive(Clone)]
pub struct ReconcileService {
    repository: Repository,
    clock: Arc<dyn Clock>,
}

impl ReconcileService {
    pub fn new(repository: Repository, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Sweep every asset against the full usage-log set and apply the
    /// minimal corrective writes in one transaction.
    pub async fn reconcile_all(&self) -> AppResult<Vec<StatusWrite>> {
        let assets = self.repository.assets.list(None, None).await?;
        let logs = self.repository.usage_logs.list_all().await?;
        let writes = plan_status_writes(&assets, &logs, self.clock.now());

        if writes.is_empty() {
            return Ok(writes);
        }

        let mut tx = self.repository.begin().await?;
        for write in &writes {
            self.repository
                .assets
                .set_status_tx(&mut tx, write.asset_id, write.new_status)
                .await?;
        }
        tx.commit().await?;

        tracing::info!(count = writes.len(), "reconciled asset statuses");
        Ok(writes)
    }

    /// Scoped pass for one asset, run inside the mutation's own transaction
    /// so the primary write and the corrective write commit together.
    ///
    /// `exclude` names the usage log being mutated when the mutation changes
    /// that log's status; occupancy is then decided by the asset's other
    /// logs.
    pub async fn reconcile_asset_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        asset_id: Uuid,
        exclude: Option<Uuid>,
    ) -> AppResult<Option<StatusWrite>> {
        let asset = match self.repository.assets.get_by_id_tx(tx, asset_id).await {
            Ok(asset) => asset,
            Err(crate::error::AppError::NotFound(_)) => {
                // A log can reference a deleted asset; nothing to correct
                tracing::warn!(%asset_id, "asset missing during status reconcile");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let logs = self.repository.usage_logs.list_by_asset_tx(tx, asset_id).await?;
        let target = plan_asset_status(&asset, &logs, self.clock.now(), exclude);

        match target {
            Some(status) => {
                self.repository.assets.set_status_tx(tx, asset_id, status).await?;
                Ok(Some(StatusWrite {
                    asset_id,
                    new_status: status,
                }))
            }
            None => Ok(None),
        }
    }
}
