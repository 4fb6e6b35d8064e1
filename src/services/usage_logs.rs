//! Usage log management service
//!
//! Every mutation here is one atomic unit of work: the log write and the
//! corrective asset-status write share a transaction, so a failed status
//! write rolls the whole mutation back (the two can never disagree on disk).

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::asset::StatusWrite,
    models::enums::UsageStatus,
    models::usage_log::{CreateUsageLog, UpdateUsageLog, UsageLog},
    repository::usage_logs::UsageLogRecord,
    repository::Repository,
    scheduling::parse_instant,
};

use super::clock::Clock;
use super::reconcile::ReconcileService;

#[derive(Clone)]
pub struct UsageLogsService {
    repository: Repository,
    reconcile: ReconcileService,
    clock: Arc<dyn Clock>,
}

impl UsageLogsService {
    pub fn new(repository: Repository, reconcile: ReconcileService, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            reconcile,
            clock,
        }
    }

    /// List all usage logs
    pub async fn list(&self, asset_id: Option<Uuid>) -> AppResult<Vec<UsageLog>> {
        match asset_id {
            Some(asset_id) => self.repository.usage_logs.list_by_asset(asset_id).await,
            None => self.repository.usage_logs.list_all().await,
        }
    }

    /// Get one usage log
    pub async fn get(&self, id: Uuid) -> AppResult<UsageLog> {
        self.repository.usage_logs.get_by_id(id).await
    }

    /// Create a usage log and reconcile its asset, atomically
    pub async fn create(
        &self,
        data: CreateUsageLog,
    ) -> AppResult<(UsageLog, Option<StatusWrite>)> {
        // Verify the asset exists before writing anything
        self.repository.assets.get_by_id(data.asset_id).await?;

        let start_time = parse_instant(&data.start_time)
            .ok_or_else(|| AppError::Validation("Invalid start_time".to_string()))?;
        // Unparsable end times degrade to "no end" rather than failing the
        // whole record; legacy clients send a few odd formats
        let end_time = data.end_time.as_deref().and_then(parse_instant);
        validate_window(start_time, end_time)?;

        let record = UsageLogRecord {
            asset_id: data.asset_id,
            project_id: data.project_id,
            test_profile_id: data.test_profile_id,
            operator: data.operator,
            start_time,
            end_time,
            status: data.status.unwrap_or(UsageStatus::NotStarted),
            notes: data.notes,
            selected_config_ids: data.selected_config_ids,
            selected_waterfall: data.selected_waterfall,
        };

        let mut tx = self.repository.begin().await?;
        let log = self.repository.usage_logs.insert_tx(&mut tx, &record).await?;
        let write = self
            .reconcile
            .reconcile_asset_tx(&mut tx, record.asset_id, None)
            .await?;
        tx.commit().await?;

        Ok((log, write))
    }

    /// Update a usage log and reconcile the affected asset(s), atomically.
    ///
    /// Marking a log completed with no end time (or one still in the future)
    /// snaps the end to now, so the record's window matches the moment the
    /// user closed it.
    pub async fn update(
        &self,
        id: Uuid,
        data: UpdateUsageLog,
    ) -> AppResult<(UsageLog, Vec<StatusWrite>)> {
        let current = self.repository.usage_logs.get_by_id(id).await?;
        let now = self.clock.now();

        let status_changed = data.status.is_some();
        let new_status = data.status.unwrap_or(current.status);

        let start_time = match data.start_time.as_deref() {
            Some(s) => parse_instant(s)
                .ok_or_else(|| AppError::Validation("Invalid start_time".to_string()))?,
            None => current.start_time,
        };
        let mut end_time = match &data.end_time {
            Some(Some(s)) => parse_instant(s).or(current.end_time),
            Some(None) => None,
            None => current.end_time,
        };

        if new_status == UsageStatus::Completed {
            match end_time {
                Some(end) if end <= now => {}
                _ => end_time = Some(now),
            }
        }
        validate_window(start_time, end_time)?;

        let asset_id = data.asset_id.unwrap_or(current.asset_id);
        let record = UsageLogRecord {
            asset_id,
            project_id: data.project_id.or(current.project_id),
            test_profile_id: data.test_profile_id.or(current.test_profile_id),
            operator: data.operator.unwrap_or(current.operator),
            start_time,
            end_time,
            status: new_status,
            notes: data.notes.or(current.notes),
            selected_config_ids: data.selected_config_ids.or(current.selected_config_ids),
            selected_waterfall: data.selected_waterfall.or(current.selected_waterfall),
        };

        // Status changes evaluate occupancy against the asset's *other*
        // logs; metadata edits still count this log in its prior state
        let exclude = if status_changed { Some(id) } else { None };

        let mut tx = self.repository.begin().await?;
        let log = self.repository.usage_logs.update_tx(&mut tx, id, &record).await?;

        let mut writes = Vec::new();
        if let Some(write) = self
            .reconcile
            .reconcile_asset_tx(&mut tx, asset_id, exclude)
            .await?
        {
            writes.push(write);
        }
        if asset_id != current.asset_id {
            // The log moved: the asset it left needs a pass too
            if let Some(write) = self
                .reconcile
                .reconcile_asset_tx(&mut tx, current.asset_id, Some(id))
                .await?
            {
                writes.push(write);
            }
        }
        tx.commit().await?;

        Ok((log, writes))
    }

    /// Delete a usage log and reconcile its asset, atomically
    pub async fn delete(&self, id: Uuid) -> AppResult<Option<StatusWrite>> {
        let current = self.repository.usage_logs.get_by_id(id).await?;

        let mut tx = self.repository.begin().await?;
        self.repository.usage_logs.delete_tx(&mut tx, id).await?;
        let write = self
            .reconcile
            .reconcile_asset_tx(&mut tx, current.asset_id, Some(id))
            .await?;
        tx.commit().await?;

        Ok(write)
    }

    /// Drop one selected config from a log. Removing the last config deletes
    /// the log itself (a log exists to put bars on the timeline; with no
    /// selections left there is nothing to show).
    pub async fn remove_config(
        &self,
        id: Uuid,
        config_id: Uuid,
    ) -> AppResult<(Option<UsageLog>, Option<StatusWrite>)> {
        let current = self.repository.usage_logs.get_by_id(id).await?;
        let selected = current.selected_config_ids.clone().unwrap_or_default();

        if !selected.contains(&config_id) {
            return Err(AppError::NotFound(format!(
                "Config {} is not selected on usage log {}",
                config_id, id
            )));
        }
        let remaining: Vec<Uuid> = selected.into_iter().filter(|c| *c != config_id).collect();

        let mut tx = self.repository.begin().await?;
        let (log, exclude) = if remaining.is_empty() {
            self.repository.usage_logs.delete_tx(&mut tx, id).await?;
            (None, Some(id))
        } else {
            let record = UsageLogRecord {
                asset_id: current.asset_id,
                project_id: current.project_id,
                test_profile_id: current.test_profile_id,
                operator: current.operator.clone(),
                start_time: current.start_time,
                end_time: current.end_time,
                status: current.status,
                notes: current.notes.clone(),
                selected_config_ids: Some(remaining),
                selected_waterfall: current.selected_waterfall.clone(),
            };
            let log = self.repository.usage_logs.update_tx(&mut tx, id, &record).await?;
            (Some(log), None)
        };
        let write = self
            .reconcile
            .reconcile_asset_tx(&mut tx, current.asset_id, exclude)
            .await?;
        tx.commit().await?;

        Ok((log, write))
    }
}

/// Reject windows that end before they start
fn validate_window(
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
) -> AppResult<()> {
    if let Some(end) = end {
        if end < start {
            return Err(AppError::Validation(
                "end_time must not be before start_time".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 10, h, 0, 0).unwrap()
    }

    #[test]
    fn test_validate_window() {
        assert!(validate_window(t(9), None).is_ok());
        assert!(validate_window(t(9), Some(t(10))).is_ok());
        assert!(validate_window(t(9), Some(t(9))).is_ok());
        assert!(validate_window(t(10), Some(t(9))).is_err());
    }
}
