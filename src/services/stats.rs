//! Dashboard statistics service

use std::sync::Arc;

use chrono::Duration;

use crate::{
    api::stats::{CalibrationAlert, LongOccupancyAlert, StatsOverview},
    error::AppResult,
    models::enums::{AssetStatus, UsageStatus},
    repository::Repository,
    scheduling::{effective_status, is_occupying},
};

use super::clock::Clock;

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
    alerts: crate::config::AlertsConfig,
    clock: Arc<dyn Clock>,
}

impl StatsService {
    pub fn new(
        repository: Repository,
        alerts: crate::config::AlertsConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            alerts,
            clock,
        }
    }

    /// Counters and alert lists for the dashboard
    pub async fn overview(&self) -> AppResult<StatsOverview> {
        let now = self.clock.now();
        let assets = self.repository.assets.list(None, None).await?;
        let logs = self.repository.usage_logs.list_all().await?;
        let open_tickets = self.repository.repair_tickets.count_open().await?;

        let assets_available = assets
            .iter()
            .filter(|a| a.status == AssetStatus::Available)
            .count() as i64;
        let assets_in_use = assets
            .iter()
            .filter(|a| a.status == AssetStatus::InUse)
            .count() as i64;
        let assets_maintenance = assets
            .iter()
            .filter(|a| a.status == AssetStatus::Maintenance)
            .count() as i64;

        let occupying_now = logs.iter().filter(|l| is_occupying(l, now)).count() as i64;
        let overdue_now = logs
            .iter()
            .filter(|l| effective_status(l, now) == UsageStatus::Overdue)
            .count() as i64;

        let calibration_deadline = now + Duration::days(self.alerts.calibration_days_threshold);
        let calibration_due = assets
            .iter()
            .filter_map(|a| {
                let date = a.calibration_date?;
                (date <= calibration_deadline).then(|| CalibrationAlert {
                    asset_id: a.id,
                    asset_name: a.name.clone(),
                    calibration_date: date,
                    expired: date <= now,
                })
            })
            .collect();

        let occupancy_limit = Duration::hours(self.alerts.long_occupancy_hours_threshold);
        let long_occupancy = logs
            .iter()
            .filter(|l| is_occupying(l, now))
            .filter(|l| now - l.start_time >= occupancy_limit)
            .map(|l| LongOccupancyAlert {
                log_id: l.id,
                asset_id: l.asset_id,
                operator: l.operator.clone(),
                started_at: l.start_time,
                hours: (now - l.start_time).num_hours(),
            })
            .collect();

        Ok(StatsOverview {
            assets_total: assets.len() as i64,
            assets_available,
            assets_in_use,
            assets_maintenance,
            usage_logs_total: logs.len() as i64,
            occupying_now,
            overdue_now,
            open_tickets,
            calibration_due,
            long_occupancy,
        })
    }
}
