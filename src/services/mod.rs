//! Business logic services

pub mod assets;
pub mod clock;
pub mod holidays;
pub mod projects;
pub mod reconcile;
pub mod repairs;
pub mod stats;
pub mod timeline;
pub mod usage_logs;

use std::sync::Arc;

use crate::{
    config::{AlertsConfig, HolidayConfig, TimelineConfig},
    repository::Repository,
};

use clock::Clock;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub assets: assets::AssetsService,
    pub usage_logs: usage_logs::UsageLogsService,
    pub repairs: repairs::RepairsService,
    pub reconcile: reconcile::ReconcileService,
    pub timeline: timeline::TimelineService,
    pub holidays: holidays::HolidayService,
    pub projects: projects::ProjectsService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services with the given repository and clock
    pub fn new(
        repository: Repository,
        timeline_config: TimelineConfig,
        holiday_config: HolidayConfig,
        alerts_config: AlertsConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let holidays = holidays::HolidayService::new(holiday_config);
        let reconcile = reconcile::ReconcileService::new(repository.clone(), clock.clone());
        Self {
            assets: assets::AssetsService::new(repository.clone()),
            usage_logs: usage_logs::UsageLogsService::new(
                repository.clone(),
                reconcile.clone(),
                clock.clone(),
            ),
            repairs: repairs::RepairsService::new(repository.clone(), clock.clone()),
            timeline: timeline::TimelineService::new(
                repository.clone(),
                holidays.clone(),
                timeline_config,
                clock.clone(),
            ),
            stats: stats::StatsService::new(repository.clone(), alerts_config, clock),
            projects: projects::ProjectsService::new(repository.clone()),
            reconcile,
            holidays,
        }
    }
}
