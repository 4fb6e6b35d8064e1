//! Timeline view assembly
//!
//! The read-only path: pulls the usage-log set, fans each log out into one
//! display interval per selected config, lays the intervals out on
//! collision-free tracks per chamber and pairs the result with the
//! classified calendar window. Never writes anything.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Datelike, Duration};
use uuid::Uuid;

use crate::{
    config::TimelineConfig,
    error::AppResult,
    models::enums::AssetType,
    models::project::{Project, TestProfile},
    models::timeline::{AssetLane, CalendarDay, TimelineBar, TimelineInterval, TimelineView},
    models::usage_log::UsageLog,
    repository::Repository,
    scheduling::{classify_day, day_starts, effective_status, layout_tracks, logical_day_start},
};

use super::clock::Clock;
use super::holidays::HolidayService;

#[derive(Clone)]
pub struct TimelineService {
    repository: Repository,
    holidays: HolidayService,
    config: TimelineConfig,
    clock: Arc<dyn Clock>,
}

/// Everything a bar needs besides its track index
struct BarMeta {
    log_id: Uuid,
    config_id: Option<Uuid>,
    label: String,
    operator: String,
    notes: Option<String>,
}

impl TimelineService {
    pub fn new(
        repository: Repository,
        holidays: HolidayService,
        config: TimelineConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            holidays,
            config,
            clock,
        }
    }

    /// Build the render feed for the scrollable timeline
    pub async fn build(
        &self,
        days_before: Option<u32>,
        days_after: Option<u32>,
        region: Option<String>,
    ) -> AppResult<TimelineView> {
        let now = self.clock.now();
        let days_before = days_before.unwrap_or(self.config.days_before);
        let days_after = days_after.unwrap_or(self.config.days_after);
        let hour = self.config.day_start_hour;

        let day_list = day_starts(now, days_before, days_after, hour);
        let window_start = day_list[0];
        let window_end = *day_list.last().expect("window is never empty") + Duration::days(1);

        let region = region.unwrap_or_else(|| self.holidays.default_region().to_string());
        let (holiday_table, warnings) = self
            .holidays
            .table_for_years(window_start.year(), window_end.year(), &region)
            .await;

        let today = logical_day_start(now, hour);
        let days = day_list
            .into_iter()
            .map(|starts_at| {
                let date = starts_at.date_naive();
                let classification = classify_day(date, &holiday_table);
                CalendarDay {
                    starts_at,
                    date,
                    kind: classification.kind,
                    name: classification.name,
                    is_today: starts_at == today,
                }
            })
            .collect();

        let chambers = self
            .repository
            .assets
            .list(Some(AssetType::Chamber), None)
            .await?;
        let logs = self.repository.usage_logs.list_all().await?;
        let projects = self.repository.projects.list().await?;
        let profiles = self.repository.projects.list_profiles().await?;

        let project_by_id: HashMap<Uuid, &Project> =
            projects.iter().map(|p| (p.id, p)).collect();
        let profile_by_id: HashMap<Uuid, &TestProfile> =
            profiles.iter().map(|p| (p.id, p)).collect();

        let mut intervals_by_asset: HashMap<Uuid, Vec<TimelineInterval>> = HashMap::new();
        let mut meta_by_interval: HashMap<String, BarMeta> = HashMap::new();

        for log in &logs {
            let status = effective_status(log, now);
            let project = log.project_id.and_then(|id| project_by_id.get(&id).copied());
            let profile = log
                .test_profile_id
                .and_then(|id| profile_by_id.get(&id).copied());

            let configs = log.selected_config_ids.as_deref().unwrap_or_default();
            if configs.is_empty() {
                let interval_id = log.id.to_string();
                meta_by_interval.insert(
                    interval_id.clone(),
                    bar_meta(log, project, profile, None),
                );
                intervals_by_asset.entry(log.asset_id).or_default().push(
                    TimelineInterval {
                        interval_id,
                        asset_id: log.asset_id,
                        start_time: log.start_time,
                        end_time: log.end_time,
                        effective_status: status,
                    },
                );
            } else {
                for config_id in configs {
                    let interval_id = format!("{}:{}", log.id, config_id);
                    meta_by_interval.insert(
                        interval_id.clone(),
                        bar_meta(log, project, profile, Some(*config_id)),
                    );
                    intervals_by_asset.entry(log.asset_id).or_default().push(
                        TimelineInterval {
                            interval_id,
                            asset_id: log.asset_id,
                            start_time: log.start_time,
                            end_time: log.end_time,
                            effective_status: status,
                        },
                    );
                }
            }
        }

        let mut lanes = Vec::with_capacity(chambers.len());
        for chamber in &chambers {
            let intervals = intervals_by_asset.remove(&chamber.id).unwrap_or_default();
            let layout = layout_tracks(&intervals, now);

            let bars = layout
                .assignments
                .into_iter()
                .filter_map(|assignment| {
                    let meta = meta_by_interval.get(&assignment.interval.interval_id)?;
                    Some(TimelineBar {
                        display_id: assignment.interval.interval_id.clone(),
                        log_id: meta.log_id,
                        config_id: meta.config_id,
                        label: meta.label.clone(),
                        operator: meta.operator.clone(),
                        start_time: assignment.interval.start_time,
                        end_time: assignment.interval.end_time,
                        effective_status: assignment.interval.effective_status,
                        track_index: assignment.track_index,
                        notes: meta.notes.clone(),
                    })
                })
                .collect();

            lanes.push(AssetLane {
                asset_id: chamber.id,
                asset_name: chamber.name.clone(),
                max_tracks: layout.max_tracks,
                bars,
            });
        }

        Ok(TimelineView {
            window_start,
            window_end,
            day_start_hour: hour,
            days,
            lanes,
            warnings,
        })
    }
}

/// Compose a bar caption: project, config, waterfall and profile names when
/// known, the operator as the fallback
fn bar_meta(
    log: &UsageLog,
    project: Option<&Project>,
    profile: Option<&TestProfile>,
    config_id: Option<Uuid>,
) -> BarMeta {
    let mut parts: Vec<String> = Vec::new();
    if let Some(project) = project {
        parts.push(project.name.clone());
        if let Some(config_id) = config_id {
            if let Some(config) = project.configs.0.iter().find(|c| c.id == config_id) {
                parts.push(config.name.clone());
            }
        }
    }
    if let Some(waterfall) = &log.selected_waterfall {
        parts.push(format!("WF:{}", waterfall));
    }
    if let Some(profile) = profile {
        parts.push(profile.name.clone());
    }

    let label = if parts.is_empty() {
        log.operator.clone()
    } else {
        parts.join(" - ")
    };

    BarMeta {
        log_id: log.id,
        config_id,
        label,
        operator: log.operator.clone(),
        notes: log.notes.clone(),
    }
}
