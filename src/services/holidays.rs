//! Holiday table loading for timeline day classification
//!
//! Tables come from, in order: the builtin dataset compiled into the binary,
//! a local data directory, then a remote endpoint serving
//! `{base_url}/{region}/{year}.json`. A year with no data anywhere degrades
//! to an empty table plus a warning string; the timeline still renders with
//! plain weekday/weekend shading. This is the one potentially slow external
//! call in the system, so the fetch carries its own timeout and can never
//! fail the caller.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use tokio::sync::RwLock;

use crate::config::HolidayConfig;
use crate::models::holiday::{HolidayFile, HolidayTable};

/// Dataset shipped with the binary (the 2025 mainland-China calendar)
static BUILTIN_CN_2025: Lazy<HolidayTable> = Lazy::new(|| {
    parse_table(include_str!("data/holidays_cn_2025.json"))
        .expect("builtin holiday dataset is valid")
});

#[derive(Clone)]
pub struct HolidayService {
    config: HolidayConfig,
    client: reqwest::Client,
    cache: Arc<RwLock<HashMap<(i32, String), Arc<HolidayTable>>>>,
}

/// Parse one regional holiday file into a date-keyed table
fn parse_table(text: &str) -> Result<HolidayTable, String> {
    let file: HolidayFile =
        serde_json::from_str(text).map_err(|e| format!("invalid holiday data: {}", e))?;
    if file.code != 0 {
        return Err(format!("holiday data reported error code {}", file.code));
    }
    let mut table = HolidayTable::new();
    for detail in file.holiday.unwrap_or_default().into_values() {
        table.insert(detail.date, detail);
    }
    Ok(table)
}

impl HolidayService {
    pub fn new(config: HolidayConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()
            .unwrap_or_default();
        Self {
            config,
            client,
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Default region from configuration
    pub fn default_region(&self) -> &str {
        &self.config.region
    }

    /// Merged table for every year in `start_year..=end_year`, plus one
    /// warning per year whose data could not be loaded. Never errors.
    pub async fn table_for_years(
        &self,
        start_year: i32,
        end_year: i32,
        region: &str,
    ) -> (HolidayTable, Vec<String>) {
        let mut merged = HolidayTable::new();
        let mut warnings = Vec::new();
        for year in start_year..=end_year {
            match self.year_table(year, region).await {
                Ok(table) => {
                    for (date, detail) in table.iter() {
                        merged.insert(*date, detail.clone());
                    }
                }
                Err(warning) => {
                    tracing::warn!(year, region, "{}", warning);
                    warnings.push(warning);
                }
            }
        }
        (merged, warnings)
    }

    async fn year_table(&self, year: i32, region: &str) -> Result<Arc<HolidayTable>, String> {
        let key = (year, region.to_string());
        if let Some(table) = self.cache.read().await.get(&key) {
            return Ok(table.clone());
        }

        let table = Arc::new(self.load_year(year, region).await?);
        self.cache.write().await.insert(key, table.clone());
        Ok(table)
    }

    async fn load_year(&self, year: i32, region: &str) -> Result<HolidayTable, String> {
        if year == 2025 && region == "cn" {
            return Ok(BUILTIN_CN_2025.clone());
        }

        if let Some(dir) = &self.config.data_dir {
            let path = format!("{}/{}/{}.json", dir, region, year);
            match tokio::fs::read_to_string(&path).await {
                Ok(text) => return parse_table(&text),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(format!("holiday file {} unreadable: {}", path, e));
                }
            }
        }

        if let Some(base) = &self.config.base_url {
            let url = format!("{}/{}/{}.json", base.trim_end_matches('/'), region, year);
            let response = self
                .client
                .get(&url)
                .send()
                .await
                .map_err(|e| format!("holiday fetch {} failed: {}", url, e))?;
            if response.status() == reqwest::StatusCode::NOT_FOUND {
                return Err(format!("no holiday data published for {} {}", region, year));
            }
            let text = response
                .error_for_status()
                .map_err(|e| format!("holiday fetch {} failed: {}", url, e))?
                .text()
                .await
                .map_err(|e| format!("holiday fetch {} failed: {}", url, e))?;
            return parse_table(&text);
        }

        Err(format!("no holiday data available for {} {}", region, year))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_builtin_dataset_parses() {
        let table = &*BUILTIN_CN_2025;
        // National Day is a high-wage holiday
        let national = table.get(&d(2025, 10, 1)).unwrap();
        assert!(national.holiday);
        assert_eq!(national.wage, 3);
        // Sunday 2025-09-28 is a make-up working day
        let makeup = table.get(&d(2025, 9, 28)).unwrap();
        assert!(!makeup.holiday);
        assert_eq!(makeup.wage, 1);
    }

    #[test]
    fn test_parse_table_rejects_error_code() {
        assert!(parse_table(r#"{"code":1,"holiday":{}}"#).is_err());
        assert!(parse_table("not json").is_err());
    }

    #[test]
    fn test_missing_year_degrades_to_warning() {
        let service = HolidayService::new(HolidayConfig {
            region: "cn".to_string(),
            base_url: None,
            data_dir: None,
            fetch_timeout_secs: 1,
        });
        let (table, warnings) =
            tokio_test::block_on(service.table_for_years(2030, 2030, "cn"));
        assert!(table.is_empty());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_builtin_served_without_any_source() {
        let service = HolidayService::new(HolidayConfig {
            region: "cn".to_string(),
            base_url: None,
            data_dir: None,
            fetch_timeout_secs: 1,
        });
        let (table, warnings) =
            tokio_test::block_on(service.table_for_years(2025, 2025, "cn"));
        assert!(table.contains_key(&d(2025, 1, 1)));
        assert!(warnings.is_empty());
    }
}
