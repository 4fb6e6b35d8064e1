//! Effective status resolution and the occupancy predicate
//!
//! The stored status of a usage log is what the user last set; the effective
//! status folds the clock in. A record can become overdue without anyone
//! writing to it, so display and occupancy decisions always go through
//! [`effective_status`] instead of reading the stored value.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::models::enums::UsageStatus;
use crate::models::usage_log::UsageLog;

/// Resolve the effective status of a usage window at `now`.
///
/// Rules, in precedence order:
/// - a stored `completed` is final and never overridden by the clock;
/// - before `start` the record is `not-started`;
/// - past a present `end` the record is `overdue` (completion requires an
///   explicit action, the clock alone never completes a record);
/// - otherwise the record is `in-progress`. An absent `end` means the run is
///   still open: it stays `in-progress` indefinitely and can never be
///   `overdue` until an end time exists.
pub fn resolve(
    stored: UsageStatus,
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> UsageStatus {
    if stored == UsageStatus::Completed {
        return UsageStatus::Completed;
    }
    if now < start {
        return UsageStatus::NotStarted;
    }
    match end {
        Some(end) if now > end => UsageStatus::Overdue,
        _ => UsageStatus::InProgress,
    }
}

/// Effective status of a usage log at `now`
pub fn effective_status(log: &UsageLog, now: DateTime<Utc>) -> UsageStatus {
    resolve(log.status, log.start_time, log.end_time, now)
}

/// Does this log currently hold its asset busy?
///
/// The sole boolean test behind the in-use asset status: `in-progress` and
/// `overdue` occupy, `not-started` and `completed` never do.
pub fn is_occupying(log: &UsageLog, now: DateTime<Utc>) -> bool {
    matches!(
        effective_status(log, now),
        UsageStatus::InProgress | UsageStatus::Overdue
    )
}

/// Lenient instant parser for timestamps arriving from clients and legacy
/// exports. Unparsable input yields `None` (treated as an absent timestamp)
/// rather than an error; a degraded-but-visible status beats a crash.
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    // Naive fallbacks, all treated as already-UTC
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|n| n.and_utc());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn t(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 10, h, m, 0).unwrap()
    }

    fn log(
        status: UsageStatus,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    ) -> UsageLog {
        UsageLog {
            id: Uuid::new_v4(),
            asset_id: Uuid::new_v4(),
            project_id: None,
            test_profile_id: None,
            operator: "chen".to_string(),
            start_time: start,
            end_time: end,
            status,
            notes: None,
            selected_config_ids: None,
            selected_waterfall: None,
            created_at: start,
        }
    }

    #[test]
    fn test_completed_is_final() {
        // Explicit completion wins no matter where the clock is
        for now in [t(8, 0), t(9, 30), t(12, 0)] {
            let l = log(UsageStatus::Completed, t(9, 0), Some(t(10, 0)));
            assert_eq!(effective_status(&l, now), UsageStatus::Completed);
        }
        let open = log(UsageStatus::Completed, t(9, 0), None);
        assert_eq!(effective_status(&open, t(23, 0)), UsageStatus::Completed);
    }

    #[test]
    fn test_not_started_before_start() {
        let l = log(UsageStatus::NotStarted, t(9, 0), Some(t(10, 0)));
        assert_eq!(effective_status(&l, t(8, 59)), UsageStatus::NotStarted);
        let l = log(UsageStatus::InProgress, t(9, 0), None);
        assert_eq!(effective_status(&l, t(8, 0)), UsageStatus::NotStarted);
    }

    #[test]
    fn test_overdue_past_end() {
        // start=09:00 end=10:00 stored=in-progress now=10:30 -> overdue
        let l = log(UsageStatus::InProgress, t(9, 0), Some(t(10, 0)));
        assert_eq!(effective_status(&l, t(10, 30)), UsageStatus::Overdue);
        // stored not-started records go overdue too once the window is past
        let l = log(UsageStatus::NotStarted, t(9, 0), Some(t(10, 0)));
        assert_eq!(effective_status(&l, t(11, 0)), UsageStatus::Overdue);
    }

    #[test]
    fn test_in_progress_within_window() {
        let l = log(UsageStatus::NotStarted, t(9, 0), Some(t(10, 0)));
        assert_eq!(effective_status(&l, t(9, 30)), UsageStatus::InProgress);
        // exactly at end is not yet overdue
        assert_eq!(effective_status(&l, t(10, 0)), UsageStatus::InProgress);
    }

    #[test]
    fn test_open_ended_never_overdue() {
        let l = log(UsageStatus::InProgress, t(9, 0), None);
        assert_eq!(effective_status(&l, t(9, 1)), UsageStatus::InProgress);
        let much_later = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(effective_status(&l, much_later), UsageStatus::InProgress);
    }

    #[test]
    fn test_occupying_matches_effective_status() {
        let cases = [
            (log(UsageStatus::NotStarted, t(9, 0), Some(t(10, 0))), t(8, 0), false),
            (log(UsageStatus::NotStarted, t(9, 0), Some(t(10, 0))), t(9, 30), true),
            (log(UsageStatus::InProgress, t(9, 0), Some(t(10, 0))), t(10, 30), true),
            (log(UsageStatus::Completed, t(9, 0), Some(t(10, 0))), t(9, 30), false),
        ];
        for (l, now, expected) in cases {
            assert_eq!(is_occupying(&l, now), expected, "at {}", now);
        }
    }

    #[test]
    fn test_parse_instant_formats() {
        assert!(parse_instant("2025-06-10T09:00:00Z").is_some());
        assert!(parse_instant("2025-06-10T09:00:00+08:00").is_some());
        assert!(parse_instant("2025-06-10T09:00:00").is_some());
        assert!(parse_instant("2025-06-10 09:00:00").is_some());
        assert!(parse_instant("2025-06-10 09:00").is_some());
        assert_eq!(
            parse_instant("2025-06-10").unwrap(),
            Utc.with_ymd_and_hms(2025, 6, 10, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_instant_fail_soft() {
        assert!(parse_instant("").is_none());
        assert!(parse_instant("   ").is_none());
        assert!(parse_instant("not a date").is_none());
        assert!(parse_instant("2025-13-40").is_none());
    }
}
