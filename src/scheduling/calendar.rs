//! Calendar window construction and day classification
//!
//! The timeline's logical day does not begin at midnight: with a day-start
//! hour of 7, a night shift ending at 02:00 still belongs to the previous
//! day's column. The window builder emits one instant per logical day, each
//! pinned to that hour; classification shades each day from the regional
//! holiday table, falling back to plain weekday/weekend.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc, Weekday};

use crate::models::enums::DayKind;
use crate::models::holiday::{DayClassification, HolidayTable};

/// Start instant of the logical day containing `reference`.
///
/// Before the day-start hour the reference still belongs to the previous
/// logical day.
pub fn logical_day_start(reference: DateTime<Utc>, day_start_hour: u32) -> DateTime<Utc> {
    let hour = day_start_hour.min(23);
    let mut base = reference
        .date_naive()
        .and_hms_opt(hour, 0, 0)
        .expect("hour is clamped to 0..=23")
        .and_utc();
    if reference.hour() < hour {
        base -= Duration::days(1);
    }
    base
}

/// Ordered day-start instants covering `days_before` days before and
/// `days_after` days after the reference's logical day.
pub fn day_starts(
    reference: DateTime<Utc>,
    days_before: u32,
    days_after: u32,
    day_start_hour: u32,
) -> Vec<DateTime<Utc>> {
    let base = logical_day_start(reference, day_start_hour);
    (-(days_before as i64)..=days_after as i64)
        .map(|offset| base + Duration::days(offset))
        .collect()
}

/// Classify one calendar date against the holiday table.
///
/// A table entry wins over the weekday fallback: a true holiday splits into
/// high/low wage bands, a false entry is a make-up working day. Without an
/// entry the date is plain weekend rest or a weekday. Missing table data for
/// a whole year simply degrades every date to the fallback.
pub fn classify_day(date: NaiveDate, holidays: &HolidayTable) -> DayClassification {
    if let Some(info) = holidays.get(&date) {
        let kind = if info.holiday {
            if info.wage == 3 {
                DayKind::PublicHolidayHighWage
            } else {
                DayKind::PublicHolidayLowWage
            }
        } else {
            DayKind::WorkdayOverride
        };
        return DayClassification {
            kind,
            name: Some(info.name.clone()),
        };
    }
    let kind = match date.weekday() {
        Weekday::Sat | Weekday::Sun => DayKind::WeekendRest,
        _ => DayKind::Weekday,
    };
    DayClassification { kind, name: None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::holiday::HolidayDetail;
    use chrono::TimeZone;

    fn detail(date: NaiveDate, holiday: bool, wage: i16, name: &str) -> HolidayDetail {
        HolidayDetail {
            holiday,
            name: name.to_string(),
            wage,
            date,
            rest: None,
            after: None,
            target: None,
        }
    }

    #[test]
    fn test_window_length_and_hour() {
        let reference = Utc.with_ymd_and_hms(2025, 6, 10, 12, 0, 0).unwrap();
        let days = day_starts(reference, 7, 14, 7);
        assert_eq!(days.len(), 22);
        for day in &days {
            assert_eq!(day.hour(), 7);
            assert_eq!(day.minute(), 0);
        }
        assert_eq!(days[0], Utc.with_ymd_and_hms(2025, 6, 3, 7, 0, 0).unwrap());
        assert_eq!(days[7], Utc.with_ymd_and_hms(2025, 6, 10, 7, 0, 0).unwrap());
        assert_eq!(days[21], Utc.with_ymd_and_hms(2025, 6, 24, 7, 0, 0).unwrap());
    }

    #[test]
    fn test_early_morning_belongs_to_previous_day() {
        // 02:00 is before the 7 AM boundary: still the June 9 logical day
        let reference = Utc.with_ymd_and_hms(2025, 6, 10, 2, 0, 0).unwrap();
        assert_eq!(
            logical_day_start(reference, 7),
            Utc.with_ymd_and_hms(2025, 6, 9, 7, 0, 0).unwrap()
        );
        // at the boundary itself the new day has begun
        let at_seven = Utc.with_ymd_and_hms(2025, 6, 10, 7, 0, 0).unwrap();
        assert_eq!(
            logical_day_start(at_seven, 7),
            Utc.with_ymd_and_hms(2025, 6, 10, 7, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_midnight_day_start() {
        let reference = Utc.with_ymd_and_hms(2025, 6, 10, 0, 30, 0).unwrap();
        assert_eq!(
            logical_day_start(reference, 0),
            Utc.with_ymd_and_hms(2025, 6, 10, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_classify_holiday_wage_bands() {
        let mut table = HolidayTable::new();
        let high = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
        let low = NaiveDate::from_ymd_opt(2025, 10, 4).unwrap();
        table.insert(high, detail(high, true, 3, "National Day"));
        table.insert(low, detail(low, true, 2, "National Day"));

        assert_eq!(classify_day(high, &table).kind, DayKind::PublicHolidayHighWage);
        assert_eq!(classify_day(low, &table).kind, DayKind::PublicHolidayLowWage);
        assert_eq!(
            classify_day(high, &table).name.as_deref(),
            Some("National Day")
        );
    }

    #[test]
    fn test_classify_workday_override() {
        // 2025-09-28 is a Sunday swapped in as a working day
        let mut table = HolidayTable::new();
        let date = NaiveDate::from_ymd_opt(2025, 9, 28).unwrap();
        table.insert(date, detail(date, false, 1, "make-up shift"));
        assert_eq!(classify_day(date, &table).kind, DayKind::WorkdayOverride);
    }

    #[test]
    fn test_classify_fallback_without_table_entry() {
        let table = HolidayTable::new();
        // 2025-06-14 is a Saturday, 2025-06-10 a Tuesday
        let saturday = NaiveDate::from_ymd_opt(2025, 6, 14).unwrap();
        let tuesday = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        assert_eq!(classify_day(saturday, &table).kind, DayKind::WeekendRest);
        assert_eq!(classify_day(tuesday, &table).kind, DayKind::Weekday);
        assert!(classify_day(tuesday, &table).name.is_none());
    }
}
