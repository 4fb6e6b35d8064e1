//! Holiday table and day classification types

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::enums::DayKind;

/// One entry from a regional holiday dataset.
///
/// `holiday == false` marks a make-up working day (a weekend swapped in to
/// compensate for a long holiday break). `wage` follows the dataset's pay
/// multiplier bands: 1 = normal, 2 = low-band holiday, 3 = high-band holiday.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HolidayDetail {
    pub holiday: bool,
    pub name: String,
    pub wage: i16,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// Wire shape of a regional holiday file: `{ code, holiday: { "MM-DD": {...} } }`
#[derive(Debug, Deserialize)]
pub struct HolidayFile {
    pub code: i32,
    #[serde(default)]
    pub holiday: Option<IndexMap<String, HolidayDetail>>,
}

/// Holiday entries keyed by calendar date, insertion order preserved
pub type HolidayTable = IndexMap<NaiveDate, HolidayDetail>;

/// Result of classifying one calendar day against the holiday table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DayClassification {
    pub kind: DayKind,
    /// Holiday or make-up-day name when one applies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
