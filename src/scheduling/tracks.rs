//! Track assignment for overlapping timeline intervals
//!
//! Greedy interval-graph coloring: intervals are sorted and placed on the
//! first display track whose previous occupant has already ended. Greedy
//! first-fit is color-optimal on interval graphs, so the number of tracks
//! equals the largest set of mutually-overlapping intervals and no
//! backtracking is needed.

use chrono::{DateTime, Duration, Utc};

use crate::models::enums::UsageStatus;
use crate::models::timeline::{TimelineInterval, TrackAssignment};

/// Layout result for one asset's lane
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackLayout {
    pub assignments: Vec<TrackAssignment>,
    /// Number of tracks used; sizes the lane's row height
    pub max_tracks: usize,
}

/// End instant used for overlap decisions.
///
/// An open-ended interval that is currently running (or overdue) keeps
/// growing until it is closed, so it ends "now"; recomputed on every layout
/// pass, never cached. An open-ended interval that has not started (or was
/// completed without an end) gets a nominal one-day span so it still renders.
fn effective_end(interval: &TimelineInterval, now: DateTime<Utc>) -> DateTime<Utc> {
    let end = match interval.end_time {
        Some(end) => end,
        None => match interval.effective_status {
            UsageStatus::InProgress | UsageStatus::Overdue => now,
            _ => interval.start_time + Duration::days(1),
        },
    };
    if end <= interval.start_time {
        // Malformed (start >= end) input is normalized, never rejected
        interval.start_time + Duration::minutes(1)
    } else {
        end
    }
}

/// Assign non-overlapping tracks to one asset's display intervals.
///
/// Sort order is (start ascending, duration ascending): among simultaneous
/// starts the shorter interval places first so a long-running item does not
/// block more tracks than it has to. Placement scans tracks in index order
/// and takes the first whose most-recently-placed interval has ended.
/// Within a track the sorted starts keep ends ordered too, so comparing
/// against the last occupant alone is a sufficient overlap test.
pub fn layout_tracks(intervals: &[TimelineInterval], now: DateTime<Utc>) -> TrackLayout {
    if intervals.is_empty() {
        return TrackLayout {
            assignments: Vec::new(),
            max_tracks: 0,
        };
    }

    let mut sorted: Vec<&TimelineInterval> = intervals.iter().collect();
    sorted.sort_by_key(|iv| {
        let end = effective_end(iv, now);
        (iv.start_time, end - iv.start_time)
    });

    let mut track_ends: Vec<DateTime<Utc>> = Vec::new();
    let mut assignments = Vec::with_capacity(sorted.len());

    for interval in sorted {
        let start = interval.start_time;
        let end = effective_end(interval, now);

        // True overlap is `new.start < existing.end && existing.start < new.end`;
        // start-sorted input reduces it to the first clause.
        let track_index = match track_ends.iter().position(|&track_end| start >= track_end) {
            Some(i) => {
                track_ends[i] = end;
                i
            }
            None => {
                track_ends.push(end);
                track_ends.len() - 1
            }
        };

        assignments.push(TrackAssignment {
            interval: interval.clone(),
            track_index,
        });
    }

    TrackLayout {
        max_tracks: track_ends.len(),
        assignments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn t(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 10, h, m, 0).unwrap()
    }

    fn iv(id: &str, start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> TimelineInterval {
        iv_status(id, start, end, UsageStatus::InProgress)
    }

    fn iv_status(
        id: &str,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
        status: UsageStatus,
    ) -> TimelineInterval {
        TimelineInterval {
            interval_id: id.to_string(),
            asset_id: Uuid::nil(),
            start_time: start,
            end_time: end,
            effective_status: status,
        }
    }

    fn track_of(layout: &TrackLayout, id: &str) -> usize {
        layout
            .assignments
            .iter()
            .find(|a| a.interval.interval_id == id)
            .map(|a| a.track_index)
            .unwrap()
    }

    fn assert_no_collisions(layout: &TrackLayout, now: DateTime<Utc>) {
        for a in &layout.assignments {
            for b in &layout.assignments {
                if a.interval.interval_id == b.interval.interval_id
                    || a.track_index != b.track_index
                {
                    continue;
                }
                let a_end = effective_end(&a.interval, now);
                let b_end = effective_end(&b.interval, now);
                let overlaps =
                    a.interval.start_time < b_end && b.interval.start_time < a_end;
                assert!(
                    !overlaps,
                    "{} and {} share track {}",
                    a.interval.interval_id, b.interval.interval_id, a.track_index
                );
            }
        }
    }

    #[test]
    fn test_three_interval_example() {
        // [9:00-10:00], [9:30-10:30], [10:00-11:00]: the third reuses track 0
        let intervals = vec![
            iv("a", t(9, 0), Some(t(10, 0))),
            iv("b", t(9, 30), Some(t(10, 30))),
            iv("c", t(10, 0), Some(t(11, 0))),
        ];
        let layout = layout_tracks(&intervals, t(12, 0));
        assert_eq!(track_of(&layout, "a"), 0);
        assert_eq!(track_of(&layout, "b"), 1);
        assert_eq!(track_of(&layout, "c"), 0);
        assert_eq!(layout.max_tracks, 2);
    }

    #[test]
    fn test_tracks_equal_clique_size() {
        // Four intervals, three mutually overlapping at 9:45
        let intervals = vec![
            iv("a", t(9, 0), Some(t(10, 0))),
            iv("b", t(9, 15), Some(t(11, 0))),
            iv("c", t(9, 30), Some(t(9, 50))),
            iv("d", t(10, 30), Some(t(12, 0))),
        ];
        let layout = layout_tracks(&intervals, t(13, 0));
        assert_eq!(layout.max_tracks, 3);
        assert_no_collisions(&layout, t(13, 0));
    }

    #[test]
    fn test_disjoint_intervals_share_one_track() {
        let intervals = vec![
            iv("a", t(9, 0), Some(t(10, 0))),
            iv("b", t(10, 0), Some(t(11, 0))),
            iv("c", t(11, 0), Some(t(12, 0))),
        ];
        let layout = layout_tracks(&intervals, t(13, 0));
        assert_eq!(layout.max_tracks, 1);
    }

    #[test]
    fn test_equal_start_shorter_first() {
        let intervals = vec![
            iv("long", t(9, 0), Some(t(17, 0))),
            iv("short", t(9, 0), Some(t(9, 30))),
        ];
        let layout = layout_tracks(&intervals, t(18, 0));
        // Shorter of two simultaneous starts takes the lower track
        assert_eq!(track_of(&layout, "short"), 0);
        assert_eq!(track_of(&layout, "long"), 1);
    }

    #[test]
    fn test_open_ended_running_grows_to_now() {
        let now = t(15, 0);
        let intervals = vec![
            iv_status("open", t(9, 0), None, UsageStatus::InProgress),
            iv("later", t(14, 0), Some(t(14, 30))),
        ];
        let layout = layout_tracks(&intervals, now);
        // The running interval still covers 14:00, forcing a second track
        assert_eq!(layout.max_tracks, 2);
        assert_no_collisions(&layout, now);
    }

    #[test]
    fn test_open_ended_not_started_spans_one_day() {
        let now = t(8, 0);
        let intervals = vec![
            iv_status("pending", t(9, 0), None, UsageStatus::NotStarted),
            iv("next_morning", t(9, 30), Some(t(10, 0))),
        ];
        let layout = layout_tracks(&intervals, now);
        assert_eq!(layout.max_tracks, 2);
    }

    #[test]
    fn test_malformed_interval_is_clamped() {
        // start after end: normalized to a minimum positive span, not dropped
        let intervals = vec![
            iv("bad", t(10, 0), Some(t(9, 0))),
            iv("good", t(10, 30), Some(t(11, 0))),
        ];
        let layout = layout_tracks(&intervals, t(12, 0));
        assert_eq!(layout.assignments.len(), 2);
        assert_eq!(layout.max_tracks, 1);
    }

    #[test]
    fn test_deterministic() {
        let intervals = vec![
            iv("a", t(9, 0), Some(t(10, 0))),
            iv("b", t(9, 0), Some(t(10, 0))),
            iv("c", t(9, 30), Some(t(11, 0))),
        ];
        let first = layout_tracks(&intervals, t(12, 0));
        let second = layout_tracks(&intervals, t(12, 0));
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_input() {
        let layout = layout_tracks(&[], t(9, 0));
        assert!(layout.assignments.is_empty());
        assert_eq!(layout.max_tracks, 0);
    }
}
