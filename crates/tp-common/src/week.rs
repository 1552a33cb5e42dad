//! Monday-aligned analysis weeks.

use crate::error::{Error, Result};
use chrono::{Datelike, Days, NaiveDate, NaiveTime};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const SECONDS_PER_DAY: i64 = 86_400;

/// A 7-day analysis bucket, inclusive on both calendar days.
///
/// A timestamp belongs to the range when it falls in
/// `[start 00:00:00, end 23:59:59]` UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
pub struct WeekRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekRange {
    /// Week starting on `start` and ending six days later.
    pub fn starting(start: NaiveDate) -> Self {
        let end = start.checked_add_days(Days::new(6)).unwrap_or(start);
        Self { start, end }
    }

    /// First second of the range as Unix seconds.
    pub fn start_epoch(&self) -> i64 {
        self.start.and_time(NaiveTime::MIN).and_utc().timestamp()
    }

    /// Last second (23:59:59 on `end`) as Unix seconds.
    pub fn end_epoch(&self) -> i64 {
        self.end.and_time(NaiveTime::MIN).and_utc().timestamp() + SECONDS_PER_DAY - 1
    }

    /// Whether a Unix timestamp falls inside the inclusive bounds.
    pub fn contains(&self, epoch: i64) -> bool {
        epoch >= self.start_epoch() && epoch <= self.end_epoch()
    }

    /// Whether the range starts on a Monday.
    pub fn is_monday_aligned(&self) -> bool {
        self.start.weekday() == chrono::Weekday::Mon
    }
}

impl std::fmt::Display for WeekRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Check that ranges are well formed, sorted, and pairwise disjoint.
///
/// Gaps are allowed (low-activity weeks may have been removed); overlaps
/// are rejected because bucket assignment would be ambiguous.
pub fn validate_partition(ranges: &[WeekRange]) -> Result<()> {
    for range in ranges {
        if range.end < range.start {
            return Err(Error::InvalidWeekRange {
                start: range.start.to_string(),
                end: range.end.to_string(),
            });
        }
    }
    for pair in ranges.windows(2) {
        if pair[1].start <= pair[0].end {
            return Err(Error::OverlappingWeekRanges {
                previous_end: pair[0].end.to_string(),
                next_start: pair[1].start.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn bounds_are_inclusive_to_end_of_day() {
        let w = WeekRange::starting(date(2026, 1, 5));
        assert_eq!(w.end, date(2026, 1, 11));
        assert_eq!(w.end_epoch() - w.start_epoch(), 7 * SECONDS_PER_DAY - 1);
        assert!(w.contains(w.start_epoch()));
        assert!(w.contains(w.end_epoch()));
        assert!(!w.contains(w.end_epoch() + 1));
        assert!(!w.contains(w.start_epoch() - 1));
        assert!(w.is_monday_aligned());
    }

    #[test]
    fn contiguous_ranges_validate() {
        let ranges: Vec<_> = (0..4)
            .map(|i| WeekRange::starting(date(2026, 1, 5) + Days::new(7 * i)))
            .collect();
        assert!(validate_partition(&ranges).is_ok());
        assert!(validate_partition(&[]).is_ok());
    }

    #[test]
    fn overlapping_ranges_are_rejected() {
        let ranges = [
            WeekRange::starting(date(2026, 1, 5)),
            WeekRange::starting(date(2026, 1, 8)),
        ];
        let err = validate_partition(&ranges).unwrap_err();
        assert_eq!(err.code(), 21);
    }

    #[test]
    fn reversed_range_is_rejected() {
        let bad = WeekRange {
            start: date(2026, 1, 11),
            end: date(2026, 1, 5),
        };
        assert!(matches!(
            validate_partition(&[bad]),
            Err(Error::InvalidWeekRange { .. })
        ));
    }

    #[test]
    fn display_shows_both_days() {
        let w = WeekRange::starting(date(2026, 2, 23));
        assert_eq!(w.to_string(), "2026-02-23..2026-03-01");
    }
}
