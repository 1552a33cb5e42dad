//! Analysis window construction.

use chrono::{Datelike, Days, NaiveDate};
use tp_common::WeekRange;

/// The `weeks` full Monday-Sunday weeks immediately before the week
/// containing `today`.
///
/// The current, partial week is never included. `today` is passed in so the
/// result does not depend on a clock.
pub fn compute_week_ranges(today: NaiveDate, weeks: u32) -> Vec<WeekRange> {
    let since_monday = u64::from(today.weekday().num_days_from_monday());
    let Some(current_monday) = today.checked_sub_days(Days::new(since_monday)) else {
        return Vec::new();
    };
    let Some(first) = current_monday.checked_sub_days(Days::new(7 * u64::from(weeks))) else {
        return Vec::new();
    };

    (0..u64::from(weeks))
        .filter_map(|i| first.checked_add_days(Days::new(7 * i)))
        .map(WeekRange::starting)
        .collect()
}
