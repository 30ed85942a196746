use chrono::NaiveDate;
use tracing::trace;

use crate::storage::table::RecordTable;

/// Counts consecutive days with a saved record, ending at `today` and going backwards.
///
/// The run is anchored at `today`. If today hasn't been saved the result is 0, even when every
/// day up to yesterday has a record. The scan walks the dates from the most recent one and stops
/// at the first date that isn't the expected one, so a gap ends the streak for good.
pub fn compute_streak(table: &RecordTable, today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut expected = today;

    for date in table.sorted_dates().into_iter().rev() {
        if date != expected {
            trace!("Streak stopped at {date}, expected {expected}");
            break;
        }
        streak += 1;
        match expected.pred_opt() {
            Some(v) => expected = v,
            None => break,
        }
    }

    streak
}
