use anyhow::Result;
use chrono::NaiveDate;
use tracing::{debug, info};

use crate::{
    habits::{Checklist, TASK_COUNT},
    storage::{entities::DailyRecordEntity, record_storage::RecordStorage},
    streak::compute_streak,
    utils::clock::Clock,
};

use super::output::report::{DayReport, StreakReport};

/// Message printed after a successful save.
pub const SAVE_CONFIRMATION: &str = "Saved. Consistency beats perfection";

/// Loads the store and describes `date`. The streak is always the one ending today.
pub async fn show_day(
    storage: &impl RecordStorage,
    clock: &impl Clock,
    date: NaiveDate,
) -> Result<(DayReport, Checklist)> {
    let table = storage.load().await?;
    let streak = compute_streak(&table, clock.today());
    debug!("Showing {date} out of {} records", table.len());
    Ok(DayReport::new(date, table.get(date), streak))
}

/// Saves `checklist` as the complete state of `date`, replacing whatever was stored before, and
/// describes the result.
pub async fn save_day(
    storage: &impl RecordStorage,
    clock: &impl Clock,
    date: NaiveDate,
    checklist: &Checklist,
) -> Result<(DayReport, Checklist)> {
    let mut table = storage.load().await?;
    info!("Saving {date} with {} of {TASK_COUNT} done", checklist.done_count());
    let record = DailyRecordEntity::from_checklist(date, checklist);
    storage.save(&mut table, record).await?;

    // Streak is computed over the updated table
    let streak = compute_streak(&table, clock.today());
    let (mut report, checklist) = DayReport::new(date, table.get(date), streak);
    report.message = Some(SAVE_CONFIRMATION);
    Ok((report, checklist))
}

/// Streak of consecutive saved days ending at `date`.
pub async fn streak_at(storage: &impl RecordStorage, date: NaiveDate) -> Result<StreakReport> {
    let table = storage.load().await?;
    Ok(StreakReport {
        date,
        streak: compute_streak(&table, date),
    })
}
