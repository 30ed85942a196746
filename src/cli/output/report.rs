use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    habits::{Checklist, TaskKey, TASK_COUNT},
    storage::entities::DailyRecordEntity,
};

/// Everything shown about a single day. Also the shape of `--json` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayReport {
    pub date: NaiveDate,
    /// Whether the day has a record in the data file.
    pub saved: bool,
    pub score: u32,
    pub total: usize,
    /// Streak anchored at today, not at `date`.
    pub streak: u32,
    /// Finished items, habit ids or `#position` for unassigned slots.
    pub done: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl DayReport {
    pub fn new(
        date: NaiveDate,
        record: Option<&DailyRecordEntity>,
        streak: u32,
    ) -> (Self, Checklist) {
        let checklist = record.map(|v| v.checklist()).unwrap_or_default();
        let done = (1..=TASK_COUNT)
            .map(TaskKey::at)
            .filter(|key| checklist.is_done(*key))
            .map(|key| key.to_string())
            .collect();
        let report = Self {
            date,
            saved: record.is_some(),
            // The stored score is shown as is, even if the file was edited by hand.
            score: record
                .map(|v| v.score)
                .unwrap_or_else(|| checklist.done_count()),
            total: TASK_COUNT,
            streak,
            done,
            message: None,
        };
        (report, checklist)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreakReport {
    pub date: NaiveDate,
    pub streak: u32,
}
