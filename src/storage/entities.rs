use chrono::NaiveDate;

use crate::habits::{Checklist, TASK_COUNT};

/// One day of the checklist as it is kept in the data file.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct DailyRecordEntity {
    pub date: NaiveDate,
    pub tasks: [bool; TASK_COUNT],
    /// Number of finished tasks at the moment of saving. Files edited by hand may disagree with
    /// `tasks`, which is tolerated when reading.
    pub score: u32,
}

impl DailyRecordEntity {
    pub fn new(date: NaiveDate, tasks: [bool; TASK_COUNT]) -> Self {
        Self {
            date,
            tasks,
            score: score_of(&tasks),
        }
    }

    pub fn from_checklist(date: NaiveDate, checklist: &Checklist) -> Self {
        Self::new(date, checklist.to_tasks())
    }

    pub fn checklist(&self) -> Checklist {
        Checklist::from_tasks(&self.tasks)
    }
}

pub fn score_of(tasks: &[bool; TASK_COUNT]) -> u32 {
    tasks.iter().filter(|v| **v).count() as u32
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::habits::{Checklist, TASK_COUNT};

    use super::DailyRecordEntity;

    #[test]
    fn test_score_counts_finished_tasks() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        for finished in 0..=TASK_COUNT {
            let mut tasks = [false; TASK_COUNT];
            // Spread them out so positions other than the first ones are covered too.
            for index in 0..finished {
                tasks[(index * 7) % TASK_COUNT] = true;
            }
            let record = DailyRecordEntity::new(date, tasks);
            assert_eq!(record.score as usize, tasks.iter().filter(|v| **v).count());
            assert!(record.score <= TASK_COUNT as u32);
        }
    }

    #[test]
    fn test_checklist_round_trip() -> anyhow::Result<()> {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let checklist = Checklist::from_selection(&["isha", "workout", "20"])?;
        let record = DailyRecordEntity::from_checklist(date, &checklist);

        assert_eq!(record.score, 3);
        assert_eq!(record.checklist(), checklist);
        Ok(())
    }
}
