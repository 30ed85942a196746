use chrono::NaiveDate;

use super::entities::DailyRecordEntity;

/// In-memory copy of the whole data file. Rows are kept in file order, nothing is sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordTable {
    records: Vec<DailyRecordEntity>,
}

impl RecordTable {
    pub fn new(records: Vec<DailyRecordEntity>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[DailyRecordEntity] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Last record stored for `date`. Only files edited by hand can have more than one.
    pub fn get(&self, date: NaiveDate) -> Option<&DailyRecordEntity> {
        self.records.iter().rev().find(|v| v.date == date)
    }

    /// Drops every record sharing the date of `record` and appends `record` at the end. The new
    /// values replace the old ones entirely, nothing is merged.
    pub fn upsert(&mut self, record: DailyRecordEntity) {
        self.records.retain(|v| v.date != record.date);
        self.records.push(record);
    }

    /// Dates of all records, oldest first.
    pub fn sorted_dates(&self) -> Vec<NaiveDate> {
        let mut dates = self.records.iter().map(|v| v.date).collect::<Vec<_>>();
        dates.sort();
        dates
    }
}
