//!  Storage is organized through [record_storage::CsvRecordStorage].
//!  The basic idea is:
//!   - There is a single data file with one row per day.
//!   - The file is read into a [table::RecordTable] as a whole and written back as a whole.
//!   - A day is stored as positional task flags plus the score at the time of saving.

pub mod csv_format;
pub mod entities;
pub mod record_storage;
pub mod table;
