//! Reading and writing the comma separated data file.
//!
//! The layout is `Date,Task_1,...,Task_20,Score`. Flags are written as `True`/`False` to stay
//! readable by the spreadsheet tooling that produced the first data files.

use std::collections::HashMap;

use anyhow::{bail, Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use tracing::{trace, warn};

use crate::{
    habits::TASK_COUNT,
    utils::time::{format_record_date, parse_record_date},
};

use super::{
    entities::{score_of, DailyRecordEntity},
    table::RecordTable,
};

pub const DATE_COLUMN: &str = "Date";
pub const SCORE_COLUMN: &str = "Score";

pub fn task_column(position: usize) -> String {
    format!("Task_{position}")
}

/// Canonical column order.
pub fn header() -> Vec<String> {
    let mut columns = Vec::with_capacity(TASK_COUNT + 2);
    columns.push(DATE_COLUMN.to_string());
    columns.extend((1..=TASK_COUNT).map(task_column));
    columns.push(SCORE_COLUMN.to_string());
    columns
}

/// Serializes the whole table, header included.
pub fn encode_table(table: &RecordTable) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(header())?;
    for record in table.records() {
        writer.write_record(encode_record(record))?;
    }
    let buffer = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(buffer)
}

fn encode_record(record: &DailyRecordEntity) -> Vec<String> {
    let mut fields = Vec::with_capacity(TASK_COUNT + 2);
    fields.push(format_record_date(record.date));
    fields.extend(
        record
            .tasks
            .iter()
            .map(|done| if *done { "True" } else { "False" }.to_string()),
    );
    fields.push(record.score.to_string());
    fields
}

/// Where each canonical column lives in a particular file.
struct ColumnIndex {
    date: usize,
    tasks: [usize; TASK_COUNT],
    score: usize,
}

impl ColumnIndex {
    fn from_header(header: &StringRecord) -> Result<Self> {
        let positions = header
            .iter()
            .enumerate()
            .map(|(index, name)| (name, index))
            .collect::<HashMap<_, _>>();

        let find = |name: &str| -> Result<usize> {
            match positions.get(name) {
                Some(index) => Ok(*index),
                None => bail!("Data file is missing column {name:?}"),
            }
        };

        let mut tasks = [0; TASK_COUNT];
        for (index, slot) in tasks.iter_mut().enumerate() {
            *slot = find(&task_column(index + 1))?;
        }

        Ok(Self {
            date: find(DATE_COLUMN)?,
            tasks,
            score: find(SCORE_COLUMN)?,
        })
    }
}

/// Parses file contents. Returns [None] when there isn't even a header, which is how a
/// truncated or freshly touched file looks.
pub fn decode_table(data: &[u8]) -> Result<Option<RecordTable>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(data);

    let header = reader.headers().context("Failed to read header")?.clone();
    if header.iter().all(str::is_empty) {
        return Ok(None);
    }
    let columns = ColumnIndex::from_header(&header)?;

    let mut records = vec![];
    for (line, row) in reader.byte_records().enumerate() {
        let row = row.with_context(|| format!("Failed to read row {}", line + 1))?;
        let row = match StringRecord::from_byte_record(row) {
            Ok(row) => row,
            Err(e) => {
                let reason = e.utf8_error().to_string();
                warn!("Skipping row {} {:?}: {reason}", line + 1, e.into_byte_record());
                continue;
            }
        };
        match decode_record(&columns, &row) {
            Ok(v) => records.push(v),
            Err(e) => {
                // Rows edited by hand are skipped rather than failing the whole file
                warn!("Skipping row {} {:?}: {e}", line + 1, row);
            }
        }
    }
    trace!("Decoded {} records", records.len());
    Ok(Some(RecordTable::new(records)))
}

fn decode_record(columns: &ColumnIndex, row: &StringRecord) -> Result<DailyRecordEntity> {
    let cell = |index: usize| row.get(index).unwrap_or("");

    let date = parse_record_date(cell(columns.date))?;

    let mut tasks = [false; TASK_COUNT];
    for (done, index) in tasks.iter_mut().zip(columns.tasks) {
        *done = parse_flag(cell(index));
    }

    let score = parse_score(cell(columns.score)).unwrap_or_else(|| score_of(&tasks));

    Ok(DailyRecordEntity { date, tasks, score })
}

/// Anything that doesn't look like a finished task counts as unfinished. Empty cells are common,
/// older files never filled the last column.
fn parse_flag(value: &str) -> bool {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "1.0" | "yes" => true,
        "false" | "0" | "0.0" | "no" | "" | "nan" => false,
        other => {
            warn!("Unknown task value {other:?}, treating it as unfinished");
            false
        }
    }
}

fn parse_score(value: &str) -> Option<u32> {
    if value.is_empty() {
        return None;
    }
    if let Ok(v) = value.parse::<u32>() {
        return Some(v);
    }
    // Tables that went through a float column end up with values like `15.0`
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0. => Some(v as u32),
        _ => {
            warn!("Unknown score value {value:?}, recounting tasks");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::NaiveDate;

    use crate::{
        habits::TASK_COUNT,
        storage::{entities::DailyRecordEntity, table::RecordTable},
    };

    use super::{decode_table, encode_table, header};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_header_layout() {
        let header = header();
        assert_eq!(header.len(), 22);
        assert_eq!(header[0], "Date");
        assert_eq!(header[1], "Task_1");
        assert_eq!(header[20], "Task_20");
        assert_eq!(header[21], "Score");
    }

    #[test]
    fn test_encoded_row_format() -> Result<()> {
        let mut tasks = [false; TASK_COUNT];
        tasks[0] = true;
        tasks[2] = true;
        let table = RecordTable::new(vec![DailyRecordEntity::new(day(2), tasks)]);

        let text = String::from_utf8(encode_table(&table)?)?;
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(header().join(",").as_str()));
        let row = lines.next().unwrap();
        assert!(row.starts_with("2024-01-02,True,False,True,False,"));
        assert!(row.ends_with(",False,2"));
        assert_eq!(lines.next(), None);
        Ok(())
    }

    #[test]
    fn test_decode_encoded_table() -> Result<()> {
        let mut tasks = [true; TASK_COUNT];
        tasks[4] = false;
        let table = RecordTable::new(vec![
            DailyRecordEntity::new(day(3), tasks),
            DailyRecordEntity::new(day(1), [false; TASK_COUNT]),
        ]);

        let decoded = decode_table(&encode_table(&table)?)?;
        assert_eq!(decoded, Some(table));
        Ok(())
    }

    #[test]
    fn test_decode_empty_input() -> Result<()> {
        assert_eq!(decode_table(b"")?, None);
        assert_eq!(decode_table(b"\n")?, None);
        Ok(())
    }

    #[test]
    fn test_decode_header_only() -> Result<()> {
        let data = header().join(",") + "\n";
        assert_eq!(decode_table(data.as_bytes())?, Some(RecordTable::default()));
        Ok(())
    }

    #[test]
    fn test_decode_missing_column() {
        let data = "Date,Task_1,Score\n2024-01-01,True,1\n";
        let error = decode_table(data.as_bytes()).unwrap_err();
        assert!(error.to_string().contains("Task_2"));
    }

    #[test]
    fn test_decode_legacy_rows() -> Result<()> {
        // Nineteen filled flags, an empty last column and a float score
        let flags = std::iter::repeat("True")
            .take(3)
            .chain(std::iter::repeat("False").take(16))
            .collect::<Vec<_>>()
            .join(",");
        let data = format!("{}\n2024-01-05,{flags},,3.0\n", header().join(","));

        let table = decode_table(data.as_bytes())?.unwrap();
        let record = &table.records()[0];
        assert_eq!(record.date, day(5));
        assert_eq!(record.score, 3);
        assert!(record.tasks[..3].iter().all(|v| *v));
        assert!(!record.tasks[19]);
        Ok(())
    }

    #[test]
    fn test_decode_keeps_stale_score() -> Result<()> {
        let flags = vec!["false"; TASK_COUNT].join(",");
        let data = format!("{}\n2024-01-05,{flags},7\n", header().join(","));

        let table = decode_table(data.as_bytes())?.unwrap();
        assert_eq!(table.records()[0].score, 7);
        Ok(())
    }

    #[test]
    fn test_decode_reordered_columns() -> Result<()> {
        let mut columns = header();
        columns.reverse();
        let mut values = vec!["0".to_string(); TASK_COUNT + 2];
        values[0] = "1".into(); // Score
        values[1] = "1".into(); // Task_20
        values[TASK_COUNT + 1] = "2024-01-07".into();
        let data = format!("{}\n{}\n", columns.join(","), values.join(","));

        let table = decode_table(data.as_bytes())?.unwrap();
        let record = &table.records()[0];
        assert_eq!(record.date, day(7));
        assert!(record.tasks[19]);
        assert_eq!(record.score, 1);
        Ok(())
    }

    #[test]
    fn test_decode_skips_rows_with_invalid_utf8() -> Result<()> {
        let flags = vec!["False"; TASK_COUNT].join(",");
        let mut data = format!("{}\n2024-01-01,{flags},0\n", header().join(",")).into_bytes();
        data.extend_from_slice(b"2024-01-02,\xff");
        data.extend_from_slice(format!(",{flags},0\n").as_bytes());

        let table = decode_table(&data)?.unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.records()[0].date, day(1));
        Ok(())
    }

    #[test]
    fn test_decode_skips_bad_dates() -> Result<()> {
        let flags = vec!["False"; TASK_COUNT].join(",");
        let data = format!(
            "{}\nnot a date,{flags},0\n2024-01-01,{flags},0\n",
            header().join(",")
        );

        let table = decode_table(data.as_bytes())?.unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.records()[0].date, day(1));
        Ok(())
    }
}
