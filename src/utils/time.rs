use anyhow::{Context, Result};
use chrono::NaiveDate;

/// This is the standard way of converting a date to a string in habitual.
pub fn format_record_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_record_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .with_context(|| format!("{value:?} is not an ISO date"))
}
