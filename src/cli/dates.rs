use std::fmt::Display;

use anyhow::Result;
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_english::parse_date_string;
use clap::{CommandFactory, ValueEnum};

use crate::utils::time::parse_record_date;

use super::Args;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DateStyle {
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

/// Resolves a `--date` argument. ISO dates are taken as is, everything else goes through
/// natural language parsing relative to `today`.
pub fn parse_day(
    input: Option<&str>,
    date_style: DateStyle,
    today: NaiveDate,
) -> Result<NaiveDate> {
    let Some(input) = input else {
        return Ok(today);
    };
    if let Ok(date) = parse_record_date(input) {
        return Ok(date);
    }

    // Noon keeps phrases like "2 days ago" on the right calendar day
    let reference = Utc.from_utc_datetime(&today.and_time(
        NaiveTime::from_hms_opt(12, 0, 0).expect("Noon is a valid time"),
    ));
    match parse_date_string(input, reference, date_style.into()) {
        Ok(v) => Ok(v.date_naive()),
        Err(e) => Err(Args::command()
            .error(
                clap::error::ErrorKind::ValueValidation,
                format!("Failed to validate date {input:?}: {e}"),
            )
            .into()),
    }
}
