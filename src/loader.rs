//! CSV ingestion and normalization for the rental dataset.
//!
//! This is the validation boundary: rows that cannot be normalized are
//! rejected here, with a warning each, and never reach the engine.

use crate::record::{MonthName, RentalRecord, Season, Weekday};
use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// One raw CSV row before normalization. The aliases accept both the
/// published dataset's column names and their cleaned-up equivalents.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(alias = "dteday")]
    date: String,
    #[serde(default, alias = "hr")]
    hour: Option<i32>,
    #[serde(alias = "cnt")]
    total: i64,
    casual: i64,
    registered: i64,
    season: String,
    #[serde(alias = "mnth")]
    month: String,
    #[serde(alias = "day")]
    weekday: String,
    #[serde(alias = "yr")]
    year: i32,
    #[serde(alias = "workingday")]
    working_day: u8,
}

/// Loads and normalizes records from a CSV file, sorted by date.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<RentalRecord>> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let records = read_records(file)?;
    debug!(path = %path.display(), loaded = records.len(), "Dataset loaded");
    Ok(records)
}

/// Reads records from any CSV source. Rows that fail to parse or violate a
/// count invariant are dropped with a warning; the survivors come back
/// sorted by date.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<RentalRecord>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    let mut rejected = 0usize;

    for (index, row) in csv_reader.deserialize().enumerate() {
        let row: RawRow = match row {
            Ok(row) => row,
            Err(e) => {
                warn!(row = index + 1, error = %e, "Rejected unreadable row");
                rejected += 1;
                continue;
            }
        };

        match normalize(&row) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(row = index + 1, error = %e, "Rejected row");
                rejected += 1;
            }
        }
    }

    if rejected > 0 {
        warn!(rejected, kept = records.len(), "Some rows were rejected");
    }

    records.sort_by_key(|r| r.date);
    Ok(records)
}

/// Loads the hour-granularity and day-granularity tables and joins them
/// on date.
pub fn load_joined(
    hourly_path: impl AsRef<Path>,
    daily_path: impl AsRef<Path>,
) -> Result<Vec<RentalRecord>> {
    let hourly = load_records(hourly_path)?;
    let daily = load_records(daily_path)?;
    Ok(join_hourly_daily(hourly, &daily))
}

/// Inner join of hourly records against daily records on `date`.
///
/// Where the two tables share a column, the hourly value wins, so a daily
/// row contributes nothing beyond vouching that its date exists in the
/// daily table. Hourly rows with no daily counterpart are dropped with a
/// warning rather than guessed at.
pub fn join_hourly_daily(hourly: Vec<RentalRecord>, daily: &[RentalRecord]) -> Vec<RentalRecord> {
    let daily_dates: HashSet<NaiveDate> = daily.iter().map(|r| r.date).collect();

    let mut joined = Vec::with_capacity(hourly.len());
    let mut dropped = 0usize;
    for record in hourly {
        if daily_dates.contains(&record.date) {
            joined.push(record);
        } else {
            dropped += 1;
        }
    }

    if dropped > 0 {
        warn!(dropped, "Hourly rows without a matching daily row were dropped");
    }

    joined
}

fn normalize(row: &RawRow) -> Result<RentalRecord> {
    let date = NaiveDate::parse_from_str(row.date.trim(), "%Y-%m-%d")
        .with_context(|| format!("unparsable date {:?}", row.date))?;

    let hour = match row.hour {
        None => None,
        Some(h) if (0..=23).contains(&h) => Some(h as u8),
        Some(h) => bail!("hour {h} out of range"),
    };

    let total_count = to_count(row.total, "total")?;
    let casual_count = to_count(row.casual, "casual")?;
    let registered_count = to_count(row.registered, "registered")?;
    if u64::from(total_count) != u64::from(casual_count) + u64::from(registered_count) {
        bail!(
            "total {} != casual {} + registered {}",
            total_count,
            casual_count,
            registered_count
        );
    }

    let season = Season::parse(&row.season)
        .with_context(|| format!("unknown season {:?}", row.season))?;
    let month = MonthName::parse(&row.month)
        .with_context(|| format!("unknown month {:?}", row.month))?;
    let weekday = Weekday::parse(&row.weekday)
        .with_context(|| format!("unknown weekday {:?}", row.weekday))?;

    let is_working_day = match row.working_day {
        0 => false,
        1 => true,
        other => bail!("working-day flag {other} is not 0 or 1"),
    };

    Ok(RentalRecord {
        date,
        hour,
        total_count,
        casual_count,
        registered_count,
        season,
        month,
        weekday,
        year: row.year,
        is_working_day,
    })
}

fn to_count(value: i64, field: &str) -> Result<u32> {
    u32::try_from(value).map_err(|_| anyhow::anyhow!("{field} count {value} is not a valid count"))
}
