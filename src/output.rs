//! Report assembly, rendering, and persistence for rental summaries.
//!
//! Supports a plain-text report on any writer, pretty JSON export, and
//! per-table CSV export.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::debug;

use crate::record::RentalRecord;
use crate::summaries::categorical::{by_category, by_year, by_year_split};
use crate::summaries::error::SummaryError;
use crate::summaries::filter::filter_by_range;
use crate::summaries::peak::peak_hours;
use crate::summaries::temporal::monthly_totals;
use crate::summaries::types::{
    CategoryKey, CategorySummary, HourBucket, Measure, RangeTotals, TimeBucketSummary, YearTotal,
    YearUserSplit,
};

/// Every summary view for one date-range selection.
///
/// Built fresh per selection and discarded after rendering; the JSON export
/// payload is exactly this struct.
#[derive(Debug, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub totals: RangeTotals,
    pub monthly_total: Vec<TimeBucketSummary>,
    pub monthly_casual: Vec<TimeBucketSummary>,
    pub monthly_registered: Vec<TimeBucketSummary>,
    pub by_season: Vec<CategorySummary>,
    pub by_month: Vec<CategorySummary>,
    pub by_weekday: Vec<CategorySummary>,
    pub by_year: Vec<YearTotal>,
    pub by_year_split: Vec<YearUserSplit>,
    pub peak_hours_working: Vec<HourBucket>,
    pub peak_hours_non_working: Vec<HourBucket>,
}

impl Report {
    /// Filters `records` to `[start, end]` and runs every aggregator over
    /// the same filtered subset.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::InvalidRange`] for an inverted range and
    /// [`SummaryError::MalformedRecord`] if an inconsistent record reaches
    /// the engine.
    pub fn build(
        records: &[RentalRecord],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Self, SummaryError> {
        let filtered = filter_by_range(records, start, end)?;

        Ok(Self {
            generated_at: Utc::now(),
            start_date: start,
            end_date: end,
            totals: RangeTotals::from_records(&filtered)?,
            monthly_total: monthly_totals(&filtered, Measure::Total)?,
            monthly_casual: monthly_totals(&filtered, Measure::Casual)?,
            monthly_registered: monthly_totals(&filtered, Measure::Registered)?,
            by_season: by_category(&filtered, CategoryKey::Season)?,
            by_month: by_category(&filtered, CategoryKey::Month)?,
            by_weekday: by_category(&filtered, CategoryKey::Weekday)?,
            by_year: by_year(&filtered)?,
            by_year_split: by_year_split(&filtered)?,
            peak_hours_working: peak_hours(&filtered, true)?,
            peak_hours_non_working: peak_hours(&filtered, false)?,
        })
    }

    /// True when the selection matched no records at all.
    pub fn is_empty(&self) -> bool {
        self.totals.total_user == 0 && self.monthly_total.is_empty()
    }
}

/// Writes the report as aligned plain-text tables.
pub fn write_report<W: Write>(writer: &mut W, report: &Report) -> Result<()> {
    writeln!(
        writer,
        "Bike rental summary, {} to {}",
        report.start_date, report.end_date
    )?;
    writeln!(writer)?;
    writeln!(writer, "Total users:      {:>10}", report.totals.total_user)?;
    writeln!(writer, "Casual users:     {:>10}", report.totals.total_casual)?;
    writeln!(
        writer,
        "Registered users: {:>10}",
        report.totals.total_registered
    )?;

    writeln!(writer, "\nMonthly totals")?;
    for bucket in &report.monthly_total {
        writeln!(writer, "  {}  {:>10}", bucket.period_label, bucket.total_user)?;
    }

    write_category_table(writer, "By season", &report.by_season)?;
    write_category_table(writer, "By month", &report.by_month)?;
    write_category_table(writer, "By weekday", &report.by_weekday)?;

    writeln!(writer, "\nBy year")?;
    for year in &report.by_year {
        writeln!(writer, "  {}  {:>10}", year.year, year.total_user)?;
    }

    writeln!(writer, "\nCasual / registered by year")?;
    for split in &report.by_year_split {
        writeln!(
            writer,
            "  {}  casual {:>10}  registered {:>10}",
            split.year, split.total_casual, split.total_registered
        )?;
    }

    write_hour_table(writer, "Peak hours, working days", &report.peak_hours_working)?;
    write_hour_table(
        writer,
        "Peak hours, non-working days",
        &report.peak_hours_non_working,
    )?;

    Ok(())
}

fn write_category_table<W: Write>(
    writer: &mut W,
    title: &str,
    groups: &[CategorySummary],
) -> Result<()> {
    writeln!(writer, "\n{title}")?;
    for group in groups {
        writeln!(writer, "  {:<10}  {:>10}", group.key, group.total_user)?;
    }
    Ok(())
}

fn write_hour_table<W: Write>(writer: &mut W, title: &str, buckets: &[HourBucket]) -> Result<()> {
    writeln!(writer, "\n{title}")?;
    for bucket in buckets {
        // The star is the textual stand-in for the highlight color
        let mark = if bucket.is_top3 { " *" } else { "" };
        writeln!(
            writer,
            "  {:>2}:00  {:>10}{}",
            bucket.hour, bucket.total_user, mark
        )?;
    }
    Ok(())
}

/// Serializes a value as pretty JSON and writes it to `path`.
pub fn write_json(path: impl AsRef<Path>, value: &impl Serialize) -> Result<()> {
    let path = path.as_ref();
    let body = serde_json::to_vec_pretty(value)?;
    std::fs::write(path, body)?;
    debug!(path = %path.display(), "Wrote JSON export");
    Ok(())
}

/// Writes one summary table as a CSV file, one row per bucket.
pub fn write_summary_csv<T: Serialize>(path: impl AsRef<Path>, rows: &[T]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    debug!(path = %path.display(), rows = rows.len(), "Wrote CSV export");
    Ok(())
}
