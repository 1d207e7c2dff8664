//! Date-range filtering, the prerequisite step for every aggregator.

use crate::record::RentalRecord;
use crate::summaries::error::SummaryError;
use chrono::NaiveDate;

/// Restricts `records` to dates within `[start, end]`, both bounds
/// inclusive. Dates are compared with no time-of-day component.
///
/// An empty result is valid, not an error.
///
/// # Errors
///
/// Returns [`SummaryError::InvalidRange`] if `start > end`.
pub fn filter_by_range(
    records: &[RentalRecord],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<RentalRecord>, SummaryError> {
    if start > end {
        return Err(SummaryError::InvalidRange { start, end });
    }

    Ok(records
        .iter()
        .copied()
        .filter(|r| r.date >= start && r.date <= end)
        .collect())
}

/// The dataset's full span, `(min date, max date)`, used as the default
/// range selection. `None` for an empty record set.
pub fn full_span(records: &[RentalRecord]) -> Option<(NaiveDate, NaiveDate)> {
    let first = records.iter().map(|r| r.date).min()?;
    let last = records.iter().map(|r| r.date).max()?;
    Some((first, last))
}
