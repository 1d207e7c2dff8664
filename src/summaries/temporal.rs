//! Calendar-month bucketing of rider counts.

use crate::record::RentalRecord;
use crate::summaries::check_counts;
use crate::summaries::error::SummaryError;
use crate::summaries::types::{Measure, TimeBucketSummary};
use chrono::Datelike;
use std::collections::BTreeMap;

/// Buckets `records` by the calendar month of their date and sums the chosen
/// measure per bucket.
///
/// Buckets are labeled `"YYYY/MM"` and returned in ascending calendar order.
/// Months with no matching records are omitted; there is no zero-filling.
pub fn monthly_totals(
    records: &[RentalRecord],
    measure: Measure,
) -> Result<Vec<TimeBucketSummary>, SummaryError> {
    let mut buckets: BTreeMap<(i32, u32), u64> = BTreeMap::new();

    for record in records {
        check_counts(record)?;
        let key = (record.date.year(), record.date.month());
        *buckets.entry(key).or_default() += u64::from(measure.of(record));
    }

    Ok(buckets
        .into_iter()
        .map(|((year, month), total_user)| TimeBucketSummary {
            period_label: format!("{year:04}/{month:02}"),
            total_user,
        })
        .collect())
}
