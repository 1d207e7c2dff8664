//! Category bucketing: season, month name, weekday, and per-year views.

use crate::record::RentalRecord;
use crate::summaries::check_counts;
use crate::summaries::error::SummaryError;
use crate::summaries::types::{CategoryKey, CategorySummary, YearTotal, YearUserSplit};
use std::collections::BTreeMap;

/// Groups `records` by the chosen categorical key and sums `total_count`
/// per group.
///
/// Groups are sorted descending by their sum, the order used to highlight
/// high vs. low demand. The sort is stable over encounter order, so ties
/// resolve to the group seen first in the record slice.
pub fn by_category(
    records: &[RentalRecord],
    key: CategoryKey,
) -> Result<Vec<CategorySummary>, SummaryError> {
    // The category domains are tiny (at most twelve groups), so a linear
    // scan over a Vec keeps encounter order without an ordered map.
    let mut groups: Vec<CategorySummary> = Vec::new();

    for record in records {
        check_counts(record)?;
        let label = key.label_of(record);
        match groups.iter_mut().find(|g| g.key == label) {
            Some(group) => group.total_user += u64::from(record.total_count),
            None => groups.push(CategorySummary {
                key: label,
                total_user: u64::from(record.total_count),
            }),
        }
    }

    groups.sort_by(|a, b| b.total_user.cmp(&a.total_user));
    Ok(groups)
}

/// Sums `total_count` per year, ascending by year. Chronological order, not
/// a ranking: years are context, not competitors.
pub fn by_year(records: &[RentalRecord]) -> Result<Vec<YearTotal>, SummaryError> {
    let mut years: BTreeMap<i32, u64> = BTreeMap::new();

    for record in records {
        check_counts(record)?;
        *years.entry(record.year).or_default() += u64::from(record.total_count);
    }

    Ok(years
        .into_iter()
        .map(|(year, total_user)| YearTotal { year, total_user })
        .collect())
}

/// Sums casual and registered counts per year, ascending by year.
///
/// For any year, `total_casual + total_registered` equals that year's
/// [`by_year`] total.
pub fn by_year_split(records: &[RentalRecord]) -> Result<Vec<YearUserSplit>, SummaryError> {
    let mut years: BTreeMap<i32, (u64, u64)> = BTreeMap::new();

    for record in records {
        check_counts(record)?;
        let (casual, registered) = years.entry(record.year).or_default();
        *casual += u64::from(record.casual_count);
        *registered += u64::from(record.registered_count);
    }

    Ok(years
        .into_iter()
        .map(|(year, (total_casual, total_registered))| YearUserSplit {
            year,
            total_casual,
            total_registered,
        })
        .collect())
}
