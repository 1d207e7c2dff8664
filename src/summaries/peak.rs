//! Hour-of-day bucketing within a working-day partition, with top-3 marking.

use crate::record::RentalRecord;
use crate::summaries::check_counts;
use crate::summaries::error::SummaryError;
use crate::summaries::types::HourBucket;
use std::collections::BTreeMap;

/// Sums `total_count` per hour-of-day over the records whose
/// `is_working_day` flag matches `working_day`.
///
/// Buckets come back ascending by hour for display. Independently, the
/// three hours with the highest sums get `is_top3 = true`; a tie for third
/// place resolves to the earlier hour (stable descending sort over the
/// ascending-hour sequence). Fewer than three distinct hours means all of
/// them are marked.
///
/// Records without an hour (daily-granularity rows) cannot participate and
/// are skipped.
pub fn peak_hours(
    records: &[RentalRecord],
    working_day: bool,
) -> Result<Vec<HourBucket>, SummaryError> {
    let mut hours: BTreeMap<u8, u64> = BTreeMap::new();

    for record in records {
        if record.is_working_day != working_day {
            continue;
        }
        let Some(hour) = record.hour else {
            continue;
        };
        check_counts(record)?;
        *hours.entry(hour).or_default() += u64::from(record.total_count);
    }

    let mut ranked: Vec<(u8, u64)> = hours.iter().map(|(&hour, &total)| (hour, total)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    let top3: Vec<u8> = ranked.iter().take(3).map(|&(hour, _)| hour).collect();

    Ok(hours
        .into_iter()
        .map(|(hour, total_user)| HourBucket {
            hour,
            total_user,
            is_top3: top3.contains(&hour),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{MonthName, Season, Weekday};
    use chrono::NaiveDate;

    fn record(hour: Option<u8>, total: u32, working: bool) -> RentalRecord {
        RentalRecord {
            date: NaiveDate::from_ymd_opt(2024, 5, 6).unwrap(),
            hour,
            total_count: total,
            casual_count: 0,
            registered_count: total,
            season: Season::Summer,
            month: MonthName::May,
            weekday: Weekday::Monday,
            year: 2024,
            is_working_day: working,
        }
    }

    #[test]
    fn test_buckets_ascend_by_hour_with_top3_marked() {
        let records = vec![
            record(Some(17), 100, true),
            record(Some(8), 90, true),
            record(Some(12), 40, true),
            record(Some(18), 80, true),
            record(Some(3), 5, true),
        ];

        let buckets = peak_hours(&records, true).unwrap();
        let hours: Vec<u8> = buckets.iter().map(|b| b.hour).collect();
        assert_eq!(hours, vec![3, 8, 12, 17, 18]);

        let marked: Vec<u8> = buckets.iter().filter(|b| b.is_top3).map(|b| b.hour).collect();
        assert_eq!(marked, vec![8, 17, 18]);
    }

    #[test]
    fn test_marked_hours_dominate_unmarked_ones() {
        let records = vec![
            record(Some(7), 30, true),
            record(Some(8), 90, true),
            record(Some(9), 60, true),
            record(Some(16), 55, true),
            record(Some(17), 95, true),
        ];

        let buckets = peak_hours(&records, true).unwrap();
        let min_marked = buckets
            .iter()
            .filter(|b| b.is_top3)
            .map(|b| b.total_user)
            .min()
            .unwrap();
        let max_unmarked = buckets
            .iter()
            .filter(|b| !b.is_top3)
            .map(|b| b.total_user)
            .max()
            .unwrap();
        assert!(min_marked >= max_unmarked);
    }

    #[test]
    fn test_tie_for_third_place_goes_to_the_earlier_hour() {
        let records = vec![
            record(Some(8), 100, true),
            record(Some(17), 90, true),
            record(Some(7), 50, true),
            record(Some(19), 50, true),
        ];

        let buckets = peak_hours(&records, true).unwrap();
        let marked: Vec<u8> = buckets.iter().filter(|b| b.is_top3).map(|b| b.hour).collect();
        assert_eq!(marked, vec![7, 8, 17]);
    }

    #[test]
    fn test_partition_flag_selects_records() {
        let records = vec![
            record(Some(8), 100, true),
            record(Some(14), 70, false),
        ];

        let working = peak_hours(&records, true).unwrap();
        assert_eq!(working.len(), 1);
        assert_eq!(working[0].hour, 8);

        let non_working = peak_hours(&records, false).unwrap();
        assert_eq!(non_working.len(), 1);
        assert_eq!(non_working[0].hour, 14);
    }

    #[test]
    fn test_fewer_than_three_hours_all_marked() {
        let records = vec![record(Some(10), 20, false), record(Some(15), 10, false)];

        let buckets = peak_hours(&records, false).unwrap();
        assert_eq!(buckets.len(), 2);
        assert!(buckets.iter().all(|b| b.is_top3));
    }

    #[test]
    fn test_daily_rows_are_skipped() {
        let records = vec![record(None, 500, true), record(Some(9), 10, true)];

        let buckets = peak_hours(&records, true).unwrap();
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].total_user, 10);
    }

    #[test]
    fn test_same_hour_accumulates_across_days() {
        let mut monday = record(Some(8), 40, true);
        monday.date = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
        let mut tuesday = record(Some(8), 60, true);
        tuesday.date = NaiveDate::from_ymd_opt(2024, 5, 7).unwrap();

        let buckets = peak_hours(&[monday, tuesday], true).unwrap();
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].total_user, 100);
    }

    #[test]
    fn test_empty_partition_is_empty() {
        assert!(peak_hours(&[], true).unwrap().is_empty());
        let records = vec![record(Some(8), 10, true)];
        assert!(peak_hours(&records, false).unwrap().is_empty());
    }
}
