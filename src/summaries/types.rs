//! Data types produced by the aggregation engine.

use crate::record::RentalRecord;
use serde::Serialize;

/// The numeric field being summed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Measure {
    Total,
    Casual,
    Registered,
}

impl Measure {
    /// Reads this measure's count from a record.
    pub fn of(self, record: &RentalRecord) -> u32 {
        match self {
            Self::Total => record.total_count,
            Self::Casual => record.casual_count,
            Self::Registered => record.registered_count,
        }
    }
}

/// The categorical attribute to group by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKey {
    Season,
    Month,
    Weekday,
}

impl CategoryKey {
    /// Reads this key's label from a record.
    pub fn label_of(self, record: &RentalRecord) -> &'static str {
        match self {
            Self::Season => record.season.label(),
            Self::Month => record.month.label(),
            Self::Weekday => record.weekday.label(),
        }
    }
}

/// One calendar month present in the filtered range, labeled `"YYYY/MM"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeBucketSummary {
    pub period_label: String,
    pub total_user: u64,
}

/// One distinct category value present in the filtered range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub key: &'static str,
    pub total_user: u64,
}

/// Summed riders for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearTotal {
    pub year: i32,
    pub total_user: u64,
}

/// Casual/registered breakdown for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearUserSplit {
    pub year: i32,
    pub total_casual: u64,
    pub total_registered: u64,
}

/// Summed riders for one hour-of-day within a working-day partition.
///
/// `is_top3` marks the three busiest hours of the partition. It is carried
/// as data so the presentation layer only maps it to a style, never
/// recomputes the ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourBucket {
    pub hour: u8,
    pub total_user: u64,
    pub is_top3: bool,
}

/// Scalar totals over the whole filtered range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RangeTotals {
    pub total_user: u64,
    pub total_casual: u64,
    pub total_registered: u64,
}

impl RangeTotals {
    /// Sums all three measures over `records`.
    pub fn from_records(records: &[RentalRecord]) -> Result<Self, super::error::SummaryError> {
        let mut totals = Self {
            total_user: 0,
            total_casual: 0,
            total_registered: 0,
        };
        for record in records {
            super::check_counts(record)?;
            totals.total_user += u64::from(record.total_count);
            totals.total_casual += u64::from(record.casual_count);
            totals.total_registered += u64::from(record.registered_count);
        }
        Ok(totals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{MonthName, Season, Weekday};
    use chrono::NaiveDate;

    fn record(total: u32, casual: u32) -> RentalRecord {
        RentalRecord {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            hour: None,
            total_count: total,
            casual_count: casual,
            registered_count: total - casual,
            season: Season::Spring,
            month: MonthName::March,
            weekday: Weekday::Friday,
            year: 2024,
            is_working_day: true,
        }
    }

    #[test]
    fn test_measure_of() {
        let r = record(10, 4);
        assert_eq!(Measure::Total.of(&r), 10);
        assert_eq!(Measure::Casual.of(&r), 4);
        assert_eq!(Measure::Registered.of(&r), 6);
    }

    #[test]
    fn test_category_key_label_of() {
        let r = record(10, 4);
        assert_eq!(CategoryKey::Season.label_of(&r), "Spring");
        assert_eq!(CategoryKey::Month.label_of(&r), "March");
        assert_eq!(CategoryKey::Weekday.label_of(&r), "Friday");
    }

    #[test]
    fn test_range_totals() {
        let records = vec![record(10, 4), record(20, 5)];
        let totals = RangeTotals::from_records(&records).unwrap();
        assert_eq!(totals.total_user, 30);
        assert_eq!(totals.total_casual, 9);
        assert_eq!(totals.total_registered, 21);
    }

    #[test]
    fn test_range_totals_empty() {
        let totals = RangeTotals::from_records(&[]).unwrap();
        assert_eq!(totals.total_user, 0);
    }
}
