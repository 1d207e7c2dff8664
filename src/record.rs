//! The normalized rental-record model shared by the loader and the engine.

use chrono::NaiveDate;

/// Season label as coded in the source dataset (1 = spring .. 4 = winter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    /// Parses either the dataset's numeric code or a spelled-out label.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "1" | "spring" | "springer" => Some(Self::Spring),
            "2" | "summer" => Some(Self::Summer),
            "3" | "fall" | "autumn" => Some(Self::Fall),
            "4" | "winter" => Some(Self::Winter),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Fall => "Fall",
            Self::Winter => "Winter",
        }
    }
}

/// Calendar month label. Carried on the record rather than re-derived from
/// the date, matching the source table's independent `mnth` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonthName {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl MonthName {
    const ALL: [MonthName; 12] = [
        Self::January,
        Self::February,
        Self::March,
        Self::April,
        Self::May,
        Self::June,
        Self::July,
        Self::August,
        Self::September,
        Self::October,
        Self::November,
        Self::December,
    ];

    /// Parses a numeric code (1-12), a full month name, or a three-letter
    /// abbreviation.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Ok(code) = value.parse::<u8>() {
            return match code {
                1..=12 => Some(Self::ALL[code as usize - 1]),
                _ => None,
            };
        }
        let lower = value.to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|m| {
                let label = m.label().to_ascii_lowercase();
                label == lower || label[..3] == lower
            })
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::January => "January",
            Self::February => "February",
            Self::March => "March",
            Self::April => "April",
            Self::May => "May",
            Self::June => "June",
            Self::July => "July",
            Self::August => "August",
            Self::September => "September",
            Self::October => "October",
            Self::November => "November",
            Self::December => "December",
        }
    }
}

/// Day-of-week label, coded 0 (Sunday) through 6 (Saturday) in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    const ALL: [Weekday; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// Parses a numeric code (0-6, Sunday first), a full day name, or a
    /// three-letter abbreviation.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Ok(code) = value.parse::<u8>() {
            return Self::ALL.get(code as usize).copied();
        }
        let lower = value.to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|d| {
                let label = d.label().to_ascii_lowercase();
                label == lower || label[..3] == lower
            })
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Sunday => "Sunday",
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
        }
    }
}

/// One validated rental observation.
///
/// `hour` is `None` for daily-granularity rows; hourly rows carry 0-23.
/// The loader guarantees `total_count == casual_count + registered_count`
/// for every record it emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RentalRecord {
    pub date: NaiveDate,
    pub hour: Option<u8>,
    pub total_count: u32,
    pub casual_count: u32,
    pub registered_count: u32,
    pub season: Season,
    pub month: MonthName,
    pub weekday: Weekday,
    pub year: i32,
    pub is_working_day: bool,
}

impl RentalRecord {
    /// Checks the count-breakdown invariant.
    pub fn counts_consistent(&self) -> bool {
        u64::from(self.total_count)
            == u64::from(self.casual_count) + u64::from(self.registered_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_parse_codes_and_labels() {
        assert_eq!(Season::parse("1"), Some(Season::Spring));
        assert_eq!(Season::parse("4"), Some(Season::Winter));
        assert_eq!(Season::parse("Summer"), Some(Season::Summer));
        assert_eq!(Season::parse(" fall "), Some(Season::Fall));
        assert_eq!(Season::parse("autumn"), Some(Season::Fall));
        assert_eq!(Season::parse("5"), None);
        assert_eq!(Season::parse("monsoon"), None);
    }

    #[test]
    fn test_month_parse_codes_names_and_abbreviations() {
        assert_eq!(MonthName::parse("1"), Some(MonthName::January));
        assert_eq!(MonthName::parse("12"), Some(MonthName::December));
        assert_eq!(MonthName::parse("June"), Some(MonthName::June));
        assert_eq!(MonthName::parse("sep"), Some(MonthName::September));
        assert_eq!(MonthName::parse("0"), None);
        assert_eq!(MonthName::parse("13"), None);
    }

    #[test]
    fn test_weekday_parse_sunday_first() {
        assert_eq!(Weekday::parse("0"), Some(Weekday::Sunday));
        assert_eq!(Weekday::parse("6"), Some(Weekday::Saturday));
        assert_eq!(Weekday::parse("Monday"), Some(Weekday::Monday));
        assert_eq!(Weekday::parse("thu"), Some(Weekday::Thursday));
        assert_eq!(Weekday::parse("7"), None);
    }

    #[test]
    fn test_counts_consistent() {
        let record = sample_record();
        assert!(record.counts_consistent());

        let broken = RentalRecord {
            casual_count: 5,
            ..record
        };
        assert!(!broken.counts_consistent());
    }

    fn sample_record() -> RentalRecord {
        RentalRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            hour: Some(8),
            total_count: 10,
            casual_count: 4,
            registered_count: 6,
            season: Season::Winter,
            month: MonthName::January,
            weekday: Weekday::Friday,
            year: 2024,
            is_working_day: true,
        }
    }
}
