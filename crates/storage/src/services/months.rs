//! Calendar-month bucketing of match history.
//!
//! Every timestamp is bucketed in UTC. Keys are ordered by the `(year, month)`
//! integer pair, never by their string form.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Month, Months, NaiveDate, NaiveTime, Utc};

use crate::dto::standings::MonthOption;
use crate::models::MatchRecord;

use super::standings::StandingsError;

pub const ALL_MONTHS_KEY: &str = "all";
pub const ALL_MONTHS_LABEL: &str = "All";

/// A calendar month, rendered as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Returns `None` unless `month` is 1..=12 and the year is representable
    /// as a four digit key.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if !(1..=12).contains(&month) || !(0..=9999).contains(&year) {
            return None;
        }
        Some(Self { year, month })
    }

    /// The UTC month a timestamp falls in.
    pub fn of(timestamp: &DateTime<Utc>) -> Self {
        Self {
            year: timestamp.year(),
            month: timestamp.month(),
        }
    }

    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        Self::of(timestamp) == *self
    }

    /// English label such as "March 2024".
    pub fn label(&self) -> String {
        let name = u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map_or("", |m| m.name());
        format!("{name} {}", self.year)
    }

    /// Half-open UTC range `[start, end)` covering the month.
    pub fn bounds(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let first_day = NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default();
        let next_first_day = first_day
            .checked_add_months(Months::new(1))
            .unwrap_or(NaiveDate::MAX);

        (
            first_day.and_time(NaiveTime::MIN).and_utc(),
            next_first_day.and_time(NaiveTime::MIN).and_utc(),
        )
    }

    pub fn to_option(&self) -> MonthOption {
        MonthOption {
            value: self.to_string(),
            label: self.label(),
            year: Some(self.year),
            month: Some(self.month),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = StandingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || StandingsError::InvalidMonthFilter(s.to_string());

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let all_digits = year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit());
        if year.len() != 4 || month.len() != 2 || !all_digits {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        MonthKey::new(year, month).ok_or_else(invalid)
    }
}

/// Restricts aggregation to one month, or to nothing at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthFilter {
    #[default]
    All,
    Month(MonthKey),
}

impl MonthFilter {
    /// Treats a missing or blank selector as [`MonthFilter::All`].
    pub fn parse_optional(value: Option<&str>) -> Result<Self, StandingsError> {
        match value.map(str::trim) {
            None | Some("") => Ok(Self::All),
            Some(value) => value.parse(),
        }
    }

    pub fn matches(&self, timestamp: &DateTime<Utc>) -> bool {
        match self {
            Self::All => true,
            Self::Month(key) => key.contains(timestamp),
        }
    }

    pub fn key(&self) -> String {
        match self {
            Self::All => ALL_MONTHS_KEY.to_string(),
            Self::Month(key) => key.to_string(),
        }
    }
}

impl FromStr for MonthFilter {
    type Err = StandingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(ALL_MONTHS_KEY) {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Month)
        }
    }
}

impl From<MonthKey> for MonthFilter {
    fn from(key: MonthKey) -> Self {
        Self::Month(key)
    }
}

/// Distinct months present in `matches`, most recent first.
pub fn distinct_months(matches: &[MatchRecord]) -> Vec<MonthKey> {
    let months: BTreeSet<MonthKey> = matches
        .iter()
        .map(|record| MonthKey::of(&record.played_at))
        .collect();

    months.into_iter().rev().collect()
}

/// Month selector options for a match history: the "all" sentinel first,
/// then every month that has at least one match, most recent first.
pub fn compute_month_options(matches: &[MatchRecord]) -> Vec<MonthOption> {
    std::iter::once(MonthOption::all())
        .chain(distinct_months(matches).iter().map(MonthKey::to_option))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn match_at(year: i32, month: u32, day: u32) -> MatchRecord {
        let played_at = Utc.with_ymd_and_hms(year, month, day, 18, 30, 0).unwrap();
        MatchRecord {
            match_id: Uuid::new_v4(),
            participant_a_id: Uuid::from_u128(1),
            participant_b_id: Uuid::from_u128(2),
            score_a: 10,
            score_b: 8,
            played_at,
            created_at: played_at,
        }
    }

    #[test]
    fn test_empty_history_only_has_all() {
        let options = compute_month_options(&[]);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].value, "all");
        assert_eq!(options[0].label, "All");
        assert_eq!(options[0].year, None);
    }

    #[test]
    fn test_options_are_deduplicated_and_descending() {
        let matches = vec![
            match_at(2024, 3, 2),
            match_at(2023, 12, 30),
            match_at(2024, 3, 28),
            match_at(2024, 11, 1),
            match_at(2024, 2, 14),
        ];

        let values: Vec<String> = compute_month_options(&matches)
            .into_iter()
            .map(|option| option.value)
            .collect();

        assert_eq!(values, vec!["all", "2024-11", "2024-03", "2024-02", "2023-12"]);
    }

    #[test]
    fn test_ordering_is_numeric_not_lexical() {
        // "2024-9" would sort after "2024-10" as a string
        let matches = vec![match_at(2024, 9, 1), match_at(2024, 10, 1)];
        let options = compute_month_options(&matches);
        assert_eq!(options[1].value, "2024-10");
        assert_eq!(options[2].value, "2024-09");
    }

    #[test]
    fn test_option_label_and_parts() {
        let options = compute_month_options(&[match_at(2024, 3, 15)]);
        assert_eq!(options[1].label, "March 2024");
        assert_eq!(options[1].year, Some(2024));
        assert_eq!(options[1].month, Some(3));
    }

    #[test]
    fn test_labels_cover_the_whole_year() {
        assert_eq!(MonthKey::new(2023, 1).unwrap().label(), "January 2023");
        assert_eq!(MonthKey::new(2023, 9).unwrap().label(), "September 2023");
        assert_eq!(MonthKey::new(2023, 12).unwrap().label(), "December 2023");
    }

    #[test]
    fn test_options_are_stable() {
        let matches = vec![match_at(2022, 1, 1), match_at(2021, 6, 1)];
        assert_eq!(compute_month_options(&matches), compute_month_options(&matches));
    }

    #[test]
    fn test_month_boundaries_use_utc() {
        let late = Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap();
        let early = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        assert_eq!(MonthKey::of(&late).to_string(), "2024-01");
        assert_eq!(MonthKey::of(&early).to_string(), "2024-02");
    }

    #[test]
    fn test_bounds_cover_the_month() {
        let key = MonthKey::new(2024, 12).unwrap();
        let (start, end) = key.bounds();
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_month_key_parsing() {
        assert_eq!("2024-03".parse::<MonthKey>().unwrap(), MonthKey::new(2024, 3).unwrap());
        assert!("2024-3".parse::<MonthKey>().is_err());
        assert!("2024-13".parse::<MonthKey>().is_err());
        assert!("2024-00".parse::<MonthKey>().is_err());
        assert!("march".parse::<MonthKey>().is_err());
        assert!("24-03".parse::<MonthKey>().is_err());
    }

    #[test]
    fn test_month_filter_parsing() {
        assert_eq!(MonthFilter::parse_optional(None).unwrap(), MonthFilter::All);
        assert_eq!(MonthFilter::parse_optional(Some("")).unwrap(), MonthFilter::All);
        assert_eq!("all".parse::<MonthFilter>().unwrap(), MonthFilter::All);
        assert_eq!("ALL".parse::<MonthFilter>().unwrap(), MonthFilter::All);

        let filter: MonthFilter = "2023-07".parse().unwrap();
        assert_eq!(filter.key(), "2023-07");
        assert!(matches!(
            "2023-7x".parse::<MonthFilter>(),
            Err(StandingsError::InvalidMonthFilter(_))
        ));
    }
}
