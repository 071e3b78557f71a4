use crate::error::{PatternError, Result};
use crate::level::{classify, Level};
use cgg_utils::dates::{days_in_year, days_since_sunday, weeks_spanned};
use chrono::{Datelike, NaiveDate, TimeDelta};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::mem::replace;

/// Smallest supported year (four-digit Gregorian years only).
pub const MIN_YEAR: i32 = 1000;
/// Largest supported year.
pub const MAX_YEAR: i32 = 9999;

/// Days in a calendar week.
pub const DAYS_PER_WEEK: usize = 7;

/// Activity count reported for a single calendar date.
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Copy, Clone, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u32,
}

/// A daily count together with its activity level.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, Serialize, Deserialize)]
pub struct ClassifiedDay {
    pub date: NaiveDate,
    pub count: u32,
    pub level: Level,
}

impl From<DailyCount> for ClassifiedDay {
    fn from(value: DailyCount) -> Self {
        ClassifiedDay {
            date: value.date,
            count: value.count,
            level: classify(value.count),
        }
    }
}

/// A date range iterator that yields each date from the start date
/// through the end date (inclusive).
#[derive(Clone, Eq, PartialEq, Copy, Debug)]
pub struct DateRange(pub NaiveDate, pub NaiveDate);

impl DateRange {
    /// January 1 through December 31 of `year`.
    pub fn calendar_year(year: i32) -> Result<DateRange> {
        let (start, end) = validate_year(year)?;
        Ok(DateRange(start, end))
    }
}

impl Iterator for DateRange {
    type Item = NaiveDate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.0 <= self.1 {
            let next = self.0 + TimeDelta::days(1);
            Some(replace(&mut self.0, next))
        } else {
            None
        }
    }
}

fn validate_year(year: i32) -> Result<(NaiveDate, NaiveDate)> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(PatternError::InvalidYearInput(year));
    }
    let start = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(PatternError::InvalidYearInput(year))?;
    let end = NaiveDate::from_ymd_opt(year, 12, 31).ok_or(PatternError::InvalidYearInput(year))?;
    Ok((start, end))
}

/// Expand a sparse date → count map into every date of `year`, ascending.
///
/// Dates missing from `sparse` get a zero count. Entries belonging to other
/// years are ignored.
pub fn normalize(year: i32, sparse: &BTreeMap<NaiveDate, u32>) -> Result<Vec<DailyCount>> {
    let range = DateRange::calendar_year(year)?;
    let mut days = Vec::with_capacity(days_in_year(year) as usize);
    for date in range {
        let count = sparse.get(&date).copied().unwrap_or(0);
        days.push(DailyCount { date, count });
    }
    Ok(days)
}

/// Seven day slots of a Sunday-start week.
///
/// A slot is `None` when its date falls outside the year being laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Week {
    pub days: [Option<ClassifiedDay>; DAYS_PER_WEEK],
}

impl Week {
    pub fn populated_days(&self) -> impl Iterator<Item = &ClassifiedDay> {
        self.days.iter().flatten()
    }
}

/// One calendar year of classified activity, Jan 1 through Dec 31.
///
/// Deserialized series are checked against the calendar before use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawYearSeries")]
pub struct YearSeries {
    year: i32,
    days: Vec<ClassifiedDay>,
    total_count: u64,
}

#[derive(Deserialize)]
struct RawYearSeries {
    year: i32,
    days: Vec<ClassifiedDay>,
    total_count: u64,
}

impl TryFrom<RawYearSeries> for YearSeries {
    type Error = PatternError;

    fn try_from(raw: RawYearSeries) -> Result<Self> {
        YearSeries::from_days(raw.year, raw.days, raw.total_count)
    }
}

fn invalid_series(year: i32, reason: String) -> PatternError {
    PatternError::InvalidYearSeries { year, reason }
}

impl YearSeries {
    /// Rebuild a series from already classified days.
    ///
    /// `days` must hold every date of `year` in order, each level must match
    /// its count and `total_count` must be their sum.
    pub fn from_days(year: i32, days: Vec<ClassifiedDay>, total_count: u64) -> Result<YearSeries> {
        let range = DateRange::calendar_year(year)?;
        let expected = days_in_year(year) as usize;
        if days.len() != expected {
            return Err(invalid_series(
                year,
                format!("expected {expected} days, found {}", days.len()),
            ));
        }
        for (day, date) in days.iter().zip(range) {
            if day.date != date {
                return Err(invalid_series(
                    year,
                    format!("expected {date}, found {}", day.date),
                ));
            }
            if day.level != classify(day.count) {
                return Err(invalid_series(
                    year,
                    format!("{} has level {} for {} contributions", day.date, day.level, day.count),
                ));
            }
        }
        let sum: u64 = days.iter().map(|day| u64::from(day.count)).sum();
        if sum != total_count {
            return Err(invalid_series(
                year,
                format!("total {total_count} does not match daily sum {sum}"),
            ));
        }
        Ok(YearSeries {
            year,
            days,
            total_count,
        })
    }

    /// Normalize and classify a year of supplier counts.
    pub fn from_counts(year: i32, sparse: &BTreeMap<NaiveDate, u32>) -> Result<YearSeries> {
        let days: Vec<ClassifiedDay> = normalize(year, sparse)?
            .into_iter()
            .map(ClassifiedDay::from)
            .collect();
        let total_count = days.iter().map(|day| u64::from(day.count)).sum();
        debug!(
            "normalized {year}: {} days, {total_count} contributions",
            days.len()
        );
        Ok(YearSeries {
            year,
            days,
            total_count,
        })
    }

    /// Group the year into Sunday-start weeks.
    ///
    /// Week 0 begins on the Sunday on or before January 1; a day's slot is
    /// its weekday counted from Sunday. Slots before January 1 or after
    /// December 31 are `None`.
    pub fn weeks(&self) -> Vec<Week> {
        let Some(first) = self.days.first() else {
            return Vec::new();
        };
        let lead_in = days_since_sunday(&first.date) as usize;
        let mut weeks: Vec<Week> =
            Vec::with_capacity(weeks_spanned(self.year).unwrap_or_default() as usize);
        for (offset, day) in self.days.iter().enumerate() {
            let slot_index = lead_in + offset;
            let week_index = slot_index / DAYS_PER_WEEK;
            if week_index == weeks.len() {
                weeks.push(Week::default());
            }
            weeks[week_index].days[slot_index % DAYS_PER_WEEK] = Some(*day);
        }
        weeks
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Every day of the year, January 1 first.
    pub fn days(&self) -> &[ClassifiedDay] {
        &self.days
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn day(&self, date: NaiveDate) -> Option<&ClassifiedDay> {
        if date.year() != self.year {
            return None;
        }
        self.days.get(date.ordinal0() as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_normalize_empty_year() {
        for (year, expected) in [(2023, 365), (2024, 366), (1900, 365), (2000, 366)] {
            let days = normalize(year, &BTreeMap::new()).unwrap();
            assert_eq!(days.len(), expected, "year={year}");
            assert!(days.iter().all(|d| d.count == 0));
            assert!(days.windows(2).all(|w| w[0].date < w[1].date));
            assert_eq!(days.first().unwrap().date, date(year, 1, 1));
            assert_eq!(days.last().unwrap().date, date(year, 12, 31));
        }
    }

    #[test]
    fn test_normalize_feb_29() {
        let leap = normalize(2024, &BTreeMap::new()).unwrap();
        assert!(leap.iter().any(|d| d.date == date(2024, 2, 29)));
        let common = normalize(2023, &BTreeMap::new()).unwrap();
        assert!(common.iter().all(|d| !(d.date.month() == 2 && d.date.day() == 29)));
    }

    #[test]
    fn test_normalize_keeps_counts_and_ignores_other_years() {
        let sparse = BTreeMap::from([
            (date(2023, 3, 14), 4),
            (date(2022, 12, 31), 50),
            (date(2024, 1, 1), 50),
        ]);
        let days = normalize(2023, &sparse).unwrap();
        let total: u32 = days.iter().map(|d| d.count).sum();
        assert_eq!(total, 4);
        assert_eq!(days[72], DailyCount { date: date(2023, 3, 14), count: 4 });
    }

    #[test]
    fn test_normalize_rejects_absurd_years() {
        for year in [0, -5, 999, 10_000, i32::MAX] {
            assert!(matches!(
                normalize(year, &BTreeMap::new()),
                Err(PatternError::InvalidYearInput(y)) if y == year
            ));
        }
        assert!(normalize(MIN_YEAR, &BTreeMap::new()).is_ok());
        assert!(normalize(MAX_YEAR, &BTreeMap::new()).is_ok());
    }

    #[test]
    fn test_year_series_totals_and_levels() {
        let sparse = BTreeMap::from([(date(2024, 7, 4), 7), (date(2024, 1, 2), 1)]);
        let series = YearSeries::from_counts(2024, &sparse).unwrap();
        assert_eq!(series.days.len(), 366);
        assert_eq!(series.total_count, 8);
        let july_fourth = series.day(date(2024, 7, 4)).unwrap();
        assert_eq!(july_fourth.count, 7);
        assert_eq!(july_fourth.level, Level::new(3).unwrap());
        assert!(series.day(date(2023, 7, 4)).is_none());
    }

    #[test]
    fn test_weeks_are_sunday_aligned() {
        // 2024-01-01 is a Monday, so Sunday 2023-12-31 is an empty lead-in slot.
        let series = YearSeries::from_counts(2024, &BTreeMap::new()).unwrap();
        let weeks = series.weeks();
        assert_eq!(weeks.len(), 53);
        assert_eq!(weeks[0].days[0], None);
        assert_eq!(weeks[0].days[1].unwrap().date, date(2024, 1, 1));
        let populated: usize = weeks.iter().map(|w| w.populated_days().count()).sum();
        assert_eq!(populated, 366);
        // 2024-12-31 is a Tuesday
        assert_eq!(weeks[52].days[2].unwrap().date, date(2024, 12, 31));
        assert_eq!(weeks[52].days[3], None);
    }

    #[test]
    fn test_weeks_leap_year_starting_saturday() {
        let series = YearSeries::from_counts(2028, &BTreeMap::new()).unwrap();
        let weeks = series.weeks();
        assert_eq!(weeks.len(), 54);
        assert_eq!(weeks[53].days[0].unwrap().date, date(2028, 12, 31));
    }

    #[test]
    fn test_deserialize_validates_series() {
        let series = YearSeries::from_counts(2024, &BTreeMap::from([(date(2024, 5, 5), 3)])).unwrap();
        let json = serde_json::to_string(&series).unwrap();
        let restored: YearSeries = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, series);

        let foreign = r#"{"year":2024,"days":[{"date":"2023-05-05","count":3,"level":2}],"total_count":999}"#;
        assert!(serde_json::from_str::<YearSeries>(foreign).is_err());
    }

    #[test]
    fn test_from_days_rejects_mismatched_series() {
        let series = YearSeries::from_counts(2023, &BTreeMap::from([(date(2023, 2, 1), 4)])).unwrap();
        let days = series.days().to_vec();
        assert!(YearSeries::from_days(2023, days.clone(), 4).is_ok());

        assert!(matches!(
            YearSeries::from_days(2023, days.clone(), 999),
            Err(PatternError::InvalidYearSeries { year: 2023, .. })
        ));
        assert!(matches!(
            YearSeries::from_days(2024, days.clone(), 4),
            Err(PatternError::InvalidYearSeries { year: 2024, .. })
        ));

        let mut gap = days.clone();
        gap.remove(100);
        assert!(YearSeries::from_days(2023, gap, 4).is_err());

        let mut relabeled = days;
        relabeled[31].level = Level::MAX_ACTIVITY;
        assert!(matches!(
            YearSeries::from_days(2023, relabeled, 4),
            Err(PatternError::InvalidYearSeries { .. })
        ));
    }

    #[test]
    fn test_date_range_iteration() {
        let dates: Vec<NaiveDate> = DateRange(date(2022, 1, 1), date(2022, 1, 5)).collect();
        assert_eq!(dates.len(), 5);
        assert_eq!(dates[4], date(2022, 1, 5));
        assert_eq!(DateRange(date(2022, 3, 15), date(2022, 3, 14)).count(), 0);
    }
}
