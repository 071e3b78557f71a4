//! Adapters for the contribution supplier's records.
//!
//! The supplier reports one count per ISO `YYYY-MM-DD` date. These helpers
//! turn its CSV or JSON output into typed per-year maps for the normalizer.

use crate::calendar::DailyCount;
use crate::error::{PatternError, Result};
use cgg_utils::dates::parse_date;
use chrono::{Datelike, NaiveDate};
use csv::ReaderBuilder;
use std::collections::BTreeMap;

/// Sparse counts for a single year, keyed by date.
pub type YearCounts = BTreeMap<NaiveDate, u32>;

fn parse_iso_date(s: &str) -> Result<NaiveDate> {
    parse_date(s).map_err(|e| PatternError::DateParse(format!("{s:?}: {e}")))
}

/// Convert ISO date strings to dates, keeping counts unchanged.
pub fn parse_iso_counts<'a, I>(records: I) -> Result<Vec<DailyCount>>
where
    I: IntoIterator<Item = (&'a str, u32)>,
{
    records
        .into_iter()
        .map(|(date, count)| -> Result<DailyCount> {
            Ok(DailyCount {
                date: parse_iso_date(date)?,
                count,
            })
        })
        .collect()
}

/// Parse `date,count` rows. A leading `date,count` header row is skipped and
/// blank lines are ignored. Rows with extra columns are rejected.
pub fn parse_daily_counts_csv(csv_object: &str) -> Result<Vec<DailyCount>> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(csv_object.as_bytes());
    let mut daily_counts = Vec::new();
    for (index, row) in rdr.records().enumerate() {
        let record = row?;
        let date = record.get(0).unwrap_or_default();
        if index == 0 && date.eq_ignore_ascii_case("date") {
            continue;
        }
        if date.is_empty() {
            continue;
        }
        if record.len() > 2 {
            return Err(PatternError::UnexpectedFields {
                line: record.position().map_or(index as u64 + 1, |pos| pos.line()),
                fields: record.len(),
            });
        }
        let raw_count = record.get(1).unwrap_or_default();
        let count = raw_count
            .parse::<u32>()
            .map_err(|_| PatternError::InvalidCount(format!("{raw_count:?} for {date}")))?;
        daily_counts.push(DailyCount {
            date: parse_iso_date(date)?,
            count,
        });
    }
    Ok(daily_counts)
}

/// Parse a JSON object of `{"YYYY-MM-DD": count}` pairs.
pub fn parse_daily_counts_json(json_object: &str) -> Result<Vec<DailyCount>> {
    let raw: BTreeMap<String, u32> = serde_json::from_str(json_object)?;
    parse_iso_counts(raw.iter().map(|(date, count)| (date.as_str(), *count)))
}

/// Split records by calendar year. A date reported twice keeps the last count.
pub fn group_by_year<I>(daily_counts: I) -> BTreeMap<i32, YearCounts>
where
    I: IntoIterator<Item = DailyCount>,
{
    let mut result: BTreeMap<i32, YearCounts> = BTreeMap::new();
    for daily in daily_counts {
        result
            .entry(daily.date.year())
            .or_default()
            .insert(daily.date, daily.count);
    }
    result
}
