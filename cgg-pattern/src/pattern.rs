use crate::calendar::YearSeries;
use crate::error::{PatternError, Result};
use crate::grid::{compose, YearGrid};
use chrono::NaiveDate;
use log::debug;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Composed years, most recent first, ready for rendering or export.
///
/// Only [`stack`] builds a pattern, so `years` is strictly descending and
/// lines up with `year_grids`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pattern {
    years: Vec<i32>,
    year_grids: Vec<YearGrid>,
    total_count: u64,
}

impl Pattern {
    /// Years in stacking order, newest first.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn year_grids(&self) -> &[YearGrid] {
        &self.year_grids
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn is_empty(&self) -> bool {
        self.year_grids.is_empty()
    }

    pub fn grid(&self, year: i32) -> Option<&YearGrid> {
        self.year_grids.iter().find(|grid| grid.year() == year)
    }

    #[cfg(test)]
    pub(crate) fn empty() -> Pattern {
        Pattern {
            years: Vec::new(),
            year_grids: Vec::new(),
            total_count: 0,
        }
    }
}

/// Order requested years newest-first and collect their grids.
///
/// Duplicate years collapse to one entry and grids for years that were not
/// requested are discarded. Each grid keeps its own bordered frame.
pub fn stack(requested: &[i32], mut grids: HashMap<i32, YearGrid>) -> Result<Pattern> {
    if requested.is_empty() {
        return Err(PatternError::EmptyYearSet);
    }
    let years: Vec<i32> = requested
        .iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .rev()
        .collect();
    let mut year_grids = Vec::with_capacity(years.len());
    for year in &years {
        let grid = grids
            .remove(year)
            .ok_or(PatternError::MissingYearGrid(*year))?;
        if grid.year() != *year {
            return Err(PatternError::MissingYearGrid(*year));
        }
        year_grids.push(grid);
    }
    let total_count = year_grids.iter().map(YearGrid::total_count).sum();
    debug!("stacked {years:?}: {total_count} contributions");
    Ok(Pattern {
        years,
        year_grids,
        total_count,
    })
}

/// Run the whole per-year pipeline and stack the result.
///
/// `counts_by_year` holds the supplier's counts keyed by year; a requested
/// year with no entry is laid out as a year without activity.
pub fn generate(
    requested: &[i32],
    counts_by_year: &BTreeMap<i32, BTreeMap<NaiveDate, u32>>,
) -> Result<Pattern> {
    if requested.is_empty() {
        return Err(PatternError::EmptyYearSet);
    }
    let empty = BTreeMap::new();
    let mut grids = HashMap::new();
    for &year in requested {
        let counts = counts_by_year.get(&year).unwrap_or(&empty);
        let series = YearSeries::from_counts(year, counts)?;
        grids.insert(year, compose(&series));
    }
    stack(requested, grids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::compose_weeks;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn grid_with_total(year: i32, total_count: u64) -> YearGrid {
        compose_weeks(year, total_count, &[])
    }

    #[test]
    fn test_stack_orders_newest_first() {
        let grids = HashMap::from([
            (2022, grid_with_total(2022, 10)),
            (2023, grid_with_total(2023, 5)),
        ]);
        let pattern = stack(&[2022, 2023], grids).unwrap();
        assert_eq!(pattern.years(), [2023, 2022]);
        assert_eq!(pattern.year_grids()[0].year(), 2023);
        assert_eq!(pattern.year_grids()[1].year(), 2022);
        assert_eq!(pattern.total_count(), 15);
    }

    #[test]
    fn test_stack_strictly_descending_for_any_order() {
        let requested = [2019, 2024, 2021, 2024, 2020];
        let grids: HashMap<i32, YearGrid> = requested
            .iter()
            .map(|&year| (year, grid_with_total(year, year as u64)))
            .collect();
        let pattern = stack(&requested, grids).unwrap();
        assert_eq!(pattern.years(), [2024, 2021, 2020, 2019]);
        assert!(pattern.years().windows(2).all(|w| w[0] > w[1]));
        assert_eq!(pattern.total_count(), 2024 + 2021 + 2020 + 2019);
    }

    #[test]
    fn test_stack_empty_year_set() {
        assert!(matches!(
            stack(&[], HashMap::new()),
            Err(PatternError::EmptyYearSet)
        ));
        assert!(matches!(
            generate(&[], &BTreeMap::new()),
            Err(PatternError::EmptyYearSet)
        ));
    }

    #[test]
    fn test_stack_missing_grid() {
        let grids = HashMap::from([(2023, grid_with_total(2023, 0))]);
        assert!(matches!(
            stack(&[2023, 2022], grids),
            Err(PatternError::MissingYearGrid(2022))
        ));
    }

    #[test]
    fn test_stack_rejects_grid_filed_under_wrong_year() {
        let grids = HashMap::from([
            (2023, grid_with_total(2023, 1)),
            (2022, grid_with_total(2019, 1)),
        ]);
        assert!(matches!(
            stack(&[2023, 2022], grids),
            Err(PatternError::MissingYearGrid(2022))
        ));
    }

    #[test]
    fn test_stack_drops_unrequested_grids() {
        let grids = HashMap::from([
            (2023, grid_with_total(2023, 1)),
            (2021, grid_with_total(2021, 100)),
        ]);
        let pattern = stack(&[2023], grids).unwrap();
        assert_eq!(pattern.years(), [2023]);
        assert_eq!(pattern.total_count(), 1);
        assert!(pattern.grid(2021).is_none());
    }

    #[test]
    fn test_generate_totals() {
        let counts = BTreeMap::from([
            (2022, BTreeMap::from([(date(2022, 2, 2), 3), (date(2022, 9, 9), 9)])),
            (2023, BTreeMap::from([(date(2023, 1, 1), 1)])),
        ]);
        let pattern = generate(&[2022, 2023, 2021], &counts).unwrap();
        assert_eq!(pattern.years(), [2023, 2022, 2021]);
        assert_eq!(pattern.grid(2022).unwrap().total_count(), 12);
        assert_eq!(pattern.grid(2021).unwrap().total_count(), 0);
        assert_eq!(pattern.total_count(), 13);
    }

    #[test]
    fn test_generate_rejects_invalid_year() {
        assert!(matches!(
            generate(&[2023, 0], &BTreeMap::new()),
            Err(PatternError::InvalidYearInput(0))
        ));
    }
}
