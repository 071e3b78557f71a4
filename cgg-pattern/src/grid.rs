//! Year grid composition.
//!
//! A year is laid out as 53 week columns by 7 weekday rows. Every day covers
//! a 2×2 block of squares and the whole data region sits inside a border band
//! two squares wide, giving a fixed 110 × 18 grid:
//!
//! ```text
//!   col 0 1 2 3 4 5 ...   106 107 108 109
//! row 0   B B B B B B ...   B   B   B   B
//! row 1   B B B B B B ...   B   B   B   B
//! row 2   B B d d w w ...   d   d   B   B     d = week 0, w = week 1
//! row 3   B B d d w w ...   d   d   B   B
//! ...
//! row 16  B B B B B B ...   B   B   B   B
//! row 17  B B B B B B ...   B   B   B   B
//! ```

use crate::calendar::{ClassifiedDay, Week, YearSeries, DAYS_PER_WEEK};
use crate::level::Level;
use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

/// Week columns available in the data region.
pub const WEEKS_PER_GRID: usize = 53;
/// Squares along each side of a day block.
pub const SQUARES_PER_DAY: usize = 2;
/// Width of the border band in squares.
pub const BORDER_WIDTH: usize = 2;

/// Data region width in squares (53 weeks × 2).
pub const DATA_COLS: usize = WEEKS_PER_GRID * SQUARES_PER_DAY;
/// Data region height in squares (7 days × 2).
pub const DATA_ROWS: usize = DAYS_PER_WEEK * SQUARES_PER_DAY;
/// Full grid width including the border band.
pub const GRID_COLS: usize = DATA_COLS + 2 * BORDER_WIDTH;
/// Full grid height including the border band.
pub const GRID_ROWS: usize = DATA_ROWS + 2 * BORDER_WIDTH;
/// Squares in one year grid.
pub const GRID_SQUARES: usize = GRID_COLS * GRID_ROWS;
/// Squares in the data region of one year grid.
pub const DATA_SQUARES: usize = DATA_COLS * DATA_ROWS;
/// Squares in the border band of one year grid.
pub const BORDER_SQUARES: usize = GRID_SQUARES - DATA_SQUARES;

/// One cell of the physical pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub row: usize,
    pub col: usize,
    pub level: Level,
    pub is_border: bool,
    pub source_date: Option<NaiveDate>,
    pub source_count: Option<u32>,
}

impl Square {
    fn border(row: usize, col: usize) -> Square {
        Square {
            row,
            col,
            level: Level::BORDER,
            is_border: true,
            source_date: None,
            source_count: None,
        }
    }
}

/// A composed year: 18 rows × 110 columns of squares in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearGrid {
    year: i32,
    total_count: u64,
    squares: Vec<Square>,
}

impl YearGrid {
    fn bordered(year: i32, total_count: u64) -> YearGrid {
        let squares = (0..GRID_SQUARES)
            .map(|index| Square::border(index / GRID_COLS, index % GRID_COLS))
            .collect();
        YearGrid {
            year,
            total_count,
            squares,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Contributions in the source year, including days left off the grid.
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn rows_len(&self) -> usize {
        GRID_ROWS
    }

    pub fn cols_len(&self) -> usize {
        GRID_COLS
    }

    pub fn square(&self, row: usize, col: usize) -> Option<&Square> {
        if row >= GRID_ROWS || col >= GRID_COLS {
            return None;
        }
        self.squares.get(row * GRID_COLS + col)
    }

    pub fn level_at(&self, row: usize, col: usize) -> Option<Level> {
        self.square(row, col).map(|square| square.level)
    }

    /// All squares, row by row.
    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Square]> {
        self.squares.chunks(GRID_COLS)
    }

    pub fn border_square_count(&self) -> usize {
        self.squares.iter().filter(|s| s.level.is_border()).count()
    }

    pub fn data_square_count(&self) -> usize {
        self.squares.len() - self.border_square_count()
    }

    /// Squares per color role, indexed by level value (index 5 is border).
    pub fn level_counts(&self) -> [usize; 6] {
        let mut counts = [0; 6];
        for square in &self.squares {
            counts[square.level.index()] += 1;
        }
        counts
    }

    fn fill_block(&mut self, week_index: usize, day_index: usize, day: Option<&ClassifiedDay>) {
        let row_origin = BORDER_WIDTH + SQUARES_PER_DAY * day_index;
        let col_origin = BORDER_WIDTH + SQUARES_PER_DAY * week_index;
        for row in row_origin..row_origin + SQUARES_PER_DAY {
            for col in col_origin..col_origin + SQUARES_PER_DAY {
                let square = &mut self.squares[row * GRID_COLS + col];
                square.is_border = false;
                match day {
                    Some(day) => {
                        square.level = day.level;
                        square.source_date = Some(day.date);
                        square.source_count = Some(day.count);
                    }
                    None => {
                        square.level = Level::NONE;
                    }
                }
            }
        }
    }
}

/// Lay out one normalized year.
pub fn compose(series: &YearSeries) -> YearGrid {
    compose_weeks(series.year(), series.total_count(), &series.weeks())
}

/// Lay out a sequence of weeks inside the bordered frame.
///
/// Weeks past the 53rd are dropped. Empty slots of an emitted week become level-0 squares; weeks that were never emitted stay
/// border.
pub fn compose_weeks(year: i32, total_count: u64, weeks: &[Week]) -> YearGrid {
    let mut grid = YearGrid::bordered(year, total_count);
    if weeks.len() > WEEKS_PER_GRID {
        let dropped: usize = weeks[WEEKS_PER_GRID..]
            .iter()
            .map(|week| week.populated_days().count())
            .sum();
        debug!("{year}: {dropped} day(s) past week {WEEKS_PER_GRID} left off the grid");
    }
    for (week_index, week) in weeks.iter().take(WEEKS_PER_GRID).enumerate() {
        for (day_index, slot) in week.days.iter().enumerate() {
            grid.fill_block(week_index, day_index, slot.as_ref());
        }
    }
    grid
}
