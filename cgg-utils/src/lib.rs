//! Shared utility functions for the graphghan crates.

/// Date utility functions
pub mod dates {
    use chrono::{Datelike, NaiveDate};

    /// ISO calendar date format used by the contribution supplier: "YYYY-MM-DD"
    pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), ISO_DATE_FORMAT)?)
    }

    /// Gregorian leap year rule.
    pub fn is_leap_year(year: i32) -> bool {
        (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
    }

    /// Number of calendar days in `year` (365 or 366).
    pub fn days_in_year(year: i32) -> u32 {
        if is_leap_year(year) {
            366
        } else {
            365
        }
    }

    /// Days between the Sunday that starts the week and `date`.
    /// Sunday = 0, Saturday = 6.
    pub fn days_since_sunday(date: &NaiveDate) -> u32 {
        date.weekday().num_days_from_sunday()
    }

    /// Number of Sunday-start weeks touched by the calendar year.
    /// 53 for most years, 54 for a leap year that starts on a Saturday.
    pub fn weeks_spanned(year: i32) -> Option<u32> {
        let jan1 = NaiveDate::from_ymd_opt(year, 1, 1)?;
        let slots = days_since_sunday(&jan1) + days_in_year(year);
        Some(slots.div_ceil(7))
    }

}
