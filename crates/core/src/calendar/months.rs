//! Month arithmetic over civil calendar dates.
//!
//! All operations are timezone-free: a date is a plain (year, month, day)
//! triple and comparisons never involve a clock.

use chrono::{Datelike, NaiveDate};

/// Returns the first day of the given month, or `None` if the month is
/// outside chrono's representable range.
#[must_use]
pub fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Returns the last calendar day of the given month.
///
/// Computed as the day before the first of the following month, which
/// resolves leap-year Februaries without a day table.
#[must_use]
pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

/// Whole months from `start` to `end`, ignoring day-of-month.
///
/// A gap of 6 months and 1 day and a gap of 5 months and 29 days can round
/// to the same value; the filing period rules are defined at month
/// granularity and depend on exactly this behavior.
#[must_use]
pub fn months_between(start: NaiveDate, end: NaiveDate) -> i64 {
    let start_months = i64::from(start.year()) * 12 + i64::from(start.month0());
    let end_months = i64::from(end.year()) * 12 + i64::from(end.month0());
    end_months - start_months
}

/// Formats a date as "<MonthName> <Year>" with the full English month name.
#[must_use]
pub fn format_month_year(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}
