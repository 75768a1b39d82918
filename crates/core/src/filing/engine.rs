//! First filing period calculation.
//!
//! UAE corporate tax took effect on 1 June 2023. A company's first filing
//! period depends on where its incorporation date falls relative to that
//! date, and the filing due date is fixed at nine months after the period
//! ends.

use chrono::{Datelike, NaiveDate};

use super::error::FilingError;
use super::types::{FilingPeriod, FilingResult, FinancialYear};
use crate::calendar::{first_of_month, last_day_of_month, months_between};

/// Date the UAE corporate tax regime took effect.
pub const REGIME_START: NaiveDate = match NaiveDate::from_ymd_opt(2023, 6, 1) {
    Some(date) => date,
    None => panic!("regime start date is not representable"),
};

/// A first filing period must cover at least this many whole months;
/// anything shorter is extended to the following financial year end.
const MIN_PERIOD_MONTHS: i64 = 6;

/// Computes the first filing period and filing due date for a company.
///
/// Deterministic and side-effect-free: identical inputs always produce
/// identical results, and the function is safe to call concurrently.
///
/// # Errors
///
/// Returns [`FilingError::DateOutOfRange`] only when month arithmetic
/// leaves chrono's representable calendar range.
pub fn compute_first_filing(
    incorporation: NaiveDate,
    financial_year: FinancialYear,
) -> Result<FilingResult, FilingError> {
    let first_filing_period = if incorporation.year() == REGIME_START.year()
        && incorporation.month() == REGIME_START.month()
    {
        straddle_period(incorporation, financial_year)?
    } else if incorporation < REGIME_START {
        pre_regime_period(financial_year)?
    } else {
        post_regime_period(incorporation, financial_year)?
    };

    let due_date = due_date_for(first_filing_period.end)?;

    Ok(FilingResult {
        first_filing_period,
        due_date,
    })
}

/// Incorporation in June 2023: the company straddles regime commencement.
///
/// A wrapping convention's next year-end always lands in the following
/// calendar year; only "January to December" can still close within 2023.
fn straddle_period(
    incorporation: NaiveDate,
    fy: FinancialYear,
) -> Result<FilingPeriod, FilingError> {
    let end_month = fy.end_month();

    let end_year = if fy.wraps_year() || end_month < incorporation.month() {
        incorporation.year() + 1
    } else {
        incorporation.year()
    };

    close_at_fy_end(incorporation, end_year, end_month)
}

/// Incorporation before 1 June 2023: the first filing period is the first
/// full financial year cycle starting on or after the regime start.
fn pre_regime_period(fy: FinancialYear) -> Result<FilingPeriod, FilingError> {
    let start_month = fy.start_month();

    // Cycles starting January through May next recur in 2024; June through
    // December starts already fall on or after the regime start in 2023.
    let start_year = if start_month < REGIME_START.month() {
        2024
    } else {
        2023
    };
    let end_year = if fy.wraps_year() {
        start_year + 1
    } else {
        start_year
    };

    let start = first_of_month(start_year, start_month).ok_or(FilingError::DateOutOfRange {
        year: start_year,
        month: start_month,
    })?;
    let end = last_day_of_month(end_year, fy.end_month()).ok_or(FilingError::DateOutOfRange {
        year: end_year,
        month: fy.end_month(),
    })?;

    Ok(FilingPeriod { start, end })
}

/// Incorporation after 1 June 2023: close at the first financial year end
/// at or after the incorporation month, subject to the minimum period
/// length. The period starts on the incorporation date itself.
fn post_regime_period(
    incorporation: NaiveDate,
    fy: FinancialYear,
) -> Result<FilingPeriod, FilingError> {
    let month = incorporation.month();
    let end_month = fy.end_month();

    let end_year = if fy.wraps_year() {
        // A cycle ending in the incorporation month itself counts as
        // already closed.
        if month >= fy.start_month() || month >= end_month {
            incorporation.year() + 1
        } else {
            incorporation.year()
        }
    } else if month > end_month {
        incorporation.year() + 1
    } else {
        incorporation.year()
    };

    close_at_fy_end(incorporation, end_year, end_month)
}

/// Builds the filing period starting at `incorporation` and closing at the
/// financial year end `(end_year, end_month)`, extending by one full cycle
/// when fewer than six whole months remain.
fn close_at_fy_end(
    incorporation: NaiveDate,
    end_year: i32,
    end_month: u32,
) -> Result<FilingPeriod, FilingError> {
    let fy_end = last_day_of_month(end_year, end_month).ok_or(FilingError::DateOutOfRange {
        year: end_year,
        month: end_month,
    })?;

    let end = if months_between(incorporation, fy_end) >= MIN_PERIOD_MONTHS {
        fy_end
    } else {
        last_day_of_month(end_year + 1, end_month).ok_or(FilingError::DateOutOfRange {
            year: end_year + 1,
            month: end_month,
        })?
    };

    Ok(FilingPeriod {
        start: incorporation,
        end,
    })
}

/// Due date rule: the 1st of the month nine months after the period end.
fn due_date_for(period_end: NaiveDate) -> Result<NaiveDate, FilingError> {
    let shifted = period_end.month0() + 9;
    let due_month = shifted % 12 + 1;
    let due_year = period_end.year() + i32::from(shifted >= 12);

    first_of_month(due_year, due_month).ok_or(FilingError::DateOutOfRange {
        year: due_year,
        month: due_month,
    })
}
