//! Month-level civil date arithmetic.

pub mod months;

pub use months::{first_of_month, format_month_year, last_day_of_month, months_between};
