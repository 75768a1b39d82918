//! Filing calculation errors.

use thiserror::Error;

/// Errors from filing period calculation and input parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilingError {
    /// The financial year string is not one of the 12 supported conventions.
    #[error("Unknown financial year convention: {0}")]
    UnknownConvention(String),

    /// Month arithmetic left the representable calendar range.
    #[error("Date out of supported range: year {year}, month {month}")]
    DateOutOfRange {
        /// Year of the unrepresentable month.
        year: i32,
        /// Month of the unrepresentable month.
        month: u32,
    },
}
