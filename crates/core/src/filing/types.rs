//! Filing domain types.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::FilingError;
use crate::calendar::format_month_year;

/// Financial year convention: a recurring 12-month accounting cycle defined
/// by its start month (as declared in a company's MOA/AOA).
///
/// The cycle always ends the month before it starts, so the end month is
/// fully determined by the start month. The 12 variants form a closed
/// enumeration; parsing any other string fails fast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum FinancialYear {
    /// January to December.
    JanuaryToDecember,
    /// February to January.
    FebruaryToJanuary,
    /// March to February.
    MarchToFebruary,
    /// April to March.
    AprilToMarch,
    /// May to April.
    MayToApril,
    /// June to May.
    JuneToMay,
    /// July to June.
    JulyToJune,
    /// August to July.
    AugustToJuly,
    /// September to August.
    SeptemberToAugust,
    /// October to September.
    OctoberToSeptember,
    /// November to October.
    NovemberToOctober,
    /// December to November.
    DecemberToNovember,
}

impl FinancialYear {
    /// All 12 conventions, in the order the product presents them.
    pub const ALL: [Self; 12] = [
        Self::JanuaryToDecember,
        Self::FebruaryToJanuary,
        Self::MarchToFebruary,
        Self::AprilToMarch,
        Self::MayToApril,
        Self::JuneToMay,
        Self::JulyToJune,
        Self::AugustToJuly,
        Self::SeptemberToAugust,
        Self::OctoberToSeptember,
        Self::NovemberToOctober,
        Self::DecemberToNovember,
    ];

    /// First month of the cycle (1-based).
    #[must_use]
    pub const fn start_month(self) -> u32 {
        match self {
            Self::JanuaryToDecember => 1,
            Self::FebruaryToJanuary => 2,
            Self::MarchToFebruary => 3,
            Self::AprilToMarch => 4,
            Self::MayToApril => 5,
            Self::JuneToMay => 6,
            Self::JulyToJune => 7,
            Self::AugustToJuly => 8,
            Self::SeptemberToAugust => 9,
            Self::OctoberToSeptember => 10,
            Self::NovemberToOctober => 11,
            Self::DecemberToNovember => 12,
        }
    }

    /// Last month of the cycle (1-based): always the month before the
    /// start month.
    #[must_use]
    pub const fn end_month(self) -> u32 {
        (self.start_month() + 10) % 12 + 1
    }

    /// Returns true if the cycle crosses a calendar year boundary, i.e. its
    /// end month falls earlier in the calendar than its start month.
    #[must_use]
    pub const fn wraps_year(self) -> bool {
        self.end_month() < self.start_month()
    }

    /// The convention string, e.g. "April to March".
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::JanuaryToDecember => "January to December",
            Self::FebruaryToJanuary => "February to January",
            Self::MarchToFebruary => "March to February",
            Self::AprilToMarch => "April to March",
            Self::MayToApril => "May to April",
            Self::JuneToMay => "June to May",
            Self::JulyToJune => "July to June",
            Self::AugustToJuly => "August to July",
            Self::SeptemberToAugust => "September to August",
            Self::OctoberToSeptember => "October to September",
            Self::NovemberToOctober => "November to October",
            Self::DecemberToNovember => "December to November",
        }
    }
}

impl fmt::Display for FinancialYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FinancialYear {
    type Err = FilingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|fy| fy.as_str() == s.trim())
            .ok_or_else(|| FilingError::UnknownConvention(s.to_string()))
    }
}

impl From<FinancialYear> for String {
    fn from(fy: FinancialYear) -> Self {
        fy.as_str().to_string()
    }
}

impl TryFrom<String> for FinancialYear {
    type Error = FilingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The first tax accounting period a company must report for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingPeriod {
    /// First day of the period.
    pub start: NaiveDate,
    /// Last day of the period (always the last calendar day of a month).
    pub end: NaiveDate,
}

impl fmt::Display for FilingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            format_month_year(self.start),
            format_month_year(self.end)
        )
    }
}

/// Result of a first-filing calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingResult {
    /// First filing period.
    pub first_filing_period: FilingPeriod,
    /// Filing due date: the 1st of the month nine months after the period
    /// ends. Only month and year are meaningful downstream.
    pub due_date: NaiveDate,
}

impl FilingResult {
    /// Display string for the due date, e.g. "September 2024".
    #[must_use]
    pub fn due_date_display(&self) -> String {
        format_month_year(self.due_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conventions_round_trip_through_strings() {
        for fy in FinancialYear::ALL {
            let parsed: FinancialYear = fy.as_str().parse().expect("round trip parses");
            assert_eq!(parsed, fy);
        }
    }

    #[test]
    fn test_unknown_convention_fails_fast() {
        let error = "Brumaire to Vendemiaire".parse::<FinancialYear>().unwrap_err();
        assert_eq!(
            error,
            FilingError::UnknownConvention("Brumaire to Vendemiaire".to_string())
        );
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let parsed: FinancialYear = "  April to March ".parse().expect("trimmed input parses");
        assert_eq!(parsed, FinancialYear::AprilToMarch);
    }

    #[test]
    fn test_end_month_is_month_before_start() {
        for fy in FinancialYear::ALL {
            let expected = if fy.start_month() == 1 {
                12
            } else {
                fy.start_month() - 1
            };
            assert_eq!(fy.end_month(), expected, "convention {fy}");
        }
    }

    #[test]
    fn test_only_january_convention_stays_in_one_year() {
        for fy in FinancialYear::ALL {
            assert_eq!(fy.wraps_year(), fy != FinancialYear::JanuaryToDecember);
        }
    }

    #[test]
    fn test_serde_uses_convention_strings() {
        let value = serde_json::to_value(FinancialYear::AprilToMarch).expect("serializes");
        assert_eq!(value, serde_json::json!("April to March"));

        let parsed: FinancialYear =
            serde_json::from_value(serde_json::json!("December to November"))
                .expect("deserializes");
        assert_eq!(parsed, FinancialYear::DecemberToNovember);

        assert!(serde_json::from_value::<FinancialYear>(serde_json::json!("Dec to Nov")).is_err());
    }

    #[test]
    fn test_period_display() {
        let period = FilingPeriod {
            start: NaiveDate::from_ymd_opt(2023, 6, 1).expect("valid date"),
            end: NaiveDate::from_ymd_opt(2023, 12, 31).expect("valid date"),
        };
        assert_eq!(period.to_string(), "June 2023 to December 2023");
    }
}
