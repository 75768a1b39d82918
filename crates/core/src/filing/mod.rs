//! First filing period and due date rules for UAE corporate tax.

pub mod engine;
pub mod error;
pub mod types;


pub use engine::{REGIME_START, compute_first_filing};
pub use error::FilingError;
pub use types::{FilingPeriod, FilingResult, FinancialYear};
