//! Lead registry errors.

use thiserror::Error;

/// Errors from the lead registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeadError {
    /// The email address is already registered.
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),
}
