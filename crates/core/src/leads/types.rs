//! Lead data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A captured lead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    /// Unique identifier.
    pub id: Uuid,
    /// Normalized email address.
    pub email: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Capture timestamp.
    pub created_at: DateTime<Utc>,
}
