//! Thread-safe in-memory lead store.
//!
//! Process-lifetime only: captured leads feed the telemetry sink and the
//! CSV export; nothing is persisted.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

use super::error::LeadError;
use super::types::Lead;

/// In-memory lead registry with duplicate suppression.
///
/// Emails are normalized (trimmed, ASCII-lowercased) before the duplicate
/// check. Insertion order is preserved for export.
#[derive(Debug, Default)]
pub struct LeadStore {
    leads: RwLock<Vec<Lead>>,
}

impl LeadStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a lead. First registration per email wins.
    ///
    /// # Errors
    ///
    /// Returns [`LeadError::DuplicateEmail`] if the email is already
    /// registered.
    pub fn register(&self, email: &str, phone: Option<String>) -> Result<Lead, LeadError> {
        let email = normalize_email(email);

        let mut leads = write_lock(&self.leads);
        if leads.iter().any(|lead| lead.email == email) {
            return Err(LeadError::DuplicateEmail(email));
        }

        let lead = Lead {
            id: Uuid::now_v7(),
            email,
            phone,
            created_at: Utc::now(),
        };
        leads.push(lead.clone());

        Ok(lead)
    }

    /// Returns true if the email is already registered.
    #[must_use]
    pub fn contains(&self, email: &str) -> bool {
        let email = normalize_email(email);
        read_lock(&self.leads).iter().any(|lead| lead.email == email)
    }

    /// Number of registered leads.
    #[must_use]
    pub fn len(&self) -> usize {
        read_lock(&self.leads).len()
    }

    /// Returns true if no leads are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Exports all leads as CSV with an `email,createdAt` header, in
    /// insertion order.
    #[must_use]
    pub fn export_csv(&self) -> String {
        let leads = read_lock(&self.leads);
        let mut csv = String::from("email,createdAt\n");
        for lead in leads.iter() {
            csv.push_str(&lead.email);
            csv.push(',');
            csv.push_str(&lead.created_at.to_rfc3339_opts(SecondsFormat::Millis, true));
            csv.push('\n');
        }
        csv
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

// A poisoned lock only means another thread panicked mid-operation; the
// Vec itself is still structurally valid.

fn read_lock(lock: &RwLock<Vec<Lead>>) -> RwLockReadGuard<'_, Vec<Lead>> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_lock(lock: &RwLock<Vec<Lead>>) -> RwLockWriteGuard<'_, Vec<Lead>> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
