//! Credential lifecycle orchestration.
//!
//! [`CredentialManager`] composes the identity directory, the login store,
//! and the PIN hasher into the three operator-facing operations: rotate a
//! PIN, authenticate a supplied PIN, and list credential status across the
//! population. Each call is a complete transaction over the store; no
//! state is held between calls.

use chrono::Utc;
use serde::Serialize;

use crate::error::{CredentialError, Result};
use crate::pin;
use crate::record::Student;
use crate::store::{Database, LoginStore, StudentDirectory};

// ── AuthOutcome ───────────────────────────────────────────────────────────────

/// Result of a completed verification.
///
/// A wrong PIN against an existing, provisioned credential is an expected
/// negative outcome, so it is a variant here rather than an error kind.
/// Both variants carry the student's display name for operator output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// The supplied PIN matched; `lastLogin` has been stamped.
    Authenticated { name: String },
    /// The supplied PIN did not match the stored hash.
    Rejected { name: String },
}

impl AuthOutcome {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthOutcome::Authenticated { .. })
    }
}

// ── CredentialStatus ──────────────────────────────────────────────────────────

/// One row of the population status listing.
///
/// Carries no secret material, hashed or plain.
#[derive(Debug, Clone, Serialize)]
pub struct CredentialStatus {
    pub name: String,
    pub academic_id: String,
    pub email: Option<String>,
    pub has_credential: bool,
}

// ── CredentialManager ─────────────────────────────────────────────────────────

/// Orchestrates PIN rotation, authentication, and status listing.
pub struct CredentialManager {
    students: StudentDirectory,
    logins: LoginStore,
}

impl CredentialManager {
    /// Build a manager over the two collections of `db`.
    pub fn new(db: &Database) -> Result<Self> {
        Ok(Self {
            students: StudentDirectory::new(db)?,
            logins: LoginStore::new(db)?,
        })
    }

    /// Build a manager from already-opened accessors.
    pub fn from_parts(students: StudentDirectory, logins: LoginStore) -> Self {
        Self { students, logins }
    }

    /// Replace a student's PIN with a fresh hash of `new_pin`.
    ///
    /// Returns the student's display name for audit output. The store is
    /// mutated exactly once, and only after the identity has resolved and
    /// the new PIN has hashed.
    ///
    /// # Errors
    ///
    /// - `IdentityNotFound` — no student carries `academic_id`; nothing
    ///   is written.
    /// - `InvalidPin` — `new_pin` is empty or whitespace-only.
    /// - `CredentialNotProvisioned` — the student exists but has no login
    ///   record; rotation never creates one.
    pub fn rotate(&self, academic_id: &str, new_pin: &str) -> Result<String> {
        let student = self.resolve(academic_id)?;

        if new_pin.trim().is_empty() {
            return Err(CredentialError::InvalidPin(
                "PIN must not be empty".to_string(),
            ));
        }

        let hash = pin::hash_pin(new_pin)?;
        let modified = self.logins.set_pin(academic_id, &hash, Utc::now())?;
        if modified == 0 {
            return Err(CredentialError::CredentialNotProvisioned(
                academic_id.to_string(),
            ));
        }

        log::info!("rotated PIN for student {academic_id}");
        Ok(student.display_name())
    }

    /// Verify a supplied PIN for a student.
    ///
    /// On a match, `lastLogin` is stamped before the call returns; a
    /// mismatch leaves the record untouched and returns
    /// [`AuthOutcome::Rejected`].
    ///
    /// # Errors
    ///
    /// - `IdentityNotFound` — no student carries `academic_id`.
    /// - `NoCredentialRecord` — the student has never been provisioned.
    /// - `SecretNotSet` — a login record exists but holds no hash.
    pub fn authenticate(&self, academic_id: &str, supplied_pin: &str) -> Result<AuthOutcome> {
        let student = self.resolve(academic_id)?;

        let login = self
            .logins
            .get(academic_id)?
            .ok_or_else(|| CredentialError::NoCredentialRecord(academic_id.to_string()))?;

        let stored = login
            .pin
            .as_deref()
            .filter(|hash| !hash.is_empty())
            .ok_or_else(|| CredentialError::SecretNotSet(academic_id.to_string()))?;

        let name = student.display_name();
        if pin::verify_pin(supplied_pin, stored) {
            // Stamp the audit trail before reporting success. A crash in
            // between leaves lastLogin stale, never falsely fresh.
            self.logins.record_login(academic_id, Utc::now())?;
            log::info!("authentication succeeded for student {academic_id}");
            Ok(AuthOutcome::Authenticated { name })
        } else {
            log::info!("authentication rejected for student {academic_id}");
            Ok(AuthOutcome::Rejected { name })
        }
    }

    /// Credential status for every non-deleted student.
    pub fn list_with_status(&self) -> Result<Vec<CredentialStatus>> {
        let mut rows = Vec::new();
        for student in self.students.all_active()? {
            let has_credential = self.logins.get(&student.academic_id)?.is_some();
            rows.push(CredentialStatus {
                name: student.display_name(),
                academic_id: student.academic_id,
                email: student.email,
                has_credential,
            });
        }
        Ok(rows)
    }

    /// The identity directory this manager reads from.
    pub fn students(&self) -> &StudentDirectory {
        &self.students
    }

    /// The login store this manager reads and writes.
    pub fn logins(&self) -> &LoginStore {
        &self.logins
    }

    fn resolve(&self, academic_id: &str) -> Result<Student> {
        self.students
            .find_by_academic_id(academic_id)?
            .ok_or_else(|| CredentialError::IdentityNotFound(academic_id.to_string()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
