//! Bulk credential provisioning.
//!
//! Rotation deliberately refuses to create login records, so first-time
//! setup is an explicit pass over the population: every active student
//! gets a login record carrying a hash of the bulk default PIN, and
//! students who already have one get that PIN re-applied.

use chrono::Utc;

use crate::error::{CredentialError, Result};
use crate::pin;
use crate::record::Login;
use crate::store::{Database, LoginStore, StudentDirectory};

/// Counts from one provisioning pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProvisionSummary {
    /// Login records created for students who had none.
    pub created: usize,
    /// Existing login records reset to the default PIN.
    pub updated: usize,
}

impl ProvisionSummary {
    /// Students touched in total.
    pub fn total(&self) -> usize {
        self.created + self.updated
    }
}

/// Walks the population and provisions login records.
pub struct Provisioner {
    students: StudentDirectory,
    logins: LoginStore,
}

impl Provisioner {
    /// Build a provisioner over the two collections of `db`.
    pub fn new(db: &Database) -> Result<Self> {
        Ok(Self {
            students: StudentDirectory::new(db)?,
            logins: LoginStore::new(db)?,
        })
    }

    /// Ensure every active student has a login record with `default_pin`.
    ///
    /// Each record gets its own fresh hash of the PIN; no hash string is
    /// shared between students. New records are stamped with the single
    /// opaque `role` string. Existing records keep their roles.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPin` for an empty `default_pin`, or any store
    /// error from the underlying collections.
    pub fn provision_all(&self, default_pin: &str, role: &str) -> Result<ProvisionSummary> {
        if default_pin.trim().is_empty() {
            return Err(CredentialError::InvalidPin(
                "default PIN must not be empty".to_string(),
            ));
        }

        let mut summary = ProvisionSummary::default();
        for student in self.students.all_active()? {
            let hash = pin::hash_pin(default_pin)?;
            let now = Utc::now();

            if self.logins.get(&student.academic_id)?.is_some() {
                self.logins.set_pin(&student.academic_id, &hash, now)?;
                summary.updated += 1;
                log::debug!("reset default PIN for student {}", student.academic_id);
            } else {
                self.logins.insert(&Login::new(
                    student.academic_id.clone(),
                    hash,
                    vec![role.to_string()],
                    now,
                ))?;
                summary.created += 1;
                log::debug!("created login for student {}", student.academic_id);
            }
        }

        log::info!(
            "provisioning pass complete: {} created, {} updated",
            summary.created,
            summary.updated
        );
        Ok(summary)
    }
}
