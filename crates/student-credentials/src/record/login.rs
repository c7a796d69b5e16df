//! Login (credential) record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The credential record for one student.
///
/// At most one login exists per academic ID; that uniqueness is an
/// application-level invariant, not enforced by the store. Created by
/// provisioning, mutated on rotation (`pin` + `updatedAt`) and on
/// successful authentication (`lastLogin` only), never deleted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Login {
    /// Join key to the student record.
    pub academic_id: String,
    /// PHC hash string of the PIN. Absent or empty means no secret has
    /// been set; the plaintext PIN is never stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin: Option<String>,
    /// Authorization roles. Opaque to this subsystem: read, stamped on
    /// creation, never interpreted.
    #[serde(default)]
    pub roles: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Last successful authentication, if any.
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
}

impl Login {
    /// Build a fresh login record carrying an already-hashed PIN.
    pub fn new(
        academic_id: impl Into<String>,
        pin_hash: impl Into<String>,
        roles: Vec<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            academic_id: academic_id.into(),
            pin: Some(pin_hash.into()),
            roles,
            created_at: now,
            updated_at: now,
            last_login: None,
        }
    }

    /// Whether a usable stored hash is present.
    pub fn has_pin(&self) -> bool {
        self.pin.as_deref().is_some_and(|p| !p.is_empty())
    }
}
