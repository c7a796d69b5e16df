//! Typed access to the login (credential) collection.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::{CredentialError, Result};
use crate::record::Login;
use crate::store::database::{Collection, Database};
use crate::store::{encode, ACADEMIC_ID_FIELD};

/// Name of the credential collection.
pub const LOGINS_COLLECTION: &str = "logins";

/// Read/write access to login records, keyed by academic ID.
pub struct LoginStore {
    col: Collection,
}

impl LoginStore {
    /// Open the login store inside `db`.
    pub fn new(db: &Database) -> Result<Self> {
        Ok(Self {
            col: db.collection(LOGINS_COLLECTION)?,
        })
    }

    /// Fetch the login record for a student, if one exists.
    pub fn get(&self, academic_id: &str) -> Result<Option<Login>> {
        match self.col.find_one(ACADEMIC_ID_FIELD, academic_id)? {
            Some(doc) => Ok(Some(self.decode(doc)?)),
            None => Ok(None),
        }
    }

    /// Create a login record. Callers are responsible for the one-login-
    /// per-academic-ID invariant; use [`LoginStore::get`] first.
    pub fn insert(&self, login: &Login) -> Result<()> {
        let doc = encode(login, self.col.name())?;
        self.col.insert(&doc)?;
        Ok(())
    }

    /// Set a new PIN hash and update timestamp on an existing record.
    ///
    /// Returns the modified count: 0 means no login record exists for
    /// `academic_id` — no record is ever created here, so provisioning
    /// stays an explicit step.
    pub fn set_pin(&self, academic_id: &str, pin_hash: &str, now: DateTime<Utc>) -> Result<u64> {
        self.col.update_one(
            ACADEMIC_ID_FIELD,
            academic_id,
            &[
                ("pin", Value::String(pin_hash.to_string())),
                ("updatedAt", timestamp(now)),
            ],
        )
    }

    /// Stamp a successful authentication. Touches only `lastLogin`.
    pub fn record_login(&self, academic_id: &str, now: DateTime<Utc>) -> Result<u64> {
        self.col
            .update_one(ACADEMIC_ID_FIELD, academic_id, &[("lastLogin", timestamp(now))])
    }

    /// Load every login record.
    pub fn all(&self) -> Result<Vec<Login>> {
        self.col
            .documents()?
            .into_iter()
            .map(|doc| self.decode(doc))
            .collect()
    }

    fn decode(&self, doc: Value) -> Result<Login> {
        serde_json::from_value(doc).map_err(|e| CredentialError::InvalidRecord {
            collection: self.col.name().to_string(),
            reason: e.to_string(),
        })
    }
}

fn timestamp(t: DateTime<Utc>) -> Value {
    Value::String(t.to_rfc3339())
}
