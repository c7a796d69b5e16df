//! Error types for the credential subsystem.
//!
//! All errors are strongly typed and propagated without panicking.
//! Secret material (plaintext or hashed) is never included in error
//! messages.
//!
//! A wrong PIN is not an error: authentication returns
//! [`crate::lifecycle::AuthOutcome::Rejected`] so callers can tell an
//! expected negative outcome apart from a data or provisioning defect.

/// Credential error kinds covering all operations.
///
/// `StoreUnavailable` is the only kind a caller should retry; the
/// `*NotFound` / `*NotProvisioned` kinds indicate a data or provisioning
/// defect and must be surfaced, never silently retried.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("no student found with academic ID: {0}")]
    IdentityNotFound(String),

    #[error("student {0} has no login record to rotate; provision one first")]
    CredentialNotProvisioned(String),

    #[error("no login record for student: {0}")]
    NoCredentialRecord(String),

    #[error("no PIN set for student: {0}")]
    SecretNotSet(String),

    #[error("invalid PIN: {0}")]
    InvalidPin(String),

    #[error("PIN hashing failed: {0}")]
    HashFailed(String),

    #[error("record store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("invalid record in collection {collection}: {reason}")]
    InvalidRecord { collection: String, reason: String },

    #[error("missing configuration: {0} is not set")]
    MissingConfig(String),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, CredentialError>;
