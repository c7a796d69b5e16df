//! Record store access for the credential subsystem.
//!
//! The store is document-oriented: a database is a directory, a
//! collection is a sub-directory, and each document is a versioned JSON
//! file named by a generated native id. The academic ID that joins the
//! two collections is an ordinary document field, not the native key.
//!
//! # Directory layout
//!
//! ```text
//! {REGISTRY_STORE_PATH}/
//! └── {REGISTRY_DB}/
//!     ├── students/
//!     │   └── {doc_id}.json
//!     └── logins/
//!         └── {doc_id}.json
//! ```
//!
//! # Modules
//!
//! - [`database`] — the owned store handle and raw document collections.
//! - [`students`] — typed read access to the identity collection.
//! - [`logins`] — typed read/write access to the credential collection.
//!
//! All filesystem failures are normalized into
//! [`CredentialError::StoreUnavailable`] at this boundary; no raw I/O
//! error crosses it.
//!
//! [`CredentialError::StoreUnavailable`]: crate::error::CredentialError::StoreUnavailable

pub mod database;
pub mod logins;
pub mod students;

pub use database::{Collection, Database};
pub use logins::LoginStore;
pub use students::StudentDirectory;

/// Document field joining the two collections.
pub(crate) const ACADEMIC_ID_FIELD: &str = "academicId";

/// Serialize a typed record into a raw document.
pub(crate) fn encode<T: serde::Serialize>(
    record: &T,
    collection: &str,
) -> crate::error::Result<serde_json::Value> {
    serde_json::to_value(record).map_err(|e| crate::error::CredentialError::InvalidRecord {
        collection: collection.to_string(),
        reason: e.to_string(),
    })
}
