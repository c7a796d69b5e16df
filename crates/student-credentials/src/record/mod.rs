//! Typed record shapes for the two collections this subsystem touches.
//!
//! Documents are stored with camelCase field names; the structs here are
//! the single decode point, so a document missing a required field is
//! rejected when read rather than probed defensively at each call site.
//!
//! The two record types are joined by the academic ID — a plain string
//! field, not the store's native document key. The store does not enforce
//! that linkage; see [`crate::report`] for the anomaly check.
//!
//! - [`student`] — the identity record. Never mutated by this subsystem.
//! - [`login`] — the credential record (hashed PIN plus audit metadata).

pub mod login;
pub mod student;

pub use login::Login;
pub use student::Student;
