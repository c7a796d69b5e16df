//! Student identity record.

use serde::{Deserialize, Serialize};

/// A student identity record.
///
/// Owned by the identity collection; created by external seeding, soft
/// deleted (flagged, not removed) by external processes. The credential
/// subsystem only ever reads these.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Stable external identifier, unique across the population.
    pub academic_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub surname: String,
    pub other_names: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Soft-delete flag. Deleted students are excluded from listings,
    /// provisioning, and reports.
    #[serde(default)]
    pub deleted: bool,
}

impl Student {
    /// Display name for audit and confirmation output: title, surname,
    /// and other names joined with spaces, absent parts skipped.
    pub fn display_name(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(3);
        if let Some(title) = self.title.as_deref() {
            if !title.is_empty() {
                parts.push(title);
            }
        }
        parts.push(&self.surname);
        parts.push(&self.other_names);
        parts.join(" ").trim().to_string()
    }
}
