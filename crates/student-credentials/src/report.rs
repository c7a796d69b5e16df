//! Population-wide credential health reporting.
//!
//! Read-only. The candidate PIN is a value the operator already knows
//! (typically the bulk-provisioned default); counting how many records
//! verify against it confirms a fleet-wide rollout, it is not a security
//! audit.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::Result;
use crate::pin;
use crate::store::{LoginStore, StudentDirectory};

/// Aggregate credential health for one population.
#[derive(Debug, Clone, Serialize)]
pub struct PopulationReport {
    /// Active (non-deleted) students.
    pub total: usize,
    /// Students holding any login record.
    pub with_credential: usize,
    /// Students whose stored hash verifies against the candidate PIN.
    pub verifiable_with_known_pin: usize,
    /// Academic IDs with a login record but no matching active student.
    /// The store does not enforce the cross-collection link, so these are
    /// reportable anomalies rather than errors.
    pub orphaned_credentials: Vec<String>,
}

/// Compute a [`PopulationReport`] for the whole population.
///
/// Never mutates either collection.
pub fn summarize(
    students: &StudentDirectory,
    logins: &LoginStore,
    candidate_pin: &str,
) -> Result<PopulationReport> {
    let population = students.all_active()?;

    let mut with_credential = 0;
    let mut verifiable = 0;
    for student in &population {
        let Some(login) = logins.get(&student.academic_id)? else {
            continue;
        };
        with_credential += 1;
        if let Some(hash) = login.pin.as_deref() {
            if pin::verify_pin(candidate_pin, hash) {
                verifiable += 1;
            }
        }
    }

    let known_ids: HashSet<&str> = population.iter().map(|s| s.academic_id.as_str()).collect();
    let mut orphaned: Vec<String> = logins
        .all()?
        .into_iter()
        .map(|login| login.academic_id)
        .filter(|id| !known_ids.contains(id.as_str()))
        .collect();
    orphaned.sort();

    Ok(PopulationReport {
        total: population.len(),
        with_credential,
        verifiable_with_known_pin: verifiable,
        orphaned_credentials: orphaned,
    })
}
