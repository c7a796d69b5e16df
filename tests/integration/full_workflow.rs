//! Integration test: full credential lifecycle end to end.
//!
//! Walks one student through the whole story:
//! 1. Identity exists, no login record — rotation refuses
//! 2. Provisioning creates the login record
//! 3. Rotation replaces the PIN
//! 4. Authentication succeeds with the new PIN and stamps the audit trail
//! 5. A wrong PIN is rejected without touching the audit trail
//! 6. The population report confirms the fleet state

use chrono::Utc;

use student_credentials::{
    summarize, AuthOutcome, CredentialError, CredentialManager, Database, Provisioner, Student,
    StoreConfig,
};

fn mensah() -> Student {
    Student {
        academic_id: "10234567".to_string(),
        title: Some("Miss".to_string()),
        surname: "Mensah".to_string(),
        other_names: "Akosua".to_string(),
        email: Some("amensah@st.example.edu".to_string()),
        phone: Some("0241234567".to_string()),
        deleted: false,
    }
}

#[test]
fn full_workflow_provision_rotate_authenticate_report() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::new(dir.path(), "integration");
    let db = Database::open(&config).unwrap();
    let manager = CredentialManager::new(&db).unwrap();

    // ── Step 1: identity without a login record ─────────────────────────
    manager.students().insert(&mensah()).unwrap();

    let result = manager.rotate("10234567", "12345");
    assert!(
        matches!(result, Err(CredentialError::CredentialNotProvisioned(_))),
        "rotation must not create login records"
    );
    assert!(manager.logins().get("10234567").unwrap().is_none());

    // Rotating a nonexistent identity fails before any store mutation.
    let result = manager.rotate("99999999", "12345");
    assert!(matches!(result, Err(CredentialError::IdentityNotFound(_))));

    // ── Step 2: provision the population ────────────────────────────────
    let provisioner = Provisioner::new(&db).unwrap();
    let summary = provisioner.provision_all("12345", "student").unwrap();
    assert_eq!(summary.created, 1);
    assert_eq!(summary.updated, 0);

    let login = manager.logins().get("10234567").unwrap().unwrap();
    assert_eq!(login.roles, vec!["student".to_string()]);
    assert!(login.last_login.is_none());

    // ── Step 3: rotate to a chosen PIN ──────────────────────────────────
    let before = manager.logins().get("10234567").unwrap().unwrap();
    let name = manager.rotate("10234567", "12345").unwrap();
    assert_eq!(name, "Miss Mensah Akosua");

    // Same PIN, new hash: a fresh salt every rotation.
    let after = manager.logins().get("10234567").unwrap().unwrap();
    assert_ne!(before.pin, after.pin);

    // ── Step 4: authenticate with the right PIN ─────────────────────────
    let outcome = manager.authenticate("10234567", "12345").unwrap();
    assert_eq!(
        outcome,
        AuthOutcome::Authenticated {
            name: "Miss Mensah Akosua".to_string()
        }
    );
    let login = manager.logins().get("10234567").unwrap().unwrap();
    let stamped = login.last_login.expect("success must stamp lastLogin");
    assert!(stamped <= Utc::now());

    // ── Step 5: a wrong PIN is rejected, audit trail untouched ──────────
    let outcome = manager.authenticate("10234567", "wrong").unwrap();
    assert!(!outcome.is_authenticated());
    let login = manager.logins().get("10234567").unwrap().unwrap();
    assert_eq!(login.last_login, Some(stamped));

    // ── Step 6: population report over the single-identity fleet ────────
    let report = summarize(manager.students(), manager.logins(), "12345").unwrap();
    assert_eq!(report.total, 1);
    assert_eq!(report.with_credential, 1);
    assert_eq!(report.verifiable_with_known_pin, 1);
    assert!(report.orphaned_credentials.is_empty());

    // A candidate nobody uses verifies nothing.
    let report = summarize(manager.students(), manager.logins(), "00000").unwrap();
    assert_eq!(report.verifiable_with_known_pin, 0);
}

#[test]
fn status_listing_reflects_provisioning() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::new(dir.path(), "integration");
    let db = Database::open(&config).unwrap();
    let manager = CredentialManager::new(&db).unwrap();

    manager.students().insert(&mensah()).unwrap();
    let rows = manager.list_with_status().unwrap();
    assert_eq!(rows.len(), 1);
    assert!(!rows[0].has_credential);

    Provisioner::new(&db)
        .unwrap()
        .provision_all("12345", "student")
        .unwrap();

    let rows = manager.list_with_status().unwrap();
    assert!(rows[0].has_credential);
    assert_eq!(rows[0].academic_id, "10234567");
}
