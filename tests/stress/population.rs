//! Stress test: provision and report over a 100-student population.

use student_credentials::{
    summarize, CredentialManager, Database, Provisioner, StoreConfig, Student,
};

fn populate(manager: &CredentialManager, count: usize) {
    for i in 0..count {
        manager
            .students()
            .insert(&Student {
                academic_id: format!("102{i:05}"),
                title: None,
                surname: format!("Surname{i}"),
                other_names: format!("Other{i}"),
                email: Some(format!("student{i}@st.example.edu")),
                phone: None,
                deleted: false,
            })
            .unwrap();
    }
}

#[test]
fn stress_100_student_fleet() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::new(dir.path(), "stress");
    let db = Database::open(&config).unwrap();
    let manager = CredentialManager::new(&db).unwrap();

    populate(&manager, 100);

    let summary = Provisioner::new(&db)
        .unwrap()
        .provision_all("12345", "student")
        .unwrap();
    assert_eq!(summary.created, 100);
    assert_eq!(summary.updated, 0);

    // Every student is visible and provisioned.
    let rows = manager.list_with_status().unwrap();
    assert_eq!(rows.len(), 100);
    assert!(rows.iter().all(|row| row.has_credential));

    // The whole fleet verifies against the default PIN.
    let report = summarize(manager.students(), manager.logins(), "12345").unwrap();
    assert_eq!(report.total, 100);
    assert_eq!(report.with_credential, 100);
    assert_eq!(report.verifiable_with_known_pin, 100);

    // Rotate one student away from the default.
    manager.rotate("10200042", "98765").unwrap();
    let report = summarize(manager.students(), manager.logins(), "12345").unwrap();
    assert_eq!(report.with_credential, 100);
    assert_eq!(report.verifiable_with_known_pin, 99);

    // That one student authenticates with the new PIN only.
    assert!(manager
        .authenticate("10200042", "98765")
        .unwrap()
        .is_authenticated());
    assert!(!manager
        .authenticate("10200042", "12345")
        .unwrap()
        .is_authenticated());
}
