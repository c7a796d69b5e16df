//! Typed access to the student identity collection.

use serde_json::Value;

use crate::error::{CredentialError, Result};
use crate::record::Student;
use crate::store::database::{Collection, Database};
use crate::store::{encode, ACADEMIC_ID_FIELD};

/// Name of the identity collection.
pub const STUDENTS_COLLECTION: &str = "students";

/// Read access to student identity records.
///
/// The credential subsystem never mutates identities; `insert` exists for
/// provisioning callers and tests that register a population.
pub struct StudentDirectory {
    col: Collection,
}

impl StudentDirectory {
    /// Open the directory inside `db`.
    pub fn new(db: &Database) -> Result<Self> {
        Ok(Self {
            col: db.collection(STUDENTS_COLLECTION)?,
        })
    }

    /// Exact-match lookup by academic ID.
    ///
    /// Returns `Ok(None)` when no student carries the id; a miss is not
    /// an error at this layer.
    pub fn find_by_academic_id(&self, academic_id: &str) -> Result<Option<Student>> {
        match self.col.find_one(ACADEMIC_ID_FIELD, academic_id)? {
            Some(doc) => Ok(Some(self.decode(doc)?)),
            None => Ok(None),
        }
    }

    /// Every student whose soft-delete flag is not set.
    pub fn all_active(&self) -> Result<Vec<Student>> {
        let mut students = Vec::new();
        for doc in self.col.documents()? {
            let student = self.decode(doc)?;
            if !student.deleted {
                students.push(student);
            }
        }
        Ok(students)
    }

    /// Register a student record.
    pub fn insert(&self, student: &Student) -> Result<()> {
        let doc = encode(student, self.col.name())?;
        self.col.insert(&doc)?;
        Ok(())
    }

    /// Decode a raw document, rejecting shapes missing required fields.
    fn decode(&self, doc: Value) -> Result<Student> {
        serde_json::from_value(doc).map_err(|e| CredentialError::InvalidRecord {
            collection: self.col.name().to_string(),
            reason: e.to_string(),
        })
    }
}
