//! Filesystem-backed document database.
//!
//! A [`Database`] is an explicitly owned handle to one database directory;
//! it is cheap to keep for the lifetime of a service and hands out
//! [`Collection`]s on demand. Collections expose the store primitives the
//! subsystem needs: insert, exact-match find-one on a field, update-one
//! with a partial field set, and full enumeration.
//!
//! Document file format:
//! ```json
//! {
//!     "version": 1,
//!     "document": { ... }
//! }
//! ```
//!
//! Writes go through a temporary file in the same directory followed by a
//! rename, so a concurrent reader never sees a partial document. That
//! rename is the store's atomic per-document update guarantee; nothing
//! here coordinates writers touching *different* documents.

use std::fs;
use std::path::{Path, PathBuf};

use rand::RngCore;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::StoreConfig;
use crate::error::{CredentialError, Result};

// ── File format constants ─────────────────────────────────────────────────────

const DOCUMENT_FILE_VERSION: u32 = 1;

// ── On-disk structure ─────────────────────────────────────────────────────────

/// Wrapper written to disk for each document.
#[derive(Debug, Serialize, Deserialize)]
struct DocumentFile {
    /// Format version number.
    version: u32,
    /// The stored document.
    document: Value,
}

// ── Database ──────────────────────────────────────────────────────────────────

/// Owned handle to one database directory.
pub struct Database {
    root: PathBuf,
}

impl Database {
    /// Open (creating if necessary) the database named by `config`.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::StoreUnavailable` if the directory cannot
    /// be created.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let root = config.path.join(&config.database);
        fs::create_dir_all(&root).map_err(store_unavailable)?;
        Ok(Self { root })
    }

    /// Open (creating if necessary) a collection in this database.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::StoreUnavailable` if the directory cannot
    /// be created.
    pub fn collection(&self, name: &str) -> Result<Collection> {
        let dir = self.root.join(name);
        fs::create_dir_all(&dir).map_err(store_unavailable)?;
        Ok(Collection {
            name: name.to_string(),
            dir,
        })
    }
}

// ── Collection ────────────────────────────────────────────────────────────────

/// One document collection inside a [`Database`].
pub struct Collection {
    name: String,
    dir: PathBuf,
}

impl Collection {
    /// Collection name, as passed to [`Database::collection`].
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Insert a document, returning its generated native id.
    ///
    /// The native id names the file on disk and is unrelated to any field
    /// inside the document.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::StoreUnavailable` for filesystem errors.
    pub fn insert(&self, document: &Value) -> Result<String> {
        let id = generate_document_id();
        self.write_document(&id, document)?;
        Ok(id)
    }

    /// Find the first document whose `field` equals the string `value`.
    ///
    /// Exact match only. Returns `Ok(None)` when no document matches.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::StoreUnavailable` for filesystem errors,
    /// or `CredentialError::InvalidRecord` if a document file cannot be
    /// parsed.
    pub fn find_one(&self, field: &str, value: &str) -> Result<Option<Value>> {
        for path in self.document_paths()? {
            let document = self.read_document(&path)?;
            if field_matches(&document, field, value) {
                return Ok(Some(document));
            }
        }
        Ok(None)
    }

    /// Set `fields` on the first document whose `field` equals `value`.
    ///
    /// Returns the number of documents modified: 1 on a match, 0 when no
    /// document matches. Never creates a document.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::StoreUnavailable` for filesystem errors,
    /// `CredentialError::InvalidRecord` if a matching document is not a
    /// JSON object or cannot be parsed.
    pub fn update_one(&self, field: &str, value: &str, fields: &[(&str, Value)]) -> Result<u64> {
        for path in self.document_paths()? {
            let mut document = self.read_document(&path)?;
            if !field_matches(&document, field, value) {
                continue;
            }

            let object = document
                .as_object_mut()
                .ok_or_else(|| CredentialError::InvalidRecord {
                    collection: self.name.clone(),
                    reason: "document is not a JSON object".to_string(),
                })?;
            for (key, val) in fields {
                object.insert((*key).to_string(), val.clone());
            }

            let id = document_id_of(&path);
            self.write_document(&id, &document)?;
            return Ok(1);
        }
        Ok(0)
    }

    /// Load every document in the collection.
    ///
    /// Order is unspecified.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::StoreUnavailable` for filesystem errors,
    /// or `CredentialError::InvalidRecord` if any document file cannot be
    /// parsed.
    pub fn documents(&self) -> Result<Vec<Value>> {
        self.document_paths()?
            .iter()
            .map(|path| self.read_document(path))
            .collect()
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    /// Paths of all document files in the collection directory.
    fn document_paths(&self) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(store_unavailable)? {
            let entry = entry.map_err(store_unavailable)?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        Ok(paths)
    }

    /// Read and unwrap one document file.
    fn read_document(&self, path: &Path) -> Result<Value> {
        let bytes = fs::read(path).map_err(store_unavailable)?;
        let file: DocumentFile =
            serde_json::from_slice(&bytes).map_err(|e| CredentialError::InvalidRecord {
                collection: self.name.clone(),
                reason: format!("failed to parse {}: {e}", path.display()),
            })?;
        Ok(file.document)
    }

    /// Write one document file atomically (temp file + rename).
    fn write_document(&self, id: &str, document: &Value) -> Result<()> {
        let file = DocumentFile {
            version: DOCUMENT_FILE_VERSION,
            document: document.clone(),
        };
        let json = serde_json::to_string_pretty(&file).map_err(|e| {
            CredentialError::InvalidRecord {
                collection: self.name.clone(),
                reason: format!("failed to serialize document: {e}"),
            }
        })?;

        let tmp = self.dir.join(format!(".{id}.json.tmp"));
        let path = self.dir.join(format!("{id}.json"));
        fs::write(&tmp, json.as_bytes()).map_err(store_unavailable)?;
        fs::rename(&tmp, &path).map_err(store_unavailable)?;
        Ok(())
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Generate a native document id: `doc_` + base58 of 16 random bytes.
fn generate_document_id() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    format!("doc_{}", bs58::encode(bytes).into_string())
}

/// Whether `document[field]` is the string `value`.
fn field_matches(document: &Value, field: &str, value: &str) -> bool {
    document.get(field).and_then(Value::as_str) == Some(value)
}

/// File stem of a document path (the native id).
fn document_id_of(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn store_unavailable(e: std::io::Error) -> CredentialError {
    CredentialError::StoreUnavailable(e.to_string())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
