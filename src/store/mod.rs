// DocWatch - store/mod.rs
//
// Persistence collaborator. The core never talks to storage directly: it
// produces validated `Document` values and hands them to a `DocumentStore`.
//
// The bundled implementation is a JSON file in the platform data directory,
// rewritten in full on every mutation. Document counts for a single user
// stay small enough that whole-file writes are the simplest durable option.

use crate::core::model::Document;
use crate::util::error::StoreError;
use std::fs;
use std::path::{Path, PathBuf};

/// CRUD surface the rest of the application persists documents through.
///
/// `insert`/`bulk_insert` assign ids; callers pass unsaved documents
/// (`id == None`) and receive saved ones back.
pub trait DocumentStore {
    /// All stored documents, in insertion order.
    fn list(&self) -> &[Document];

    /// Look up one document by id.
    fn get(&self, id: i64) -> Option<&Document>;

    /// Insert a document, assigning its id. Returns the saved document.
    fn insert(&mut self, doc: Document) -> Result<Document, StoreError>;

    /// Insert many documents in one persisted write (CSV import path).
    /// Returns the number inserted.
    fn bulk_insert(&mut self, docs: Vec<Document>) -> Result<usize, StoreError>;

    /// Replace the stored document carrying the same id.
    fn update(&mut self, doc: &Document) -> Result<(), StoreError>;

    /// Delete by id. Deleting an id that does not exist is a no-op.
    fn delete(&mut self, id: i64) -> Result<(), StoreError>;
}

/// JSON-file-backed document store.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    docs: Vec<Document>,
    next_id: i64,
}

impl JsonStore {
    /// Open a store file, creating an empty store when the file does not
    /// exist yet (first run). A present-but-corrupt file is an error, not
    /// a silent reset: losing the user's document list to a parse failure
    /// must be visible.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No store file found; starting empty");
            return Ok(Self {
                path: path.to_path_buf(),
                docs: Vec::new(),
                next_id: 1,
            });
        }

        let content = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let docs: Vec<Document> =
            serde_json::from_str(&content).map_err(|source| StoreError::Serialize {
                path: path.to_path_buf(),
                source,
            })?;

        let next_id = docs.iter().filter_map(|d| d.id).max().unwrap_or(0) + 1;
        tracing::debug!(
            path = %path.display(),
            documents = docs.len(),
            "Store loaded"
        );

        Ok(Self {
            path: path.to_path_buf(),
            docs,
            next_id,
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn assign_id(&mut self, mut doc: Document) -> Document {
        doc.id = Some(self.next_id);
        self.next_id += 1;
        doc
    }

    /// Write the whole document list back to disk.
    fn persist(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: self.path.clone(),
                source,
            })?;
        }

        let json =
            serde_json::to_string_pretty(&self.docs).map_err(|source| StoreError::Serialize {
                path: self.path.clone(),
                source,
            })?;
        fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl DocumentStore for JsonStore {
    fn list(&self) -> &[Document] {
        &self.docs
    }

    fn get(&self, id: i64) -> Option<&Document> {
        self.docs.iter().find(|d| d.id == Some(id))
    }

    fn insert(&mut self, doc: Document) -> Result<Document, StoreError> {
        let doc = self.assign_id(doc);
        self.docs.push(doc.clone());
        self.persist()?;
        Ok(doc)
    }

    fn bulk_insert(&mut self, docs: Vec<Document>) -> Result<usize, StoreError> {
        if docs.is_empty() {
            return Ok(0);
        }

        let count = docs.len();
        for doc in docs {
            let doc = self.assign_id(doc);
            self.docs.push(doc);
        }
        self.persist()?;
        Ok(count)
    }

    fn update(&mut self, doc: &Document) -> Result<(), StoreError> {
        let id = doc.id.ok_or(StoreError::UnsavedDocument)?;
        let slot = self
            .docs
            .iter_mut()
            .find(|d| d.id == Some(id))
            .ok_or(StoreError::NotFound { id })?;
        *slot = doc.clone();
        self.persist()
    }

    fn delete(&mut self, id: i64) -> Result<(), StoreError> {
        let before = self.docs.len();
        self.docs.retain(|d| d.id != Some(id));
        if self.docs.len() == before {
            return Ok(());
        }
        self.persist()
    }
}
