//! # Storage Layer
//!
//! The [`Vault`] trait abstracts the document store holding user notes and
//! generated artifacts. Everything above this layer works with
//! vault-relative paths (`/`-separated strings) and never touches the
//! filesystem directly.
//!
//! ## Design Rationale
//!
//! Storage is abstracted behind a trait to:
//! - Enable **testing** with [`memory::InMemoryVault`] (no filesystem needed)
//! - Allow **future backends** without changing core logic
//! - Keep review/quiz logic **decoupled** from persistence details
//!
//! ## Implementations
//!
//! - [`fs::FileVault`]: production storage rooted at a vault directory
//! - [`memory::InMemoryVault`]: in-memory storage for tests, with
//!   controllable modification times
//!
//! ## Layout
//!
//! ```text
//! <vault>/
//! ├── ... user notes (*.md)
//! └── _relearn/
//!     ├── config.json
//!     ├── revisions/{note_id}.md
//!     └── questions/{note_id}_question.md
//! ```

use crate::error::Result;
use chrono::{DateTime, Utc};

pub mod fs;
pub mod memory;

/// Abstract interface over the document store.
///
/// Paths are vault-relative, `/`-separated. Reads of missing documents
/// fail with [`crate::error::RelearnError::DocumentNotFound`]; `create`
/// refuses to clobber an existing document while `write` is an upsert.
pub trait Vault {
    /// Read a document's full content
    fn read(&self, path: &str) -> Result<String>;

    /// Create or overwrite a document
    fn write(&mut self, path: &str, content: &str) -> Result<()>;

    /// Create a document, failing if one already exists at the path
    fn create(&mut self, path: &str, content: &str) -> Result<()>;

    /// Delete a document
    fn remove(&mut self, path: &str) -> Result<()>;

    /// Whether a document exists at the path
    fn exists(&self, path: &str) -> bool;

    /// All document paths in the vault, sorted
    fn list(&self) -> Result<Vec<String>>;

    /// Last modification time of a document
    fn mtime(&self, path: &str) -> Result<DateTime<Utc>>;
}
