use super::Vault;
use crate::error::{RelearnError, Result};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct Doc {
    content: String,
    mtime: DateTime<Utc>,
}

/// In-memory vault for tests. Modification times default to the wall
/// clock but can be pinned with [`InMemoryVault::set_mtime`] so
/// staleness logic is testable.
#[derive(Debug, Default)]
pub struct InMemoryVault {
    docs: BTreeMap<String, Doc>,
}

impl InMemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin a document's modification time.
    pub fn set_mtime(&mut self, path: &str, mtime: DateTime<Utc>) {
        if let Some(doc) = self.docs.get_mut(path) {
            doc.mtime = mtime;
        }
    }
}

impl Vault for InMemoryVault {
    fn read(&self, path: &str) -> Result<String> {
        self.docs
            .get(path)
            .map(|doc| doc.content.clone())
            .ok_or_else(|| RelearnError::DocumentNotFound(path.to_string()))
    }

    fn write(&mut self, path: &str, content: &str) -> Result<()> {
        self.docs.insert(
            path.to_string(),
            Doc {
                content: content.to_string(),
                mtime: Utc::now(),
            },
        );
        Ok(())
    }

    fn create(&mut self, path: &str, content: &str) -> Result<()> {
        if self.docs.contains_key(path) {
            return Err(RelearnError::Store(format!(
                "Document already exists: {}",
                path
            )));
        }
        self.write(path, content)
    }

    fn remove(&mut self, path: &str) -> Result<()> {
        self.docs
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| RelearnError::DocumentNotFound(path.to_string()))
    }

    fn exists(&self, path: &str) -> bool {
        self.docs.contains_key(path)
    }

    fn list(&self) -> Result<Vec<String>> {
        Ok(self.docs.keys().cloned().collect())
    }

    fn mtime(&self, path: &str) -> Result<DateTime<Utc>> {
        self.docs
            .get(path)
            .map(|doc| doc.mtime)
            .ok_or_else(|| RelearnError::DocumentNotFound(path.to_string()))
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::frontmatter;
    use crate::model::NoteMeta;
    use uuid::Uuid;

    /// Builder for vaults pre-populated with notes in various states.
    pub struct VaultFixture {
        pub vault: InMemoryVault,
    }

    impl Default for VaultFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl VaultFixture {
        pub fn new() -> Self {
            Self {
                vault: InMemoryVault::new(),
            }
        }

        /// A plain markdown file with no frontmatter (not yet a note).
        pub fn with_plain_file(mut self, path: &str, body: &str) -> Self {
            self.vault.write(path, body).unwrap();
            self
        }

        /// A converted note carrying an id and optional tags.
        pub fn with_note(mut self, path: &str, id: Uuid, tags: &[&str], body: &str) -> Self {
            let meta = NoteMeta {
                id: Some(id),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                ..Default::default()
            };
            let doc = frontmatter::compose(&meta, body).unwrap();
            self.vault.write(path, &doc).unwrap();
            self
        }
    }
}
