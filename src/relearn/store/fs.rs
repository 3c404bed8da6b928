use super::Vault;
use crate::error::{RelearnError, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Production vault rooted at a directory on disk.
pub struct FileVault {
    root: PathBuf,
}

impl FileVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a vault-relative path to a filesystem path, rejecting anything
    /// that would escape the root.
    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path);
        for component in relative.components() {
            match component {
                Component::Normal(_) => {}
                _ => {
                    return Err(RelearnError::Store(format!(
                        "Invalid vault path: {}",
                        path
                    )))
                }
            }
        }
        Ok(self.root.join(relative))
    }

    fn collect_files(&self, dir: &Path, prefix: &str, out: &mut Vec<String>) -> Result<()> {
        for entry in fs::read_dir(dir).map_err(RelearnError::Io)? {
            let entry = entry.map_err(RelearnError::Io)?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let rel = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{}/{}", prefix, name)
            };
            let file_type = entry.file_type().map_err(RelearnError::Io)?;
            if file_type.is_dir() {
                self.collect_files(&entry.path(), &rel, out)?;
            } else if file_type.is_file() {
                out.push(rel);
            }
        }
        Ok(())
    }
}

impl Vault for FileVault {
    fn read(&self, path: &str) -> Result<String> {
        let full = self.resolve(path)?;
        if !full.is_file() {
            return Err(RelearnError::DocumentNotFound(path.to_string()));
        }
        fs::read_to_string(full).map_err(RelearnError::Io)
    }

    fn write(&mut self, path: &str, content: &str) -> Result<()> {
        let full = self.resolve(path)?;
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).map_err(RelearnError::Io)?;
        }
        fs::write(full, content).map_err(RelearnError::Io)
    }

    fn create(&mut self, path: &str, content: &str) -> Result<()> {
        if self.exists(path) {
            return Err(RelearnError::Store(format!(
                "Document already exists: {}",
                path
            )));
        }
        self.write(path, content)
    }

    fn remove(&mut self, path: &str) -> Result<()> {
        let full = self.resolve(path)?;
        if !full.is_file() {
            return Err(RelearnError::DocumentNotFound(path.to_string()));
        }
        fs::remove_file(full).map_err(RelearnError::Io)
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).map(|p| p.is_file()).unwrap_or(false)
    }

    fn list(&self) -> Result<Vec<String>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }
        let mut out = Vec::new();
        let root = self.root.clone();
        self.collect_files(&root, "", &mut out)?;
        out.sort();
        Ok(out)
    }

    fn mtime(&self, path: &str) -> Result<DateTime<Utc>> {
        let full = self.resolve(path)?;
        let metadata = fs::metadata(full).map_err(RelearnError::Io)?;
        let modified = metadata.modified().map_err(RelearnError::Io)?;
        Ok(DateTime::<Utc>::from(modified))
    }
}
