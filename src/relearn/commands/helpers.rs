use crate::error::{RelearnError, Result};
use crate::frontmatter;
use crate::model::{Note, NoteMeta};
use crate::paths;
use crate::store::Vault;
use std::collections::HashSet;
use uuid::Uuid;

/// Load and parse a user note. Generated artifacts are rejected before
/// any read happens.
pub fn load_note<V: Vault>(vault: &V, path: &str) -> Result<Note> {
    if paths::is_generated_path(path) {
        return Err(RelearnError::InvalidTarget(path.to_string()));
    }
    let content = vault.read(path)?;
    let meta: Option<NoteMeta> = frontmatter::parse(&content)?;
    Ok(Note {
        path: path.to_string(),
        meta: meta.unwrap_or_default(),
        body: frontmatter::strip(&content).to_string(),
    })
}

/// Load a note and require its id, the way every tracked-note operation
/// starts.
pub fn load_tracked_note<V: Vault>(vault: &V, path: &str) -> Result<(Note, Uuid)> {
    let note = load_note(vault, path)?;
    let id = note
        .id()
        .ok_or_else(|| RelearnError::NotTracked(path.to_string()))?;
    Ok((note, id))
}

/// Every markdown file outside the reserved prefix.
pub fn note_paths<V: Vault>(vault: &V) -> Result<Vec<String>> {
    Ok(vault
        .list()?
        .into_iter()
        .filter(|p| paths::is_note_path(p))
        .collect())
}

/// The set of note ids currently present in the vault. Notes that fail to
/// parse contribute nothing; they are simply not live.
pub fn live_note_ids<V: Vault>(vault: &V) -> Result<HashSet<Uuid>> {
    let mut ids = HashSet::new();
    for path in note_paths(vault)? {
        if let Ok(note) = load_note(vault, &path) {
            if let Some(id) = note.id() {
                ids.insert(id);
            }
        }
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::VaultFixture;
    use crate::store::memory::InMemoryVault;

    #[test]
    fn test_load_note_rejects_generated_paths() {
        let vault = InMemoryVault::new();
        match load_note(&vault, "_relearn/revisions/x.md") {
            Err(RelearnError::InvalidTarget(_)) => {}
            other => panic!("expected InvalidTarget, got {:?}", other),
        }
    }

    #[test]
    fn test_load_note_without_frontmatter() {
        let fixture = VaultFixture::new().with_plain_file("plain.md", "just text");
        let note = load_note(&fixture.vault, "plain.md").unwrap();
        assert!(note.id().is_none());
        assert_eq!(note.body, "just text");
    }

    #[test]
    fn test_load_tracked_note_requires_id() {
        let fixture = VaultFixture::new().with_plain_file("plain.md", "text");
        match load_tracked_note(&fixture.vault, "plain.md") {
            Err(RelearnError::NotTracked(_)) => {}
            other => panic!("expected NotTracked, got {:?}", other),
        }
    }

    #[test]
    fn test_live_note_ids_skips_plain_files() {
        let id = Uuid::new_v4();
        let fixture = VaultFixture::new()
            .with_note("a.md", id, &[], "body")
            .with_plain_file("b.md", "no id");
        let ids = live_note_ids(&fixture.vault).unwrap();
        assert_eq!(ids.len(), 1);
        assert!(ids.contains(&id));
    }

    #[test]
    fn test_note_paths_excludes_reserved_prefix() {
        let fixture = VaultFixture::new()
            .with_plain_file("a.md", "x")
            .with_plain_file("_relearn/revisions/r.md", "x")
            .with_plain_file("img.png", "x");
        assert_eq!(note_paths(&fixture.vault).unwrap(), vec!["a.md"]);
    }
}
