//! Revision documents: creation, lookup, and review marking.
//!
//! A revision is an immutable-intent snapshot of a note's body, stored as
//! its own document keyed by the note id. Current-generation revisions
//! live at a path derived from the id alone, so the at-most-one-live
//! invariant is structural and lookup is plain path construction. The
//! legacy generation used dated filenames; [`latest_revision`] still finds
//! those defensively until the garbage collector has migrated them away.

use crate::error::{RelearnError, Result};
use crate::frontmatter;
use crate::model::{Note, Revision, RevisionMeta};
use crate::paths;
use crate::store::Vault;
use chrono::{DateTime, Utc};
use serde_yaml::{Mapping, Value};
use uuid::Uuid;

/// Parse a revision document. Missing or unreadable frontmatter is a
/// corrupt artifact, not a crash.
pub fn parse_revision(path: &str, content: &str) -> Result<Revision> {
    let meta: RevisionMeta = frontmatter::parse(content)
        .map_err(|e| frontmatter::corrupt(path, e))?
        .ok_or_else(|| frontmatter::corrupt(path, "missing frontmatter block"))?;
    Ok(Revision {
        path: path.to_string(),
        meta,
        content: frontmatter::strip(content).to_string(),
    })
}

pub fn load_revision<V: Vault>(vault: &V, path: &str) -> Result<Revision> {
    parse_revision(path, &vault.read(path)?)
}

/// Find the live revision for a note id.
///
/// The canonical path is probed first. Failing that, legacy dated
/// filenames are scanned and reduced to the newest date, a defensive
/// measure against duplicates the old scheme could leave behind.
pub fn latest_revision<V: Vault>(vault: &V, note_id: Uuid) -> Result<Option<Revision>> {
    let canonical = paths::revision_path(&note_id);
    if vault.exists(&canonical) {
        return load_revision(vault, &canonical).map(Some);
    }

    let mut newest: Option<(chrono::NaiveDate, String)> = None;
    for path in vault.list()? {
        if let Some((id, date)) = paths::legacy_revision_parts(&path) {
            if id != note_id {
                continue;
            }
            match &newest {
                Some((best, _)) if *best >= date => {}
                _ => newest = Some((date, path)),
            }
        }
    }
    match newest {
        Some((_, path)) => load_revision(vault, &path).map(Some),
        None => Ok(None),
    }
}

/// Snapshot a note's body into a fresh, unreviewed revision at the
/// canonical path. Overwrites any previous document at that path; the
/// caller is responsible for retiring legacy-named leftovers afterwards.
pub fn create_revision<V: Vault>(vault: &mut V, note_id: Uuid, note: &Note) -> Result<Revision> {
    let meta = RevisionMeta::fresh(note_id, Some(note.path.clone()));
    let doc = frontmatter::compose(&meta, &note.body)?;
    let path = paths::revision_path(&note_id);
    vault.write(&path, &doc)?;
    Ok(Revision {
        path,
        meta,
        content: note.body.trim().to_string(),
    })
}

/// Set or clear the review mark on a revision document.
///
/// Only the review keys are touched; everything else in the frontmatter
/// is preserved. A legacy `reviewed` flag is dropped by the same write,
/// converting the document to the current generation; leaving it would
/// let the legacy-first read contradict what was just written.
pub fn mark_reviewed<V: Vault>(
    vault: &mut V,
    revision: &Revision,
    checked: bool,
    now: DateTime<Utc>,
) -> Result<()> {
    let mut patch = Mapping::new();
    let value = if checked {
        frontmatter::patch_value(&now)?
    } else {
        Value::Null
    };
    patch.insert("last_reviewed".into(), value);
    patch.insert("reviewed".into(), Value::Null);

    let content = vault.read(&revision.path)?;
    let updated = frontmatter::merge(&content, patch)?;
    vault.write(&revision.path, &updated)
}

/// All document paths under the revisions folder.
pub fn revision_paths<V: Vault>(vault: &V) -> Result<Vec<String>> {
    let prefix = format!("{}/", paths::REVISIONS_DIR);
    Ok(vault
        .list()?
        .into_iter()
        .filter(|p| p.starts_with(&prefix))
        .collect())
}

/// Retire every legacy-named revision document for a note id. Called
/// after a replacement has been written, never before.
pub fn retire_legacy<V: Vault>(vault: &mut V, note_id: Uuid) -> Result<usize> {
    let mut retired = 0;
    for path in revision_paths(vault)? {
        if let Some((id, _)) = paths::legacy_revision_parts(&path) {
            if id == note_id {
                vault.remove(&path)?;
                retired += 1;
            }
        }
    }
    Ok(retired)
}

/// Convenience wrapper that surfaces a missing revision as
/// [`RelearnError::RevisionNotFound`].
pub fn require_revision<V: Vault>(vault: &V, note_id: Uuid) -> Result<Revision> {
    latest_revision(vault, note_id)?.ok_or(RelearnError::RevisionNotFound(note_id))
}
