use crate::error::Result;
use crate::revisions;
use crate::store::Vault;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A note with edits the user hasn't reviewed yet.
#[derive(Debug, Clone)]
pub struct ChangedNote {
    pub path: String,
    pub note_id: Uuid,
    pub modified: DateTime<Utc>,
}

/// List every tracked note whose current body differs from its live
/// revision and whose revision is not reviewed. Sorted oldest
/// modification first, so the longest-neglected note leads the review
/// queue.
///
/// Notes that fail to load or parse are skipped; a listing must never
/// fail because one document is corrupt.
pub fn run<V: Vault>(vault: &V, now: DateTime<Utc>) -> Result<Vec<ChangedNote>> {
    let mut out = Vec::new();
    for path in super::helpers::note_paths(vault)? {
        let Ok(note) = super::helpers::load_note(vault, &path) else {
            continue;
        };
        let Some(note_id) = note.id() else {
            continue;
        };
        let Ok(Some(revision)) = revisions::latest_revision(vault, note_id) else {
            continue;
        };
        if revision.is_reviewed(now) || note.body == revision.content {
            continue;
        }
        out.push(ChangedNote {
            path: path.clone(),
            note_id,
            modified: vault.mtime(&path)?,
        });
    }
    out.sort_by_key(|c| c.modified);
    Ok(out)
}
