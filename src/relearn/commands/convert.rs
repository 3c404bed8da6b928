use crate::banks;
use crate::error::Result;
use crate::frontmatter;
use crate::paths;
use crate::revisions;
use crate::store::Vault;
use serde_yaml::Mapping;
use uuid::Uuid;

/// Result of converting a file into a tracked note.
#[derive(Debug)]
pub struct Converted {
    pub note_id: Uuid,
    /// True when the file already carried an id and conversion only
    /// repaired missing artifacts.
    pub already_tracked: bool,
}

/// Turn a plain markdown file into a tracked note: assign an id, cut the
/// initial revision, create the empty question bank, and write the id
/// plus artifact back-links into the note's frontmatter.
///
/// Idempotent for notes that already carry an id: existing artifacts are
/// left alone and missing ones are recreated.
///
/// The note's own metadata is written last: if revision or bank creation
/// fails at the storage layer, the file is left exactly as it was and the
/// next attempt starts clean. A crash after the artifacts are written
/// leaks two small files, which the garbage collector reclaims.
pub fn run<V: Vault>(vault: &mut V, path: &str) -> Result<Converted> {
    let note = super::helpers::load_note(vault, path)?;

    let (note_id, already_tracked) = match note.id() {
        Some(id) => (id, true),
        None => (Uuid::new_v4(), false),
    };

    if revisions::latest_revision(vault, note_id)?.is_none() {
        revisions::create_revision(vault, note_id, &note)?;
    }
    banks::ensure_bank(vault, note_id)?;

    if !already_tracked {
        let mut patch = Mapping::new();
        patch.insert("id".into(), frontmatter::patch_value(&note_id)?);
        patch.insert(
            "review_link".into(),
            paths::revision_path(&note_id).into(),
        );
        patch.insert(
            "questions_link".into(),
            paths::questions_path(&note_id).into(),
        );
        let content = vault.read(path)?;
        vault.write(path, &frontmatter::merge(&content, patch)?)?;
    }

    Ok(Converted {
        note_id,
        already_tracked,
    })
}
