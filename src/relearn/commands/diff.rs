use crate::diff::{self, ChangeSpan};
use crate::error::Result;
use crate::revisions;
use crate::store::Vault;

/// A note diffed against its live revision.
#[derive(Debug)]
pub struct NoteDiff {
    pub note_path: String,
    pub revision_path: String,
    pub spans: Vec<ChangeSpan>,
}

impl NoteDiff {
    /// Sanitized HTML rendering of the spans, for display surfaces.
    pub fn to_html(&self) -> String {
        crate::render::render_diff(&self.spans)
    }
}

/// Diff a tracked note's current body against its revision baseline.
/// Old side is the revision, new side is the note.
pub fn run<V: Vault>(vault: &V, path: &str) -> Result<NoteDiff> {
    let (note, note_id) = super::helpers::load_tracked_note(vault, path)?;
    let revision = revisions::require_revision(vault, note_id)?;
    Ok(NoteDiff {
        note_path: note.path,
        revision_path: revision.path.clone(),
        spans: diff::diff(&revision.content, &note.body),
    })
}
