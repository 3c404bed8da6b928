//! Reserved vault paths for generated artifacts.
//!
//! Revisions and question banks live under a dedicated prefix so that
//! lookup by note id is plain path construction, never a scan. Filenames
//! are opaque keys; the one exception is the legacy revision naming scheme
//! (`{id}_{yyyy-mm-dd}.md`), which [`legacy_revision_parts`] recognizes so
//! the garbage collector can migrate those files away.

use chrono::NaiveDate;
use uuid::Uuid;

/// Root for everything relearn generates inside a vault.
pub const BASE_DIR: &str = "_relearn";
/// Folder holding one revision document per note id.
pub const REVISIONS_DIR: &str = "_relearn/revisions";
/// Folder holding one question bank per note id.
pub const QUESTIONS_DIR: &str = "_relearn/questions";
/// Crate configuration, stored inside the vault.
pub const CONFIG_PATH: &str = "_relearn/config.json";

/// Path of the current-generation revision document for a note.
pub fn revision_path(note_id: &Uuid) -> String {
    format!("{}/{}.md", REVISIONS_DIR, note_id)
}

/// Path of the question bank document for a note.
pub fn questions_path(note_id: &Uuid) -> String {
    format!("{}/{}_question.md", QUESTIONS_DIR, note_id)
}

/// True for any path under the reserved prefix. Generated artifacts are
/// never valid targets for note-scoped operations.
pub fn is_generated_path(path: &str) -> bool {
    path == BASE_DIR || path.starts_with(&format!("{}/", BASE_DIR))
}

/// True for paths that may hold a user note: markdown files outside the
/// reserved prefix.
pub fn is_note_path(path: &str) -> bool {
    !is_generated_path(path) && path.ends_with(".md")
}

/// Recognize a legacy dated revision filename, returning its embedded id
/// and date. Current-generation filenames (`{id}.md`) contain no
/// underscore and never match.
pub fn legacy_revision_parts(path: &str) -> Option<(Uuid, NaiveDate)> {
    let name = path.strip_prefix(&format!("{}/", REVISIONS_DIR))?;
    if name.contains('/') {
        return None;
    }
    let stem = name.strip_suffix(".md")?;
    let (id_part, date_part) = stem.split_once('_')?;
    let id = Uuid::parse_str(id_part).ok()?;
    let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()?;
    Some((id, date))
}
