use crate::error::Result;
use crate::revisions;
use crate::store::Vault;
use chrono::{DateTime, Utc};

/// Mark a note's live revision reviewed (or take the mark back). Checking
/// stamps `last_reviewed` with `now`; unchecking clears it.
pub fn run<V: Vault>(vault: &mut V, path: &str, checked: bool, now: DateTime<Utc>) -> Result<()> {
    let (_, note_id) = super::helpers::load_tracked_note(vault, path)?;
    let revision = revisions::require_revision(vault, note_id)?;
    revisions::mark_reviewed(vault, &revision, checked, now)
}
