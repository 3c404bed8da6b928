use crate::error::Result;
use crate::model::RevisionState;
use crate::paths;
use crate::revisions;
use crate::store::Vault;
use chrono::{DateTime, NaiveDate, Utc};

/// What an edit event did to a note's revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Not a tracked note, or a generated artifact: nothing to do.
    Ignored,
    /// First snapshot for this note.
    Created,
    /// A live revision already covers this note; edits keep accumulating
    /// against it.
    Unchanged,
    /// The old revision was reviewed on a prior day; a fresh snapshot
    /// replaced it.
    Rolled,
}

/// React to a note edit.
///
/// The revision lifecycle per note:
///
/// - no revision → cut one from the current content
/// - revision exists, not yet reviewed (or reviewed today) → leave it;
///   repeated saves must not spawn duplicates
/// - revision reviewed on a day before today → roll forward: write the
///   replacement, then retire the old document
///
/// The replacement is written before anything is deleted, so a crash in
/// between leaves an extra revision behind (GC's problem) rather than
/// none.
pub fn on_note_modified<V: Vault>(vault: &mut V, path: &str, now: DateTime<Utc>) -> Result<Outcome> {
    if paths::is_generated_path(path) {
        return Ok(Outcome::Ignored);
    }
    let note = super::helpers::load_note(vault, path)?;
    let Some(note_id) = note.id() else {
        return Ok(Outcome::Ignored);
    };

    let Some(revision) = revisions::latest_revision(vault, note_id)? else {
        revisions::create_revision(vault, note_id, &note)?;
        return Ok(Outcome::Created);
    };

    if !revision.meta.state.has_review() {
        return Ok(Outcome::Unchanged);
    }
    let today = now.date_naive();
    if reviewed_day(&revision.meta.state, &revision.path) >= Some(today) {
        return Ok(Outcome::Unchanged);
    }

    revisions::create_revision(vault, note_id, &note)?;
    revisions::retire_legacy(vault, note_id)?;
    Ok(Outcome::Rolled)
}

// The day the revision's review belongs to. Current-generation records
// carry it; legacy records only have the filename date. A reviewed legacy
// record with an unparseable name counts as predating today, so it gets
// rolled into the current scheme.
fn reviewed_day(state: &RevisionState, path: &str) -> Option<NaiveDate> {
    state
        .reviewed_on()
        .or_else(|| paths::legacy_revision_parts(path).map(|(_, date)| date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::convert;
    use crate::store::memory::fixtures::VaultFixture;
    use crate::store::memory::InMemoryVault;
    use chrono::Duration;
    use uuid::Uuid;

    fn edit(vault: &mut InMemoryVault, path: &str, body: &str) {
        let content = vault.read(path).unwrap();
        let (block, _) = crate::frontmatter::split(&content);
        let doc = match block {
            Some(yaml) => format!("---\n{}---\n{}\n", yaml, body),
            None => body.to_string(),
        };
        vault.write(path, &doc).unwrap();
    }

    #[test]
    fn test_untracked_note_is_ignored() {
        let fixture = VaultFixture::new().with_plain_file("a.md", "no id");
        let mut vault = fixture.vault;
        assert_eq!(
            on_note_modified(&mut vault, "a.md", Utc::now()).unwrap(),
            Outcome::Ignored
        );
    }

    #[test]
    fn test_generated_artifact_is_ignored_without_read() {
        let mut vault = InMemoryVault::new();
        // Editing a revision must never trigger revision logic, even though
        // the document doesn't parse as a note.
        assert_eq!(
            on_note_modified(&mut vault, "_relearn/revisions/x.md", Utc::now()).unwrap(),
            Outcome::Ignored
        );
    }

    #[test]
    fn test_first_edit_creates_revision() {
        let id = Uuid::new_v4();
        let fixture = VaultFixture::new().with_note("a.md", id, &[], "v1");
        let mut vault = fixture.vault;

        assert_eq!(
            on_note_modified(&mut vault, "a.md", Utc::now()).unwrap(),
            Outcome::Created
        );
        let rev = revisions::latest_revision(&vault, id).unwrap().unwrap();
        assert_eq!(rev.content, "v1");
    }

    #[test]
    fn test_repeated_saves_do_not_duplicate() {
        let id = Uuid::new_v4();
        let fixture = VaultFixture::new().with_note("a.md", id, &[], "v1");
        let mut vault = fixture.vault;
        let now = Utc::now();

        assert_eq!(on_note_modified(&mut vault, "a.md", now).unwrap(), Outcome::Created);
        edit(&mut vault, "a.md", "v2");
        for _ in 0..5 {
            assert_eq!(
                on_note_modified(&mut vault, "a.md", now).unwrap(),
                Outcome::Unchanged
            );
        }

        // Exactly one revision document, still holding the original snapshot.
        assert_eq!(revisions::revision_paths(&vault).unwrap().len(), 1);
        let rev = revisions::latest_revision(&vault, id).unwrap().unwrap();
        assert_eq!(rev.content, "v1");
    }

    #[test]
    fn test_reviewed_today_does_not_roll() {
        let id = Uuid::new_v4();
        let fixture = VaultFixture::new().with_note("a.md", id, &[], "v1");
        let mut vault = fixture.vault;
        let now = Utc::now();

        on_note_modified(&mut vault, "a.md", now).unwrap();
        let rev = revisions::latest_revision(&vault, id).unwrap().unwrap();
        revisions::mark_reviewed(&mut vault, &rev, true, now).unwrap();

        edit(&mut vault, "a.md", "v2");
        assert_eq!(
            on_note_modified(&mut vault, "a.md", now).unwrap(),
            Outcome::Unchanged
        );
    }

    #[test]
    fn test_reviewed_yesterday_rolls_forward() {
        let id = Uuid::new_v4();
        let fixture = VaultFixture::new().with_note("a.md", id, &[], "v1");
        let mut vault = fixture.vault;
        let yesterday = Utc::now() - Duration::days(1);

        on_note_modified(&mut vault, "a.md", yesterday).unwrap();
        let rev = revisions::latest_revision(&vault, id).unwrap().unwrap();
        revisions::mark_reviewed(&mut vault, &rev, true, yesterday).unwrap();

        edit(&mut vault, "a.md", "v2");
        let now = Utc::now();
        assert_eq!(on_note_modified(&mut vault, "a.md", now).unwrap(), Outcome::Rolled);

        let rev = revisions::latest_revision(&vault, id).unwrap().unwrap();
        assert_eq!(rev.content, "v2");
        assert!(!rev.is_reviewed(now));
        assert_eq!(revisions::revision_paths(&vault).unwrap().len(), 1);
    }

    #[test]
    fn test_unreviewed_stale_revision_keeps_accumulating() {
        let id = Uuid::new_v4();
        let fixture = VaultFixture::new().with_note("a.md", id, &[], "v1");
        let mut vault = fixture.vault;
        let last_week = Utc::now() - Duration::days(7);

        on_note_modified(&mut vault, "a.md", last_week).unwrap();
        edit(&mut vault, "a.md", "v2");

        // A week of edits without a review: the baseline must not move.
        assert_eq!(
            on_note_modified(&mut vault, "a.md", Utc::now()).unwrap(),
            Outcome::Unchanged
        );
        let rev = revisions::latest_revision(&vault, id).unwrap().unwrap();
        assert_eq!(rev.content, "v1");
    }

    #[test]
    fn test_legacy_reviewed_revision_rolls_and_retires_dated_file() {
        let fixture = VaultFixture::new().with_plain_file("a.md", "seed");
        let mut vault = fixture.vault;
        let converted = convert::run(&mut vault, "a.md").unwrap();
        let id = converted.note_id;

        // Replace the canonical revision with a legacy-generation artifact.
        vault.remove(&paths::revision_path(&id)).unwrap();
        let legacy = format!("{}/{}_2024-01-01.md", paths::REVISIONS_DIR, id);
        vault
            .write(&legacy, &format!("---\nid: {}\nreviewed: true\n---\nseed\n", id))
            .unwrap();

        edit(&mut vault, "a.md", "edited");
        assert_eq!(
            on_note_modified(&mut vault, "a.md", Utc::now()).unwrap(),
            Outcome::Rolled
        );
        assert!(!vault.exists(&legacy));
        let rev = revisions::latest_revision(&vault, id).unwrap().unwrap();
        assert_eq!(rev.path, paths::revision_path(&id));
        assert_eq!(rev.content, "edited");
    }

    #[test]
    fn test_legacy_unreviewed_revision_is_kept() {
        let id = Uuid::new_v4();
        let fixture = VaultFixture::new().with_note("a.md", id, &[], "v2");
        let mut vault = fixture.vault;
        let legacy = format!("{}/{}_2024-01-01.md", paths::REVISIONS_DIR, id);
        vault
            .write(&legacy, &format!("---\nid: {}\nreviewed: false\n---\nv1\n", id))
            .unwrap();

        assert_eq!(
            on_note_modified(&mut vault, "a.md", Utc::now()).unwrap(),
            Outcome::Unchanged
        );
        assert!(vault.exists(&legacy));
    }
}
