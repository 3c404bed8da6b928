use crate::banks;
use crate::commands::CmdMessage;
use crate::error::Result;
use crate::frontmatter;
use crate::model::{Revision, RevisionMeta, RevisionState};
use crate::paths;
use crate::revisions;
use crate::store::Vault;
use std::collections::HashSet;
use uuid::Uuid;

/// Result of a sweep.
#[derive(Debug, Default)]
pub struct SweepReport {
    /// Artifacts deleted as orphaned or unreadable.
    pub removed: Vec<String>,
    /// Legacy dated revisions converted to the current scheme.
    pub migrated: usize,
    pub messages: Vec<CmdMessage>,
}

/// Reconcile generated artifacts against the live note set.
///
/// Any revision or question bank whose id no longer belongs to a note,
/// or which has no readable id at all, is deleted. Legacy dated
/// revisions owned by live notes are converted to the current scheme on
/// the way: the replacement carries the id and `note_link` over, with
/// `last_reviewed` backfilled from the artifact's own modification time
/// when the legacy flag was set. The replacement is written before the
/// old document is removed.
///
/// Running the sweep twice is a no-op the second time: migrated
/// artifacts no longer match the legacy shape, and orphans are gone.
pub fn run<V: Vault>(vault: &mut V) -> Result<SweepReport> {
    let live = super::helpers::live_note_ids(vault)?;
    let mut report = SweepReport::default();

    sweep_revisions(vault, &live, &mut report)?;
    sweep_banks(vault, &live, &mut report)?;

    Ok(report)
}

fn sweep_revisions<V: Vault>(
    vault: &mut V,
    live: &HashSet<Uuid>,
    report: &mut SweepReport,
) -> Result<()> {
    for path in revisions::revision_paths(vault)? {
        let parsed = vault
            .read(&path)
            .and_then(|content| revisions::parse_revision(&path, &content));
        let revision = match parsed {
            Ok(revision) => revision,
            Err(err) => {
                report
                    .messages
                    .push(CmdMessage::warning(format!("Removing {}: {}", path, err)));
                remove(vault, &path, report)?;
                continue;
            }
        };

        if !live.contains(&revision.meta.id) {
            remove(vault, &path, report)?;
            continue;
        }

        if paths::legacy_revision_parts(&path).is_some() {
            migrate_legacy_revision(vault, &revision, report)?;
        }
    }
    Ok(())
}

// Convert one legacy dated revision to the current scheme. If a canonical
// document already exists for the id, the legacy file is simply retired;
// the canonical one is newer by construction and must win.
fn migrate_legacy_revision<V: Vault>(
    vault: &mut V,
    legacy: &Revision,
    report: &mut SweepReport,
) -> Result<()> {
    let canonical = paths::revision_path(&legacy.meta.id);
    if !vault.exists(&canonical) {
        let last_reviewed = match legacy.meta.state {
            RevisionState::Legacy { reviewed: true } => Some(vault.mtime(&legacy.path)?),
            RevisionState::Legacy { reviewed: false } => None,
            RevisionState::Current { last_reviewed } => last_reviewed,
        };
        let meta = RevisionMeta {
            id: legacy.meta.id,
            note_link: legacy.meta.note_link.clone(),
            state: RevisionState::Current { last_reviewed },
            extra: legacy.meta.extra.clone(),
        };
        let doc = frontmatter::compose(&meta, &legacy.content)?;
        vault.write(&canonical, &doc)?;
        report.migrated += 1;
    }
    remove(vault, &legacy.path, report)
}

fn sweep_banks<V: Vault>(
    vault: &mut V,
    live: &HashSet<Uuid>,
    report: &mut SweepReport,
) -> Result<()> {
    for path in banks::bank_paths(vault)? {
        let parsed = vault
            .read(&path)
            .and_then(|content| banks::parse_bank(&path, &content));
        match parsed {
            Ok(bank) if live.contains(&bank.note_id()) => {}
            Ok(_) => remove(vault, &path, report)?,
            Err(err) => {
                report
                    .messages
                    .push(CmdMessage::warning(format!("Removing {}: {}", path, err)));
                remove(vault, &path, report)?;
            }
        }
    }
    Ok(())
}

fn remove<V: Vault>(vault: &mut V, path: &str, report: &mut SweepReport) -> Result<()> {
    vault.remove(path)?;
    report.removed.push(path.to_string());
    Ok(())
}
