//! Question bank documents: one per note id.
//!
//! Banks are markdown documents whose frontmatter holds the owning note
//! id and the ordered question list; the body is unused. Lookup is path
//! construction from the id. Legacy records inside a bank may lack ids
//! and timestamps; [`migrate_bank`] backfills them without ever touching
//! populated fields.

use crate::error::Result;
use crate::frontmatter;
use crate::model::{BankMeta, QuestionBank};
use crate::paths;
use crate::store::Vault;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use uuid::Uuid;

pub fn parse_bank(path: &str, content: &str) -> Result<QuestionBank> {
    let meta: BankMeta = frontmatter::parse(content)
        .map_err(|e| frontmatter::corrupt(path, e))?
        .ok_or_else(|| frontmatter::corrupt(path, "missing frontmatter block"))?;
    Ok(QuestionBank {
        path: path.to_string(),
        meta,
    })
}

/// Load the bank for a note id, if one exists.
pub fn load_bank<V: Vault>(vault: &V, note_id: Uuid) -> Result<Option<QuestionBank>> {
    let path = paths::questions_path(&note_id);
    if !vault.exists(&path) {
        return Ok(None);
    }
    parse_bank(&path, &vault.read(&path)?).map(Some)
}

pub fn save_bank<V: Vault>(vault: &mut V, bank: &QuestionBank) -> Result<()> {
    let doc = frontmatter::compose(&bank.meta, "")?;
    vault.write(&bank.path, &doc)
}

/// Load the bank for a note id, creating an empty one if missing.
pub fn ensure_bank<V: Vault>(vault: &mut V, note_id: Uuid) -> Result<QuestionBank> {
    if let Some(bank) = load_bank(vault, note_id)? {
        return Ok(bank);
    }
    let bank = QuestionBank {
        path: paths::questions_path(&note_id),
        meta: BankMeta {
            id: note_id,
            questions: Vec::new(),
            extra: BTreeMap::new(),
        },
    };
    save_bank(vault, &bank)?;
    Ok(bank)
}

/// Backfill missing question ids and timestamps. Returns how many records
/// were touched; zero means the bank was already fully migrated.
pub fn migrate_bank(bank: &mut QuestionBank, now: DateTime<Utc>) -> usize {
    bank.meta
        .questions
        .iter_mut()
        .map(|qa| qa.backfill(now))
        .filter(|changed| *changed)
        .count()
}

/// All document paths under the questions folder.
pub fn bank_paths<V: Vault>(vault: &V) -> Result<Vec<String>> {
    let prefix = format!("{}/", paths::QUESTIONS_DIR);
    Ok(vault
        .list()?
        .into_iter()
        .filter(|p| p.starts_with(&prefix))
        .collect())
}
