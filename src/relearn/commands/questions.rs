use crate::banks;
use crate::error::{RelearnError, Result};
use crate::model::{QaPair, QuizQuestion};
use crate::store::Vault;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Add a question/answer pair to a note's bank, creating the bank on
/// first use. The pair gets a fresh id and `last_seen = now`.
///
/// Questions attach only to genuine notes: generated artifacts are
/// rejected before anything is written.
pub fn add<V: Vault>(
    vault: &mut V,
    note_path: &str,
    question: String,
    answer: String,
    categories: Vec<String>,
    now: DateTime<Utc>,
) -> Result<QaPair> {
    let (_, note_id) = super::helpers::load_tracked_note(vault, note_path)?;
    let mut bank = banks::ensure_bank(vault, note_id)?;
    let qa = QaPair::new(question, answer, categories, now);
    bank.meta.questions.push(qa.clone());
    banks::save_bank(vault, &bank)?;
    Ok(qa)
}

/// Replace a question's text fields in place. `last_seen` is untouched:
/// editing a card is not the same as being quizzed on it.
pub fn update<V: Vault>(
    vault: &mut V,
    note_id: Uuid,
    qa_id: Uuid,
    question: String,
    answer: String,
) -> Result<()> {
    let mut bank =
        banks::load_bank(vault, note_id)?.ok_or(RelearnError::BankNotFound(note_id))?;
    let qa = bank
        .meta
        .questions
        .iter_mut()
        .find(|qa| qa.id == Some(qa_id))
        .ok_or(RelearnError::QuestionNotFound(qa_id))?;
    qa.question = question;
    qa.answer = answer;
    banks::save_bank(vault, &bank)
}

/// Remove a question from its bank.
pub fn delete<V: Vault>(vault: &mut V, note_id: Uuid, qa_id: Uuid) -> Result<()> {
    let mut bank =
        banks::load_bank(vault, note_id)?.ok_or(RelearnError::BankNotFound(note_id))?;
    let before = bank.meta.questions.len();
    bank.meta.questions.retain(|qa| qa.id != Some(qa_id));
    if bank.meta.questions.len() == before {
        return Err(RelearnError::QuestionNotFound(qa_id));
    }
    banks::save_bank(vault, &bank)
}

/// A note's questions. Missing bank means no questions, never an error.
pub fn get<V: Vault>(vault: &V, note_id: Uuid) -> Result<Vec<QaPair>> {
    Ok(banks::load_bank(vault, note_id)?
        .map(|bank| bank.meta.questions)
        .unwrap_or_default())
}

/// Aggregate questions across every note whose tags intersect `tags`,
/// projected to [`QuizQuestion`]s. Duplicate question ids collapse to the
/// latest occurrence while keeping first-insertion order; records without
/// an id (not yet migrated) cannot be deduplicated and pass through.
pub fn all_by_tags<V: Vault>(vault: &V, tags: &HashSet<String>) -> Result<Vec<QuizQuestion>> {
    collect(vault, |note_tags| {
        note_tags.iter().any(|t| tags.contains(t.as_str()))
    })
}

/// Aggregate questions across all tracked notes.
pub fn all<V: Vault>(vault: &V) -> Result<Vec<QuizQuestion>> {
    collect(vault, |_| true)
}

fn collect<V: Vault, F: Fn(&[String]) -> bool>(vault: &V, matches: F) -> Result<Vec<QuizQuestion>> {
    let mut out: Vec<QuizQuestion> = Vec::new();
    let mut index_by_id: HashMap<Uuid, usize> = HashMap::new();

    for path in super::helpers::note_paths(vault)? {
        let Ok(note) = super::helpers::load_note(vault, &path) else {
            continue;
        };
        let Some(note_id) = note.id() else {
            continue;
        };
        if !matches(&note.meta.tags) {
            continue;
        }
        let Some(bank) = banks::load_bank(vault, note_id)? else {
            continue;
        };
        for qa in bank.meta.questions {
            let projected = QuizQuestion {
                note_id,
                note_path: path.clone(),
                qa,
            };
            match projected.qa.id {
                Some(qa_id) => match index_by_id.get(&qa_id) {
                    Some(&at) => out[at] = projected,
                    None => {
                        index_by_id.insert(qa_id, out.len());
                        out.push(projected);
                    }
                },
                None => out.push(projected),
            }
        }
    }
    Ok(out)
}
