use crate::banks;
use crate::error::Result;
use crate::model::QuizQuestion;
use crate::quiz;
use crate::store::Vault;
use chrono::{DateTime, Utc};
use rand::Rng;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// One assembled quiz session.
#[derive(Debug)]
pub struct QuizRound {
    pub questions: Vec<QuizQuestion>,
    /// Selected records that still lack an id (legacy, not yet migrated).
    /// They are shown but their exposure cannot be recorded.
    pub unmigrated: usize,
}

/// Assemble a quiz round: pool questions (optionally restricted to notes
/// matching `tags`; an empty filter means every note), pick `n` weighted
/// by staleness, and record `last_seen = now` for every selected
/// question. Exposure alone resets staleness; answering is not required.
pub fn run<V: Vault, R: Rng>(
    vault: &mut V,
    tags: &HashSet<String>,
    n: usize,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<QuizRound> {
    let pool = if tags.is_empty() {
        super::questions::all(vault)?
    } else {
        super::questions::all_by_tags(vault, tags)?
    };

    let selected = quiz::select_weighted(pool, n, now, rng);
    let unmigrated = selected.iter().filter(|q| q.qa.id.is_none()).count();
    record_seen(vault, &selected, now)?;

    Ok(QuizRound {
        questions: selected,
        unmigrated,
    })
}

// Persist the exposure timestamp back into each owning bank, one write
// per bank.
fn record_seen<V: Vault>(vault: &mut V, selected: &[QuizQuestion], now: DateTime<Utc>) -> Result<()> {
    let mut by_note: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for q in selected {
        if let Some(qa_id) = q.qa.id {
            by_note.entry(q.note_id).or_default().push(qa_id);
        }
    }
    for (note_id, qa_ids) in by_note {
        let Some(mut bank) = banks::load_bank(vault, note_id)? else {
            continue;
        };
        for qa in bank.meta.questions.iter_mut() {
            if qa.id.map(|id| qa_ids.contains(&id)).unwrap_or(false) {
                qa.last_seen = Some(now);
            }
        }
        banks::save_bank(vault, &bank)?;
    }
    Ok(())
}
