//! # API Facade
//!
//! A thin entry point over the command layer, generic over the storage
//! backend: production clients hold a `RelearnApi<FileVault>`, tests a
//! `RelearnApi<InMemoryVault>`. The facade supplies the wall clock and
//! randomness so the commands underneath stay deterministic and
//! UI-agnostic; no business logic lives here.

use crate::commands::{self, changed, convert, diff, gc, migrate, questions, quiz, review, snapshot};
use crate::config::RelearnConfig;
use crate::error::Result;
use crate::model::{QaPair, QuizQuestion};
use crate::store::Vault;
use chrono::Utc;
use std::collections::HashSet;
use uuid::Uuid;

/// The main entry point for all relearn operations.
pub struct RelearnApi<V: Vault> {
    vault: V,
    config: RelearnConfig,
}

impl<V: Vault> RelearnApi<V> {
    pub fn new(vault: V, config: RelearnConfig) -> Self {
        Self { vault, config }
    }

    /// Load the configuration stored in the vault, falling back to
    /// defaults.
    pub fn open(vault: V) -> Result<Self> {
        let config = RelearnConfig::load(&vault)?;
        Ok(Self { vault, config })
    }

    pub fn config(&self) -> &RelearnConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: RelearnConfig) -> Result<()> {
        config.save(&mut self.vault)?;
        self.config = config;
        Ok(())
    }

    pub fn vault(&self) -> &V {
        &self.vault
    }

    pub fn convert_note(&mut self, path: &str) -> Result<convert::Converted> {
        convert::run(&mut self.vault, path)
    }

    pub fn note_modified(&mut self, path: &str) -> Result<snapshot::Outcome> {
        snapshot::on_note_modified(&mut self.vault, path, Utc::now())
    }

    pub fn changed_notes(&self) -> Result<Vec<changed::ChangedNote>> {
        changed::run(&self.vault, Utc::now())
    }

    pub fn diff_note(&self, path: &str) -> Result<diff::NoteDiff> {
        diff::run(&self.vault, path)
    }

    pub fn mark_reviewed(&mut self, path: &str, checked: bool) -> Result<()> {
        review::run(&mut self.vault, path, checked, Utc::now())
    }

    pub fn add_question(
        &mut self,
        path: &str,
        question: String,
        answer: String,
        categories: Vec<String>,
    ) -> Result<QaPair> {
        questions::add(
            &mut self.vault,
            path,
            question,
            answer,
            categories,
            Utc::now(),
        )
    }

    pub fn update_question(
        &mut self,
        note_id: Uuid,
        qa_id: Uuid,
        question: String,
        answer: String,
    ) -> Result<()> {
        questions::update(&mut self.vault, note_id, qa_id, question, answer)
    }

    pub fn delete_question(&mut self, note_id: Uuid, qa_id: Uuid) -> Result<()> {
        questions::delete(&mut self.vault, note_id, qa_id)
    }

    pub fn questions(&self, note_id: Uuid) -> Result<Vec<QaPair>> {
        questions::get(&self.vault, note_id)
    }

    pub fn questions_for(&self, path: &str) -> Result<Vec<QaPair>> {
        self.questions(self.note_id(path)?)
    }

    /// Resolve a note path to its assigned id.
    pub fn note_id(&self, path: &str) -> Result<Uuid> {
        let (_, note_id) = commands::helpers::load_tracked_note(&self.vault, path)?;
        Ok(note_id)
    }

    pub fn pool_by_tags(&self, tags: &HashSet<String>) -> Result<Vec<QuizQuestion>> {
        if tags.is_empty() {
            questions::all(&self.vault)
        } else {
            questions::all_by_tags(&self.vault, tags)
        }
    }

    /// Run a quiz round. `n` falls back to the configured question count.
    pub fn quiz(&mut self, tags: &HashSet<String>, n: Option<usize>) -> Result<quiz::QuizRound> {
        let n = n.unwrap_or(self.config.num_quiz_questions);
        quiz::run(&mut self.vault, tags, n, Utc::now(), &mut rand::thread_rng())
    }

    pub fn migrate(&mut self) -> Result<migrate::MigrateReport> {
        migrate::run(&mut self.vault, Utc::now())
    }

    pub fn sweep(&mut self) -> Result<gc::SweepReport> {
        gc::run(&mut self.vault)
    }
}
