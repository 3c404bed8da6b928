//! Core data types: notes, revisions, question banks, quiz projections.
//!
//! Two revision schema generations coexist in the wild. The old one marked
//! review state with a `reviewed` boolean and encoded a date into the
//! filename; the current one stores a `last_reviewed` timestamp and nothing
//! else. [`RevisionState`] models both as a tagged union, discriminated at
//! parse time by which key is present, so `is_reviewed` can stay a single
//! match. The garbage collector converts legacy documents permanently.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Frontmatter of a user note. `id` is assigned once on conversion and
/// immutable afterwards; everything we don't recognize rides along in
/// `extra` and survives merge-writes verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoteMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions_link: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A user note: vault path, parsed metadata, body with the frontmatter
/// block stripped.
#[derive(Debug, Clone)]
pub struct Note {
    pub path: String,
    pub meta: NoteMeta,
    pub body: String,
}

impl Note {
    pub fn id(&self) -> Option<Uuid> {
        self.meta.id
    }
}

/// Review state across the two schema generations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevisionState {
    /// Old scheme: a bare boolean, with the snapshot date living in the
    /// filename suffix.
    Legacy { reviewed: bool },
    /// Current scheme: the moment the user last confirmed a review, absent
    /// if never reviewed since the snapshot was cut.
    Current { last_reviewed: Option<DateTime<Utc>> },
}

impl RevisionState {
    /// Whether this revision counts as reviewed right now. Legacy records
    /// answer with their flag directly; current records are reviewed iff
    /// `last_reviewed` falls on or after the start of `now`'s day.
    pub fn is_reviewed(&self, now: DateTime<Utc>) -> bool {
        match self {
            RevisionState::Legacy { reviewed } => *reviewed,
            RevisionState::Current { last_reviewed } => last_reviewed
                .map(|t| t.date_naive() >= now.date_naive())
                .unwrap_or(false),
        }
    }

    /// Whether the user has ever confirmed a review of this revision.
    pub fn has_review(&self) -> bool {
        match self {
            RevisionState::Legacy { reviewed } => *reviewed,
            RevisionState::Current { last_reviewed } => last_reviewed.is_some(),
        }
    }

    /// The day of the recorded review, when the record itself carries one.
    /// Legacy records return `None`; their date lives in the filename.
    pub fn reviewed_on(&self) -> Option<NaiveDate> {
        match self {
            RevisionState::Legacy { .. } => None,
            RevisionState::Current { last_reviewed } => last_reviewed.map(|t| t.date_naive()),
        }
    }

    pub fn last_reviewed(&self) -> Option<DateTime<Utc>> {
        match self {
            RevisionState::Legacy { .. } => None,
            RevisionState::Current { last_reviewed } => *last_reviewed,
        }
    }
}

/// Frontmatter of a revision document.
#[derive(Debug, Clone, PartialEq)]
pub struct RevisionMeta {
    pub id: Uuid,
    /// Back-reference to the owning note's path. A weak reference: the
    /// note may have moved or vanished, which is GC's problem.
    pub note_link: Option<String>,
    pub state: RevisionState,
    pub extra: BTreeMap<String, Value>,
}

impl RevisionMeta {
    pub fn fresh(id: Uuid, note_link: Option<String>) -> Self {
        Self {
            id,
            note_link,
            state: RevisionState::Current {
                last_reviewed: None,
            },
            extra: BTreeMap::new(),
        }
    }
}

// The state variant is decided by which key the document carries, so both
// directions of serde go through a helper with every field optional. If a
// document somehow carries both keys, the legacy flag wins, matching the
// legacy-first contract of `is_reviewed`.
#[derive(Serialize, Deserialize)]
struct RevisionMetaHelper {
    id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    note_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reviewed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_reviewed: Option<DateTime<Utc>>,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

impl Serialize for RevisionMeta {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let (reviewed, last_reviewed) = match &self.state {
            RevisionState::Legacy { reviewed } => (Some(*reviewed), None),
            RevisionState::Current { last_reviewed } => (None, *last_reviewed),
        };
        RevisionMetaHelper {
            id: self.id,
            note_link: self.note_link.clone(),
            reviewed,
            last_reviewed,
            extra: self.extra.clone(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RevisionMeta {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let helper = RevisionMetaHelper::deserialize(deserializer)?;
        let state = match helper.reviewed {
            Some(reviewed) => RevisionState::Legacy { reviewed },
            None => RevisionState::Current {
                last_reviewed: helper.last_reviewed,
            },
        };
        Ok(RevisionMeta {
            id: helper.id,
            note_link: helper.note_link,
            state,
            extra: helper.extra,
        })
    }
}

/// A snapshot of a note's body at a point in time, used as the diff
/// baseline and review-state holder. At most one live revision exists per
/// note id.
#[derive(Debug, Clone)]
pub struct Revision {
    pub path: String,
    pub meta: RevisionMeta,
    pub content: String,
}

impl Revision {
    pub fn is_reviewed(&self, now: DateTime<Utc>) -> bool {
        self.meta.state.is_reviewed(now)
    }
}

/// One question/answer record inside a bank. `id` and `last_seen` are
/// optional only because legacy records lack them; migration backfills
/// both and never overwrites populated values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaPair {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub question: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
}

impl QaPair {
    pub fn new(question: String, answer: String, categories: Vec<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Some(Uuid::new_v4()),
            question,
            answer,
            last_seen: Some(now),
            categories,
        }
    }

    /// Fill missing identity and timestamp. Returns true if anything was
    /// written; populated fields are left alone so repeated runs are
    /// no-ops.
    pub fn backfill(&mut self, now: DateTime<Utc>) -> bool {
        let mut changed = false;
        if self.id.is_none() {
            self.id = Some(Uuid::new_v4());
            changed = true;
        }
        if self.last_seen.is_none() {
            self.last_seen = Some(now);
            changed = true;
        }
        changed
    }

    /// Seconds since this question was last shown, clamped at zero so
    /// future-dated records (clock skew) don't go negative. Records that
    /// were never seen rank as infinitely stale.
    pub fn age_seconds(&self, now: DateTime<Utc>) -> i64 {
        match self.last_seen {
            None => i64::MAX,
            Some(t) => (now - t).num_seconds().max(0),
        }
    }
}

/// Frontmatter of a question bank document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankMeta {
    pub id: Uuid,
    #[serde(default)]
    pub questions: Vec<QaPair>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// The per-note question collection.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    pub path: String,
    pub meta: BankMeta,
}

impl QuestionBank {
    pub fn note_id(&self) -> Uuid {
        self.meta.id
    }

    pub fn questions(&self) -> &[QaPair] {
        &self.meta.questions
    }
}

/// Read-only projection of a [`QaPair`] enriched with its owning note,
/// built on demand for cross-note quiz aggregation. Never persisted.
#[derive(Debug, Clone)]
pub struct QuizQuestion {
    pub note_id: Uuid,
    pub note_path: String,
    pub qa: QaPair,
}
