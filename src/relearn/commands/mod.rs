//! # Command Layer
//!
//! The core business logic lives here: each operation is a submodule with
//! a `run` function that takes a [`crate::store::Vault`] implementation
//! and plain Rust arguments, and returns a typed result. Commands never
//! touch stdout/stderr or assume a terminal; user-facing notices travel
//! as [`CmdMessage`] values for the CLI (or any other client) to render.
//!
//! The wall clock is always a parameter. Nothing in this layer calls
//! `Utc::now()` itself, which keeps the day-boundary state machine and
//! the staleness ranking deterministic under test.
//!
//! ## Command Modules
//!
//! - [`convert`]: turn a plain file into a tracked note
//! - [`snapshot`]: react to a note edit (create/keep/roll its revision)
//! - [`changed`]: list notes with unreviewed changes
//! - [`diff`]: diff a note against its revision
//! - [`review`]: mark or unmark a revision reviewed
//! - [`questions`]: manage a note's question bank
//! - [`quiz`]: assemble and record a quiz round
//! - [`migrate`]: backfill legacy question records
//! - [`gc`]: sweep orphaned artifacts, migrate legacy revisions
//! - [`helpers`]: shared note loading and id scanning

use serde::Serialize;

pub mod changed;
pub mod convert;
pub mod diff;
pub mod gc;
pub mod helpers;
pub mod migrate;
pub mod questions;
pub mod quiz;
pub mod review;
pub mod snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A user-visible notice produced by a command. The library never prints;
/// clients decide how to surface these.
#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}
