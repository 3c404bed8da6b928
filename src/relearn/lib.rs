//! # Relearn Architecture
//!
//! Relearn is a **UI-agnostic review library**. It watches a vault of
//! markdown notes, snapshots them into revisions, tells you what changed
//! since you last studied, keeps question banks per note, and deals out
//! staleness-weighted quiz rounds. The CLI is just one client.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs + args.rs)                              │
//! │  - Parses arguments, renders output, handles exit codes     │
//! │  - The ONLY place that knows about stdout/stderr            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Supplies the wall clock and randomness                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure business logic: revision state machine, change      │
//! │    listing, question CRUD, quiz assembly, GC                │
//! │  - Notices returned as data (CmdMessage), never printed     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Documents & Storage (revisions.rs, banks.rs, store/)       │
//! │  - Frontmatter-backed documents over an abstract Vault      │
//! │  - FileVault (production), InMemoryVault (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principles
//!
//! - **One live revision per note.** Current-generation revisions are
//!   keyed by note id in their path, so the invariant is structural.
//!   Replacements are always written before predecessors are retired:
//!   a crash can leak a file, never lose one.
//! - **The clock is an argument.** Day-boundary logic (what counts as
//!   "reviewed today") and staleness ranking take `now` as a parameter;
//!   only the API facade touches `Utc::now()`.
//! - **Sanitize everything rendered.** Note bodies and answers are
//!   user-authored; every HTML string leaves `render.rs` through the
//!   sanitizer.
//!
//! ## Module Overview
//!
//! - [`api`]: the facade, entry point for all operations
//! - [`commands`]: business logic per operation
//! - [`revisions`] / [`banks`]: the two generated document kinds
//! - [`diff`]: line-level LCS diff engine
//! - [`quiz`]: staleness-weighted selection
//! - [`render`]: markdown/diff → sanitized HTML
//! - [`frontmatter`]: YAML metadata split/parse/merge
//! - [`model`]: core data types (`Note`, `Revision`, `QaPair`, ...)
//! - [`store`]: vault abstraction and implementations
//! - [`paths`]: reserved artifact paths
//! - [`config`]: configuration management
//! - [`error`]: error types

pub mod api;
pub mod banks;
pub mod commands;
pub mod config;
pub mod diff;
pub mod error;
pub mod frontmatter;
pub mod model;
pub mod paths;
pub mod quiz;
pub mod render;
pub mod revisions;
pub mod store;
