use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "relearn")]
#[command(about = "Spaced-repetition review companion for markdown note vaults", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault directory (defaults to the current directory)
    #[arg(long, global = true)]
    pub vault: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the vault (writes the default configuration)
    Init,

    /// Convert a file into a tracked note
    #[command(alias = "c")]
    Convert {
        /// Vault-relative path of the file
        path: String,
    },

    /// Record an edit to a note (creates or rolls its revision)
    #[command(alias = "s")]
    Snapshot {
        /// Vault-relative path of the note
        path: String,
    },

    /// List notes with unreviewed changes
    #[command(alias = "ls")]
    Changed,

    /// Show what changed in a note since its last reviewed snapshot
    #[command(alias = "d")]
    Diff {
        /// Vault-relative path of the note
        path: String,

        /// Emit sanitized HTML instead of terminal output
        #[arg(long)]
        html: bool,
    },

    /// Mark a note's revision as reviewed
    #[command(alias = "r")]
    Review {
        /// Vault-relative path of the note
        path: String,

        /// Take the review mark back instead
        #[arg(long)]
        undo: bool,
    },

    /// Manage a note's questions
    #[command(subcommand, alias = "q")]
    Question(QuestionCommands),

    /// Run a quiz round weighted toward stale questions
    Quiz {
        /// Number of questions (defaults to the configured count)
        #[arg(short, long)]
        count: Option<usize>,

        /// Restrict to notes carrying any of these tags
        #[arg(short, long, num_args = 0..)]
        tags: Vec<String>,

        /// Emit answers as sanitized HTML
        #[arg(long)]
        html: bool,
    },

    /// Backfill ids and timestamps on legacy question records
    Migrate,

    /// Remove orphaned artifacts and migrate legacy revisions
    Gc,

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., num-quiz-questions)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum QuestionCommands {
    /// Add a question to a note
    Add {
        /// Vault-relative path of the note
        path: String,

        /// Question text
        #[arg(short, long)]
        question: String,

        /// Answer text (markdown)
        #[arg(short, long)]
        answer: String,

        /// Categories to attach
        #[arg(short, long, num_args = 0..)]
        categories: Vec<String>,
    },

    /// List a note's questions
    List {
        /// Vault-relative path of the note
        path: String,
    },

    /// Replace a question's text
    Edit {
        /// Vault-relative path of the note
        path: String,

        /// Question id
        id: String,

        /// New question text
        #[arg(short, long)]
        question: String,

        /// New answer text
        #[arg(short, long)]
        answer: String,
    },

    /// Delete a question
    Rm {
        /// Vault-relative path of the note
        path: String,

        /// Question id
        id: String,
    },
}
