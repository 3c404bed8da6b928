use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum RelearnError {
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("No revision found for note id {0}")]
    RevisionNotFound(Uuid),

    #[error("No question bank found for note id {0}")]
    BankNotFound(Uuid),

    #[error("No question with id {0} in this bank")]
    QuestionNotFound(Uuid),

    #[error("Not a reviewable note: {0}")]
    InvalidTarget(String),

    #[error("Not a tracked note (no id assigned): {0}")]
    NotTracked(String),

    #[error("Corrupt artifact at {path}: {reason}")]
    CorruptArtifact { path: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Frontmatter error: {0}")]
    Frontmatter(#[from] serde_yaml::Error),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, RelearnError>;
