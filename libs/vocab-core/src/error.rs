//! Error types for vocab-core.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using VocabError.
pub type Result<T> = std::result::Result<T, VocabError>;

/// Errors raised while loading lectures, persisting progress or running a session.
#[derive(Debug, Error)]
pub enum VocabError {
    #[error("invalid entry '{key}' in lecture '{lecture}': {reason}")]
    Validation {
        lecture: String,
        key: String,
        reason: String,
    },

    #[error("lecture '{lecture}' is malformed: {reason}")]
    LectureFormat { lecture: String, reason: String },

    #[error("corrupt progress file {}: {reason}", path.display())]
    CorruptState { path: PathBuf, reason: String },

    #[error("failed to persist progress to {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot select from an empty pool")]
    EmptyPool,

    #[error("failed to read lecture {}: {source}", path.display())]
    LectureRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{key}' does not start with an Italian definite article")]
    NotANoun { key: String },

    #[error("lecture '{lecture}' has no noun entries")]
    UnsupportedMode { lecture: String },

    #[error("no item has been selected yet")]
    NoCurrentItem,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_names_key_and_lecture() {
        let error = VocabError::Validation {
            lecture: "verbs".to_string(),
            key: "avere".to_string(),
            reason: "missing 'de'".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "invalid entry 'avere' in lecture 'verbs': missing 'de'"
        );
    }

    #[test]
    fn persistence_message_includes_path() {
        let error = VocabError::Persistence {
            path: PathBuf::from("/tmp/progress.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            error.to_string(),
            "failed to persist progress to /tmp/progress.json: denied"
        );
    }
}
