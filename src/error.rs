//! Error kinds for the scoring pipeline.
//!
//! Two scopes exist: [`ValidationError`] covers a single activity entry and is
//! absorbed by the analyzer, [`FileOperationError`] covers a whole run and is
//! always returned to the caller.

use std::path::PathBuf;
use thiserror::Error;

/// A single activity entry could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("entry must be a JSON object")]
    NotAnObject,

    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("time_spent must be numeric")]
    TimeSpentNotNumeric,

    #[error("shares must be an integer")]
    SharesNotInteger,

    #[error("hashtags must be a string or a list")]
    HashtagsInvalid,
}

/// Reading the input or writing the output failed. Aborts the run.
#[derive(Debug, Error)]
pub enum FileOperationError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FileOperationError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } | Self::Write { path, .. } => path,
        }
    }
}
