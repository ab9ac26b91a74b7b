use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Errors that terminate a search run. No variant carries partial results.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("usage error: {0}")]
    Usage(String),

    #[error("unsupported algorithm '{0}' (expected 'kmp' or 'rabin_karp')")]
    UnsupportedAlgorithm(String),

    #[error("cannot read record set '{}': {source}", .path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed record on row {row}: {detail}")]
    MalformedRecord { row: usize, detail: String },

    #[error("invalid sequence on row {row}: {detail}")]
    InvalidAlphabet { row: usize, detail: String },
}

/// Stable machine-readable error kind, serialized into the failure payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Usage,
    UnsupportedAlgorithm,
    SourceUnreadable,
    MalformedRecord,
    InvalidAlphabet,
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Usage(_) => ErrorKind::Usage,
            Self::UnsupportedAlgorithm(_) => ErrorKind::UnsupportedAlgorithm,
            Self::SourceUnreadable { .. } => ErrorKind::SourceUnreadable,
            Self::MalformedRecord { .. } => ErrorKind::MalformedRecord,
            Self::InvalidAlphabet { .. } => ErrorKind::InvalidAlphabet,
        }
    }

    /// 1-based row of the offending record, counted from the first line of the source.
    pub fn row(&self) -> Option<usize> {
        match self {
            Self::MalformedRecord { row, .. } | Self::InvalidAlphabet { row, .. } => Some(*row),
            _ => None,
        }
    }

    /// Process exit status for this error. Success is 0; 1 is reserved for output failures.
    pub fn exit_code(&self) -> u8 {
        match self.kind() {
            ErrorKind::Usage => 2,
            ErrorKind::UnsupportedAlgorithm => 3,
            ErrorKind::SourceUnreadable => 4,
            ErrorKind::MalformedRecord => 5,
            ErrorKind::InvalidAlphabet => 6,
        }
    }

    pub(crate) fn unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SourceUnreadable { path: path.into(), source }
    }
}
