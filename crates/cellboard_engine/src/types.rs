use std::fmt;

use serde_json::Value;

use crate::persist::PersistError;

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    FetchCompleted {
        request_id: RequestId,
        result: Result<Value, FetchError>,
    },
    /// The fetch task ended without producing a result (it panicked).
    FetchCrashed {
        request_id: RequestId,
        message: String,
    },
    ItemRead {
        key: StorageKey,
        result: Result<Option<String>, PersistError>,
    },
    ItemWritten {
        key: StorageKey,
        result: Result<(), PersistError>,
    },
}

/// Address of one stored value: a root namespace plus a child key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey {
    pub root: String,
    pub child: String,
}

impl StorageKey {
    pub fn new(root: impl Into<String>, child: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            child: child.into(),
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.root, self.child)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for FetchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Timeout,
    Network,
    /// The body was not valid JSON.
    Decode,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Decode => write!(f, "invalid json body"),
        }
    }
}
