use rosary_project::ProjectError;
use std::io;
use thiserror::Error;

/// Returned to callers of navigation operations. Nothing is mutated when it is returned.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum NavigationError {
    #[error("index {index} is out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Persistence failure. Logged by the session store and never propagated past it.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session storage unavailable: {0}")]
    Storage(#[from] io::Error),
    #[error("failed to encode session record: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("project configuration: {0}")]
    Project(#[from] ProjectError),
    #[error("path layout produced no focusable items")]
    EmptySequence,
}
