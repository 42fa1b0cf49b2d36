//! Error types for the overlay registry and lazy components.

use thiserror::Error;

/// Errors surfaced by the registry and mounted store handles.
///
/// Unknown session ids are never errors: mutations on a missing id are
/// silent no-ops and lookups return `None`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OverlayError {
    /// A call reached the registry while no session store was bound.
    #[error("no active session store is bound")]
    Unbound,

    /// An animated close was requested outside a tokio runtime, so the
    /// removal timer could not be scheduled.
    #[error("animated close requires a running tokio runtime")]
    NoRuntime,
}

/// Errors produced while resolving a lazily loaded component.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    /// The store was unmounted before the component finished loading.
    #[error("component load cancelled")]
    Cancelled,

    /// The loader itself failed.
    #[error("failed to load component: {0}")]
    Failed(String),
}

impl LoadError {
    /// Creates a `Failed` error from any displayable message.
    pub fn failed(message: impl Into<String>) -> Self {
        LoadError::Failed(message.into())
    }
}
