#![forbid(unsafe_code)]

//! Error types for state containers.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StateError>;

/// Errors surfaced by [`StateContainer`](crate::StateContainer) construction
/// and dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// Construction was attempted without an initial state.
    #[error("missing initial state")]
    MissingInitialState,

    /// The reducer failed while computing the next state. The previously
    /// committed state remains authoritative.
    #[error("state reducer failed: {0}")]
    Reducer(#[from] ReducerError),
}

/// Failure reported by a reducer for a transition it cannot apply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ReducerError {
    message: String,
}

impl ReducerError {
    /// Create a reducer error with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
