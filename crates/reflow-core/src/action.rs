#![forbid(unsafe_code)]

//! The transition contract.
//!
//! An action describes a proposed state change produced by the presentational
//! layer. Actions are immutable once created; the container never stores
//! them, it only borrows one for the duration of a dispatch.

use std::fmt::Debug;
use std::hash::Hash;

/// A proposed state transition.
///
/// Every action reports a [`kind`](Action::kind) used to route per-kind
/// callbacks (a "select" transition invokes the select callbacks, and so on).
/// The kind set is open-ended: each component defines its own kind enum.
pub trait Action {
    /// Discriminant grouping actions for callback dispatch.
    type Kind: Copy + Eq + Hash + Debug;

    /// The kind of this action.
    fn kind(&self) -> Self::Kind;
}
