#![forbid(unsafe_code)]

//! Core state machinery for Reflow stateful wrappers.
//!
//! This crate provides the pieces a stateful wrapper component is built from:
//!
//! - [`Observable`]: a shared, version-tracked value wrapper with change
//!   notification via subscriber callbacks.
//! - [`Subscription`]: RAII guard that automatically unsubscribes on drop.
//! - [`StateContainer`]: owns committed state, routes every proposed
//!   transition through a caller-supplied reducer, and dispatches per-kind
//!   callbacks after commit.
//! - [`Action`]: the transition contract; every action reports a kind used
//!   for callback dispatch.
//!
//! # Architecture
//!
//! Everything here is single-threaded and event-driven. Transitions arrive
//! strictly sequentially; each [`StateContainer::dispatch`] call runs to
//! completion (reduce, commit, notify, callbacks) before the next one is
//! processed. Shared ownership uses `Rc<RefCell<..>>`; there is no locking
//! because there is no parallelism.
//!
//! # Invariants
//!
//! 1. Committed state is only ever replaced with a reducer's return value,
//!    never mutated in place.
//! 2. A failed reducer leaves the committed state untouched; the error is
//!    propagated to the caller.
//! 3. Version increments exactly once per commit that changes the value.
//! 4. Subscribers are notified in registration order, and never for a commit
//!    that left the value equal to its predecessor.

pub mod action;
pub mod container;
pub mod error;
pub mod observable;

pub use action::Action;
pub use container::{ContainerBuilder, Reducer, StateContainer};
pub use error::{ReducerError, Result, StateError};
pub use observable::{Observable, Subscription};
