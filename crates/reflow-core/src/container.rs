#![forbid(unsafe_code)]

//! The stateful wrapper core: a state container with reducer-intercepted
//! transitions.
//!
//! # Design
//!
//! [`StateContainer<S, A>`] owns committed state seeded from an initial
//! value. Every proposed transition goes through a caller-supplied reducer
//! (`(&S, &A) -> Result<S, ReducerError>`) before anything is committed. On
//! success the result replaces the committed state, subscribers are notified
//! if the value changed, and every callback registered for the action's kind
//! is invoked with a post-commit snapshot.
//!
//! Containers are configured through [`ContainerBuilder`], a typed
//! configuration object validated at [`build()`](ContainerBuilder::build):
//! an absent initial state is [`StateError::MissingInitialState`].
//!
//! # Invariants
//!
//! 1. `state()` always returns the committed state; dispatch is atomic from
//!    the caller's perspective.
//! 2. A failed reducer commits nothing: the previous state stays
//!    authoritative and the error propagates.
//! 3. Kind callbacks fire exactly once per successful dispatch of that kind,
//!    even when the reducer returned a value equal to the previous state.
//! 4. Subscribers are only notified for dispatches that changed the value.

use ahash::AHashMap;

use crate::action::Action;
use crate::error::{ReducerError, Result, StateError};
use crate::observable::{Observable, Subscription};

/// A pure, fallible state transition function.
pub type Reducer<S, A> = Box<dyn Fn(&S, &A) -> std::result::Result<S, ReducerError>>;

/// Callback invoked with a post-commit state snapshot.
pub type KindCallback<S> = Box<dyn FnMut(&S)>;

/// Owns committed state and routes transitions through a reducer.
pub struct StateContainer<S, A: Action> {
    state: Observable<S>,
    reducer: Reducer<S, A>,
    callbacks: AHashMap<A::Kind, Vec<KindCallback<S>>>,
}

impl<S: std::fmt::Debug, A: Action> std::fmt::Debug for StateContainer<S, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateContainer")
            .field("state", &self.state)
            .field("callback_kinds", &self.callbacks.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<S, A> StateContainer<S, A>
where
    S: Clone + PartialEq + 'static,
    A: Action,
{
    /// Start building a container.
    #[must_use]
    pub fn builder() -> ContainerBuilder<S, A> {
        ContainerBuilder::new()
    }

    /// Handle a proposed transition.
    ///
    /// Computes `next = reducer(current, action)`. On reducer failure the
    /// error propagates and the committed state is untouched. On success the
    /// result is committed (an unchanged value skips the version bump and
    /// subscriber notification), then each callback registered for
    /// `action.kind()` runs with a snapshot of the committed state.
    pub fn dispatch(&mut self, action: &A) -> Result<()> {
        let next = self
            .state
            .with(|current| (self.reducer)(current, action))
            .map_err(StateError::Reducer)?;

        #[cfg(feature = "tracing")]
        let before = self.state.version();
        self.state.set(next);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "state.commit",
            kind = ?action.kind(),
            changed = self.state.version() != before,
            version = self.state.version(),
        );

        if let Some(callbacks) = self.callbacks.get_mut(&action.kind()) {
            let snapshot = self.state.get();
            for callback in callbacks.iter_mut() {
                callback(&snapshot);
            }
        }
        Ok(())
    }

    /// Read-only snapshot of the committed state.
    #[must_use]
    pub fn state(&self) -> S {
        self.state.get()
    }

    /// Access the committed state by reference without cloning.
    pub fn with_state<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        self.state.with(f)
    }

    /// Number of committed changes since construction.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.state.version()
    }

    /// Register a callback invoked after every committed change.
    ///
    /// This is the re-render hook: a renderer subscribes here and redraws
    /// from the state it is handed.
    #[must_use]
    pub fn subscribe(&self, f: impl FnMut(&S) + 'static) -> Subscription {
        self.state.subscribe(f)
    }

    /// Register a callback for a transition kind after construction.
    pub fn on(&mut self, kind: A::Kind, callback: impl FnMut(&S) + 'static) {
        self.callbacks
            .entry(kind)
            .or_default()
            .push(Box::new(callback));
    }
}

/// Typed configuration for a [`StateContainer`], validated at build time.
pub struct ContainerBuilder<S, A: Action> {
    initial_state: Option<S>,
    reducer: Option<Reducer<S, A>>,
    callbacks: AHashMap<A::Kind, Vec<KindCallback<S>>>,
}

impl<S, A> Default for ContainerBuilder<S, A>
where
    S: Clone + PartialEq + 'static,
    A: Action,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A> ContainerBuilder<S, A>
where
    S: Clone + PartialEq + 'static,
    A: Action,
{
    /// Empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            initial_state: None,
            reducer: None,
            callbacks: AHashMap::new(),
        }
    }

    /// Seed the committed state. Required.
    #[must_use]
    pub fn initial_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Install the reducer every transition is routed through.
    ///
    /// Without a reducer the container falls back to identity: transitions
    /// commit nothing and only kind callbacks observe them.
    #[must_use]
    pub fn reducer(
        mut self,
        f: impl Fn(&S, &A) -> std::result::Result<S, ReducerError> + 'static,
    ) -> Self {
        self.reducer = Some(Box::new(f));
        self
    }

    /// Register a callback for a transition kind.
    #[must_use]
    pub fn on(mut self, kind: A::Kind, callback: impl FnMut(&S) + 'static) -> Self {
        self.callbacks
            .entry(kind)
            .or_default()
            .push(Box::new(callback));
        self
    }

    /// Validate the configuration and construct the container.
    ///
    /// # Errors
    ///
    /// [`StateError::MissingInitialState`] if no initial state was supplied.
    pub fn build(self) -> Result<StateContainer<S, A>> {
        let initial = self.initial_state.ok_or(StateError::MissingInitialState)?;
        let reducer = self
            .reducer
            .unwrap_or_else(|| Box::new(|current: &S, _action: &A| Ok(current.clone())));
        Ok(StateContainer {
            state: Observable::new(initial),
            reducer,
            callbacks: self.callbacks,
        })
    }
}
