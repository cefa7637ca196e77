#![forbid(unsafe_code)]

//! Stateful date picker wrapper.
//!
//! [`StatefulDatepicker`] owns calendar state and delegates rendering to an
//! external [`View`] collaborator. Every proposed transition is routed
//! through a reducer before it commits: by default [`default_reducer`], or a
//! caller-supplied replacement installed with
//! [`state_reducer`](StatefulDatepickerBuilder::state_reducer) to intercept
//! transitions (the controlled/uncontrolled override hook).
//!
//! No date arithmetic happens here. Navigation and highlighting carry the
//! target date in the action; computing "next month" and the like is the
//! presentational layer's business.

use chrono::NaiveDate;

use crate::{Emitter, View};
use reflow_core::{
    Action, ContainerBuilder, Reducer, ReducerError, Result, StateContainer, Subscription,
};

/// Calendar state owned by the wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct CalendarState {
    /// Date the keyboard cursor rests on.
    pub highlighted: NaiveDate,
    /// Committed selection, if any.
    pub selected: Option<NaiveDate>,
}

impl CalendarState {
    /// State highlighting `date` with nothing selected.
    #[must_use]
    pub fn highlighting(date: NaiveDate) -> Self {
        Self {
            highlighted: date,
            selected: None,
        }
    }
}

/// Transitions the calendar collaborator can propose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarAction {
    /// Move the highlight cursor (arrow keys, hover).
    Highlight(NaiveDate),
    /// Jump the visible period; carries the date to land the highlight on.
    Navigate(NaiveDate),
    /// Commit a selection.
    Select(NaiveDate),
}

/// Kinds used for callback dispatch; see [`Action::kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarActionKind {
    Highlight,
    Navigate,
    Select,
}

impl Action for CalendarAction {
    type Kind = CalendarActionKind;

    fn kind(&self) -> CalendarActionKind {
        match self {
            Self::Highlight(_) => CalendarActionKind::Highlight,
            Self::Navigate(_) => CalendarActionKind::Navigate,
            Self::Select(_) => CalendarActionKind::Select,
        }
    }
}

/// The reducer installed when no override is supplied.
///
/// Public so a custom reducer can delegate to it and only intercept the
/// transitions it cares about.
pub fn default_reducer(
    current: &CalendarState,
    action: &CalendarAction,
) -> std::result::Result<CalendarState, ReducerError> {
    let mut next = *current;
    match action {
        CalendarAction::Highlight(date) | CalendarAction::Navigate(date) => {
            next.highlighted = *date;
        }
        CalendarAction::Select(date) => {
            next.selected = Some(*date);
            next.highlighted = *date;
        }
    }
    Ok(next)
}

/// Stateful wrapper around a presentational calendar.
pub struct StatefulDatepicker {
    container: StateContainer<CalendarState, CalendarAction>,
}

impl std::fmt::Debug for StatefulDatepicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatefulDatepicker")
            .field("state", &self.state())
            .finish()
    }
}

impl StatefulDatepicker {
    /// Start building a date picker.
    #[must_use]
    pub fn builder() -> StatefulDatepickerBuilder {
        StatefulDatepickerBuilder::new()
    }

    /// Read-only snapshot of the committed state.
    #[must_use]
    pub fn state(&self) -> CalendarState {
        self.container.state()
    }

    /// Handle a proposed transition.
    ///
    /// # Errors
    ///
    /// Propagates a reducer failure; the committed state is untouched.
    pub fn handle(&mut self, action: &CalendarAction) -> Result<()> {
        self.container.dispatch(action)
    }

    /// Register a callback invoked after every committed change (the
    /// re-render hook).
    #[must_use]
    pub fn subscribe(&self, f: impl FnMut(&CalendarState) + 'static) -> Subscription {
        self.container.subscribe(f)
    }

    /// Register a callback for a transition kind after construction.
    pub fn on(&mut self, kind: CalendarActionKind, f: impl FnMut(&CalendarState) + 'static) {
        self.container.on(kind, f);
    }

    /// Drive a presentational collaborator: hand it the committed state and
    /// an emitter, then process everything it emitted, in order. Stops at
    /// the first reducer failure.
    pub fn render_with<V>(&mut self, view: &V) -> Result<()>
    where
        V: View<State = CalendarState, Action = CalendarAction>,
    {
        let state = self.container.state();
        let mut queue = Vec::new();
        view.view(&state, &mut Emitter::new(&mut queue));
        for action in &queue {
            self.container.dispatch(action)?;
        }
        Ok(())
    }
}

/// Configuration for a [`StatefulDatepicker`], validated at build time.
pub struct StatefulDatepickerBuilder {
    container: ContainerBuilder<CalendarState, CalendarAction>,
    state_reducer: Option<Reducer<CalendarState, CalendarAction>>,
}

impl Default for StatefulDatepickerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StatefulDatepickerBuilder {
    /// Empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            container: ContainerBuilder::new(),
            state_reducer: None,
        }
    }

    /// Seed the calendar state. Required.
    #[must_use]
    pub fn initial_state(mut self, state: CalendarState) -> Self {
        self.container = self.container.initial_state(state);
        self
    }

    /// Callback invoked with the post-transition state on every Select.
    #[must_use]
    pub fn on_select(mut self, f: impl FnMut(&CalendarState) + 'static) -> Self {
        self.container = self.container.on(CalendarActionKind::Select, f);
        self
    }

    /// Register a callback for an arbitrary transition kind.
    #[must_use]
    pub fn on(mut self, kind: CalendarActionKind, f: impl FnMut(&CalendarState) + 'static) -> Self {
        self.container = self.container.on(kind, f);
        self
    }

    /// Replace [`default_reducer`] to intercept state transitions.
    #[must_use]
    pub fn state_reducer(
        mut self,
        f: impl Fn(&CalendarState, &CalendarAction) -> std::result::Result<CalendarState, ReducerError>
        + 'static,
    ) -> Self {
        self.state_reducer = Some(Box::new(f));
        self
    }

    /// Validate the configuration and construct the wrapper.
    ///
    /// # Errors
    ///
    /// [`StateError::MissingInitialState`](reflow_core::StateError) if no
    /// initial state was supplied.
    pub fn build(self) -> Result<StatefulDatepicker> {
        let reducer = self
            .state_reducer
            .unwrap_or_else(|| Box::new(default_reducer));
        let container = self
            .container
            .reducer(move |state, action| reducer(state, action))
            .build()?;
        Ok(StatefulDatepicker { container })
    }
}
