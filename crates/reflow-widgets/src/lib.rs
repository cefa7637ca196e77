#![forbid(unsafe_code)]

//! Stateful wrapper components.
//!
//! Each wrapper here pairs a [`StateContainer`](reflow_core::StateContainer)
//! with a component-specific state type, action enum, and default reducer.
//! Presentation is delegated to an external collaborator implementing
//! [`View`]: the wrapper hands it `(state, emit)`, collects the emitted
//! actions, and routes them through the container strictly in order.
//!
//! Wrappers are configured through builders: the initial state is required
//! (building without one fails with
//! [`StateError::MissingInitialState`](reflow_core::StateError)), the
//! default reducer can be replaced wholesale with `state_reducer`, and
//! per-kind callbacks such as `on_select` observe committed transitions.

pub mod datepicker;
pub mod textarea;

pub use datepicker::{
    CalendarAction, CalendarActionKind, CalendarState, StatefulDatepicker,
    StatefulDatepickerBuilder,
};
pub use textarea::{
    StatefulTextarea, StatefulTextareaBuilder, TextareaAction, TextareaActionKind, TextareaState,
};

use reflow_core::Action;

/// Channel from a presentational collaborator back into the wrapper.
///
/// Emitted actions are queued and processed one at a time after the view
/// call returns; a view never observes a state mid-transition.
pub struct Emitter<'a, A> {
    queue: &'a mut Vec<A>,
}

impl<'a, A> Emitter<'a, A> {
    pub(crate) fn new(queue: &'a mut Vec<A>) -> Self {
        Self { queue }
    }

    /// Propose a transition.
    pub fn emit(&mut self, action: A) {
        self.queue.push(action);
    }
}

/// A presentational component: renders a given state, emits actions upward.
///
/// Implementations own no state of their own; everything they display comes
/// from the `state` argument, and every interaction they want to report goes
/// through `emit`.
pub trait View {
    type State;
    type Action: Action;

    fn view(&self, state: &Self::State, emit: &mut Emitter<'_, Self::Action>);
}
