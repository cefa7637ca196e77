#![forbid(unsafe_code)]

//! Stateful textarea wrapper.
//!
//! Controlled-and-uncontrolled text input state: [`StatefulTextarea`] owns
//! the value and cursor, routes every edit through a reducer, and reports
//! committed edits through `on_change`. The cursor always sits on a grapheme
//! cluster boundary; movement is cluster-wise, never byte-wise, so combining
//! sequences and emoji are treated as single steps.
//!
//! Layout, wrapping, and focus handling belong to the presentational layer.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::{Emitter, View};
use reflow_core::{
    Action, ContainerBuilder, Reducer, ReducerError, Result, StateContainer, Subscription,
};

/// Textarea state owned by the wrapper.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct TextareaState {
    /// Current text.
    pub value: String,
    /// Cursor byte offset; always on a grapheme cluster boundary.
    pub cursor: usize,
}

impl TextareaState {
    /// State holding `value` with the cursor at the end.
    #[must_use]
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.len();
        Self { value, cursor }
    }

    /// Display width of the whole value in terminal cells.
    #[must_use]
    pub fn display_width(&self) -> usize {
        UnicodeWidthStr::width(self.value.as_str())
    }

    /// Display column of the cursor in terminal cells.
    #[must_use]
    pub fn cursor_col(&self) -> usize {
        UnicodeWidthStr::width(&self.value[..self.cursor])
    }

    fn prev_boundary(&self) -> usize {
        self.value[..self.cursor]
            .grapheme_indices(true)
            .last()
            .map_or(0, |(idx, _)| idx)
    }

    fn next_boundary(&self) -> usize {
        self.value[self.cursor..]
            .graphemes(true)
            .next()
            .map_or(self.value.len(), |g| self.cursor + g.len())
    }

    fn is_boundary(&self, offset: usize) -> bool {
        offset == self.value.len()
            || self
                .value
                .grapheme_indices(true)
                .any(|(idx, _)| idx == offset)
    }
}

/// Transitions the textarea collaborator can propose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextareaAction {
    /// Replace the whole value (the controlled-input path). The cursor
    /// clamps to the end if it no longer fits.
    Change(String),
    /// Insert text at the cursor.
    Insert(String),
    /// Delete the grapheme cluster before the cursor.
    DeleteBackward,
    MoveLeft,
    MoveRight,
    MoveToStart,
    MoveToEnd,
    /// Place the cursor at a byte offset; must be a cluster boundary.
    MoveTo(usize),
}

/// Kinds used for callback dispatch; see [`Action::kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextareaActionKind {
    /// Edits the value; `on_change` observes these.
    Change,
    /// Moves the cursor only.
    Move,
}

impl Action for TextareaAction {
    type Kind = TextareaActionKind;

    fn kind(&self) -> TextareaActionKind {
        match self {
            Self::Change(_) | Self::Insert(_) | Self::DeleteBackward => TextareaActionKind::Change,
            Self::MoveLeft
            | Self::MoveRight
            | Self::MoveToStart
            | Self::MoveToEnd
            | Self::MoveTo(_) => TextareaActionKind::Move,
        }
    }
}

/// The reducer installed when no override is supplied.
///
/// Public so a custom reducer can delegate to it.
pub fn default_reducer(
    current: &TextareaState,
    action: &TextareaAction,
) -> std::result::Result<TextareaState, ReducerError> {
    let mut next = current.clone();
    match action {
        TextareaAction::Change(value) => {
            next.value = value.clone();
            if next.cursor > next.value.len() || !next.is_boundary(next.cursor) {
                next.cursor = next.value.len();
            }
        }
        TextareaAction::Insert(text) => {
            next.value.insert_str(next.cursor, text);
            next.cursor += text.len();
            // Inserted text can merge with what follows (e.g. a trailing
            // combining mark); snap forward to the cluster boundary.
            if !next.is_boundary(next.cursor) {
                next.cursor = next
                    .value
                    .grapheme_indices(true)
                    .map(|(idx, _)| idx)
                    .find(|idx| *idx >= next.cursor)
                    .unwrap_or(next.value.len());
            }
        }
        TextareaAction::DeleteBackward => {
            let start = next.prev_boundary();
            next.value.replace_range(start..next.cursor, "");
            next.cursor = start;
        }
        TextareaAction::MoveLeft => next.cursor = next.prev_boundary(),
        TextareaAction::MoveRight => next.cursor = next.next_boundary(),
        TextareaAction::MoveToStart => next.cursor = 0,
        TextareaAction::MoveToEnd => next.cursor = next.value.len(),
        TextareaAction::MoveTo(offset) => {
            if !next.is_boundary(*offset) {
                return Err(ReducerError::new(format!(
                    "offset {offset} is not a grapheme boundary"
                )));
            }
            next.cursor = *offset;
        }
    }
    Ok(next)
}

/// Stateful wrapper around a presentational textarea.
pub struct StatefulTextarea {
    container: StateContainer<TextareaState, TextareaAction>,
}

impl std::fmt::Debug for StatefulTextarea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatefulTextarea")
            .field("state", &self.state())
            .finish()
    }
}

impl StatefulTextarea {
    /// Start building a textarea.
    #[must_use]
    pub fn builder() -> StatefulTextareaBuilder {
        StatefulTextareaBuilder::new()
    }

    /// Read-only snapshot of the committed state.
    #[must_use]
    pub fn state(&self) -> TextareaState {
        self.container.state()
    }

    /// Handle a proposed transition.
    ///
    /// # Errors
    ///
    /// Propagates a reducer failure; the committed state is untouched.
    pub fn handle(&mut self, action: &TextareaAction) -> Result<()> {
        self.container.dispatch(action)
    }

    /// Register a callback invoked after every committed change (the
    /// re-render hook).
    #[must_use]
    pub fn subscribe(&self, f: impl FnMut(&TextareaState) + 'static) -> Subscription {
        self.container.subscribe(f)
    }

    /// Register a callback for a transition kind after construction.
    pub fn on(&mut self, kind: TextareaActionKind, f: impl FnMut(&TextareaState) + 'static) {
        self.container.on(kind, f);
    }

    /// Drive a presentational collaborator; see
    /// [`StatefulDatepicker::render_with`](crate::StatefulDatepicker::render_with).
    pub fn render_with<V>(&mut self, view: &V) -> Result<()>
    where
        V: View<State = TextareaState, Action = TextareaAction>,
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

/// Configuration for a [`StatefulTextarea`], validated at build time.
pub struct StatefulTextareaBuilder {
    container: ContainerBuilder<TextareaState, TextareaAction>,
    state_reducer: Option<Reducer<TextareaState, TextareaAction>>,
}

impl Default for StatefulTextareaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StatefulTextareaBuilder {
    /// Empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            container: ContainerBuilder::new(),
            state_reducer: None,
        }
    }

    /// Seed the textarea state. Required.
    #[must_use]
    pub fn initial_state(mut self, state: TextareaState) -> Self {
        self.container = self.container.initial_state(state);
        self
    }

    /// Callback invoked with the post-transition state on every edit.
    #[must_use]
    pub fn on_change(mut self, f: impl FnMut(&TextareaState) + 'static) -> Self {
        self.container = self.container.on(TextareaActionKind::Change, f);
        self
    }

    /// Register a callback for an arbitrary transition kind.
    #[must_use]
    pub fn on(mut self, kind: TextareaActionKind, f: impl FnMut(&TextareaState) + 'static) -> Self {
        self.container = self.container.on(kind, f);
        self
    }

    /// Replace [`default_reducer`] to intercept state transitions.
    #[must_use]
    pub fn state_reducer(
        mut self,
        f: impl Fn(&TextareaState, &TextareaAction) -> std::result::Result<TextareaState, ReducerError>
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
    pub fn build(self) -> Result<StatefulTextarea> {
        let reducer = self
            .state_reducer
            .unwrap_or_else(|| Box::new(default_reducer));
        let container = self
            .container
            .reducer(move |state, action| reducer(state, action))
            .build()?;
        Ok(StatefulTextarea { container })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn textarea(initial: &str) -> StatefulTextarea {
        StatefulTextarea::builder()
            .initial_state(TextareaState::with_value(initial))
            .build()
            .expect("initial state supplied")
    }

    #[test]
    fn build_without_initial_state_fails() {
        let err = StatefulTextarea::builder().build().unwrap_err();
        assert_eq!(err, reflow_core::StateError::MissingInitialState);
    }

    #[test]
    fn insert_at_cursor() {
        let mut ta = textarea("Hello world");
        ta.handle(&TextareaAction::MoveTo(5)).unwrap();
        ta.handle(&TextareaAction::Insert(",".into())).unwrap();
        let state = ta.state();
        assert_eq!(state.value, "Hello, world");
        assert_eq!(state.cursor, 6);
    }

    #[test]
    fn movement_is_grapheme_wise() {
        // "e" + combining acute is one cluster; so is the emoji.
        let mut ta = textarea("e\u{301}🦀");
        assert_eq!(ta.state().cursor, ta.state().value.len());

        ta.handle(&TextareaAction::MoveLeft).unwrap();
        assert_eq!(ta.state().cursor, 3); // before the crab, after the cluster
        ta.handle(&TextareaAction::MoveLeft).unwrap();
        assert_eq!(ta.state().cursor, 0);
        ta.handle(&TextareaAction::MoveLeft).unwrap();
        assert_eq!(ta.state().cursor, 0); // clamped at start

        ta.handle(&TextareaAction::MoveRight).unwrap();
        assert_eq!(ta.state().cursor, 3);
    }

    #[test]
    fn delete_backward_removes_whole_cluster() {
        let mut ta = textarea("ae\u{301}");
        ta.handle(&TextareaAction::DeleteBackward).unwrap();
        assert_eq!(ta.state().value, "a");
        ta.handle(&TextareaAction::DeleteBackward).unwrap();
        assert_eq!(ta.state().value, "");
        // Deleting at the start is a no-op, not an error.
        ta.handle(&TextareaAction::DeleteBackward).unwrap();
        assert_eq!(ta.state().value, "");
    }

    #[test]
    fn move_to_non_boundary_fails_without_commit() {
        let mut ta = textarea("🦀");
        let before = ta.state();
        let err = ta.handle(&TextareaAction::MoveTo(2)).unwrap_err();
        assert!(matches!(err, reflow_core::StateError::Reducer(_)));
        assert_eq!(ta.state(), before);
    }

    #[test]
    fn change_clamps_cursor() {
        let mut ta = textarea("abcdef");
        ta.handle(&TextareaAction::MoveToEnd).unwrap();
        ta.handle(&TextareaAction::Change("ab".into())).unwrap();
        let state = ta.state();
        assert_eq!(state.value, "ab");
        assert_eq!(state.cursor, 2);
    }

    #[test]
    fn on_change_fires_for_edits_not_moves() {
        let changes = Rc::new(Cell::new(0u32));
        let changes_clone = Rc::clone(&changes);
        let mut ta = StatefulTextarea::builder()
            .initial_state(TextareaState::default())
            .on_change(move |_: &TextareaState| changes_clone.set(changes_clone.get() + 1))
            .build()
            .unwrap();

        ta.handle(&TextareaAction::Insert("hi".into())).unwrap();
        ta.handle(&TextareaAction::MoveLeft).unwrap();
        ta.handle(&TextareaAction::DeleteBackward).unwrap();
        assert_eq!(changes.get(), 2);
        assert_eq!(ta.state().value, "i");
    }

    #[test]
    fn insert_merging_with_following_mark_keeps_cursor_on_boundary() {
        // "e" inserted before a bare combining acute merges into one
        // cluster; the cursor must not stop between them.
        let mut ta = StatefulTextarea::builder()
            .initial_state(TextareaState {
                value: "\u{301}".into(),
                cursor: 0,
            })
            .build()
            .unwrap();

        ta.handle(&TextareaAction::Insert("e".into())).unwrap();
        let state = ta.state();
        assert_eq!(state.value, "e\u{301}");
        assert_eq!(state.cursor, 3);
        // The committed cursor is a valid MoveTo target.
        ta.handle(&TextareaAction::MoveTo(state.cursor)).unwrap();
    }

    #[test]
    fn display_width_counts_cells() {
        let state = TextareaState::with_value("Hi你");
        assert_eq!(state.display_width(), 4);
        assert_eq!(state.cursor_col(), 4);
    }

    #[test]
    fn custom_reducer_uppercases_inserts() {
        let mut ta = StatefulTextarea::builder()
            .initial_state(TextareaState::default())
            .state_reducer(|state, action| match action {
                TextareaAction::Insert(text) => {
                    default_reducer(state, &TextareaAction::Insert(text.to_uppercase()))
                }
                other => default_reducer(state, other),
            })
            .build()
            .unwrap();

        ta.handle(&TextareaAction::Insert("abc".into())).unwrap();
        assert_eq!(ta.state().value, "ABC");
    }

    #[cfg(feature = "state-persistence")]
    #[test]
    fn state_round_trips_through_json() {
        let state = TextareaState {
            value: "Hi你".into(),
            cursor: 2,
        };
        let json = serde_json::to_string(&state).unwrap();
        let back: TextareaState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
