//! Property tests for the dispatch/fold equivalence of `StateContainer`.
//!
//! Invariants under test:
//! 1. For any action sequence, the committed state equals the left fold of
//!    the reducer over the sequence.
//! 2. A failed dispatch commits nothing: the state equals the fold of the
//!    prefix before the failing action.
//! 3. Version never exceeds the number of dispatches and only grows when
//!    the committed value actually changes.

use proptest::prelude::*;
use reflow_core::{Action, ReducerError, StateContainer};

#[derive(Debug, Clone, PartialEq, Eq)]
enum CounterAction {
    Add(i64),
    Set(i64),
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum CounterKind {
    Edit,
    Reject,
}

impl Action for CounterAction {
    type Kind = CounterKind;

    fn kind(&self) -> CounterKind {
        match self {
            Self::Add(_) | Self::Set(_) => CounterKind::Edit,
            Self::Reject => CounterKind::Reject,
        }
    }
}

fn reduce(current: &i64, action: &CounterAction) -> Result<i64, ReducerError> {
    match action {
        CounterAction::Add(n) => Ok(current.wrapping_add(*n)),
        CounterAction::Set(n) => Ok(*n),
        CounterAction::Reject => Err(ReducerError::new("rejected")),
    }
}

fn container(initial: i64) -> StateContainer<i64, CounterAction> {
    StateContainer::builder()
        .initial_state(initial)
        .reducer(reduce)
        .build()
        .expect("initial state supplied")
}

fn ok_action() -> impl Strategy<Value = CounterAction> {
    prop_oneof![
        any::<i64>().prop_map(CounterAction::Add),
        any::<i64>().prop_map(CounterAction::Set),
    ]
}

proptest! {
    #[test]
    fn dispatch_sequence_equals_left_fold(
        initial in any::<i64>(),
        actions in prop::collection::vec(ok_action(), 0..64),
    ) {
        let mut c = container(initial);
        for action in &actions {
            c.dispatch(action).expect("reducer cannot fail on these actions");
        }

        let folded = actions.iter().try_fold(initial, |acc, a| reduce(&acc, a));
        prop_assert_eq!(c.state(), folded.expect("same actions"));
    }

    #[test]
    fn failed_dispatch_preserves_prefix_fold(
        initial in any::<i64>(),
        prefix in prop::collection::vec(ok_action(), 0..32),
        suffix in prop::collection::vec(ok_action(), 0..8),
    ) {
        let mut c = container(initial);
        for action in &prefix {
            c.dispatch(action).expect("prefix cannot fail");
        }
        let before = c.state();
        let before_version = c.version();

        prop_assert!(c.dispatch(&CounterAction::Reject).is_err());
        prop_assert_eq!(c.state(), before);
        prop_assert_eq!(c.version(), before_version);

        // The container stays usable after a failure.
        for action in &suffix {
            c.dispatch(action).expect("suffix cannot fail");
        }
        let folded = suffix.iter().try_fold(before, |acc, a| reduce(&acc, a));
        prop_assert_eq!(c.state(), folded.expect("same actions"));
    }

    #[test]
    fn version_bounded_by_changing_dispatches(
        initial in -8i64..8,
        actions in prop::collection::vec(
            prop_oneof![(-2i64..2).prop_map(CounterAction::Add), (-8i64..8).prop_map(CounterAction::Set)],
            0..64,
        ),
    ) {
        let mut c = container(initial);
        let mut expected_version = 0u64;
        let mut state = initial;
        for action in &actions {
            c.dispatch(action).expect("reducer cannot fail on these actions");
            let next = reduce(&state, action).expect("same reducer");
            if next != state {
                expected_version += 1;
                state = next;
            }
        }
        prop_assert_eq!(c.version(), expected_version);
        prop_assert!(c.version() <= actions.len() as u64);
    }
}
