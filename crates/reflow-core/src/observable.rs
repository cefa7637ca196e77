#![forbid(unsafe_code)]

//! Shared, version-tracked values with change notification.
//!
//! # Design
//!
//! [`Observable<T>`] wraps a value in shared, reference-counted storage.
//! Interested parties register a callback with
//! [`subscribe()`](Observable::subscribe) and hold on to the returned
//! [`Subscription`] guard. Mutating the value through
//! [`set()`](Observable::set) bumps the version and notifies every live
//! subscriber, in registration order, after the interior borrow has been
//! released.
//!
//! This is the explicit form of "commit, then notify dependents": the
//! observable knows nothing about rendering runtimes; a subscriber that
//! schedules a re-render is just one kind of callback.
//!
//! # Invariants
//!
//! 1. Version increments exactly once per mutation that changes the value.
//! 2. Subscribers are notified in registration order.
//! 3. Setting a value equal to the current value is a no-op (no version
//!    bump, no notifications).
//! 4. Dropping a [`Subscription`] removes the callback before the next
//!    notification cycle.
//!
//! # Failure Modes
//!
//! - **Subscriber panics**: the value is already committed; later
//!   subscribers in the same cycle are skipped by unwinding. The observable
//!   itself stays consistent.
//! - **Observable dropped**: outstanding `Subscription` guards become inert.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type SubscriberFn<T> = RefCell<Box<dyn FnMut(&T)>>;

struct ObservableInner<T> {
    value: T,
    /// Monotonically increasing, bumped on each committed change.
    version: u64,
    /// Weak handles; the strong half lives in the [`Subscription`] guard.
    /// Dead entries are cleaned up lazily during notification.
    subscribers: Vec<Weak<SubscriberFn<T>>>,
}

/// A shared value that notifies subscribers when it changes.
///
/// Cloning an `Observable` creates a new handle to the **same** inner state.
pub struct Observable<T> {
    inner: Rc<RefCell<ObservableInner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .finish()
    }
}

/// RAII guard keeping a subscriber callback alive.
///
/// Dropping the guard unregisters the callback; the observable only holds a
/// weak reference and skips dead entries on the next notification.
pub struct Subscription {
    _keep: Rc<dyn std::any::Any>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Subscription")
    }
}

impl<T: 'static> Observable<T> {
    /// Create a new observable holding `value`, at version 0.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ObservableInner {
                value,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Access the current value by reference without cloning.
    ///
    /// # Panics
    ///
    /// Panics if the closure mutates the same observable re-entrantly.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let inner = self.inner.borrow();
        f(&inner.value)
    }

    /// Current version. Starts at 0 and increments by 1 per committed change.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .borrow()
            .subscribers
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    /// Register a callback invoked after every committed change.
    ///
    /// The callback receives the newly committed value. It stays registered
    /// for as long as the returned [`Subscription`] is alive.
    #[must_use]
    pub fn subscribe(&self, f: impl FnMut(&T) + 'static) -> Subscription {
        let callback: Rc<SubscriberFn<T>> = Rc::new(RefCell::new(Box::new(f)));
        self.inner
            .borrow_mut()
            .subscribers
            .push(Rc::downgrade(&callback));
        Subscription { _keep: callback }
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Commit a new value.
    ///
    /// If `value` equals the current value this is a no-op: no version bump,
    /// no notifications. Otherwise the value is replaced (never mutated in
    /// place), the version increments, and subscribers are notified in
    /// registration order.
    pub fn set(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return;
            }
            inner.value = value;
            inner.version += 1;
        }
        self.notify();
    }

    /// Notify live subscribers with a snapshot of the current value.
    ///
    /// The interior borrow is released before any callback runs, so a
    /// callback may read the observable re-entrantly.
    fn notify(&self) {
        let (snapshot, subscribers) = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|weak| weak.strong_count() > 0);
            (inner.value.clone(), inner.subscribers.clone())
        };
        for weak in subscribers {
            if let Some(callback) = weak.upgrade() {
                (callback.borrow_mut())(&snapshot);
            }
        }
    }
}
