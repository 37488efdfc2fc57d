//! Observable value holders.
//!
//! Observers are notified synchronously after the value has been stored and
//! every internal borrow released, so an observer may read the state again.

use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Observer<T> = Rc<dyn Fn(&T)>;

struct StateInner<T> {
    value: RefCell<T>,
    observers: RefCell<SmallVec<[(u64, Observer<T>); 2]>>,
    next_observer_id: Cell<u64>,
}

trait Unsubscribe {
    fn unsubscribe(&self, id: u64);
}

impl<T> Unsubscribe for StateInner<T> {
    fn unsubscribe(&self, id: u64) {
        self.observers.borrow_mut().retain(|(entry, _)| *entry != id);
    }
}

impl<T: Clone + PartialEq + 'static> StateInner<T> {
    fn subscribe(self: &Rc<Self>, observer: impl Fn(&T) + 'static) -> Subscription {
        let id = self.next_observer_id.get();
        self.next_observer_id.set(id + 1);
        self.observers.borrow_mut().push((id, Rc::new(observer)));
        let weak: Weak<dyn Unsubscribe> = Rc::downgrade(self) as Weak<dyn Unsubscribe>;
        Subscription {
            state: Some(weak),
            id,
        }
    }
}

/// A mutable value that notifies its observers on change.
pub struct MutableState<T> {
    inner: Rc<StateInner<T>>,
}

impl<T: Clone + PartialEq + 'static> MutableState<T> {
    pub fn new(initial: T) -> Self {
        Self {
            inner: Rc::new(StateInner {
                value: RefCell::new(initial),
                observers: RefCell::new(SmallVec::new()),
                next_observer_id: Cell::new(1),
            }),
        }
    }

    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Stores `value`, notifying observers only if it differs from the
    /// current one.
    pub fn set(&self, value: T) {
        {
            let mut current = self.inner.value.borrow_mut();
            if *current == value {
                return;
            }
            *current = value.clone();
        }
        let observers: SmallVec<[Observer<T>; 2]> = self
            .inner
            .observers
            .borrow()
            .iter()
            .map(|(_, observer)| Rc::clone(observer))
            .collect();
        for observer in observers {
            observer(&value);
        }
    }

    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        let next = f(&self.inner.value.borrow());
        self.set(next);
    }

    pub fn subscribe(&self, observer: impl Fn(&T) + 'static) -> Subscription {
        self.inner.subscribe(observer)
    }

    pub fn as_state(&self) -> State<T> {
        State {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Clone for MutableState<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

/// Read-only view of a [`MutableState`].
pub struct State<T> {
    inner: Rc<StateInner<T>>,
}

impl<T: Clone + PartialEq + 'static> State<T> {
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    pub fn subscribe(&self, observer: impl Fn(&T) + 'static) -> Subscription {
        self.inner.subscribe(observer)
    }
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

/// Removes its observer when dropped.
pub struct Subscription {
    state: Option<Weak<dyn Unsubscribe>>,
    id: u64,
}

impl Subscription {
    /// Keeps the observer registered for the lifetime of the state.
    pub fn detach(mut self) {
        self.state = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(state) = self.state.take().and_then(|weak| weak.upgrade()) {
            state.unsubscribe(self.id);
        }
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
