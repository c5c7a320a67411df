//! # Observable State Container
//!
//! [`Store`] holds one value and tells subscribers about every change. Both
//! the wallet session and the deployment attempt live in one.
//!
//! Updates are atomic from a subscriber's point of view: the new value is
//! written in full before anyone is notified, and every subscriber sees the
//! snapshot taken right after the write. Subscribers run synchronously and may
//! read the store or update it again from inside the callback.
//!
//! ```rust
//! use lib_core::store::Store;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let store = Store::new(0u32);
//! let seen = Rc::new(Cell::new(0));
//! let sink = seen.clone();
//! store.subscribe(move |value| sink.set(*value));
//!
//! store.update(|value| *value += 2);
//! assert_eq!(seen.get(), 2);
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Handle returned by [`Store::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber<T> = Rc<dyn Fn(&T)>;

pub struct Store<T> {
    state: RefCell<T>,
    subscribers: RefCell<Vec<(SubscriptionId, Subscriber<T>)>>,
    next_id: Cell<u64>,
}

impl<T: Clone> Store<T> {
    pub fn new(initial: T) -> Self {
        Self {
            state: RefCell::new(initial),
            subscribers: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    /// Current snapshot.
    pub fn get(&self) -> T {
        self.state.borrow().clone()
    }

    /// Read without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.state.borrow())
    }

    /// Replace the whole value and notify.
    pub fn set(&self, value: T) {
        *self.state.borrow_mut() = value;
        self.notify();
    }

    /// Mutate in place and notify.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.state.borrow_mut());
        self.notify();
    }

    /// Mutate only if `f` returns `true`; subscribers hear nothing otherwise.
    pub fn update_if(&self, f: impl FnOnce(&mut T) -> bool) -> bool {
        let changed = f(&mut self.state.borrow_mut());
        if changed {
            self.notify();
        }
        changed
    }

    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        let subscriber: Subscriber<T> = Rc::new(f);
        self.subscribers.borrow_mut().push((id, subscriber));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.borrow_mut().retain(|(sub, _)| *sub != id);
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    fn notify(&self) {
        // No borrow may be held while callbacks run, they are allowed to re-enter.
        let snapshot = self.get();
        let subscribers: Vec<Subscriber<T>> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, f)| f.clone())
            .collect();

        for subscriber in subscribers {
            subscriber(&snapshot);
        }
    }
}

impl<T: Clone + Default> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
