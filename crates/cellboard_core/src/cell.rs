//! Observable value cell with explicit subscriber lists.

use std::fmt;

/// Handle returned by [`Cell::subscribe`], used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(u64);

type Observer<T> = Box<dyn FnMut(&T) + Send>;

/// A single unit of observable state.
///
/// Values are replaced wholesale; every replacement bumps the version and
/// notifies all current subscribers, in subscription order, with the new
/// value.
pub struct Cell<T> {
    value: T,
    version: u64,
    next_subscriber: u64,
    subscribers: Vec<(SubscriberId, Observer<T>)>,
}

impl<T> Cell<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            version: 0,
            next_subscriber: 0,
            subscribers: Vec::new(),
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Number of values published since construction.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Publishes `value` and notifies subscribers.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.version += 1;
        for (_, observer) in self.subscribers.iter_mut() {
            observer(&self.value);
        }
    }

    /// Publishes the value computed from the current one.
    pub fn replace_with(&mut self, f: impl FnOnce(&T) -> T) {
        let next = f(&self.value);
        self.set(next);
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&T) + Send + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_subscriber);
        self.next_subscriber += 1;
        self.subscribers.push((id, Box::new(observer)));
        id
    }

    /// Returns `false` when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<T: Default> Default for Cell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Cell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cell")
            .field("value", &self.value)
            .field("version", &self.version)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
