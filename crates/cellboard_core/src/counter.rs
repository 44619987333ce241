use serde::{Deserialize, Serialize};

use crate::cell::{Cell, SubscriberId};

/// Persisted counter payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Counter {
    pub bears: u64,
}

impl Counter {
    pub fn incremented(self) -> Self {
        Self {
            bears: self.bears.saturating_add(1),
        }
    }
}

/// Whether the counter has been restored from storage yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Hydration {
    #[default]
    Loading,
    Ready,
}

/// Counter cell gated on hydration from durable storage.
///
/// Until [`CounterStore::hydrate`] runs, reads yield `None` and mutations
/// are refused.
#[derive(Debug, Default)]
pub struct CounterStore {
    hydration: Hydration,
    cell: Cell<Counter>,
}

impl CounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hydration(&self) -> Hydration {
        self.hydration
    }

    pub fn is_ready(&self) -> bool {
        self.hydration == Hydration::Ready
    }

    pub fn value(&self) -> Option<u64> {
        self.is_ready().then(|| self.cell.get().bears)
    }

    pub fn snapshot(&self) -> Counter {
        *self.cell.get()
    }

    /// Installs the restored counter and opens the gate. A second hydration
    /// is ignored so a late storage read cannot clobber user mutations.
    pub fn hydrate(&mut self, restored: Counter) -> bool {
        if self.is_ready() {
            return false;
        }
        self.hydration = Hydration::Ready;
        self.cell.set(restored);
        true
    }

    /// Returns the new counter to persist, or `None` while loading.
    pub fn increment(&mut self) -> Option<Counter> {
        if !self.is_ready() {
            return None;
        }
        self.cell.replace_with(|c| c.incremented());
        Some(self.snapshot())
    }

    /// Returns the new counter to persist, or `None` while loading.
    pub fn reset(&mut self) -> Option<Counter> {
        if !self.is_ready() {
            return None;
        }
        self.cell.set(Counter::default());
        Some(self.snapshot())
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&Counter) + Send + 'static) -> SubscriberId {
        self.cell.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.cell.unsubscribe(id)
    }
}
