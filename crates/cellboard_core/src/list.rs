use std::sync::Arc;

use crate::cell::{Cell, SubscriberId};

/// Seed values every fresh list starts with.
pub const LIST_SEED: [&str; 2] = ["hello", "world"];

/// Append-only list of strings.
///
/// Readers get `Arc` snapshots; an append publishes a new sequence and
/// leaves earlier snapshots untouched.
#[derive(Debug)]
pub struct ListCell {
    cell: Cell<Arc<Vec<String>>>,
}

impl ListCell {
    pub fn new() -> Self {
        let seed = LIST_SEED.iter().map(|s| s.to_string()).collect();
        Self {
            cell: Cell::new(Arc::new(seed)),
        }
    }

    pub fn items(&self) -> Arc<Vec<String>> {
        Arc::clone(self.cell.get())
    }

    pub fn len(&self) -> usize {
        self.cell.get().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cell.get().is_empty()
    }

    /// Appends `item` (empty strings included).
    pub fn append(&mut self, item: impl Into<String>) {
        let item = item.into();
        self.cell.replace_with(|current| {
            let mut next = Vec::with_capacity(current.len() + 1);
            next.extend(current.iter().cloned());
            next.push(item);
            Arc::new(next)
        });
    }

    pub fn subscribe(
        &mut self,
        observer: impl FnMut(&Arc<Vec<String>>) + Send + 'static,
    ) -> SubscriberId {
        self.cell.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.cell.unsubscribe(id)
    }
}

impl Default for ListCell {
    fn default() -> Self {
        Self::new()
    }
}
