use std::sync::Arc;

use serde_json::Value;

use crate::cell::{Cell, SubscriberId};
use crate::graph::{CellKey, DependencyGraph};
use crate::view_model::{AppViewModel, CounterView};
use crate::{AsyncCell, AsyncState, Counter, CounterStore, Effect, ListCell};

/// Endpoint the todo panel reads from.
pub const DEFAULT_REQUEST_TARGET: &str = "https://jsonplaceholder.typicode.com/todos/1";

/// Explicit container for every cell the application observes.
#[derive(Debug)]
pub struct AppState {
    started: bool,
    request_target: Cell<String>,
    todo: AsyncCell,
    list: ListCell,
    counter: CounterStore,
    draft: String,
    graph: DependencyGraph,
    spinner_frame: u64,
    dirty: bool,
}

impl AppState {
    pub fn new(request_target: impl Into<String>) -> Self {
        Self {
            started: false,
            request_target: Cell::new(request_target.into()),
            todo: AsyncCell::new(),
            list: ListCell::new(),
            counter: CounterStore::new(),
            draft: String::new(),
            graph: DependencyGraph::standard(),
            spinner_frame: 0,
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            list: self.list.items().as_ref().clone(),
            draft: self.draft.clone(),
            todo: self.todo.state().clone(),
            counter: match self.counter.value() {
                Some(bears) => CounterView::Ready(bears),
                None => CounterView::Loading,
            },
            spinner_frame: self.spinner_frame,
            dirty: self.dirty,
        }
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn request_target(&self) -> &str {
        self.request_target.get()
    }

    pub fn list(&self) -> Arc<Vec<String>> {
        self.list.items()
    }

    pub fn todo(&self) -> &AsyncState<Value> {
        self.todo.state()
    }

    pub fn counter(&self) -> Option<u64> {
        self.counter.value()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn subscribe_list(
        &mut self,
        observer: impl FnMut(&Arc<Vec<String>>) + Send + 'static,
    ) -> SubscriberId {
        self.list.subscribe(observer)
    }

    pub fn subscribe_counter(
        &mut self,
        observer: impl FnMut(&Counter) + Send + 'static,
    ) -> SubscriberId {
        self.counter.subscribe(observer)
    }

    pub fn subscribe_todo(
        &mut self,
        observer: impl FnMut(&AsyncState<Value>) + Send + 'static,
    ) -> SubscriberId {
        self.todo.subscribe(observer)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns `false` if the state was already started.
    pub(crate) fn start(&mut self) -> bool {
        !std::mem::replace(&mut self.started, true)
    }

    pub(crate) fn set_draft(&mut self, text: String) {
        self.draft = text;
    }

    pub(crate) fn submit_draft(&mut self) -> String {
        let text = std::mem::take(&mut self.draft);
        self.list.append(text.clone());
        text
    }

    pub(crate) fn counter_mut(&mut self) -> &mut CounterStore {
        &mut self.counter
    }

    pub(crate) fn todo_mut(&mut self) -> &mut AsyncCell {
        &mut self.todo
    }

    /// Returns `false` when `target` equals the current one.
    pub(crate) fn set_request_target(&mut self, target: String) -> bool {
        if *self.request_target.get() == target {
            return false;
        }
        self.request_target.set(target);
        true
    }

    pub(crate) fn is_suspended(&self) -> bool {
        self.todo.state().is_pending() || !self.counter.is_ready()
    }

    pub(crate) fn advance_spinner(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
    }

    /// Recomputes every cell derived from `changed` and returns the effects
    /// the recomputation needs.
    pub(crate) fn recompute_from(&mut self, changed: CellKey) -> Vec<Effect> {
        let mut effects = Vec::new();
        for key in self.graph.recompute_order(changed) {
            match key {
                CellKey::TodoFetch => {
                    let request_id = self.todo.begin();
                    effects.push(Effect::Fetch {
                        request_id,
                        url: self.request_target.get().clone(),
                    });
                }
                CellKey::RequestTarget | CellKey::StringList | CellKey::Counter => {}
            }
        }
        effects
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_REQUEST_TARGET)
    }
}
