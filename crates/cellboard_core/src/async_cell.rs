use serde_json::{json, Value};

use crate::cell::{Cell, SubscriberId};

pub type RequestId = u64;

/// Message carried by the fallback payload.
pub const FALLBACK_MESSAGE: &str = "oops something went wrong";

/// Value substituted for any fetch or decode failure.
pub fn fallback_payload() -> Value {
    json!([{ "message": FALLBACK_MESSAGE }])
}

/// Result of one fetch computation, as reported back to the core.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Payload(Value),
    Failed { reason: String },
}

impl FetchOutcome {
    /// Maps a failure to the fallback payload.
    pub fn into_value(self) -> Value {
        match self {
            FetchOutcome::Payload(value) => value,
            FetchOutcome::Failed { .. } => fallback_payload(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum AsyncState<T> {
    /// Computation in flight; consumers show a loading indicator.
    #[default]
    Pending,
    Ready(T),
    /// The computation itself crashed; consumers show an error view.
    Errored(String),
}

impl<T> AsyncState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, AsyncState::Pending)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            AsyncState::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// Derived cell whose value comes from an asynchronous fetch.
///
/// Each recomputation gets a fresh request id; only the result for the
/// latest id is applied.
#[derive(Debug, Default)]
pub struct AsyncCell {
    cell: Cell<AsyncState<Value>>,
    generation: RequestId,
}

impl AsyncCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AsyncState<Value> {
        self.cell.get()
    }

    /// Id of the latest issued fetch, `None` before the first one.
    pub fn current_request(&self) -> Option<RequestId> {
        (self.generation > 0).then_some(self.generation)
    }

    fn is_current(&self, request_id: RequestId) -> bool {
        self.current_request() == Some(request_id)
    }

    /// Marks the cell pending and returns the id the new fetch must carry.
    pub fn begin(&mut self) -> RequestId {
        self.generation += 1;
        self.cell.set(AsyncState::Pending);
        self.generation
    }

    /// Applies a fetch outcome. Returns `false` for superseded requests.
    pub fn resolve(&mut self, request_id: RequestId, outcome: FetchOutcome) -> bool {
        if !self.is_current(request_id) {
            return false;
        }
        self.cell.set(AsyncState::Ready(outcome.into_value()));
        true
    }

    /// Records that the computation crashed instead of completing.
    pub fn fail(&mut self, request_id: RequestId, message: impl Into<String>) -> bool {
        if !self.is_current(request_id) {
            return false;
        }
        self.cell.set(AsyncState::Errored(message.into()));
        true
    }

    pub fn subscribe(
        &mut self,
        observer: impl FnMut(&AsyncState<Value>) + Send + 'static,
    ) -> SubscriberId {
        self.cell.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.cell.unsubscribe(id)
    }
}
