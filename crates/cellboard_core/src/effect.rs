use crate::{Counter, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Perform one GET against `url` and report back under `request_id`.
    Fetch { request_id: RequestId, url: String },
    /// Read the persisted counter from durable storage.
    LoadCounter,
    /// Write the counter back to durable storage.
    PersistCounter(Counter),
}
