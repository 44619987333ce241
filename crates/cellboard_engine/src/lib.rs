//! Cellboard engine: network and storage IO behind a background runtime.
mod engine;
mod fetch;
mod persist;
mod types;

pub use engine::{EngineError, EngineHandle};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use persist::{ensure_storage_dir, AtomicFileWriter, FileKeyValueStore, KeyValueStore, PersistError};
pub use types::{EngineEvent, FailureKind, FetchError, RequestId, StorageKey};
