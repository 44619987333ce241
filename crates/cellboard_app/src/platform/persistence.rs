use cellboard_core::Counter;
use cellboard_engine::{PersistError, StorageKey};
use cellboard_logging::{board_error, board_info, board_warn};

/// Root namespace shared by every persisted store.
pub(crate) const STORAGE_ROOT: &str = "root";
/// Child key of the counter store.
pub(crate) const COUNTER_KEY: &str = "authzerok2j";

pub(crate) fn counter_key() -> StorageKey {
    StorageKey::new(STORAGE_ROOT, COUNTER_KEY)
}

pub(crate) fn encode_counter(counter: &Counter) -> Option<String> {
    match serde_json::to_string(counter) {
        Ok(text) => Some(text),
        Err(err) => {
            board_error!("Failed to serialize counter: {}", err);
            None
        }
    }
}

/// Turns a storage read into the counter to hydrate with. Anything
/// unreadable falls back to `None`, which hydrates the initial state.
pub(crate) fn decode_counter(result: Result<Option<String>, PersistError>) -> Option<Counter> {
    let raw = match result {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            board_info!("No persisted counter under {}; starting fresh", counter_key());
            return None;
        }
        Err(err) => {
            board_warn!("Failed to read persisted counter: {}", err);
            return None;
        }
    };

    match serde_json::from_str::<Counter>(&raw) {
        Ok(counter) => {
            board_info!("Restored counter {:?} from {}", counter, counter_key());
            Some(counter)
        }
        Err(err) => {
            board_warn!("Ignoring corrupt persisted counter {:?}: {}", raw, err);
            None
        }
    }
}
