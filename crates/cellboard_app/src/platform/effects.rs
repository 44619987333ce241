use cellboard_core::{Effect, FetchOutcome, Msg};
use cellboard_engine::{EngineError, EngineEvent, EngineHandle};
use cellboard_logging::{board_debug, board_error, board_info, board_warn};

use super::config::AppConfig;
use super::persistence::{counter_key, decode_counter, encode_counter};

/// Executes core effects on the engine and turns engine events back into
/// messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(config: &AppConfig) -> Result<Self, EngineError> {
        let engine = EngineHandle::new(config.fetch.clone(), config.storage_dir.clone())?;
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Fetch { request_id, url } => {
                    board_info!("Fetch request_id={} url={}", request_id, url);
                    self.engine.fetch(request_id, url);
                }
                Effect::LoadCounter => {
                    board_info!("Hydrating counter from {}", counter_key());
                    self.engine.read_item(counter_key());
                }
                Effect::PersistCounter(counter) => {
                    if let Some(encoded) = encode_counter(&counter) {
                        board_debug!("Persisting counter {:?}", counter);
                        self.engine.write_item(counter_key(), encoded);
                    }
                }
            }
        }
    }

    /// Drains every engine event that is ready without blocking.
    pub fn poll(&self) -> Vec<Msg> {
        let mut inbox = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            if let Some(msg) = map_event(event) {
                inbox.push(msg);
            }
        }
        inbox
    }

    pub fn shutdown(self) {
        self.engine.shutdown();
    }
}

fn map_event(event: EngineEvent) -> Option<Msg> {
    match event {
        EngineEvent::FetchCompleted { request_id, result } => {
            let outcome = match result {
                Ok(payload) => FetchOutcome::Payload(payload),
                Err(err) => {
                    board_warn!("Fetch {} failed: {}", request_id, err);
                    FetchOutcome::Failed {
                        reason: err.to_string(),
                    }
                }
            };
            Some(Msg::FetchCompleted {
                request_id,
                outcome,
            })
        }
        EngineEvent::FetchCrashed {
            request_id,
            message,
        } => {
            board_error!("Fetch {} crashed: {}", request_id, message);
            Some(Msg::FetchCrashed {
                request_id,
                message,
            })
        }
        EngineEvent::ItemRead { key, result } if key == counter_key() => {
            Some(Msg::CounterHydrated(decode_counter(result)))
        }
        EngineEvent::ItemRead { key, .. } => {
            board_warn!("Ignoring read of unknown storage key {}", key);
            None
        }
        EngineEvent::ItemWritten { key, result } => {
            if let Err(err) = result {
                board_error!("Failed to persist {}: {}", key, err);
            }
            None
        }
    }
}
