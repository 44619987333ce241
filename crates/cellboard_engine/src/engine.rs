use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use cellboard_logging::{board_debug, board_info, board_warn};
use thiserror::Error;
use tokio::sync::mpsc as async_mpsc;

use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::persist::{FileKeyValueStore, KeyValueStore, PersistError};
use crate::{EngineEvent, FetchError, RequestId, StorageKey};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build http client: {0}")]
    Client(#[from] FetchError),
    #[error("failed to spawn engine thread: {0}")]
    Thread(String),
}

enum EngineCommand {
    Fetch { request_id: RequestId, url: String },
    Storage(StorageOp),
}

enum StorageOp {
    Read { key: StorageKey },
    Write { key: StorageKey, value: String },
}

/// Runs network and storage IO off the UI thread and reports back through
/// [`EngineEvent`]s.
///
/// Fetches run concurrently; storage operations run one at a time in the
/// order they were issued.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
    worker: thread::JoinHandle<()>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings, storage_dir: PathBuf) -> Result<Self, EngineError> {
        let fetcher = Arc::new(ReqwestFetcher::new(settings)?);
        let store = Arc::new(FileKeyValueStore::new(storage_dir));
        Self::with_parts(fetcher, store)
    }

    pub fn with_parts(
        fetcher: Arc<dyn Fetcher>,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;

        let worker = thread::Builder::new()
            .name("cellboard-engine".into())
            .spawn(move || {
                let (storage_tx, storage_rx) = async_mpsc::unbounded_channel();
                let storage_task = runtime.spawn(storage_loop(store, storage_rx, event_tx.clone()));

                while let Ok(command) = cmd_rx.recv() {
                    match command {
                        EngineCommand::Fetch { request_id, url } => {
                            runtime.spawn(run_fetch(
                                fetcher.clone(),
                                request_id,
                                url,
                                event_tx.clone(),
                            ));
                        }
                        EngineCommand::Storage(op) => {
                            if storage_tx.send(op).is_err() {
                                board_warn!("Storage worker stopped; dropping operation");
                            }
                        }
                    }
                }
                board_debug!("Engine command channel closed; flushing storage");
                drop(storage_tx);
                let _ = runtime.block_on(storage_task);
            })
            .map_err(|err| EngineError::Thread(err.to_string()))?;

        board_info!("Engine started");
        Ok(Self {
            cmd_tx,
            event_rx,
            worker,
        })
    }

    pub fn fetch(&self, request_id: RequestId, url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Fetch {
            request_id,
            url: url.into(),
        });
    }

    pub fn read_item(&self, key: StorageKey) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::Storage(StorageOp::Read { key }));
    }

    pub fn write_item(&self, key: StorageKey, value: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Storage(StorageOp::Write {
            key,
            value: value.into(),
        }));
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    /// Stops accepting commands and waits until queued storage writes have
    /// reached disk. In-flight fetches are abandoned.
    pub fn shutdown(self) {
        let Self { cmd_tx, worker, .. } = self;
        drop(cmd_tx);
        if worker.join().is_err() {
            board_warn!("Engine thread panicked during shutdown");
        }
    }
}

async fn run_fetch(
    fetcher: Arc<dyn Fetcher>,
    request_id: RequestId,
    url: String,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    board_debug!("Fetch request_id={} url={}", request_id, url);
    // Run the fetch as its own task so a panic inside it is reported
    // instead of silently losing the result.
    let task = tokio::spawn(async move { fetcher.fetch_json(&url).await });
    let event = match task.await {
        Ok(result) => EngineEvent::FetchCompleted { request_id, result },
        Err(err) => EngineEvent::FetchCrashed {
            request_id,
            message: err.to_string(),
        },
    };
    let _ = event_tx.send(event);
}

async fn storage_loop(
    store: Arc<dyn KeyValueStore>,
    mut ops: async_mpsc::UnboundedReceiver<StorageOp>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    while let Some(op) = ops.recv().await {
        let store = store.clone();
        let event = match op {
            StorageOp::Read { key } => {
                let task_key = key.clone();
                let result = tokio::task::spawn_blocking(move || store.get_item(&task_key))
                    .await
                    .unwrap_or_else(|err| Err(PersistError::Io(err.to_string())));
                EngineEvent::ItemRead { key, result }
            }
            StorageOp::Write { key, value } => {
                let task_key = key.clone();
                let result =
                    tokio::task::spawn_blocking(move || store.set_item(&task_key, &value))
                        .await
                        .unwrap_or_else(|err| Err(PersistError::Io(err.to_string())));
                EngineEvent::ItemWritten { key, result }
            }
        };
        // Keep draining after the receiver is gone so writes still land.
        let _ = event_tx.send(event);
    }
}
