use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use cellboard_engine::{
    EngineEvent, EngineHandle, FailureKind, FetchError, FetchSettings, Fetcher, FileKeyValueStore,
    KeyValueStore, StorageKey,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

const WAIT: Duration = Duration::from_secs(5);

struct PanickingFetcher;

#[async_trait]
impl Fetcher for PanickingFetcher {
    async fn fetch_json(&self, _url: &str) -> Result<Value, FetchError> {
        panic!("fetcher blew up");
    }
}

fn counter_key() -> StorageKey {
    StorageKey::new("root", "authzerok2j")
}

#[test]
fn fetch_result_is_reported_with_its_request_id() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
            .mount(&server)
            .await;
        server
    });

    let temp = TempDir::new().unwrap();
    let engine = EngineHandle::new(FetchSettings::default(), temp.path().to_path_buf()).unwrap();
    engine.fetch(42, format!("{}/todos/1", server.uri()));

    assert_eq!(
        engine.recv_timeout(WAIT),
        Some(EngineEvent::FetchCompleted {
            request_id: 42,
            result: Ok(json!({"id": 1})),
        })
    );
    engine.shutdown();
}

#[test]
fn fetch_failure_is_reported_not_dropped() {
    let temp = TempDir::new().unwrap();
    let engine = EngineHandle::new(FetchSettings::default(), temp.path().to_path_buf()).unwrap();
    engine.fetch(1, "definitely not a url");

    match engine.recv_timeout(WAIT) {
        Some(EngineEvent::FetchCompleted {
            request_id: 1,
            result: Err(err),
        }) => assert_eq!(err.kind, FailureKind::InvalidUrl),
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn panicking_fetch_is_reported_as_crash() {
    let temp = TempDir::new().unwrap();
    let store = Arc::new(FileKeyValueStore::new(temp.path().to_path_buf()));
    let engine = EngineHandle::with_parts(Arc::new(PanickingFetcher), store).unwrap();
    engine.fetch(9, "https://example.com");

    match engine.recv_timeout(WAIT) {
        Some(EngineEvent::FetchCrashed { request_id, .. }) => assert_eq!(request_id, 9),
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn storage_operations_apply_in_issue_order_and_persist() {
    let temp = TempDir::new().unwrap();
    let engine = EngineHandle::new(FetchSettings::default(), temp.path().to_path_buf()).unwrap();

    engine.read_item(counter_key());
    for bears in 1..=5 {
        engine.write_item(counter_key(), format!(r#"{{"bears":{bears}}}"#));
    }
    engine.read_item(counter_key());

    let mut events = Vec::new();
    while events.len() < 7 {
        events.push(engine.recv_timeout(WAIT).expect("storage event"));
    }
    assert_eq!(
        events.first(),
        Some(&EngineEvent::ItemRead {
            key: counter_key(),
            result: Ok(None),
        })
    );
    assert_eq!(
        events.last(),
        Some(&EngineEvent::ItemRead {
            key: counter_key(),
            result: Ok(Some(r#"{"bears":5}"#.to_string())),
        })
    );
    engine.shutdown();

    // A fresh engine over the same directory sees the last write.
    let restarted =
        EngineHandle::new(FetchSettings::default(), temp.path().to_path_buf()).unwrap();
    restarted.read_item(counter_key());
    assert_eq!(
        restarted.recv_timeout(WAIT),
        Some(EngineEvent::ItemRead {
            key: counter_key(),
            result: Ok(Some(r#"{"bears":5}"#.to_string())),
        })
    );
}

#[test]
fn shutdown_flushes_queued_writes() {
    let temp = TempDir::new().unwrap();
    let engine = EngineHandle::new(FetchSettings::default(), temp.path().to_path_buf()).unwrap();
    engine.write_item(counter_key(), r#"{"bears":11}"#);
    engine.shutdown();

    let store = FileKeyValueStore::new(temp.path().to_path_buf());
    assert_eq!(
        store.get_item(&counter_key()).unwrap().as_deref(),
        Some(r#"{"bears":11}"#)
    );
}
