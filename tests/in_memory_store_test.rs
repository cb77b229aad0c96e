use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use installation_es::handler::EventHandler;
use installation_es::installation::{Installation, InstallationEvent, InstallationState};
use installation_es::store::in_memory::{InMemoryStore, InMemoryStoreBuilder, InMemoryStoreError};
use installation_es::store::{EventStore, StoreEvent};
use installation_es::AggregateState;

#[derive(Default)]
struct CountingHandler {
    handled: AtomicUsize,
}

#[async_trait]
impl EventHandler<Installation> for CountingHandler {
    async fn handle(&self, _event: &StoreEvent<InstallationEvent>) {
        let _ = self.handled.fetch_add(1, Ordering::SeqCst);
    }
}

fn created(id: Uuid) -> InstallationEvent {
    InstallationEvent::Created {
        id,
        installation_id: "F12345".to_string(),
        status: None,
        remark: None,
        location_remark: None,
        unit_address_id: None,
    }
}

#[tokio::test]
async fn persist_assigns_sequence_numbers_and_runs_handlers() {
    let handler = Arc::new(CountingHandler::default());
    let store: InMemoryStore<Installation> = InMemoryStoreBuilder::new().add_event_handler(handler.clone()).build();

    let id = Uuid::new_v4();
    let mut state: AggregateState<InstallationState> = AggregateState::with_id(id);

    let store_events = store
        .persist(
            &mut state,
            vec![
                created(id),
                InstallationEvent::StatusChanged {
                    id,
                    status: Some("Opened".to_string()),
                },
            ],
        )
        .await
        .unwrap();

    assert_eq!(store_events.len(), 2);
    assert_eq!(*store_events[0].sequence_number(), 1);
    assert_eq!(*store_events[1].sequence_number(), 2);
    assert!(store_events.iter().all(|event| event.aggregate_id == id));
    assert_eq!(*state.sequence_number(), 2);
    assert_eq!(handler.handled.load(Ordering::SeqCst), 2);

    let loaded = store.by_aggregate_id(id).await.unwrap();
    let payloads: Vec<&InstallationEvent> = loaded.iter().map(StoreEvent::payload).collect();
    assert_eq!(payloads, vec![store_events[0].payload(), store_events[1].payload()]);
    assert_eq!(loaded[0].id, store_events[0].id);
}

#[tokio::test]
async fn conflicting_append_writes_nothing() {
    let handler = Arc::new(CountingHandler::default());
    let store: InMemoryStore<Installation> = InMemoryStoreBuilder::new().add_event_handler(handler.clone()).build();

    let id = Uuid::new_v4();
    let mut writer: AggregateState<InstallationState> = AggregateState::with_id(id);
    let mut stale: AggregateState<InstallationState> = AggregateState::with_id(id);

    let _ = store.persist(&mut writer, vec![created(id)]).await.unwrap();

    let error = store.persist(&mut stale, vec![created(id)]).await.unwrap_err();
    assert!(matches!(
        error,
        InMemoryStoreError::VersionConflict {
            expected: 0,
            actual: 1,
            ..
        }
    ));
    assert_eq!(*stale.sequence_number(), 0);
    assert_eq!(store.stream_version(id).await, 1);
    assert_eq!(store.by_aggregate_id(id).await.unwrap().len(), 1);
    assert_eq!(handler.handled.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn streams_are_isolated_per_aggregate() {
    let store: InMemoryStore<Installation> = InMemoryStore::new();
    let shared = store.clone();

    let first = Uuid::new_v4();
    let second = Uuid::new_v4();

    let _ = store
        .persist(&mut AggregateState::with_id(first), vec![created(first)])
        .await
        .unwrap();
    let _ = shared
        .persist(&mut AggregateState::with_id(second), vec![created(second)])
        .await
        .unwrap();

    assert_eq!(store.stream_version(first).await, 1);
    assert_eq!(store.stream_version(second).await, 1);
    assert_eq!(store.stream_version(Uuid::new_v4()).await, 0);
    assert!(store.by_aggregate_id(Uuid::new_v4()).await.unwrap().is_empty());
}

#[tokio::test]
async fn empty_append_leaves_no_stream_behind() {
    let handler = Arc::new(CountingHandler::default());
    let store: InMemoryStore<Installation> = InMemoryStoreBuilder::new().add_event_handler(handler.clone()).build();

    let id = Uuid::new_v4();
    let mut state: AggregateState<InstallationState> = AggregateState::with_id(id);

    let store_events = store.persist(&mut state, vec![]).await.unwrap();

    assert!(store_events.is_empty());
    assert_eq!(*state.sequence_number(), 0);
    assert_eq!(store.stream_version(id).await, 0);
    assert!(store.by_aggregate_id(id).await.unwrap().is_empty());
    assert_eq!(handler.handled.load(Ordering::SeqCst), 0);
}
