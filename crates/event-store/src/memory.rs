use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    AggregateId, EventEnvelope, EventStoreError, Result, Version,
    store::{AppendOptions, EventStore, validate_events_for_append},
};

/// In-memory event store implementation.
///
/// Backs every test in the workspace and provides the same optimistic
/// concurrency semantics a durable implementation would.
#[derive(Clone, Default)]
pub struct InMemoryEventStore {
    events: Arc<RwLock<Vec<EventEnvelope>>>,
}

impl InMemoryEventStore {
    /// Creates a new empty in-memory event store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of events stored.
    pub async fn event_count(&self) -> usize {
        self.events.read().await.len()
    }

    /// Clears all events.
    pub async fn clear(&self) {
        self.events.write().await.clear();
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn append(&self, events: Vec<EventEnvelope>, options: AppendOptions) -> Result<Version> {
        validate_events_for_append(&events)?;

        let first_event = &events[0];
        let aggregate_id = first_event.aggregate_id;

        let mut store = self.events.write().await;

        // Get current version for this aggregate
        let current_version = store
            .iter()
            .filter(|e| e.aggregate_id == aggregate_id)
            .map(|e| e.version)
            .max()
            .unwrap_or(Version::initial());

        // Check expected version if specified
        if let Some(expected) = options.expected_version
            && current_version != expected
        {
            return Err(EventStoreError::ConcurrencyConflict {
                aggregate_id,
                expected,
                actual: current_version,
            });
        }

        // Check for version conflicts (unique constraint simulation)
        let first_new_version = first_event.version;
        if first_new_version <= current_version && current_version != Version::initial() {
            return Err(EventStoreError::ConcurrencyConflict {
                aggregate_id,
                expected: options.expected_version.unwrap_or(current_version),
                actual: current_version,
            });
        }

        // Store all events
        let last_version = events
            .last()
            .map(|e| e.version)
            .unwrap_or(Version::initial());
        store.extend(events);

        Ok(last_version)
    }

    async fn get_events_for_aggregate(
        &self,
        aggregate_id: AggregateId,
    ) -> Result<Vec<EventEnvelope>> {
        let store = self.events.read().await;
        let mut events: Vec<_> = store
            .iter()
            .filter(|e| e.aggregate_id == aggregate_id)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.version);
        Ok(events)
    }

    async fn get_aggregate_version(&self, aggregate_id: AggregateId) -> Result<Option<Version>> {
        let store = self.events.read().await;
        let version = store
            .iter()
            .filter(|e| e.aggregate_id == aggregate_id)
            .map(|e| e.version)
            .max();
        Ok(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::EventStoreExt;

    fn create_test_event(
        aggregate_id: AggregateId,
        version: Version,
        event_type: &str,
    ) -> EventEnvelope {
        EventEnvelope::builder()
            .aggregate_id(aggregate_id)
            .aggregate_type("BillingObligation")
            .event_type(event_type)
            .version(version)
            .payload_raw(serde_json::json!({"test": true}))
            .build()
    }

    #[tokio::test]
    async fn append_single_event() {
        let store = InMemoryEventStore::new();
        let aggregate_id = AggregateId::new();
        let event = create_test_event(aggregate_id, Version::first(), "ObligationGenerated");

        let result = store.append(vec![event], AppendOptions::expect_new()).await;
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), Version::first());

        let events = store.get_events_for_aggregate(aggregate_id).await.unwrap();
        assert_eq!(events.len(), 1);
    }

    #[tokio::test]
    async fn append_multiple_events() {
        let store = InMemoryEventStore::new();
        let aggregate_id = AggregateId::new();

        let events = vec![
            create_test_event(aggregate_id, Version::new(1), "Event1"),
            create_test_event(aggregate_id, Version::new(2), "Event2"),
            create_test_event(aggregate_id, Version::new(3), "Event3"),
        ];

        let result = store.append(events, AppendOptions::expect_new()).await;
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), Version::new(3));

        let stored = store.get_events_for_aggregate(aggregate_id).await.unwrap();
        assert_eq!(stored.len(), 3);
    }

    #[tokio::test]
    async fn concurrency_conflict_on_wrong_version() {
        let store = InMemoryEventStore::new();
        let aggregate_id = AggregateId::new();

        // First event
        let event1 = create_test_event(aggregate_id, Version::first(), "Event1");
        store
            .append(vec![event1], AppendOptions::expect_new())
            .await
            .unwrap();

        // Try to append with wrong expected version
        let event2 = create_test_event(aggregate_id, Version::new(2), "Event2");
        let result = store
            .append(
                vec![event2],
                AppendOptions::expect_version(Version::initial()),
            )
            .await;

        assert!(matches!(
            result,
            Err(EventStoreError::ConcurrencyConflict { .. })
        ));
    }

    #[tokio::test]
    async fn append_with_correct_expected_version() {
        let store = InMemoryEventStore::new();
        let aggregate_id = AggregateId::new();

        let event1 = create_test_event(aggregate_id, Version::first(), "Event1");
        store
            .append(vec![event1], AppendOptions::expect_new())
            .await
            .unwrap();

        let event2 = create_test_event(aggregate_id, Version::new(2), "Event2");
        let result = store
            .append(
                vec![event2],
                AppendOptions::expect_version(Version::first()),
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn get_events_returns_empty_for_unknown_stream() {
        let store = InMemoryEventStore::new();
        let events = store
            .get_events_for_aggregate(AggregateId::new())
            .await
            .unwrap();
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn get_aggregate_version_tracks_latest() {
        let store = InMemoryEventStore::new();
        let aggregate_id = AggregateId::new();

        // No events yet
        let version = store.get_aggregate_version(aggregate_id).await.unwrap();
        assert!(version.is_none());

        let events = vec![
            create_test_event(aggregate_id, Version::new(1), "Event1"),
            create_test_event(aggregate_id, Version::new(2), "Event2"),
        ];
        store.append(events, AppendOptions::new()).await.unwrap();

        let version = store.get_aggregate_version(aggregate_id).await.unwrap();
        assert_eq!(version, Some(Version::new(2)));
    }

    #[tokio::test]
    async fn aggregate_exists_distinguishes_missing_streams() {
        let store = InMemoryEventStore::new();
        let aggregate_id = AggregateId::new();

        assert!(!store.aggregate_exists(aggregate_id).await.unwrap());

        let event = create_test_event(aggregate_id, Version::first(), "Event1");
        store
            .append_event(event, AppendOptions::expect_new())
            .await
            .unwrap();

        assert!(store.aggregate_exists(aggregate_id).await.unwrap());
    }
}
