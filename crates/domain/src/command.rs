//! Command handling infrastructure.

use std::marker::PhantomData;

use common::AggregateId;
use event_store::{AppendOptions, EventEnvelope, EventStore, Version};

use crate::aggregate::{Aggregate, DomainEvent};
use crate::error::DomainError;

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult<A: Aggregate> {
    /// The aggregate after applying the new events.
    pub aggregate: A,

    /// The events that were generated and persisted. Empty when a no-op
    /// guard fired; callers must not treat that as failure.
    pub events: Vec<A::Event>,

    /// The new version of the aggregate after the command.
    pub new_version: Version,
}

/// Trait for commands that can be executed against an aggregate.
///
/// Commands represent an intention to perform an action. They may be rejected
/// if the aggregate's current state doesn't allow the action.
pub trait Command: Send + Sync {
    /// The type of aggregate this command targets.
    type Aggregate: Aggregate;

    /// Returns the ID of the aggregate this command targets.
    fn aggregate_id(&self) -> AggregateId;
}

/// Handler for executing commands against aggregates.
///
/// The handler is responsible for:
/// 1. Replaying the aggregate's event history into current state
/// 2. Running the command, which records events into the uncommitted buffer
/// 3. Persisting the buffered events with an expected-version check
/// 4. Committing the buffer once the store confirms the append
pub struct CommandHandler<S, A>
where
    S: EventStore,
    A: Aggregate,
{
    store: S,
    _phantom: PhantomData<A>,
}

impl<S, A> CommandHandler<S, A>
where
    S: EventStore,
    A: Aggregate,
{
    /// Creates a new command handler with the given event store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            _phantom: PhantomData,
        }
    }

    /// Returns a reference to the underlying event store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads an aggregate by replaying its stream.
    ///
    /// A stream with no history yields a default (uncreated) instance;
    /// the aggregate's own precondition guards decide whether that is
    /// acceptable for a given operation.
    pub async fn load(&self, aggregate_id: AggregateId) -> Result<A, DomainError> {
        let envelopes = self.store.get_events_for_aggregate(aggregate_id).await?;

        let mut aggregate = A::default();
        for envelope in envelopes {
            let event: A::Event = serde_json::from_value(envelope.payload)?;
            aggregate.apply(event);
            aggregate.set_version(envelope.version);
        }

        Ok(aggregate)
    }

    /// Loads an aggregate, returning None if it doesn't exist.
    pub async fn load_existing(&self, aggregate_id: AggregateId) -> Result<Option<A>, DomainError> {
        let aggregate = self.load(aggregate_id).await?;
        if aggregate.id().is_some() {
            Ok(Some(aggregate))
        } else {
            Ok(None)
        }
    }

    /// Executes a command and persists the resulting events.
    ///
    /// The command function receives the freshly replayed aggregate and
    /// records new facts on it; whatever ends up in the uncommitted buffer
    /// is appended atomically.
    pub async fn execute<F>(
        &self,
        aggregate_id: AggregateId,
        command_fn: F,
    ) -> Result<CommandResult<A>, DomainError>
    where
        F: FnOnce(&mut A) -> Result<(), A::Error>,
        DomainError: From<A::Error>,
    {
        let mut aggregate = self.load(aggregate_id).await?;
        let current_version = aggregate.version();

        command_fn(&mut aggregate)?;

        let events = aggregate.uncommitted_events().to_vec();
        if events.is_empty() {
            return Ok(CommandResult {
                aggregate,
                events,
                new_version: current_version,
            });
        }

        // Build envelopes for persistence
        let envelopes = self.build_envelopes(aggregate_id, current_version, &events)?;

        // Persist events with optimistic concurrency
        let options = if current_version == Version::initial() {
            AppendOptions::expect_new()
        } else {
            AppendOptions::expect_version(current_version)
        };

        let new_version = self.store.append(envelopes, options).await?;

        aggregate.set_version(new_version);
        aggregate.commit();

        metrics::counter!("domain_events_persisted_total", "aggregate" => A::aggregate_type())
            .increment(events.len() as u64);

        Ok(CommandResult {
            aggregate,
            events,
            new_version,
        })
    }

    /// Builds event envelopes from domain events.
    fn build_envelopes(
        &self,
        aggregate_id: AggregateId,
        current_version: Version,
        events: &[A::Event],
    ) -> Result<Vec<EventEnvelope>, DomainError> {
        let mut envelopes = Vec::with_capacity(events.len());
        let mut version = current_version;

        for event in events {
            version = version.next();
            let envelope = EventEnvelope::builder()
                .aggregate_id(aggregate_id)
                .aggregate_type(A::aggregate_type())
                .event_type(event.event_type())
                .version(version)
                .payload(event)?
                .build();
            envelopes.push(envelope);
        }

        Ok(envelopes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::{BillingObligation, ObligationDraft, PaymentRecord};
    use crate::money::Money;
    use chrono::Utc;
    use common::{EntityId, TenantId, UnitId};
    use event_store::InMemoryEventStore;

    fn draft(obligation_id: AggregateId) -> ObligationDraft {
        ObligationDraft::new(
            obligation_id,
            EntityId::new("entity-1"),
            AggregateId::new(),
            TenantId::new("tenant-1"),
            UnitId::new("unit-1"),
            "2025-07",
            Money::from_cents(85000),
            Money::from_cents(85000),
        )
    }

    #[tokio::test]
    async fn execute_persists_buffered_events() {
        let store = InMemoryEventStore::new();
        let handler: CommandHandler<_, BillingObligation> = CommandHandler::new(store.clone());
        let obligation_id = AggregateId::new();

        let result = handler
            .execute(obligation_id, |obligation| {
                obligation.generate(draft(obligation_id))
            })
            .await
            .unwrap();

        assert_eq!(result.events.len(), 1);
        assert_eq!(result.new_version, Version::first());
        assert_eq!(result.aggregate.id(), Some(obligation_id));
        assert!(result.aggregate.uncommitted_events().is_empty());
        assert_eq!(store.event_count().await, 1);
    }

    #[tokio::test]
    async fn execute_noop_leaves_store_untouched() {
        let store = InMemoryEventStore::new();
        let handler: CommandHandler<_, BillingObligation> = CommandHandler::new(store.clone());
        let obligation_id = AggregateId::new();

        handler
            .execute(obligation_id, |o| o.generate(draft(obligation_id)))
            .await
            .unwrap();

        // Second generate hits the already-created guard
        let result = handler
            .execute(obligation_id, |o| o.generate(draft(obligation_id)))
            .await
            .unwrap();

        assert!(result.events.is_empty());
        assert_eq!(result.new_version, Version::first());
        assert_eq!(store.event_count().await, 1);
    }

    #[tokio::test]
    async fn execute_surfaces_domain_errors() {
        let store = InMemoryEventStore::new();
        let handler: CommandHandler<_, BillingObligation> = CommandHandler::new(store.clone());

        let payment = PaymentRecord::new(
            "tx-1",
            Money::from_cents(1000),
            "A. Tenant",
            Utc::now(),
            Utc::now(),
            "user-1",
        );
        let result = handler
            .execute(AggregateId::new(), |o| o.record_payment(payment))
            .await;

        assert!(result.is_err());
        assert_eq!(store.event_count().await, 0);
    }

    #[tokio::test]
    async fn load_existing_returns_none_for_new() {
        let store = InMemoryEventStore::new();
        let handler: CommandHandler<_, BillingObligation> = CommandHandler::new(store);

        let result = handler.load_existing(AggregateId::new()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn load_replays_history_into_state() {
        let store = InMemoryEventStore::new();
        let handler: CommandHandler<_, BillingObligation> = CommandHandler::new(store);
        let obligation_id = AggregateId::new();

        handler
            .execute(obligation_id, |o| o.generate(draft(obligation_id)))
            .await
            .unwrap();

        let loaded = handler.load(obligation_id).await.unwrap();
        assert_eq!(loaded.id(), Some(obligation_id));
        assert_eq!(loaded.version(), Version::first());
        assert!(loaded.uncommitted_events().is_empty());
    }
}
