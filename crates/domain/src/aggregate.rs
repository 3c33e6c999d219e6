//! Core aggregate and domain event traits.

use common::AggregateId;
use event_store::Version;
use serde::{Serialize, de::DeserializeOwned};

/// Trait for domain events.
///
/// Domain events represent facts that have happened in the domain.
/// They are immutable and should be named in past tense.
pub trait DomainEvent: Serialize + DeserializeOwned + Send + Sync + Clone {
    /// Returns the event type name.
    ///
    /// This is used for serialization and event store filtering.
    fn event_type(&self) -> &'static str;
}

/// Trait for aggregates in an event-sourced system.
///
/// An aggregate is a consistency boundary identified by one stream key.
/// Its state is fully derivable by replaying its event history in order,
/// and new facts are buffered on the aggregate until a caller has durably
/// persisted them.
pub trait Aggregate: Default + Send + Sync + Sized {
    /// The type of events this aggregate produces and consumes.
    type Event: DomainEvent;

    /// The type of errors this aggregate can produce.
    type Error: std::error::Error + Send + Sync;

    /// Returns the aggregate type name.
    ///
    /// Used for event store organization and routing.
    fn aggregate_type() -> &'static str;

    /// Returns the aggregate's unique identifier.
    ///
    /// Returns None until the creating event has been applied.
    fn id(&self) -> Option<AggregateId>;

    /// Returns the current version of the aggregate.
    ///
    /// Version starts at 0 for a new aggregate and increments with each event.
    fn version(&self) -> Version;

    /// Sets the aggregate version.
    ///
    /// Called by the command handler after loading or persisting events.
    fn set_version(&mut self, version: Version);

    /// Applies an event to the aggregate, updating its state.
    ///
    /// This is the single mutation code path for both replayed history and
    /// freshly recorded facts, so it must be pure and deterministic:
    /// - Given the same state and event, it must always produce the same new state
    /// - It must not have side effects
    /// - It must not fail (events represent facts that have happened)
    fn apply(&mut self, event: Self::Event);

    /// Returns the events recorded in the current session that have not
    /// been persisted yet. Never contains replayed history.
    fn uncommitted_events(&self) -> &[Self::Event];

    /// Mutable access to the uncommitted buffer.
    ///
    /// Backed by a field on the aggregate that is excluded from any state
    /// representation; only `record` and `commit` should touch it.
    fn uncommitted_events_mut(&mut self) -> &mut Vec<Self::Event>;

    /// Rebuilds state from persisted history, in order.
    ///
    /// Replay goes through `apply` only and never adds to the uncommitted
    /// buffer: reconstructing state must not re-emit facts.
    fn replay(&mut self, history: impl IntoIterator<Item = Self::Event>) {
        for event in history {
            self.apply(event);
        }
    }

    /// Applies a new fact and buffers it for persistence.
    ///
    /// Every command method emits through this, which guarantees the state
    /// derivation is identical whether an event arrived via replay or fresh.
    fn record(&mut self, event: Self::Event) {
        self.apply(event.clone());
        self.uncommitted_events_mut().push(event);
    }

    /// Clears the uncommitted buffer.
    ///
    /// Callers must only invoke this after the buffered events have been
    /// durably persisted; the aggregate itself performs no I/O.
    fn commit(&mut self) {
        self.uncommitted_events_mut().clear();
    }
}
