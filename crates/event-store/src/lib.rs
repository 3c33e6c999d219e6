//! Event stream persistence boundary.
//!
//! Aggregates are loaded by replaying the per-stream ordered event log and
//! persisted by appending new envelopes with an optimistic expected-version
//! check. Durable backends live behind the [`EventStore`] trait; the
//! in-memory implementation backs every test in the workspace.

pub mod error;
pub mod event;
pub mod memory;
pub mod store;

pub use common::AggregateId;
pub use error::{EventStoreError, Result};
pub use event::{EventEnvelope, EventEnvelopeBuilder, EventId, Version};
pub use memory::InMemoryEventStore;
pub use store::{AppendOptions, EventStore, EventStoreExt};
