//! Domain error types.

use event_store::EventStoreError;
use thiserror::Error;

use crate::billing::BillingError;
use crate::collections::CollectionsError;
use crate::lease::LeaseError;

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An error occurred in the event store.
    #[error("Event store error: {0}")]
    EventStore(#[from] EventStoreError),

    /// An error occurred in the billing obligation aggregate.
    #[error("Billing error: {0}")]
    Billing(BillingError),

    /// An error occurred in the collections escalation aggregate.
    #[error("Collections error: {0}")]
    Collections(CollectionsError),

    /// An error occurred in the lease aggregate.
    #[error("Lease error: {0}")]
    Lease(LeaseError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
