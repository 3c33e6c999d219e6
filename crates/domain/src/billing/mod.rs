//! Billing obligation (rent call) aggregate and related types.

mod aggregate;
mod commands;
mod events;
mod service;
mod value_objects;

pub use aggregate::{BillingObligation, ObligationState};
pub use commands::{GenerateObligation, MarkObligationSent, RecordPayment};
pub use events::{BillingEvent, ObligationGeneratedData, ObligationSentData};
pub use service::{BatchGenerationResult, BillingService};
pub use value_objects::{ObligationDraft, PaymentRecord, ProRata};

use thiserror::Error;

/// Errors that can occur during billing obligation operations.
#[derive(Debug, Error)]
pub enum BillingError {
    /// The obligation was addressed before its generating event.
    #[error("Billing obligation has not been generated")]
    NotCreated,
}
