//! Billing obligation commands.

use chrono::{DateTime, Utc};
use common::AggregateId;

use crate::command::Command;

use super::{BillingObligation, ObligationDraft, PaymentRecord};

/// Command to generate a billing obligation for a period.
#[derive(Debug, Clone)]
pub struct GenerateObligation {
    /// The computed draft to generate from.
    pub draft: ObligationDraft,
}

impl GenerateObligation {
    /// Creates a new GenerateObligation command.
    pub fn new(draft: ObligationDraft) -> Self {
        Self { draft }
    }
}

impl Command for GenerateObligation {
    type Aggregate = BillingObligation;

    fn aggregate_id(&self) -> AggregateId {
        self.draft.obligation_id
    }
}

/// Command to mark a rent call as sent.
#[derive(Debug, Clone)]
pub struct MarkObligationSent {
    /// The obligation that was sent.
    pub obligation_id: AggregateId,

    /// When it was dispatched.
    pub sent_at: DateTime<Utc>,

    /// Address it was delivered to.
    pub recipient_email: String,
}

impl MarkObligationSent {
    /// Creates a new MarkObligationSent command.
    pub fn new(
        obligation_id: AggregateId,
        sent_at: DateTime<Utc>,
        recipient_email: impl Into<String>,
    ) -> Self {
        Self {
            obligation_id,
            sent_at,
            recipient_email: recipient_email.into(),
        }
    }
}

impl Command for MarkObligationSent {
    type Aggregate = BillingObligation;

    fn aggregate_id(&self) -> AggregateId {
        self.obligation_id
    }
}

/// Command to record a payment against an obligation.
#[derive(Debug, Clone)]
pub struct RecordPayment {
    /// The obligation the payment settles.
    pub obligation_id: AggregateId,

    /// The matched payment.
    pub payment: PaymentRecord,
}

impl RecordPayment {
    /// Creates a new RecordPayment command.
    pub fn new(obligation_id: AggregateId, payment: PaymentRecord) -> Self {
        Self {
            obligation_id,
            payment,
        }
    }
}

impl Command for RecordPayment {
    type Aggregate = BillingObligation;

    fn aggregate_id(&self) -> AggregateId {
        self.obligation_id
    }
}
