//! Billing obligation domain events.

use chrono::{DateTime, Utc};
use common::{AggregateId, EntityId, TenantId, UnitId};
use serde::{Deserialize, Serialize};

use crate::aggregate::DomainEvent;
use crate::money::{ChargeLine, Money};

use super::{ObligationDraft, PaymentRecord, ProRata};

/// Events that can occur on a billing obligation aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum BillingEvent {
    /// The obligation (rent call) was generated for a period.
    ObligationGenerated(ObligationGeneratedData),

    /// The rent call was sent to the tenant.
    ObligationSent(ObligationSentData),

    /// A payment was matched against the obligation.
    PaymentRecorded(PaymentRecord),
}

impl DomainEvent for BillingEvent {
    fn event_type(&self) -> &'static str {
        match self {
            BillingEvent::ObligationGenerated(_) => "ObligationGenerated",
            BillingEvent::ObligationSent(_) => "ObligationSent",
            BillingEvent::PaymentRecorded(_) => "PaymentRecorded",
        }
    }
}

/// Data for ObligationGenerated event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObligationGeneratedData {
    /// The unique obligation ID.
    pub obligation_id: AggregateId,

    /// Legal entity issuing the rent call.
    pub entity_id: EntityId,

    /// Lease being billed.
    pub lease_id: AggregateId,

    /// Tenant being billed.
    pub tenant_id: TenantId,

    /// Unit being billed.
    pub unit_id: UnitId,

    /// Billing period label.
    pub period: String,

    /// Base rent for the period.
    pub base_amount: Money,

    /// Extra charge lines. Older payloads omitted this field.
    #[serde(default)]
    pub extra_lines: Vec<ChargeLine>,

    /// Total billed amount.
    pub total_amount: Money,

    /// Pro-rata occupancy for partial periods.
    #[serde(default)]
    pub pro_rata: Option<ProRata>,

    /// When the obligation was generated.
    pub generated_at: DateTime<Utc>,
}

/// Data for ObligationSent event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObligationSentData {
    /// When the rent call was sent.
    pub sent_at: DateTime<Utc>,

    /// Address the rent call was delivered to.
    pub recipient_email: String,
}

// Convenience constructors for events
impl BillingEvent {
    /// Creates an ObligationGenerated event from a computed draft.
    pub fn obligation_generated(draft: ObligationDraft) -> Self {
        BillingEvent::ObligationGenerated(ObligationGeneratedData {
            obligation_id: draft.obligation_id,
            entity_id: draft.entity_id,
            lease_id: draft.lease_id,
            tenant_id: draft.tenant_id,
            unit_id: draft.unit_id,
            period: draft.period,
            base_amount: draft.base_amount,
            extra_lines: draft.extra_lines,
            total_amount: draft.total_amount,
            pro_rata: draft.pro_rata,
            generated_at: Utc::now(),
        })
    }

    /// Creates an ObligationSent event.
    pub fn obligation_sent(sent_at: DateTime<Utc>, recipient_email: impl Into<String>) -> Self {
        BillingEvent::ObligationSent(ObligationSentData {
            sent_at,
            recipient_email: recipient_email.into(),
        })
    }

    /// Creates a PaymentRecorded event.
    pub fn payment_recorded(payment: PaymentRecord) -> Self {
        BillingEvent::PaymentRecorded(payment)
    }
}
