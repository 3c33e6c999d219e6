//! Collections escalation commands.
//!
//! Tier and dispatch commands carry the escalation context ids so their
//! handlers can open the escalation file on first contact.

use chrono::{DateTime, Utc};
use common::{AggregateId, EntityId, TenantId};

use crate::command::Command;
use crate::money::Money;

use super::CollectionsEscalation;

/// Command to open an escalation file for an unpaid obligation.
#[derive(Debug, Clone)]
pub struct InitiateEscalation {
    /// The unpaid obligation being escalated.
    pub obligation_id: AggregateId,

    /// Legal entity owning the debt.
    pub entity_id: EntityId,

    /// Tenant in arrears.
    pub tenant_id: TenantId,
}

impl InitiateEscalation {
    /// Creates a new InitiateEscalation command.
    pub fn new(obligation_id: AggregateId, entity_id: EntityId, tenant_id: TenantId) -> Self {
        Self {
            obligation_id,
            entity_id,
            tenant_id,
        }
    }
}

impl Command for InitiateEscalation {
    type Aggregate = CollectionsEscalation;

    fn aggregate_id(&self) -> AggregateId {
        self.obligation_id
    }
}

/// Command to send the tier 1 reminder email.
#[derive(Debug, Clone)]
pub struct SendReminderEmail {
    /// Escalation context for upsert-style initiation.
    pub context: InitiateEscalation,

    /// Address to send the reminder to.
    pub recipient_email: String,

    /// When the reminder was sent.
    pub sent_at: DateTime<Utc>,
}

impl SendReminderEmail {
    /// Creates a new SendReminderEmail command.
    pub fn new(
        context: InitiateEscalation,
        recipient_email: impl Into<String>,
        sent_at: DateTime<Utc>,
    ) -> Self {
        Self {
            context,
            recipient_email: recipient_email.into(),
            sent_at,
        }
    }
}

impl Command for SendReminderEmail {
    type Aggregate = CollectionsEscalation;

    fn aggregate_id(&self) -> AggregateId {
        self.context.obligation_id
    }
}

/// Command to generate the tier 2 formal notice.
#[derive(Debug, Clone)]
pub struct GenerateFormalNotice {
    /// Escalation context for upsert-style initiation.
    pub context: InitiateEscalation,

    /// When the notice was generated.
    pub sent_at: DateTime<Utc>,
}

impl GenerateFormalNotice {
    /// Creates a new GenerateFormalNotice command.
    pub fn new(context: InitiateEscalation, sent_at: DateTime<Utc>) -> Self {
        Self { context, sent_at }
    }
}

impl Command for GenerateFormalNotice {
    type Aggregate = CollectionsEscalation;

    fn aggregate_id(&self) -> AggregateId {
        self.context.obligation_id
    }
}

/// Command to generate the tier 3 stakeholder notifications.
#[derive(Debug, Clone)]
pub struct GenerateStakeholderNotifications {
    /// Escalation context for upsert-style initiation.
    pub context: InitiateEscalation,

    /// When the notifications were generated.
    pub sent_at: DateTime<Utc>,
}

impl GenerateStakeholderNotifications {
    /// Creates a new GenerateStakeholderNotifications command.
    pub fn new(context: InitiateEscalation, sent_at: DateTime<Utc>) -> Self {
        Self { context, sent_at }
    }
}

impl Command for GenerateStakeholderNotifications {
    type Aggregate = CollectionsEscalation;

    fn aggregate_id(&self) -> AggregateId {
        self.context.obligation_id
    }
}

/// Command to hand the formal notice to a registered-mail provider.
#[derive(Debug, Clone)]
pub struct DispatchViaRegisteredMail {
    /// Escalation context for upsert-style initiation.
    pub context: InitiateEscalation,

    /// Provider tracking identifier.
    pub tracking_id: String,

    /// Registered-mail provider name.
    pub provider: String,

    /// Postage cost charged by the provider.
    pub cost: Money,
}

impl DispatchViaRegisteredMail {
    /// Creates a new DispatchViaRegisteredMail command.
    pub fn new(
        context: InitiateEscalation,
        tracking_id: impl Into<String>,
        provider: impl Into<String>,
        cost: Money,
    ) -> Self {
        Self {
            context,
            tracking_id: tracking_id.into(),
            provider: provider.into(),
            cost,
        }
    }
}

impl Command for DispatchViaRegisteredMail {
    type Aggregate = CollectionsEscalation;

    fn aggregate_id(&self) -> AggregateId {
        self.context.obligation_id
    }
}

/// Command to record a provider delivery-status callback.
#[derive(Debug, Clone)]
pub struct UpdateRegisteredMailStatus {
    /// The escalation whose mail the callback concerns.
    pub obligation_id: AggregateId,

    /// Delivery status reported by the provider.
    pub status: String,

    /// Proof-of-delivery document URL, when supplied.
    pub proof_url: Option<String>,
}

impl UpdateRegisteredMailStatus {
    /// Creates a new UpdateRegisteredMailStatus command.
    pub fn new(
        obligation_id: AggregateId,
        status: impl Into<String>,
        proof_url: Option<String>,
    ) -> Self {
        Self {
            obligation_id,
            status: status.into(),
            proof_url,
        }
    }
}

impl Command for UpdateRegisteredMailStatus {
    type Aggregate = CollectionsEscalation;

    fn aggregate_id(&self) -> AggregateId {
        self.obligation_id
    }
}
