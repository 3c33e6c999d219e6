//! Collections escalation domain events.

use chrono::{DateTime, Utc};
use common::{AggregateId, EntityId, TenantId};
use serde::{Deserialize, Serialize};

use crate::aggregate::DomainEvent;
use crate::money::Money;

/// Events that can occur on a collections escalation aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum CollectionsEvent {
    /// The escalation file was opened for an unpaid obligation.
    EscalationInitiated(EscalationInitiatedData),

    /// Tier 1: a reminder email was sent to the tenant.
    ReminderEmailSent(ReminderEmailSentData),

    /// Tier 2: a formal notice was generated.
    FormalNoticeGenerated(FormalNoticeGeneratedData),

    /// Tier 3: owner and guarantor notifications were generated.
    StakeholderNotificationsGenerated(StakeholderNotificationsGeneratedData),

    /// The formal notice was handed to a registered-mail provider.
    RegisteredMailDispatched(RegisteredMailDispatchedData),

    /// A provider callback reported a delivery status.
    RegisteredMailStatusUpdated(RegisteredMailStatusUpdatedData),
}

impl DomainEvent for CollectionsEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CollectionsEvent::EscalationInitiated(_) => "EscalationInitiated",
            CollectionsEvent::ReminderEmailSent(_) => "ReminderEmailSent",
            CollectionsEvent::FormalNoticeGenerated(_) => "FormalNoticeGenerated",
            CollectionsEvent::StakeholderNotificationsGenerated(_) => {
                "StakeholderNotificationsGenerated"
            }
            CollectionsEvent::RegisteredMailDispatched(_) => "RegisteredMailDispatched",
            CollectionsEvent::RegisteredMailStatusUpdated(_) => "RegisteredMailStatusUpdated",
        }
    }
}

/// Data for EscalationInitiated event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EscalationInitiatedData {
    /// The unpaid obligation being escalated.
    pub obligation_id: AggregateId,

    /// Legal entity owning the debt.
    pub entity_id: EntityId,

    /// Tenant in arrears.
    pub tenant_id: TenantId,

    /// When the escalation file was opened.
    pub initiated_at: DateTime<Utc>,
}

/// Data for ReminderEmailSent event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderEmailSentData {
    /// Address the reminder was sent to.
    pub recipient_email: String,

    /// When the reminder was sent.
    pub sent_at: DateTime<Utc>,
}

/// Data for FormalNoticeGenerated event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormalNoticeGeneratedData {
    /// When the formal notice was generated.
    pub sent_at: DateTime<Utc>,
}

/// Data for StakeholderNotificationsGenerated event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StakeholderNotificationsGeneratedData {
    /// When the stakeholder notifications were generated.
    pub sent_at: DateTime<Utc>,
}

/// Data for RegisteredMailDispatched event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisteredMailDispatchedData {
    /// Provider tracking identifier.
    pub tracking_id: String,

    /// Registered-mail provider name.
    pub provider: String,

    /// Postage cost charged by the provider.
    pub cost: Money,

    /// When the mail was handed to the provider.
    pub dispatched_at: DateTime<Utc>,
}

/// Data for RegisteredMailStatusUpdated event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisteredMailStatusUpdatedData {
    /// Delivery status reported by the provider.
    pub status: String,

    /// Proof-of-delivery document URL, when the provider supplies one.
    #[serde(default)]
    pub proof_url: Option<String>,

    /// When the callback was recorded.
    pub updated_at: DateTime<Utc>,
}

// Convenience constructors for events
impl CollectionsEvent {
    /// Creates an EscalationInitiated event.
    pub fn escalation_initiated(
        obligation_id: AggregateId,
        entity_id: EntityId,
        tenant_id: TenantId,
    ) -> Self {
        CollectionsEvent::EscalationInitiated(EscalationInitiatedData {
            obligation_id,
            entity_id,
            tenant_id,
            initiated_at: Utc::now(),
        })
    }

    /// Creates a ReminderEmailSent event.
    pub fn reminder_email_sent(recipient_email: impl Into<String>, sent_at: DateTime<Utc>) -> Self {
        CollectionsEvent::ReminderEmailSent(ReminderEmailSentData {
            recipient_email: recipient_email.into(),
            sent_at,
        })
    }

    /// Creates a FormalNoticeGenerated event.
    pub fn formal_notice_generated(sent_at: DateTime<Utc>) -> Self {
        CollectionsEvent::FormalNoticeGenerated(FormalNoticeGeneratedData { sent_at })
    }

    /// Creates a StakeholderNotificationsGenerated event.
    pub fn stakeholder_notifications_generated(sent_at: DateTime<Utc>) -> Self {
        CollectionsEvent::StakeholderNotificationsGenerated(StakeholderNotificationsGeneratedData {
            sent_at,
        })
    }

    /// Creates a RegisteredMailDispatched event.
    pub fn registered_mail_dispatched(
        tracking_id: impl Into<String>,
        provider: impl Into<String>,
        cost: Money,
    ) -> Self {
        CollectionsEvent::RegisteredMailDispatched(RegisteredMailDispatchedData {
            tracking_id: tracking_id.into(),
            provider: provider.into(),
            cost,
            dispatched_at: Utc::now(),
        })
    }

    /// Creates a RegisteredMailStatusUpdated event.
    pub fn registered_mail_status_updated(
        status: impl Into<String>,
        proof_url: Option<String>,
    ) -> Self {
        CollectionsEvent::RegisteredMailStatusUpdated(RegisteredMailStatusUpdatedData {
            status: status.into(),
            proof_url,
            updated_at: Utc::now(),
        })
    }
}
