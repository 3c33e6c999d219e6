//! Collections escalation aggregate.

use chrono::{DateTime, Utc};
use common::{AggregateId, EntityId, TenantId};
use event_store::Version;

use crate::aggregate::Aggregate;
use crate::money::Money;

use super::{CollectionsError, CollectionsEvent};

/// Registered-mail delivery sub-record.
///
/// Set once at dispatch; only `status` and `proof_url` move afterwards, as
/// provider callbacks come in.
#[derive(Debug, Clone)]
pub struct RegisteredMail {
    pub tracking_id: String,
    pub provider: String,
    pub cost: Money,
    pub dispatched_at: DateTime<Utc>,
    pub status: String,
    pub proof_url: Option<String>,
}

/// State of an initiated collections escalation.
#[derive(Debug, Clone)]
pub struct EscalationState {
    pub obligation_id: AggregateId,
    pub entity_id: EntityId,
    pub tenant_id: TenantId,
    pub initiated_at: DateTime<Utc>,
    pub tier1_sent_at: Option<DateTime<Utc>>,
    pub tier1_recipient_email: Option<String>,
    pub tier2_sent_at: Option<DateTime<Utc>>,
    pub tier3_sent_at: Option<DateTime<Utc>>,
    pub registered_mail: Option<RegisteredMail>,
}

/// The collections escalation aggregate.
///
/// One instance per unpaid billing obligation. The three dunning tiers are
/// independent absorbing flags: each can be triggered at most once, in any
/// order, at a human's discretion. Registered mail is the one gated step,
/// since there is nothing to post before a formal notice exists.
#[derive(Debug, Default)]
pub struct CollectionsEscalation {
    state: Option<EscalationState>,
    version: Version,
    uncommitted: Vec<CollectionsEvent>,
}

impl CollectionsEscalation {
    /// Returns the escalation state, if initiated.
    pub fn state(&self) -> Option<&EscalationState> {
        self.state.as_ref()
    }

    fn state_or_err(&self) -> Result<&EscalationState, CollectionsError> {
        self.state.as_ref().ok_or(CollectionsError::NotInitiated)
    }

    /// Opens the escalation file for an obligation.
    ///
    /// Idempotent: initiating an already-initiated escalation records
    /// nothing and succeeds. Every other operation's handler calls this
    /// first, so escalation actions are safe on a brand-new stream.
    pub fn initiate(
        &mut self,
        obligation_id: AggregateId,
        entity_id: EntityId,
        tenant_id: TenantId,
    ) -> Result<(), CollectionsError> {
        if self.state.is_some() {
            return Ok(());
        }

        self.record(CollectionsEvent::escalation_initiated(
            obligation_id,
            entity_id,
            tenant_id,
        ));
        Ok(())
    }

    /// Tier 1: sends a payment reminder email.
    ///
    /// No-op once the reminder has been sent.
    pub fn send_reminder_email(
        &mut self,
        recipient_email: impl Into<String>,
        sent_at: DateTime<Utc>,
    ) -> Result<(), CollectionsError> {
        if self.state_or_err()?.tier1_sent_at.is_some() {
            return Ok(());
        }

        self.record(CollectionsEvent::reminder_email_sent(recipient_email, sent_at));
        Ok(())
    }

    /// Tier 2: generates a formal notice.
    ///
    /// No-op once the notice has been generated. Does not require tier 1.
    pub fn generate_formal_notice(&mut self, sent_at: DateTime<Utc>) -> Result<(), CollectionsError> {
        if self.state_or_err()?.tier2_sent_at.is_some() {
            return Ok(());
        }

        self.record(CollectionsEvent::formal_notice_generated(sent_at));
        Ok(())
    }

    /// Tier 3: generates owner and guarantor notifications.
    ///
    /// No-op once generated. Does not require tiers 1 or 2.
    pub fn generate_stakeholder_notifications(
        &mut self,
        sent_at: DateTime<Utc>,
    ) -> Result<(), CollectionsError> {
        if self.state_or_err()?.tier3_sent_at.is_some() {
            return Ok(());
        }

        self.record(CollectionsEvent::stakeholder_notifications_generated(sent_at));
        Ok(())
    }

    /// Hands the formal notice to a registered-mail provider.
    ///
    /// Requires the formal notice tier; no-op if a tracking id is already
    /// recorded, so retries of the same dispatch are safe. Delivery status
    /// starts at "waiting".
    pub fn dispatch_via_registered_mail(
        &mut self,
        tracking_id: impl Into<String>,
        provider: impl Into<String>,
        cost: Money,
    ) -> Result<(), CollectionsError> {
        let state = self.state_or_err()?;
        if state.tier2_sent_at.is_none() {
            return Err(CollectionsError::FormalNoticeRequired);
        }
        if state.registered_mail.is_some() {
            return Ok(());
        }

        self.record(CollectionsEvent::registered_mail_dispatched(
            tracking_id,
            provider,
            cost,
        ));
        Ok(())
    }

    /// Records a delivery status callback from the provider.
    ///
    /// No-op when no mail has been dispatched. Deliberately not guarded by
    /// value: identical repeated statuses still append, because the status
    /// trail is a log of provider callbacks, not a single settable field.
    pub fn update_registered_mail_status(
        &mut self,
        status: impl Into<String>,
        proof_url: Option<String>,
    ) -> Result<(), CollectionsError> {
        let dispatched = self
            .state
            .as_ref()
            .is_some_and(|s| s.registered_mail.is_some());
        if !dispatched {
            return Ok(());
        }

        self.record(CollectionsEvent::registered_mail_status_updated(
            status, proof_url,
        ));
        Ok(())
    }
}

impl Aggregate for CollectionsEscalation {
    type Event = CollectionsEvent;
    type Error = CollectionsError;

    fn aggregate_type() -> &'static str {
        "CollectionsEscalation"
    }

    fn id(&self) -> Option<AggregateId> {
        self.state.as_ref().map(|s| s.obligation_id)
    }

    fn version(&self) -> Version {
        self.version
    }

    fn set_version(&mut self, version: Version) {
        self.version = version;
    }

    fn apply(&mut self, event: Self::Event) {
        match event {
            CollectionsEvent::EscalationInitiated(data) => {
                self.state = Some(EscalationState {
                    obligation_id: data.obligation_id,
                    entity_id: data.entity_id,
                    tenant_id: data.tenant_id,
                    initiated_at: data.initiated_at,
                    tier1_sent_at: None,
                    tier1_recipient_email: None,
                    tier2_sent_at: None,
                    tier3_sent_at: None,
                    registered_mail: None,
                });
            }
            CollectionsEvent::ReminderEmailSent(data) => {
                if let Some(state) = self.state.as_mut() {
                    state.tier1_sent_at = Some(data.sent_at);
                    state.tier1_recipient_email = Some(data.recipient_email);
                }
            }
            CollectionsEvent::FormalNoticeGenerated(data) => {
                if let Some(state) = self.state.as_mut() {
                    state.tier2_sent_at = Some(data.sent_at);
                }
            }
            CollectionsEvent::StakeholderNotificationsGenerated(data) => {
                if let Some(state) = self.state.as_mut() {
                    state.tier3_sent_at = Some(data.sent_at);
                }
            }
            CollectionsEvent::RegisteredMailDispatched(data) => {
                if let Some(state) = self.state.as_mut() {
                    state.registered_mail = Some(RegisteredMail {
                        tracking_id: data.tracking_id,
                        provider: data.provider,
                        cost: data.cost,
                        dispatched_at: data.dispatched_at,
                        status: "waiting".to_string(),
                        proof_url: None,
                    });
                }
            }
            CollectionsEvent::RegisteredMailStatusUpdated(data) => {
                if let Some(mail) = self
                    .state
                    .as_mut()
                    .and_then(|s| s.registered_mail.as_mut())
                {
                    mail.status = data.status;
                    mail.proof_url = data.proof_url;
                }
            }
        }
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted
    }

    fn uncommitted_events_mut(&mut self) -> &mut Vec<Self::Event> {
        &mut self.uncommitted
    }
}
