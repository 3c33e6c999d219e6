//! Collections service providing a simplified API for escalation operations.

use common::AggregateId;
use event_store::EventStore;

use crate::command::{CommandHandler, CommandResult};
use crate::error::DomainError;

use super::{
    CollectionsEscalation, DispatchViaRegisteredMail, GenerateFormalNotice,
    GenerateStakeholderNotifications, InitiateEscalation, SendReminderEmail,
    UpdateRegisteredMailStatus,
};

impl From<super::CollectionsError> for DomainError {
    fn from(e: super::CollectionsError) -> Self {
        DomainError::Collections(e)
    }
}

/// Service for managing collections escalations.
///
/// Tier and dispatch operations are upsert-style: each initiates the
/// escalation first when the stream is new, so one command can open the
/// file and perform the action in a single atomic append.
pub struct CollectionsService<S: EventStore> {
    handler: CommandHandler<S, CollectionsEscalation>,
}

impl<S: EventStore> CollectionsService<S> {
    /// Creates a new collections service with the given event store.
    pub fn new(store: S) -> Self {
        Self {
            handler: CommandHandler::new(store),
        }
    }

    /// Returns a reference to the underlying command handler.
    pub fn handler(&self) -> &CommandHandler<S, CollectionsEscalation> {
        &self.handler
    }

    /// Opens an escalation file for an unpaid obligation.
    #[tracing::instrument(skip(self))]
    pub async fn initiate(
        &self,
        cmd: InitiateEscalation,
    ) -> Result<CommandResult<CollectionsEscalation>, DomainError> {
        let InitiateEscalation {
            obligation_id,
            entity_id,
            tenant_id,
        } = cmd;

        self.handler
            .execute(obligation_id, |escalation| {
                escalation.initiate(obligation_id, entity_id, tenant_id)
            })
            .await
    }

    /// Sends the tier 1 reminder email.
    #[tracing::instrument(skip(self))]
    pub async fn send_reminder_email(
        &self,
        cmd: SendReminderEmail,
    ) -> Result<CommandResult<CollectionsEscalation>, DomainError> {
        let SendReminderEmail {
            context,
            recipient_email,
            sent_at,
        } = cmd;

        self.handler
            .execute(context.obligation_id, |escalation| {
                escalation.initiate(context.obligation_id, context.entity_id, context.tenant_id)?;
                escalation.send_reminder_email(recipient_email, sent_at)
            })
            .await
    }

    /// Generates the tier 2 formal notice.
    #[tracing::instrument(skip(self))]
    pub async fn generate_formal_notice(
        &self,
        cmd: GenerateFormalNotice,
    ) -> Result<CommandResult<CollectionsEscalation>, DomainError> {
        let GenerateFormalNotice { context, sent_at } = cmd;

        self.handler
            .execute(context.obligation_id, |escalation| {
                escalation.initiate(context.obligation_id, context.entity_id, context.tenant_id)?;
                escalation.generate_formal_notice(sent_at)
            })
            .await
    }

    /// Generates the tier 3 stakeholder notifications.
    #[tracing::instrument(skip(self))]
    pub async fn generate_stakeholder_notifications(
        &self,
        cmd: GenerateStakeholderNotifications,
    ) -> Result<CommandResult<CollectionsEscalation>, DomainError> {
        let GenerateStakeholderNotifications { context, sent_at } = cmd;

        self.handler
            .execute(context.obligation_id, |escalation| {
                escalation.initiate(context.obligation_id, context.entity_id, context.tenant_id)?;
                escalation.generate_stakeholder_notifications(sent_at)
            })
            .await
    }

    /// Hands the formal notice to a registered-mail provider.
    #[tracing::instrument(skip(self))]
    pub async fn dispatch_via_registered_mail(
        &self,
        cmd: DispatchViaRegisteredMail,
    ) -> Result<CommandResult<CollectionsEscalation>, DomainError> {
        let DispatchViaRegisteredMail {
            context,
            tracking_id,
            provider,
            cost,
        } = cmd;

        self.handler
            .execute(context.obligation_id, |escalation| {
                escalation.initiate(context.obligation_id, context.entity_id, context.tenant_id)?;
                escalation.dispatch_via_registered_mail(tracking_id, provider, cost)
            })
            .await
    }

    /// Records a provider delivery-status callback.
    ///
    /// Not upsert-style: a callback for an escalation that was never
    /// opened has nothing to attach to and records nothing.
    #[tracing::instrument(skip(self))]
    pub async fn update_registered_mail_status(
        &self,
        cmd: UpdateRegisteredMailStatus,
    ) -> Result<CommandResult<CollectionsEscalation>, DomainError> {
        let UpdateRegisteredMailStatus {
            obligation_id,
            status,
            proof_url,
        } = cmd;

        self.handler
            .execute(obligation_id, |escalation| {
                escalation.update_registered_mail_status(status, proof_url)
            })
            .await
    }

    /// Loads an escalation by the obligation id it escalates.
    ///
    /// Returns None if no escalation has been initiated.
    #[tracing::instrument(skip(self))]
    pub async fn get_escalation(
        &self,
        obligation_id: AggregateId,
    ) -> Result<Option<CollectionsEscalation>, DomainError> {
        self.handler.load_existing(obligation_id).await
    }
}
