//! Billing service providing a simplified API for obligation operations.

use chrono::{DateTime, Utc};
use common::AggregateId;
use event_store::EventStore;
use futures_util::future::join_all;

use crate::command::{CommandHandler, CommandResult};
use crate::error::DomainError;
use crate::money::Money;

use super::{
    BillingObligation, GenerateObligation, MarkObligationSent, ObligationDraft, PaymentRecord,
    RecordPayment,
};

impl From<super::BillingError> for DomainError {
    fn from(e: super::BillingError) -> Self {
        DomainError::Billing(e)
    }
}

/// Outcome of a monthly batch generation run.
///
/// The run itself always completes; individual obligations that could not
/// be generated are reported here instead of aborting the batch.
#[derive(Debug, Default)]
pub struct BatchGenerationResult {
    /// Number of obligations actually generated (and persisted) by this run.
    pub generated_count: usize,

    /// Sum of the total amounts of the generated obligations.
    pub total_amount: Money,

    /// One message per failed obligation, "{obligation_id}: {error}".
    pub failure_messages: Vec<String>,
}

/// Service for managing billing obligations.
///
/// Provides a high-level API for rent call operations, wrapping the command
/// handler and providing convenient methods for common operations.
pub struct BillingService<S: EventStore> {
    handler: CommandHandler<S, BillingObligation>,
}

impl<S: EventStore> BillingService<S> {
    /// Creates a new billing service with the given event store.
    pub fn new(store: S) -> Self {
        Self {
            handler: CommandHandler::new(store),
        }
    }

    /// Returns a reference to the underlying command handler.
    pub fn handler(&self) -> &CommandHandler<S, BillingObligation> {
        &self.handler
    }

    /// Generates a billing obligation from a computed draft.
    #[tracing::instrument(skip(self, cmd), fields(obligation_id = %cmd.draft.obligation_id))]
    pub async fn generate(
        &self,
        cmd: GenerateObligation,
    ) -> Result<CommandResult<BillingObligation>, DomainError> {
        let obligation_id = cmd.draft.obligation_id;
        let draft = cmd.draft;

        self.handler
            .execute(obligation_id, |obligation| obligation.generate(draft))
            .await
    }

    /// Marks a rent call as sent to the tenant.
    #[tracing::instrument(skip(self))]
    pub async fn mark_as_sent(
        &self,
        cmd: MarkObligationSent,
    ) -> Result<CommandResult<BillingObligation>, DomainError> {
        let sent_at = cmd.sent_at;
        let recipient_email = cmd.recipient_email.clone();

        self.handler
            .execute(cmd.obligation_id, |obligation| {
                obligation.mark_as_sent(sent_at, recipient_email)
            })
            .await
    }

    /// Records a matched payment against an obligation.
    #[tracing::instrument(skip(self, cmd), fields(obligation_id = %cmd.obligation_id))]
    pub async fn record_payment(
        &self,
        cmd: RecordPayment,
    ) -> Result<CommandResult<BillingObligation>, DomainError> {
        let payment = cmd.payment.clone();

        self.handler
            .execute(cmd.obligation_id, |obligation| {
                obligation.record_payment(payment)
            })
            .await
    }

    /// Loads an obligation by ID.
    ///
    /// Returns None if the obligation doesn't exist.
    #[tracing::instrument(skip(self))]
    pub async fn get_obligation(
        &self,
        obligation_id: AggregateId,
    ) -> Result<Option<BillingObligation>, DomainError> {
        self.handler.load_existing(obligation_id).await
    }

    /// Generates a batch of obligations, one per draft, concurrently.
    ///
    /// Waits for every item to finish. A failed item contributes a message
    /// to the result; it never aborts the rest of the batch. Drafts whose
    /// obligation already exists count as neither generated nor failed.
    #[tracing::instrument(skip(self, drafts), fields(batch_size = drafts.len()))]
    pub async fn generate_batch(&self, drafts: Vec<ObligationDraft>) -> BatchGenerationResult {
        if drafts.is_empty() {
            return BatchGenerationResult::default();
        }

        let generations = drafts.into_iter().map(|draft| {
            let obligation_id = draft.obligation_id;
            let total_amount = draft.total_amount;
            async move {
                let outcome = self.generate(GenerateObligation::new(draft)).await;
                (obligation_id, total_amount, outcome)
            }
        });

        let mut result = BatchGenerationResult::default();
        for (obligation_id, total_amount, outcome) in join_all(generations).await {
            match outcome {
                Ok(command_result) if command_result.events.is_empty() => {
                    // Already generated, not this run's work.
                }
                Ok(_) => {
                    result.generated_count += 1;
                    result.total_amount += total_amount;
                }
                Err(e) => {
                    tracing::warn!(%obligation_id, error = %e, "obligation generation failed");
                    result.failure_messages.push(format!("{obligation_id}: {e}"));
                }
            }
        }

        metrics::counter!("billing_obligations_generated_total")
            .increment(result.generated_count as u64);
        metrics::counter!("billing_batch_failures_total")
            .increment(result.failure_messages.len() as u64);

        result
    }

    /// Records a payment using individual fields, with the default method.
    pub async fn record_bank_transfer(
        &self,
        obligation_id: AggregateId,
        transaction_id: impl Into<String>,
        amount: Money,
        payer_name: impl Into<String>,
        payment_date: DateTime<Utc>,
        recorded_by_user_id: impl Into<String>,
    ) -> Result<CommandResult<BillingObligation>, DomainError> {
        let payment = PaymentRecord::new(
            transaction_id,
            amount,
            payer_name,
            payment_date,
            Utc::now(),
            recorded_by_user_id,
        );
        self.record_payment(RecordPayment::new(obligation_id, payment))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Aggregate;
    use common::{EntityId, TenantId, UnitId};
    use event_store::InMemoryEventStore;

    fn draft(obligation_id: AggregateId, total_cents: i64) -> ObligationDraft {
        ObligationDraft::new(
            obligation_id,
            EntityId::new("entity-1"),
            AggregateId::new(),
            TenantId::new("tenant-1"),
            UnitId::new("unit-1"),
            "2025-07",
            Money::from_cents(total_cents),
            Money::from_cents(total_cents),
        )
    }

    #[tokio::test]
    async fn test_generate_and_load() {
        let store = InMemoryEventStore::new();
        let service = BillingService::new(store);
        let obligation_id = AggregateId::new();

        let result = service
            .generate(GenerateObligation::new(draft(obligation_id, 85000)))
            .await
            .unwrap();
        assert_eq!(result.events.len(), 1);

        let loaded = service.get_obligation(obligation_id).await.unwrap().unwrap();
        assert_eq!(loaded.id(), Some(obligation_id));
        assert_eq!(loaded.total_amount().cents(), 85000);
    }

    #[tokio::test]
    async fn test_payment_lifecycle() {
        let store = InMemoryEventStore::new();
        let service = BillingService::new(store);
        let obligation_id = AggregateId::new();

        service
            .generate(GenerateObligation::new(draft(obligation_id, 85000)))
            .await
            .unwrap();
        service
            .mark_as_sent(MarkObligationSent::new(
                obligation_id,
                Utc::now(),
                "tenant@example.com",
            ))
            .await
            .unwrap();

        let result = service
            .record_bank_transfer(
                obligation_id,
                "tx-1",
                Money::from_cents(50000),
                "A. Tenant",
                Utc::now(),
                "user-1",
            )
            .await
            .unwrap();
        assert!(result.aggregate.is_partially_paid());

        let result = service
            .record_bank_transfer(
                obligation_id,
                "tx-2",
                Money::from_cents(35000),
                "A. Tenant",
                Utc::now(),
                "user-1",
            )
            .await
            .unwrap();
        assert!(result.aggregate.is_fully_paid());
        assert_eq!(result.aggregate.remaining_balance().cents(), 0);
    }

    #[tokio::test]
    async fn test_generate_batch_counts_and_sums() {
        let store = InMemoryEventStore::new();
        let service = BillingService::new(store);

        let drafts = vec![
            draft(AggregateId::new(), 65000),
            draft(AggregateId::new(), 85000),
            draft(AggregateId::new(), 50000),
        ];

        let result = service.generate_batch(drafts).await;

        assert_eq!(result.generated_count, 3);
        assert_eq!(result.total_amount.cents(), 200000);
        assert!(result.failure_messages.is_empty());
    }

    #[tokio::test]
    async fn test_generate_batch_skips_existing_obligations() {
        let store = InMemoryEventStore::new();
        let service = BillingService::new(store);
        let existing_id = AggregateId::new();

        service
            .generate(GenerateObligation::new(draft(existing_id, 65000)))
            .await
            .unwrap();

        let result = service
            .generate_batch(vec![draft(existing_id, 65000), draft(AggregateId::new(), 85000)])
            .await;

        assert_eq!(result.generated_count, 1);
        assert_eq!(result.total_amount.cents(), 85000);
        assert!(result.failure_messages.is_empty());
    }

    #[tokio::test]
    async fn test_generate_batch_empty_input() {
        let store = InMemoryEventStore::new();
        let service = BillingService::new(store.clone());

        let result = service.generate_batch(Vec::new()).await;

        assert_eq!(result.generated_count, 0);
        assert_eq!(result.total_amount.cents(), 0);
        assert!(result.failure_messages.is_empty());
        assert_eq!(store.event_count().await, 0);
    }
}
