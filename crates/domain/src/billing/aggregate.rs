//! Billing obligation aggregate.

use chrono::{DateTime, Utc};
use common::{AggregateId, EntityId, TenantId, UnitId};
use event_store::Version;

use crate::aggregate::Aggregate;
use crate::money::{ChargeLine, Money};

use super::{BillingError, BillingEvent, ObligationDraft, PaymentRecord, ProRata};

/// State of a generated billing obligation.
///
/// Only exists once the generating event has been applied; operations on an
/// obligation without state fail their precondition guard.
#[derive(Debug, Clone)]
pub struct ObligationState {
    pub obligation_id: AggregateId,
    pub entity_id: EntityId,
    pub lease_id: AggregateId,
    pub tenant_id: TenantId,
    pub unit_id: UnitId,
    pub period: String,
    pub base_amount: Money,
    pub extra_lines: Vec<ChargeLine>,
    pub total_amount: Money,
    pub pro_rata: Option<ProRata>,
    pub generated_at: DateTime<Utc>,
    pub sent_at: Option<DateTime<Utc>>,
    pub recipient_email: Option<String>,
    /// Append-only payment ledger, in recording order.
    pub payments: Vec<PaymentRecord>,
}

/// The billing obligation (rent call) aggregate.
///
/// One instance per lease per billing period. Payments are never netted or
/// edited in place; every balance is recomputed from the full ledger.
#[derive(Debug, Default)]
pub struct BillingObligation {
    state: Option<ObligationState>,
    version: Version,
    uncommitted: Vec<BillingEvent>,
}

impl BillingObligation {
    /// Returns the obligation state, if generated.
    pub fn state(&self) -> Option<&ObligationState> {
        self.state.as_ref()
    }

    fn state_mut(&mut self) -> Result<&mut ObligationState, BillingError> {
        self.state.as_mut().ok_or(BillingError::NotCreated)
    }

    /// Generates the obligation from a computed draft.
    ///
    /// Idempotent: generating an already-generated obligation records
    /// nothing and succeeds.
    pub fn generate(&mut self, draft: ObligationDraft) -> Result<(), BillingError> {
        if self.state.is_some() {
            return Ok(());
        }

        self.record(BillingEvent::obligation_generated(draft));
        Ok(())
    }

    /// Marks the rent call as sent to the tenant.
    ///
    /// Idempotent: a second send records nothing and keeps the first
    /// dispatch timestamp.
    pub fn mark_as_sent(
        &mut self,
        sent_at: DateTime<Utc>,
        recipient_email: impl Into<String>,
    ) -> Result<(), BillingError> {
        let state = self.state_mut()?;
        if state.sent_at.is_some() {
            return Ok(());
        }

        self.record(BillingEvent::obligation_sent(sent_at, recipient_email));
        Ok(())
    }

    /// Records a payment against the obligation.
    ///
    /// Once the obligation is fully paid, further payments are silently
    /// ignored; an overpayment can only arise from the single payment
    /// that crosses the total.
    pub fn record_payment(&mut self, payment: PaymentRecord) -> Result<(), BillingError> {
        if self.state.is_none() {
            return Err(BillingError::NotCreated);
        }
        if self.is_fully_paid() {
            return Ok(());
        }

        self.record(BillingEvent::payment_recorded(payment));
        Ok(())
    }

    /// Total billed amount, zero when not generated.
    pub fn total_amount(&self) -> Money {
        self.state
            .as_ref()
            .map(|s| s.total_amount)
            .unwrap_or_default()
    }

    /// Sum of the payment ledger.
    pub fn total_paid(&self) -> Money {
        self.state
            .as_ref()
            .map(|s| s.payments.iter().map(|p| p.amount).sum())
            .unwrap_or_default()
    }

    /// Amount still owed, floored at zero.
    pub fn remaining_balance(&self) -> Money {
        self.total_amount().saturating_sub(self.total_paid())
    }

    /// Amount paid beyond the total, floored at zero.
    pub fn overpayment(&self) -> Money {
        self.total_paid().saturating_sub(self.total_amount())
    }

    /// True once the ledger covers the total billed amount.
    pub fn is_fully_paid(&self) -> bool {
        self.state.is_some() && self.total_paid() >= self.total_amount()
    }

    /// True when something has been paid but the total is not yet covered.
    pub fn is_partially_paid(&self) -> bool {
        self.total_paid().is_positive() && !self.is_fully_paid()
    }
}

impl Aggregate for BillingObligation {
    type Event = BillingEvent;
    type Error = BillingError;

    fn aggregate_type() -> &'static str {
        "BillingObligation"
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
            BillingEvent::ObligationGenerated(data) => {
                self.state = Some(ObligationState {
                    obligation_id: data.obligation_id,
                    entity_id: data.entity_id,
                    lease_id: data.lease_id,
                    tenant_id: data.tenant_id,
                    unit_id: data.unit_id,
                    period: data.period,
                    base_amount: data.base_amount,
                    extra_lines: data.extra_lines,
                    total_amount: data.total_amount,
                    pro_rata: data.pro_rata,
                    generated_at: data.generated_at,
                    sent_at: None,
                    recipient_email: None,
                    payments: Vec::new(),
                });
            }
            BillingEvent::ObligationSent(data) => {
                if let Some(state) = self.state.as_mut() {
                    state.sent_at = Some(data.sent_at);
                    state.recipient_email = Some(data.recipient_email);
                }
            }
            BillingEvent::PaymentRecorded(payment) => {
                if let Some(state) = self.state.as_mut() {
                    state.payments.push(payment);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::DomainEvent;

    fn draft(obligation_id: AggregateId, total_cents: i64) -> ObligationDraft {
        ObligationDraft::new(
            obligation_id,
            EntityId::new("entity-1"),
            AggregateId::new(),
            TenantId::new("tenant-1"),
            UnitId::new("unit-1"),
            "2025-07",
            Money::from_cents(65000),
            Money::from_cents(total_cents),
        )
    }

    fn payment(transaction_id: &str, cents: i64) -> PaymentRecord {
        PaymentRecord::new(
            transaction_id,
            Money::from_cents(cents),
            "A. Tenant",
            Utc::now(),
            Utc::now(),
            "user-1",
        )
    }

    fn generated(total_cents: i64) -> BillingObligation {
        let mut obligation = BillingObligation::default();
        obligation
            .generate(draft(AggregateId::new(), total_cents))
            .unwrap();
        obligation.commit();
        obligation
    }

    #[test]
    fn generate_records_generating_event() {
        let obligation_id = AggregateId::new();
        let mut obligation = BillingObligation::default();
        obligation.generate(draft(obligation_id, 85000)).unwrap();

        assert_eq!(obligation.uncommitted_events().len(), 1);
        assert_eq!(
            obligation.uncommitted_events()[0].event_type(),
            "ObligationGenerated"
        );
        assert_eq!(obligation.id(), Some(obligation_id));
        assert_eq!(obligation.total_amount().cents(), 85000);
        assert_eq!(obligation.remaining_balance().cents(), 85000);
        assert!(!obligation.is_fully_paid());
    }

    #[test]
    fn generate_twice_is_noop() {
        let mut obligation = generated(85000);
        let first_id = obligation.id();

        obligation.generate(draft(AggregateId::new(), 99999)).unwrap();

        assert!(obligation.uncommitted_events().is_empty());
        assert_eq!(obligation.id(), first_id);
        assert_eq!(obligation.total_amount().cents(), 85000);
    }

    #[test]
    fn mark_as_sent_requires_generation() {
        let mut obligation = BillingObligation::default();
        let result = obligation.mark_as_sent(Utc::now(), "tenant@example.com");
        assert!(matches!(result, Err(BillingError::NotCreated)));
    }

    #[test]
    fn mark_as_sent_is_idempotent() {
        let mut obligation = generated(85000);
        let first_sent = Utc::now();
        obligation
            .mark_as_sent(first_sent, "tenant@example.com")
            .unwrap();
        obligation.commit();

        obligation
            .mark_as_sent(Utc::now(), "other@example.com")
            .unwrap();

        assert!(obligation.uncommitted_events().is_empty());
        let state = obligation.state().unwrap();
        assert_eq!(state.sent_at, Some(first_sent));
        assert_eq!(state.recipient_email.as_deref(), Some("tenant@example.com"));
    }

    #[test]
    fn record_payment_requires_generation() {
        let mut obligation = BillingObligation::default();
        let result = obligation.record_payment(payment("tx-1", 1000));
        assert!(matches!(result, Err(BillingError::NotCreated)));
    }

    #[test]
    fn partial_payments_accumulate_in_the_ledger() {
        let mut obligation = generated(85000);

        obligation.record_payment(payment("tx-1", 50000)).unwrap();
        assert_eq!(obligation.total_paid().cents(), 50000);
        assert_eq!(obligation.remaining_balance().cents(), 35000);
        assert!(obligation.is_partially_paid());
        assert!(!obligation.is_fully_paid());

        obligation.record_payment(payment("tx-2", 35000)).unwrap();
        assert_eq!(obligation.total_paid().cents(), 85000);
        assert_eq!(obligation.remaining_balance().cents(), 0);
        assert!(obligation.is_fully_paid());
        assert!(!obligation.is_partially_paid());

        assert_eq!(obligation.uncommitted_events().len(), 2);
        assert_eq!(obligation.state().unwrap().payments.len(), 2);
    }

    #[test]
    fn overpayment_is_tracked_not_rejected() {
        let mut obligation = generated(85000);

        obligation.record_payment(payment("tx-1", 90000)).unwrap();

        assert!(obligation.is_fully_paid());
        assert_eq!(obligation.remaining_balance().cents(), 0);
        assert_eq!(obligation.overpayment().cents(), 5000);
    }

    #[test]
    fn payments_after_settlement_are_ignored() {
        let mut obligation = generated(85000);
        obligation.record_payment(payment("tx-1", 85000)).unwrap();
        obligation.commit();

        obligation.record_payment(payment("tx-2", 1000)).unwrap();

        assert!(obligation.uncommitted_events().is_empty());
        assert_eq!(obligation.state().unwrap().payments.len(), 1);
        assert_eq!(obligation.total_paid().cents(), 85000);
    }

    #[test]
    fn replay_rebuilds_ledger_state() {
        let mut source = generated(85000);
        source.record_payment(payment("tx-1", 50000)).unwrap();
        source
            .mark_as_sent(Utc::now(), "tenant@example.com")
            .unwrap();

        let mut history: Vec<BillingEvent> = Vec::new();
        history.push(BillingEvent::obligation_generated(draft(
            source.id().unwrap(),
            85000,
        )));
        history.extend(source.uncommitted_events().to_vec());

        let mut replayed = BillingObligation::default();
        replayed.replay(history);

        assert_eq!(replayed.id(), source.id());
        assert_eq!(replayed.total_paid().cents(), 50000);
        assert_eq!(replayed.remaining_balance().cents(), 35000);
        assert!(replayed.state().unwrap().sent_at.is_some());
        assert!(replayed.uncommitted_events().is_empty());
    }
}
