//! Value objects for the billing domain.

use chrono::{DateTime, Utc};
use common::{AggregateId, EntityId, TenantId, UnitId};
use serde::{Deserialize, Serialize};

use crate::money::{ChargeLine, Money};

fn default_payment_method() -> String {
    "bank_transfer".to_string()
}

/// A single entry in an obligation's payment ledger.
///
/// Appended only, never mutated or removed; every derived balance is
/// recomputed from the full ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Bank transaction identifier, assigned upstream.
    pub transaction_id: String,

    /// Bank statement the payment was matched from, when ingestion knows it.
    #[serde(default)]
    pub bank_statement_id: Option<String>,

    /// Amount paid.
    pub amount: Money,

    /// Name of the payer as it appears on the statement.
    pub payer_name: String,

    /// Value date of the payment.
    pub payment_date: DateTime<Utc>,

    /// How the payment was made. Older payloads omitted this field.
    #[serde(default = "default_payment_method")]
    pub payment_method: String,

    /// Free-form reference entered by the payer.
    #[serde(default)]
    pub payment_reference: Option<String>,

    /// When the payment was recorded in the back office.
    pub recorded_at: DateTime<Utc>,

    /// Back-office user who recorded the payment.
    pub recorded_by_user_id: String,
}

impl PaymentRecord {
    /// Creates a new payment record with the default payment method.
    pub fn new(
        transaction_id: impl Into<String>,
        amount: Money,
        payer_name: impl Into<String>,
        payment_date: DateTime<Utc>,
        recorded_at: DateTime<Utc>,
        recorded_by_user_id: impl Into<String>,
    ) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            bank_statement_id: None,
            amount,
            payer_name: payer_name.into(),
            payment_date,
            payment_method: default_payment_method(),
            payment_reference: None,
            recorded_at,
            recorded_by_user_id: recorded_by_user_id.into(),
        }
    }

    /// Attaches the originating bank statement.
    pub fn with_bank_statement(mut self, bank_statement_id: impl Into<String>) -> Self {
        self.bank_statement_id = Some(bank_statement_id.into());
        self
    }

    /// Overrides the payment method (e.g. "cheque", "cash").
    pub fn with_payment_method(mut self, payment_method: impl Into<String>) -> Self {
        self.payment_method = payment_method.into();
        self
    }

    /// Attaches the payer's reference.
    pub fn with_payment_reference(mut self, payment_reference: impl Into<String>) -> Self {
        self.payment_reference = Some(payment_reference.into());
        self
    }
}

/// Pro-rata occupancy for a partial billing period.
///
/// Presence of this value is the pro-rata flag on the obligation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProRata {
    /// Days the unit was occupied within the period.
    pub occupied_days: u32,

    /// Total days in the billing period.
    pub total_days_in_period: u32,
}

impl ProRata {
    /// Creates a new pro-rata descriptor.
    pub fn new(occupied_days: u32, total_days_in_period: u32) -> Self {
        Self {
            occupied_days,
            total_days_in_period,
        }
    }
}

/// The computed input for generating one billing obligation.
///
/// Produced upstream by the rent computation for a period; the aggregate
/// turns it into the generating event verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObligationDraft {
    /// Identity of the obligation to create.
    pub obligation_id: AggregateId,

    /// Legal entity issuing the rent call.
    pub entity_id: EntityId,

    /// Lease this obligation bills.
    pub lease_id: AggregateId,

    /// Tenant being billed.
    pub tenant_id: TenantId,

    /// Unit being billed.
    pub unit_id: UnitId,

    /// Billing period label (e.g. "2025-07").
    pub period: String,

    /// Base rent for the period.
    pub base_amount: Money,

    /// Extra charge lines on top of the base rent.
    pub extra_lines: Vec<ChargeLine>,

    /// Total billed amount (base plus lines, pro-rated upstream).
    pub total_amount: Money,

    /// Pro-rata occupancy, when the period is partial.
    pub pro_rata: Option<ProRata>,
}

impl ObligationDraft {
    /// Creates a draft with no extra lines and full-period occupancy.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        obligation_id: AggregateId,
        entity_id: EntityId,
        lease_id: AggregateId,
        tenant_id: TenantId,
        unit_id: UnitId,
        period: impl Into<String>,
        base_amount: Money,
        total_amount: Money,
    ) -> Self {
        Self {
            obligation_id,
            entity_id,
            lease_id,
            tenant_id,
            unit_id,
            period: period.into(),
            base_amount,
            extra_lines: Vec::new(),
            total_amount,
            pro_rata: None,
        }
    }

    /// Adds extra charge lines.
    pub fn with_extra_lines(mut self, lines: Vec<ChargeLine>) -> Self {
        self.extra_lines = lines;
        self
    }

    /// Marks the draft as pro-rated.
    pub fn with_pro_rata(mut self, pro_rata: ProRata) -> Self {
        self.pro_rata = Some(pro_rata);
        self
    }
}
