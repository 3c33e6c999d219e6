//! Value objects for the lease domain.

use chrono::NaiveDate;
use common::{AggregateId, EntityId, TenantId, UnitId};
use serde::{Deserialize, Serialize};

use crate::money::{ChargeLine, Money};

use super::LeaseError;

/// Periodic rent-revision anchor configured on a lease.
///
/// The day and month are a calendar-recurring anchor, not a concrete
/// date, so February is always 28 days regardless of leap years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevisionSchedule {
    /// Day of month the revision takes effect.
    pub day: u32,

    /// Month the revision takes effect (1-12).
    pub month: u32,

    /// Reference index quarter tag (e.g. "Q2").
    pub reference_quarter: String,

    /// Reference index year.
    pub reference_year: i32,

    /// Index value at the start of the lease, once known.
    #[serde(default)]
    pub base_index_value: Option<f64>,
}

impl RevisionSchedule {
    /// Creates a new revision schedule.
    pub fn new(
        day: u32,
        month: u32,
        reference_quarter: impl Into<String>,
        reference_year: i32,
    ) -> Self {
        Self {
            day,
            month,
            reference_quarter: reference_quarter.into(),
            reference_year,
            base_index_value: None,
        }
    }

    /// Sets the base index value.
    pub fn with_base_index_value(mut self, base_index_value: f64) -> Self {
        self.base_index_value = Some(base_index_value);
        self
    }

    /// Checks the anchor against the fixed non-leap calendar.
    pub fn validate(&self) -> Result<(), LeaseError> {
        let max_day = match self.month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 => 28,
            month => return Err(LeaseError::InvalidRevisionMonth { month }),
        };

        if self.day == 0 || self.day > max_day {
            return Err(LeaseError::InvalidRevisionDay {
                day: self.day,
                month: self.month,
            });
        }

        Ok(())
    }
}

/// The input for creating one lease.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaseDraft {
    /// Identity of the lease to create.
    pub lease_id: AggregateId,

    /// Legal entity the lease belongs to.
    pub entity_id: EntityId,

    /// Tenant on the lease.
    pub tenant_id: TenantId,

    /// Unit being let.
    pub unit_id: UnitId,

    /// Day the lease starts.
    pub start_date: NaiveDate,

    /// Initial monthly rent.
    pub rent: Money,

    /// Security deposit held.
    pub security_deposit: Money,

    /// Day of month rent falls due (1-31).
    pub monthly_due_day: u32,

    /// Which published index rent revisions follow (e.g. "IRL").
    pub revision_index_kind: String,

    /// Recurring extra charges billed alongside the rent.
    pub extra_lines: Vec<ChargeLine>,
}

impl LeaseDraft {
    /// Creates a draft with no extra charge lines.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        lease_id: AggregateId,
        entity_id: EntityId,
        tenant_id: TenantId,
        unit_id: UnitId,
        start_date: NaiveDate,
        rent: Money,
        security_deposit: Money,
        monthly_due_day: u32,
        revision_index_kind: impl Into<String>,
    ) -> Self {
        Self {
            lease_id,
            entity_id,
            tenant_id,
            unit_id,
            start_date,
            rent,
            security_deposit,
            monthly_due_day,
            revision_index_kind: revision_index_kind.into(),
            extra_lines: Vec::new(),
        }
    }

    /// Adds recurring extra charge lines.
    pub fn with_extra_lines(mut self, lines: Vec<ChargeLine>) -> Self {
        self.extra_lines = lines;
        self
    }
}
