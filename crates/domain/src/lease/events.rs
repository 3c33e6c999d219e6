//! Lease domain events.

use chrono::{DateTime, NaiveDate, Utc};
use common::{AggregateId, EntityId, TenantId, UnitId};
use serde::{Deserialize, Serialize};

use crate::aggregate::DomainEvent;
use crate::money::{ChargeLine, Money};

use super::{LeaseDraft, RevisionSchedule};

/// Events that can occur on a lease aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum LeaseEvent {
    /// The lease was signed and entered into the system.
    LeaseCreated(LeaseCreatedData),

    /// The periodic rent-revision anchor was configured or changed.
    RevisionScheduleConfigured(RevisionScheduleConfiguredData),

    /// A periodic rent revision was applied.
    RentRevised(RentRevisedData),

    /// The lease was terminated.
    LeaseTerminated(LeaseTerminatedData),
}

impl DomainEvent for LeaseEvent {
    fn event_type(&self) -> &'static str {
        match self {
            LeaseEvent::LeaseCreated(_) => "LeaseCreated",
            LeaseEvent::RevisionScheduleConfigured(_) => "RevisionScheduleConfigured",
            LeaseEvent::RentRevised(_) => "RentRevised",
            LeaseEvent::LeaseTerminated(_) => "LeaseTerminated",
        }
    }
}

/// Data for LeaseCreated event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaseCreatedData {
    /// The unique lease ID.
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

    /// Day of month rent falls due.
    pub monthly_due_day: u32,

    /// Which published index rent revisions follow.
    pub revision_index_kind: String,

    /// Recurring extra charges. Older payloads omitted this field.
    #[serde(default)]
    pub extra_lines: Vec<ChargeLine>,

    /// When the lease was entered.
    pub created_at: DateTime<Utc>,
}

/// Data for RevisionScheduleConfigured event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevisionScheduleConfiguredData {
    /// The configured anchor.
    pub schedule: RevisionSchedule,

    /// When the configuration was recorded.
    pub configured_at: DateTime<Utc>,
}

/// Data for RentRevised event.
///
/// Carries both sides of the revision so the chain of revisions is
/// auditable without replaying intermediate state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentRevisedData {
    /// Rent before this revision.
    pub previous_rent: Money,

    /// Rent after this revision.
    pub new_rent: Money,

    /// Index value the revision was computed from.
    pub base_index_value: f64,

    /// Reference index quarter of the revision.
    pub reference_quarter: String,

    /// Reference index year of the revision.
    pub reference_year: i32,

    /// External idempotency key of the revision.
    pub revision_id: String,

    /// When the revision was applied.
    pub revised_at: DateTime<Utc>,
}

/// Data for LeaseTerminated event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaseTerminatedData {
    /// Last day of the lease.
    pub end_date: NaiveDate,

    /// When the termination was recorded.
    pub terminated_at: DateTime<Utc>,
}

// Convenience constructors for events
impl LeaseEvent {
    /// Creates a LeaseCreated event from a draft.
    pub fn lease_created(draft: LeaseDraft) -> Self {
        LeaseEvent::LeaseCreated(LeaseCreatedData {
            lease_id: draft.lease_id,
            entity_id: draft.entity_id,
            tenant_id: draft.tenant_id,
            unit_id: draft.unit_id,
            start_date: draft.start_date,
            rent: draft.rent,
            security_deposit: draft.security_deposit,
            monthly_due_day: draft.monthly_due_day,
            revision_index_kind: draft.revision_index_kind,
            extra_lines: draft.extra_lines,
            created_at: Utc::now(),
        })
    }

    /// Creates a RevisionScheduleConfigured event.
    pub fn revision_schedule_configured(schedule: RevisionSchedule) -> Self {
        LeaseEvent::RevisionScheduleConfigured(RevisionScheduleConfiguredData {
            schedule,
            configured_at: Utc::now(),
        })
    }

    /// Creates a RentRevised event.
    pub fn rent_revised(
        previous_rent: Money,
        new_rent: Money,
        base_index_value: f64,
        reference_quarter: impl Into<String>,
        reference_year: i32,
        revision_id: impl Into<String>,
    ) -> Self {
        LeaseEvent::RentRevised(RentRevisedData {
            previous_rent,
            new_rent,
            base_index_value,
            reference_quarter: reference_quarter.into(),
            reference_year,
            revision_id: revision_id.into(),
            revised_at: Utc::now(),
        })
    }

    /// Creates a LeaseTerminated event.
    pub fn lease_terminated(end_date: NaiveDate) -> Self {
        LeaseEvent::LeaseTerminated(LeaseTerminatedData {
            end_date,
            terminated_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_types() {
        let event = LeaseEvent::rent_revised(
            Money::from_cents(65000),
            Money::from_cents(67000),
            145.0,
            "Q3",
            2026,
            "rev-2",
        );
        assert_eq!(event.event_type(), "RentRevised");

        let end_date = NaiveDate::from_ymd_opt(2026, 6, 30).unwrap();
        let event = LeaseEvent::lease_terminated(end_date);
        assert_eq!(event.event_type(), "LeaseTerminated");
    }

    #[test]
    fn rent_revised_roundtrip_keeps_both_amounts() {
        let event = LeaseEvent::rent_revised(
            Money::from_cents(65000),
            Money::from_cents(67000),
            145.0,
            "Q3",
            2026,
            "rev-2",
        );

        let json = serde_json::to_string(&event).unwrap();
        let back: LeaseEvent = serde_json::from_str(&json).unwrap();
        if let LeaseEvent::RentRevised(data) = back {
            assert_eq!(data.previous_rent.cents(), 65000);
            assert_eq!(data.new_rent.cents(), 67000);
            assert_eq!(data.revision_id, "rev-2");
        } else {
            panic!("Expected RentRevised event");
        }
    }
}
