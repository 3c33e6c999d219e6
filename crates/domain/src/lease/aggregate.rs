//! Lease aggregate.

use chrono::NaiveDate;
use common::{AggregateId, EntityId, TenantId, UnitId};
use event_store::Version;

use crate::aggregate::Aggregate;
use crate::money::{ChargeLine, Money};

use super::{LeaseDraft, LeaseError, LeaseEvent, RevisionSchedule};

/// State of a created lease.
#[derive(Debug, Clone)]
pub struct LeaseState {
    pub lease_id: AggregateId,
    pub entity_id: EntityId,
    pub tenant_id: TenantId,
    pub unit_id: UnitId,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub current_rent: Money,
    pub security_deposit: Money,
    pub monthly_due_day: u32,
    pub revision_index_kind: String,
    pub revision_schedule: Option<RevisionSchedule>,
    /// External key of the most recently applied rent revision.
    pub last_applied_revision_id: Option<String>,
    pub extra_lines: Vec<ChargeLine>,
}

/// The lease aggregate.
///
/// Rent revisions arrive from an upstream index computation and may be
/// delivered more than once; the external revision id makes reapplication
/// a no-op rather than a double rent increase.
#[derive(Debug, Default)]
pub struct Lease {
    state: Option<LeaseState>,
    version: Version,
    uncommitted: Vec<LeaseEvent>,
}

impl Lease {
    /// Returns the lease state, if created.
    pub fn state(&self) -> Option<&LeaseState> {
        self.state.as_ref()
    }

    fn state_or_err(&self) -> Result<&LeaseState, LeaseError> {
        self.state.as_ref().ok_or(LeaseError::NotCreated)
    }

    /// Current monthly rent, zero when not created.
    pub fn current_rent(&self) -> Money {
        self.state
            .as_ref()
            .map(|s| s.current_rent)
            .unwrap_or_default()
    }

    /// True once an end date has been recorded.
    pub fn is_terminated(&self) -> bool {
        self.state.as_ref().is_some_and(|s| s.end_date.is_some())
    }

    /// Enters a signed lease into the system.
    ///
    /// Idempotent: creating an already-created lease records nothing.
    pub fn create(&mut self, draft: LeaseDraft) -> Result<(), LeaseError> {
        if self.state.is_some() {
            return Ok(());
        }

        self.record(LeaseEvent::lease_created(draft));
        Ok(())
    }

    /// Configures the periodic rent-revision anchor.
    ///
    /// The anchor is validated against a fixed non-leap calendar; no-op
    /// when the new schedule is identical to the current one.
    pub fn configure_revision_schedule(
        &mut self,
        schedule: RevisionSchedule,
    ) -> Result<(), LeaseError> {
        let state = self.state_or_err()?;
        schedule.validate()?;
        if state.revision_schedule.as_ref() == Some(&schedule) {
            return Ok(());
        }

        self.record(LeaseEvent::revision_schedule_configured(schedule));
        Ok(())
    }

    /// Applies a periodic rent revision.
    ///
    /// No-op when the revision id has already been applied, so duplicate
    /// delivery of the same revision never raises the rent twice. The
    /// recorded event carries the rent read from current state, so a chain
    /// of revisions always references the immediately preceding value.
    pub fn revise_rent(
        &mut self,
        new_rent: Money,
        new_base_index_value: f64,
        new_quarter: impl Into<String>,
        new_year: i32,
        revision_id: impl Into<String>,
    ) -> Result<(), LeaseError> {
        let state = self.state_or_err()?;
        if state.end_date.is_some() {
            return Err(LeaseError::Terminated);
        }

        let revision_id = revision_id.into();
        if state.last_applied_revision_id.as_deref() == Some(revision_id.as_str()) {
            return Ok(());
        }

        let previous_rent = state.current_rent;
        self.record(LeaseEvent::rent_revised(
            previous_rent,
            new_rent,
            new_base_index_value,
            new_quarter,
            new_year,
            revision_id,
        ));
        Ok(())
    }

    /// Terminates the lease on the given end date.
    ///
    /// Terminating on the start date is valid; earlier is not.
    pub fn terminate(&mut self, end_date: NaiveDate) -> Result<(), LeaseError> {
        let state = self.state_or_err()?;
        if state.end_date.is_some() {
            return Err(LeaseError::AlreadyTerminated);
        }
        if end_date < state.start_date {
            return Err(LeaseError::EndDateBeforeStart {
                end_date,
                start_date: state.start_date,
            });
        }

        self.record(LeaseEvent::lease_terminated(end_date));
        Ok(())
    }
}

impl Aggregate for Lease {
    type Event = LeaseEvent;
    type Error = LeaseError;

    fn aggregate_type() -> &'static str {
        "Lease"
    }

    fn id(&self) -> Option<AggregateId> {
        self.state.as_ref().map(|s| s.lease_id)
    }

    fn version(&self) -> Version {
        self.version
    }

    fn set_version(&mut self, version: Version) {
        self.version = version;
    }

    fn apply(&mut self, event: Self::Event) {
        match event {
            LeaseEvent::LeaseCreated(data) => {
                self.state = Some(LeaseState {
                    lease_id: data.lease_id,
                    entity_id: data.entity_id,
                    tenant_id: data.tenant_id,
                    unit_id: data.unit_id,
                    start_date: data.start_date,
                    end_date: None,
                    current_rent: data.rent,
                    security_deposit: data.security_deposit,
                    monthly_due_day: data.monthly_due_day,
                    revision_index_kind: data.revision_index_kind,
                    revision_schedule: None,
                    last_applied_revision_id: None,
                    extra_lines: data.extra_lines,
                });
            }
            LeaseEvent::RevisionScheduleConfigured(data) => {
                if let Some(state) = self.state.as_mut() {
                    state.revision_schedule = Some(data.schedule);
                }
            }
            LeaseEvent::RentRevised(data) => {
                if let Some(state) = self.state.as_mut() {
                    state.current_rent = data.new_rent;
                    state.last_applied_revision_id = Some(data.revision_id);
                }
            }
            LeaseEvent::LeaseTerminated(data) => {
                if let Some(state) = self.state.as_mut() {
                    state.end_date = Some(data.end_date);
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
