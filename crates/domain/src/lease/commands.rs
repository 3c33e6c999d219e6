//! Lease commands.

use chrono::NaiveDate;
use common::AggregateId;

use crate::command::Command;
use crate::money::Money;

use super::{Lease, LeaseDraft, RevisionSchedule};

/// Command to enter a signed lease into the system.
#[derive(Debug, Clone)]
pub struct CreateLease {
    /// The lease to create.
    pub draft: LeaseDraft,
}

impl CreateLease {
    /// Creates a new CreateLease command.
    pub fn new(draft: LeaseDraft) -> Self {
        Self { draft }
    }
}

impl Command for CreateLease {
    type Aggregate = Lease;

    fn aggregate_id(&self) -> AggregateId {
        self.draft.lease_id
    }
}

/// Command to configure the rent-revision anchor on a lease.
#[derive(Debug, Clone)]
pub struct ConfigureRevisionSchedule {
    /// The lease to configure.
    pub lease_id: AggregateId,

    /// The anchor to configure.
    pub schedule: RevisionSchedule,
}

impl ConfigureRevisionSchedule {
    /// Creates a new ConfigureRevisionSchedule command.
    pub fn new(lease_id: AggregateId, schedule: RevisionSchedule) -> Self {
        Self { lease_id, schedule }
    }
}

impl Command for ConfigureRevisionSchedule {
    type Aggregate = Lease;

    fn aggregate_id(&self) -> AggregateId {
        self.lease_id
    }
}

/// Command to apply a periodic rent revision.
#[derive(Debug, Clone)]
pub struct ReviseRent {
    /// The lease being revised.
    pub lease_id: AggregateId,

    /// Rent after the revision.
    pub new_rent: Money,

    /// Index value the revision was computed from.
    pub new_base_index_value: f64,

    /// Reference index quarter of the revision.
    pub new_quarter: String,

    /// Reference index year of the revision.
    pub new_year: i32,

    /// External idempotency key of the revision.
    pub revision_id: String,
}

impl ReviseRent {
    /// Creates a new ReviseRent command.
    pub fn new(
        lease_id: AggregateId,
        new_rent: Money,
        new_base_index_value: f64,
        new_quarter: impl Into<String>,
        new_year: i32,
        revision_id: impl Into<String>,
    ) -> Self {
        Self {
            lease_id,
            new_rent,
            new_base_index_value,
            new_quarter: new_quarter.into(),
            new_year,
            revision_id: revision_id.into(),
        }
    }
}

impl Command for ReviseRent {
    type Aggregate = Lease;

    fn aggregate_id(&self) -> AggregateId {
        self.lease_id
    }
}

/// Command to terminate a lease.
#[derive(Debug, Clone)]
pub struct TerminateLease {
    /// The lease to terminate.
    pub lease_id: AggregateId,

    /// Last day of the lease.
    pub end_date: NaiveDate,
}

impl TerminateLease {
    /// Creates a new TerminateLease command.
    pub fn new(lease_id: AggregateId, end_date: NaiveDate) -> Self {
        Self { lease_id, end_date }
    }
}

impl Command for TerminateLease {
    type Aggregate = Lease;

    fn aggregate_id(&self) -> AggregateId {
        self.lease_id
    }
}
