//! Lease service providing a simplified API for lease operations.

use common::AggregateId;
use event_store::EventStore;

use crate::command::{CommandHandler, CommandResult};
use crate::error::DomainError;

use super::{ConfigureRevisionSchedule, CreateLease, Lease, ReviseRent, TerminateLease};

impl From<super::LeaseError> for DomainError {
    fn from(e: super::LeaseError) -> Self {
        DomainError::Lease(e)
    }
}

/// Service for managing leases.
pub struct LeaseService<S: EventStore> {
    handler: CommandHandler<S, Lease>,
}

impl<S: EventStore> LeaseService<S> {
    /// Creates a new lease service with the given event store.
    pub fn new(store: S) -> Self {
        Self {
            handler: CommandHandler::new(store),
        }
    }

    /// Returns a reference to the underlying command handler.
    pub fn handler(&self) -> &CommandHandler<S, Lease> {
        &self.handler
    }

    /// Enters a signed lease into the system.
    #[tracing::instrument(skip(self, cmd), fields(lease_id = %cmd.draft.lease_id))]
    pub async fn create_lease(&self, cmd: CreateLease) -> Result<CommandResult<Lease>, DomainError> {
        let lease_id = cmd.draft.lease_id;
        let draft = cmd.draft;

        self.handler
            .execute(lease_id, |lease| lease.create(draft))
            .await
    }

    /// Configures the rent-revision anchor on a lease.
    #[tracing::instrument(skip(self))]
    pub async fn configure_revision_schedule(
        &self,
        cmd: ConfigureRevisionSchedule,
    ) -> Result<CommandResult<Lease>, DomainError> {
        let schedule = cmd.schedule.clone();

        self.handler
            .execute(cmd.lease_id, |lease| {
                lease.configure_revision_schedule(schedule)
            })
            .await
    }

    /// Applies a periodic rent revision.
    #[tracing::instrument(skip(self, cmd), fields(lease_id = %cmd.lease_id, revision_id = %cmd.revision_id))]
    pub async fn revise_rent(&self, cmd: ReviseRent) -> Result<CommandResult<Lease>, DomainError> {
        let ReviseRent {
            lease_id,
            new_rent,
            new_base_index_value,
            new_quarter,
            new_year,
            revision_id,
        } = cmd;

        self.handler
            .execute(lease_id, |lease| {
                lease.revise_rent(
                    new_rent,
                    new_base_index_value,
                    new_quarter,
                    new_year,
                    revision_id,
                )
            })
            .await
    }

    /// Terminates a lease.
    #[tracing::instrument(skip(self))]
    pub async fn terminate_lease(
        &self,
        cmd: TerminateLease,
    ) -> Result<CommandResult<Lease>, DomainError> {
        self.handler
            .execute(cmd.lease_id, |lease| lease.terminate(cmd.end_date))
            .await
    }

    /// Loads a lease by ID.
    ///
    /// Returns None if the lease doesn't exist.
    #[tracing::instrument(skip(self))]
    pub async fn get_lease(&self, lease_id: AggregateId) -> Result<Option<Lease>, DomainError> {
        self.handler.load_existing(lease_id).await
    }
}
