//! Lease aggregate and related types.

mod aggregate;
mod commands;
mod events;
mod service;
mod value_objects;

pub use aggregate::{Lease, LeaseState};
pub use commands::{ConfigureRevisionSchedule, CreateLease, ReviseRent, TerminateLease};
pub use events::{
    LeaseCreatedData, LeaseEvent, LeaseTerminatedData, RentRevisedData,
    RevisionScheduleConfiguredData,
};
pub use service::LeaseService;
pub use value_objects::{LeaseDraft, RevisionSchedule};

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur during lease operations.
#[derive(Debug, Error)]
pub enum LeaseError {
    /// The lease was addressed before its creating event.
    #[error("Lease has not been created")]
    NotCreated,

    /// Rent revision attempted on a lease with an end date.
    #[error("Lease has been terminated")]
    Terminated,

    /// Termination attempted twice.
    #[error("Lease is already terminated")]
    AlreadyTerminated,

    /// Revision month outside 1-12.
    #[error("Month {month} is not valid")]
    InvalidRevisionMonth { month: u32 },

    /// Revision day does not exist in the given month.
    #[error("Day {day} is not valid for month {month}")]
    InvalidRevisionDay { day: u32, month: u32 },

    /// Termination date before the lease started.
    #[error("End date {end_date} precedes start date {start_date}")]
    EndDateBeforeStart {
        end_date: NaiveDate,
        start_date: NaiveDate,
    },
}
