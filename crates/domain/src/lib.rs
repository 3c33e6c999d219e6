//! Domain layer for the rent-management back office.
//!
//! This crate provides the core domain abstractions including:
//! - Aggregate trait for event-sourced entities
//! - DomainEvent trait for domain events
//! - Command trait and CommandHandler for command processing
//! - BillingObligation aggregate: rent call generation, notification, and
//!   the multi-payment ledger, plus batch generation
//! - CollectionsEscalation aggregate: tiered dunning and registered mail
//! - Lease aggregate: idempotent rent revisions with calendar validation

pub mod aggregate;
pub mod billing;
pub mod collections;
pub mod command;
pub mod error;
pub mod lease;
pub mod money;

pub use aggregate::{Aggregate, DomainEvent};
pub use billing::{
    BatchGenerationResult, BillingError, BillingEvent, BillingObligation, BillingService,
    GenerateObligation, MarkObligationSent, ObligationDraft, ObligationState, PaymentRecord,
    ProRata, RecordPayment,
};
pub use collections::{
    CollectionsError, CollectionsEscalation, CollectionsEvent, CollectionsService,
    DispatchViaRegisteredMail, EscalationState, GenerateFormalNotice,
    GenerateStakeholderNotifications, InitiateEscalation, RegisteredMail, SendReminderEmail,
    UpdateRegisteredMailStatus,
};
pub use command::{Command, CommandHandler, CommandResult};
pub use error::DomainError;
pub use lease::{
    ConfigureRevisionSchedule, CreateLease, Lease, LeaseDraft, LeaseError, LeaseEvent,
    LeaseService, LeaseState, ReviseRent, RevisionSchedule, TerminateLease,
};
pub use money::{ChargeLine, Money};
