//! Collections escalation (dunning) aggregate and related types.

mod aggregate;
mod commands;
mod events;
mod service;

pub use aggregate::{CollectionsEscalation, EscalationState, RegisteredMail};
pub use commands::{
    DispatchViaRegisteredMail, GenerateFormalNotice, GenerateStakeholderNotifications,
    InitiateEscalation, SendReminderEmail, UpdateRegisteredMailStatus,
};
pub use events::{
    CollectionsEvent, EscalationInitiatedData, FormalNoticeGeneratedData,
    RegisteredMailDispatchedData, RegisteredMailStatusUpdatedData, ReminderEmailSentData,
    StakeholderNotificationsGeneratedData,
};
pub use service::CollectionsService;

use thiserror::Error;

/// Errors that can occur during collections escalation operations.
#[derive(Debug, Error)]
pub enum CollectionsError {
    /// An escalation action was attempted before initiation.
    #[error("Collections escalation has not been initiated")]
    NotInitiated,

    /// Registered mail was dispatched before the formal notice tier.
    #[error("formal notice must be generated before dispatching via registered mail")]
    FormalNoticeRequired,
}
