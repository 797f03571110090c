//! View projection
//!
//! The only presentation-facing piece of the core: pure mappings from
//! participation state and viewer role to the set of allowed actions, and
//! from status to a fixed display category. No network access.

use crate::models::ParticipationStatus;

/// Who is looking at the event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerRole {
    Anonymous,
    /// A signed-in user who is not the organizer
    Member,
    Organizer,
}

/// Actions the front end may offer for the current state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserAction {
    Join,
    Cancel,
    /// Open the payment gate for a participation awaiting payment
    Pay,
    RetryPayment,
    Approve,
    Reject,
}

/// Compute the actions available for a participation status and viewer role.
///
/// `None` is the absence of a participation record.
pub fn allowed_actions(status: Option<ParticipationStatus>, role: ViewerRole) -> Vec<UserAction> {
    match (status, role) {
        // The organizer is never offered a join action on their own event
        (None, ViewerRole::Member) => vec![UserAction::Join],
        (None, _) => vec![],

        (Some(ParticipationStatus::Pending), ViewerRole::Member) => vec![UserAction::Cancel],
        (Some(ParticipationStatus::Pending), ViewerRole::Organizer) => {
            vec![UserAction::Approve, UserAction::Reject]
        }

        (Some(ParticipationStatus::Approved), ViewerRole::Member) => vec![UserAction::Cancel],

        (Some(ParticipationStatus::PaymentPending), ViewerRole::Member) => {
            vec![UserAction::Pay, UserAction::Cancel]
        }
        (Some(ParticipationStatus::PaymentFailed), ViewerRole::Member) => {
            vec![UserAction::RetryPayment, UserAction::Cancel]
        }

        // Terminal statuses offer nothing, to anyone
        _ => vec![],
    }
}

/// Fixed display category for a participation status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCategory {
    AwaitingDecision,
    Confirmed,
    Denied,
    AwaitingPayment,
    PaymentFailed,
    Cancelled,
    ConfirmedAndPaid,
}

/// Map a status to its display category.
///
/// The category is fixed; the rendered text may be localized by the front
/// end, with [`StatusCategory`]'s `Display` as the default English wording.
pub fn status_label(status: ParticipationStatus) -> StatusCategory {
    match status {
        ParticipationStatus::Pending => StatusCategory::AwaitingDecision,
        ParticipationStatus::Approved => StatusCategory::Confirmed,
        ParticipationStatus::Rejected => StatusCategory::Denied,
        ParticipationStatus::PaymentPending => StatusCategory::AwaitingPayment,
        ParticipationStatus::PaymentFailed => StatusCategory::PaymentFailed,
        ParticipationStatus::Cancelled => StatusCategory::Cancelled,
        ParticipationStatus::Completed => StatusCategory::ConfirmedAndPaid,
    }
}

impl std::fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            StatusCategory::AwaitingDecision => "Awaiting decision",
            StatusCategory::Confirmed => "Confirmed",
            StatusCategory::Denied => "Denied",
            StatusCategory::AwaitingPayment => "Awaiting payment",
            StatusCategory::PaymentFailed => "Payment failed",
            StatusCategory::Cancelled => "Cancelled",
            StatusCategory::ConfirmedAndPaid => "Confirmed and paid",
        };
        f.write_str(text)
    }
}
