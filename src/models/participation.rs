//! Participation model
//!
//! One participation record exists per (event, user) pair. Records are never
//! deleted; they only move between statuses until they reach a terminal one.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use super::{EventId, ParticipationId, UserId};

/// Status of one user's relationship to one event's join workflow.
///
/// The absence of a record stands in for the "not participating" case, so
/// there is no variant for it here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipationStatus {
    Pending,
    Approved,
    Rejected,
    PaymentPending,
    PaymentFailed,
    Cancelled,
    Completed,
}

impl ParticipationStatus {
    /// Terminal statuses admit no further transition
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ParticipationStatus::Rejected
                | ParticipationStatus::Cancelled
                | ParticipationStatus::Completed
        )
    }

    /// Statuses that occupy a seat when the event caps participants
    pub fn counts_toward_capacity(&self) -> bool {
        matches!(self, ParticipationStatus::Approved | ParticipationStatus::Completed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipationStatus::Pending => "PENDING",
            ParticipationStatus::Approved => "APPROVED",
            ParticipationStatus::Rejected => "REJECTED",
            ParticipationStatus::PaymentPending => "PAYMENT_PENDING",
            ParticipationStatus::PaymentFailed => "PAYMENT_FAILED",
            ParticipationStatus::Cancelled => "CANCELLED",
            ParticipationStatus::Completed => "COMPLETED",
        }
    }
}

impl std::fmt::Display for ParticipationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participation {
    pub id: ParticipationId,
    pub event_id: EventId,
    pub user_id: UserId,
    pub status: ParticipationStatus,
    pub joined_at: DateTime<Utc>,
}
