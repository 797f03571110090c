//! Event model
//!
//! The event record is owned by the remote event repository; this crate reads
//! the fields that drive the participation workflow and never writes the
//! event itself.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use super::participation::{Participation, ParticipationStatus};
use super::{EventId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub location: Option<String>,
    /// Exactly one organizer per event
    pub organizer_id: UserId,
    pub is_paid: bool,
    /// Price in minor currency units; required when `is_paid` is true
    pub price: Option<u32>,
    /// Absent means unlimited
    pub max_participants: Option<u32>,
    pub requires_approval: bool,
    /// Ordered by join time
    pub participants: Vec<Participation>,
}

impl Event {
    /// Check whether the given user owns this event
    pub fn is_organizer(&self, user_id: UserId) -> bool {
        self.organizer_id == user_id
    }

    /// Find the participation record for a user, if one exists
    pub fn participation_for(&self, user_id: UserId) -> Option<&Participation> {
        self.participants.iter().find(|p| p.user_id == user_id)
    }

    /// Number of participants holding a confirmed seat
    pub fn confirmed_count(&self) -> usize {
        self.participants
            .iter()
            .filter(|p| p.status.counts_toward_capacity())
            .count()
    }

    /// Participants currently awaiting an organizer decision, in join order
    pub fn pending_participants(&self) -> Vec<&Participation> {
        self.participants
            .iter()
            .filter(|p| p.status == ParticipationStatus::Pending)
            .collect()
    }
}

/// Payload for `POST /events/{id}/participants`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateParticipationRequest {
    pub user_id: UserId,
    pub status: ParticipationStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn participation(status: ParticipationStatus) -> Participation {
        Participation {
            id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            status,
            joined_at: Utc::now(),
        }
    }

    fn event_with(statuses: &[ParticipationStatus]) -> Event {
        Event {
            id: Uuid::new_v4(),
            title: "Tuesday social".to_string(),
            description: None,
            starts_at: Utc::now(),
            location: Some("Community hall".to_string()),
            organizer_id: Uuid::new_v4(),
            is_paid: false,
            price: None,
            max_participants: None,
            requires_approval: true,
            participants: statuses.iter().map(|s| participation(*s)).collect(),
        }
    }

    #[test]
    fn test_confirmed_count_only_counts_seated_statuses() {
        let event = event_with(&[
            ParticipationStatus::Approved,
            ParticipationStatus::Completed,
            ParticipationStatus::Pending,
            ParticipationStatus::PaymentPending,
            ParticipationStatus::Rejected,
            ParticipationStatus::Cancelled,
        ]);
        assert_eq!(event.confirmed_count(), 2);
    }

    #[test]
    fn test_pending_participants_preserves_join_order() {
        let event = event_with(&[
            ParticipationStatus::Pending,
            ParticipationStatus::Approved,
            ParticipationStatus::Pending,
        ]);
        let pending = event.pending_participants();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].id, event.participants[0].id);
        assert_eq!(pending[1].id, event.participants[2].id);
    }

    #[test]
    fn test_participation_lookup_by_user() {
        let mut event = event_with(&[ParticipationStatus::Approved]);
        let user_id = event.participants[0].user_id;
        assert!(event.participation_for(user_id).is_some());
        assert!(event.participation_for(Uuid::new_v4()).is_none());

        event.participants.clear();
        assert!(event.participation_for(user_id).is_none());
    }
}
