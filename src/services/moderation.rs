//! Organizer moderation
//!
//! Approve and reject actions available only to the event's organizer,
//! operating on participants awaiting a decision. Moderating a participation
//! that is not exactly `PENDING` is refused, never silently absorbed.

use std::sync::Arc;

use tracing::debug;

use crate::api::EventRepository;
use crate::models::{EventId, Participation, ParticipationId, UserId};
use crate::services::participation::{evaluate_transition, Trigger};
use crate::services::refresh::{RefreshHub, RefreshSignal};
use crate::utils::errors::{GatherlyError, Result};
use crate::utils::logging::log_moderation_action;

pub struct ModerationService {
    repository: Arc<dyn EventRepository>,
    hub: Arc<RefreshHub>,
}

impl ModerationService {
    pub fn new(repository: Arc<dyn EventRepository>, hub: Arc<RefreshHub>) -> Self {
        Self { repository, hub }
    }

    /// Approve a pending participant
    pub async fn approve(
        &self,
        event_id: EventId,
        actor: UserId,
        participation_id: ParticipationId,
    ) -> Result<Participation> {
        self.moderate(event_id, actor, participation_id, Trigger::OrganizerApprove)
            .await
    }

    /// Reject a pending participant
    pub async fn reject(
        &self,
        event_id: EventId,
        actor: UserId,
        participation_id: ParticipationId,
    ) -> Result<Participation> {
        self.moderate(event_id, actor, participation_id, Trigger::OrganizerReject)
            .await
    }

    /// Participants awaiting a decision, in join order. Organizer only.
    pub async fn pending_participants(
        &self,
        event_id: EventId,
        actor: UserId,
    ) -> Result<Vec<Participation>> {
        let event = self.repository.get_event(event_id).await?;
        if !event.is_organizer(actor) {
            return Err(GatherlyError::PermissionDenied(
                "Only the event organizer can list pending participants".to_string(),
            ));
        }

        Ok(event
            .pending_participants()
            .into_iter()
            .cloned()
            .collect())
    }

    async fn moderate(
        &self,
        event_id: EventId,
        actor: UserId,
        participation_id: ParticipationId,
        trigger: Trigger,
    ) -> Result<Participation> {
        debug!(
            event_id = %event_id,
            participation_id = %participation_id,
            trigger = ?trigger,
            "Moderation requested"
        );

        let event = self.repository.get_event(event_id).await?;
        let current = event
            .participants
            .iter()
            .find(|p| p.id == participation_id)
            .ok_or(GatherlyError::ParticipationNotFound { participation_id })?;

        let target = evaluate_transition(&event, actor, Some(current), trigger)?;
        let participation = self
            .repository
            .update_participation_status(event_id, participation_id, target)
            .await?;

        self.hub.publish(RefreshSignal::ParticipationChanged { event_id });
        let action = match trigger {
            Trigger::OrganizerApprove => "approve",
            _ => "reject",
        };
        log_moderation_action(actor, participation_id, action);

        Ok(participation)
    }
}
