//! Participation state machine and service
//!
//! All status changes funnel through [`evaluate_transition`], a pure function
//! over the closed status enumeration. [`ParticipationService`] applies the
//! accepted transitions against the remote event repository, never committing
//! an in-memory state change before the remote write is acknowledged, and
//! re-reads the event snapshot after every acknowledged write.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info};

use crate::api::EventRepository;
use crate::models::{Event, EventId, Participation, ParticipationStatus, PaymentDetails, UserId, ChargeOutcome};
use crate::services::capacity::can_accept_new_participant;
use crate::services::payment::PaymentGate;
use crate::services::refresh::{RefreshHub, RefreshSignal};
use crate::utils::errors::{GatherlyError, Result};
use crate::utils::logging::{log_participation_action, log_snapshot_refresh};

/// User- and organizer-driven triggers of the participation lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    Join,
    OrganizerApprove,
    OrganizerReject,
    PaymentSucceeded,
    PaymentFailed,
    RetryPayment,
    Cancel,
}

fn status_name(current: Option<&Participation>) -> String {
    match current {
        Some(p) => p.status.to_string(),
        None => "NONE".to_string(),
    }
}

/// Evaluate one trigger against the current participation state.
///
/// Returns the status the record must move to, or the guard violation that
/// refuses the trigger. Pure: callers perform the repository write.
pub fn evaluate_transition(
    event: &Event,
    actor: UserId,
    current: Option<&Participation>,
    trigger: Trigger,
) -> Result<ParticipationStatus> {
    match trigger {
        Trigger::Join => {
            if let Some(existing) = current {
                return Err(GatherlyError::PreconditionFailed(format!(
                    "A participation record already exists with status {}",
                    existing.status
                )));
            }
            if event.is_organizer(actor) {
                return Err(GatherlyError::PreconditionFailed(
                    "The organizer cannot join their own event".to_string(),
                ));
            }
            if !can_accept_new_participant(event) {
                return Err(GatherlyError::PreconditionFailed(
                    "The event is at capacity".to_string(),
                ));
            }
            // Payment gating takes precedence over approval gating
            if event.is_paid {
                Ok(ParticipationStatus::PaymentPending)
            } else if event.requires_approval {
                Ok(ParticipationStatus::Pending)
            } else {
                Ok(ParticipationStatus::Approved)
            }
        }

        Trigger::OrganizerApprove | Trigger::OrganizerReject => {
            if !event.is_organizer(actor) {
                return Err(GatherlyError::PermissionDenied(
                    "Only the event organizer can moderate participants".to_string(),
                ));
            }
            let participation = current.ok_or_else(|| {
                GatherlyError::PreconditionFailed(
                    "No participation record to moderate".to_string(),
                )
            })?;
            if participation.status != ParticipationStatus::Pending {
                return Err(GatherlyError::PreconditionFailed(format!(
                    "Participation is {}, moderation requires PENDING",
                    participation.status
                )));
            }
            match trigger {
                Trigger::OrganizerApprove => Ok(ParticipationStatus::Approved),
                _ => Ok(ParticipationStatus::Rejected),
            }
        }

        Trigger::PaymentSucceeded => match current {
            Some(p) if p.status == ParticipationStatus::PaymentPending => {
                Ok(ParticipationStatus::Completed)
            }
            _ => Err(GatherlyError::InvalidStateTransition {
                from: status_name(current),
                to: ParticipationStatus::Completed.to_string(),
            }),
        },

        Trigger::PaymentFailed => match current {
            Some(p) if p.status == ParticipationStatus::PaymentPending => {
                Ok(ParticipationStatus::PaymentFailed)
            }
            _ => Err(GatherlyError::InvalidStateTransition {
                from: status_name(current),
                to: ParticipationStatus::PaymentFailed.to_string(),
            }),
        },

        Trigger::RetryPayment => match current {
            Some(p) if p.status == ParticipationStatus::PaymentFailed => {
                Ok(ParticipationStatus::PaymentPending)
            }
            _ => Err(GatherlyError::InvalidStateTransition {
                from: status_name(current),
                to: ParticipationStatus::PaymentPending.to_string(),
            }),
        },

        Trigger::Cancel => {
            let participation = current.ok_or_else(|| {
                GatherlyError::PreconditionFailed(
                    "No participation record to cancel".to_string(),
                )
            })?;
            if participation.user_id != actor {
                return Err(GatherlyError::PermissionDenied(
                    "Only the participating user can cancel".to_string(),
                ));
            }
            match participation.status {
                ParticipationStatus::Pending
                | ParticipationStatus::Approved
                | ParticipationStatus::PaymentPending
                | ParticipationStatus::PaymentFailed => Ok(ParticipationStatus::Cancelled),
                _ => Err(GatherlyError::InvalidStateTransition {
                    from: participation.status.to_string(),
                    to: ParticipationStatus::Cancelled.to_string(),
                }),
            }
        }
    }
}

/// Result of an acknowledged transition: the written record plus the event
/// snapshot re-read after the write
#[derive(Debug, Clone)]
pub struct ParticipationUpdate {
    pub participation: Participation,
    pub event: Event,
}

/// Service driving the participation lifecycle against the event repository
pub struct ParticipationService {
    repository: Arc<dyn EventRepository>,
    payment_gate: Arc<PaymentGate>,
    hub: Arc<RefreshHub>,
    in_flight: Mutex<HashSet<(EventId, UserId)>>,
}

/// Releases the pending-window entry when the repository acknowledges or fails
struct InFlightGuard<'a> {
    registry: &'a Mutex<HashSet<(EventId, UserId)>>,
    key: (EventId, UserId),
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        lock_registry(self.registry).remove(&self.key);
    }
}

fn lock_registry<'a>(
    registry: &'a Mutex<HashSet<(EventId, UserId)>>,
) -> MutexGuard<'a, HashSet<(EventId, UserId)>> {
    match registry.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

impl ParticipationService {
    pub fn new(
        repository: Arc<dyn EventRepository>,
        payment_gate: Arc<PaymentGate>,
        hub: Arc<RefreshHub>,
    ) -> Self {
        Self {
            repository,
            payment_gate,
            hub,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Open the pending window for a (event, user) pair.
    ///
    /// A second trigger for the same pair while a command is unacknowledged
    /// is refused rather than queued.
    fn begin(&self, event_id: EventId, actor: UserId) -> Result<InFlightGuard<'_>> {
        let mut registry = lock_registry(&self.in_flight);
        if !registry.insert((event_id, actor)) {
            return Err(GatherlyError::OperationInProgress);
        }
        Ok(InFlightGuard {
            registry: &self.in_flight,
            key: (event_id, actor),
        })
    }

    /// Request to join an event.
    ///
    /// The resulting status depends on the event: paid events enter
    /// `PAYMENT_PENDING`, approval-gated events enter `PENDING`, and open
    /// events are approved directly.
    pub async fn join(&self, event_id: EventId, actor: UserId) -> Result<ParticipationUpdate> {
        debug!(event_id = %event_id, user_id = %actor, "Join requested");

        let event = self.repository.get_event(event_id).await?;
        let target = evaluate_transition(&event, actor, event.participation_for(actor), Trigger::Join)?;

        let _window = self.begin(event_id, actor)?;
        let participation = self
            .repository
            .create_participation(event_id, actor, target)
            .await?;

        let event = self.refresh_after_write(event_id).await?;
        log_participation_action(event_id, actor, "join", participation.status.as_str());

        Ok(ParticipationUpdate { participation, event })
    }

    /// Cancel the caller's own participation
    pub async fn cancel(&self, event_id: EventId, actor: UserId) -> Result<ParticipationUpdate> {
        debug!(event_id = %event_id, user_id = %actor, "Cancel requested");

        let event = self.repository.get_event(event_id).await?;
        let current = event.participation_for(actor);
        let target = evaluate_transition(&event, actor, current, Trigger::Cancel)?;
        let participation_id = current
            .map(|p| p.id)
            .ok_or_else(|| GatherlyError::PreconditionFailed(
                "No participation record to cancel".to_string(),
            ))?;

        let _window = self.begin(event_id, actor)?;
        let participation = self
            .repository
            .update_participation_status(event_id, participation_id, target)
            .await?;

        let event = self.refresh_after_write(event_id).await?;
        log_participation_action(event_id, actor, "cancel", participation.status.as_str());

        Ok(ParticipationUpdate { participation, event })
    }

    /// Submit payment for a participation awaiting it.
    ///
    /// A declined charge commits the `PAYMENT_FAILED` transition and then
    /// surfaces as [`GatherlyError::PaymentDeclined`]; the participant may
    /// retry from there.
    pub async fn submit_payment(
        &self,
        event_id: EventId,
        actor: UserId,
        details: &PaymentDetails,
    ) -> Result<ParticipationUpdate> {
        debug!(event_id = %event_id, user_id = %actor, "Payment submission requested");

        let event = self.repository.get_event(event_id).await?;
        let participation = event
            .participation_for(actor)
            .cloned()
            .ok_or_else(|| GatherlyError::PreconditionFailed(
                "No participation record awaiting payment".to_string(),
            ))?;
        if participation.status != ParticipationStatus::PaymentPending {
            return Err(GatherlyError::PreconditionFailed(format!(
                "Participation is {}, payment requires PAYMENT_PENDING",
                participation.status
            )));
        }

        let _window = self.begin(event_id, actor)?;
        self.run_charge(&event, participation, actor, details).await
    }

    /// Re-enter the payment gate after a failed attempt.
    ///
    /// The record moves back to `PAYMENT_PENDING` through the repository
    /// before a fresh charge is attempted.
    pub async fn retry_payment(
        &self,
        event_id: EventId,
        actor: UserId,
        details: &PaymentDetails,
    ) -> Result<ParticipationUpdate> {
        debug!(event_id = %event_id, user_id = %actor, "Payment retry requested");

        let event = self.repository.get_event(event_id).await?;
        let current = event.participation_for(actor);
        let target = evaluate_transition(&event, actor, current, Trigger::RetryPayment)?;
        let participation_id = current
            .map(|p| p.id)
            .ok_or_else(|| GatherlyError::PreconditionFailed(
                "No participation record to retry".to_string(),
            ))?;

        let _window = self.begin(event_id, actor)?;
        let participation = self
            .repository
            .update_participation_status(event_id, participation_id, target)
            .await?;
        log_participation_action(event_id, actor, "retry_payment", participation.status.as_str());

        self.run_charge(&event, participation, actor, details).await
    }

    /// Read-only snapshot refresh; never triggers a transition
    pub async fn refresh(&self, event_id: EventId) -> Result<Event> {
        let event = self.repository.get_event(event_id).await?;
        log_snapshot_refresh(event_id, event.participants.len());
        self.hub.publish(RefreshSignal::SnapshotUpdated { event_id });
        Ok(event)
    }

    async fn run_charge(
        &self,
        event: &Event,
        participation: Participation,
        actor: UserId,
        details: &PaymentDetails,
    ) -> Result<ParticipationUpdate> {
        let outcome = self
            .payment_gate
            .collect_payment(event, &participation, details)
            .await?;

        match outcome {
            ChargeOutcome::Approved { receipt_id } => {
                let target = evaluate_transition(
                    event,
                    actor,
                    Some(&participation),
                    Trigger::PaymentSucceeded,
                )?;
                let participation = self
                    .repository
                    .update_participation_status(event.id, participation.id, target)
                    .await?;

                let event = self.refresh_after_write(event.id).await?;
                info!(
                    event_id = %event.id,
                    user_id = %actor,
                    receipt_id = %receipt_id,
                    "Payment completed"
                );

                Ok(ParticipationUpdate { participation, event })
            }
            ChargeOutcome::Declined { reason } => {
                let target = evaluate_transition(
                    event,
                    actor,
                    Some(&participation),
                    Trigger::PaymentFailed,
                )?;
                self.repository
                    .update_participation_status(event.id, participation.id, target)
                    .await?;

                self.refresh_after_write(event.id).await?;
                log_participation_action(event.id, actor, "payment_declined", target.as_str());

                Err(GatherlyError::PaymentDeclined { reason })
            }
        }
    }

    async fn refresh_after_write(&self, event_id: EventId) -> Result<Event> {
        let event = self.repository.get_event(event_id).await?;
        self.hub.publish(RefreshSignal::ParticipationChanged { event_id });
        Ok(event)
    }
}
