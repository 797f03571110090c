//! In-memory collaborator implementations
//!
//! Thread-safe stand-ins for the remote event repository and the payment
//! gateway. Used by the test suites and for offline demo wiring; behavior
//! mirrors the remote contracts, including join-order participant lists.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{ChargeOutcome, ChargeRequest, Event, EventId, Participation, ParticipationId, ParticipationStatus, UserId};
use crate::utils::errors::{GatherlyError, Result};
use super::{EventRepository, PaymentCollaborator};

/// A thread-safe in-memory store for events and their participants
#[derive(Default, Clone)]
pub struct InMemoryEventStore {
    events: Arc<RwLock<HashMap<EventId, Event>>>,
}

impl InMemoryEventStore {
    /// Creates a new, empty in-memory event store
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an event into the store
    pub async fn insert_event(&self, event: Event) {
        let mut events = self.events.write().await;
        events.insert(event.id, event);
    }
}

#[async_trait]
impl EventRepository for InMemoryEventStore {
    async fn get_event(&self, event_id: EventId) -> Result<Event> {
        let events = self.events.read().await;
        events
            .get(&event_id)
            .cloned()
            .ok_or(GatherlyError::EventNotFound { event_id })
    }

    async fn create_participation(
        &self,
        event_id: EventId,
        user_id: UserId,
        status: ParticipationStatus,
    ) -> Result<Participation> {
        let mut events = self.events.write().await;
        let event = events
            .get_mut(&event_id)
            .ok_or(GatherlyError::EventNotFound { event_id })?;

        let participation = Participation {
            id: Uuid::new_v4(),
            event_id,
            user_id,
            status,
            joined_at: Utc::now(),
        };
        event.participants.push(participation.clone());

        Ok(participation)
    }

    async fn update_participation_status(
        &self,
        event_id: EventId,
        participation_id: ParticipationId,
        status: ParticipationStatus,
    ) -> Result<Participation> {
        let mut events = self.events.write().await;
        let event = events
            .get_mut(&event_id)
            .ok_or(GatherlyError::EventNotFound { event_id })?;

        let participation = event
            .participants
            .iter_mut()
            .find(|p| p.id == participation_id)
            .ok_or(GatherlyError::ParticipationNotFound { participation_id })?;

        participation.status = status;
        Ok(participation.clone())
    }
}

/// Charge behavior scripted onto the in-memory gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayMode {
    ApproveAll,
    DeclineAll,
    /// Decline the next charge, approve the ones after it
    DeclineOnce,
}

/// A scriptable in-memory payment gateway recording every charge attempt
#[derive(Clone)]
pub struct InMemoryPaymentGateway {
    mode: Arc<RwLock<GatewayMode>>,
    charges: Arc<RwLock<Vec<ChargeRequest>>>,
}

impl InMemoryPaymentGateway {
    pub fn new() -> Self {
        Self {
            mode: Arc::new(RwLock::new(GatewayMode::ApproveAll)),
            charges: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn set_mode(&self, mode: GatewayMode) {
        *self.mode.write().await = mode;
    }

    /// Number of charge requests that reached the gateway
    pub async fn charge_count(&self) -> usize {
        self.charges.read().await.len()
    }

    pub async fn recorded_charges(&self) -> Vec<ChargeRequest> {
        self.charges.read().await.clone()
    }
}

impl Default for InMemoryPaymentGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentCollaborator for InMemoryPaymentGateway {
    async fn submit_payment(&self, charge: ChargeRequest) -> Result<ChargeOutcome> {
        self.charges.write().await.push(charge);

        let mut mode = self.mode.write().await;
        match *mode {
            GatewayMode::ApproveAll => Ok(ChargeOutcome::Approved {
                receipt_id: format!("rcpt-{}", Uuid::new_v4()),
            }),
            GatewayMode::DeclineAll => Ok(ChargeOutcome::Declined {
                reason: "Card declined".to_string(),
            }),
            GatewayMode::DeclineOnce => {
                *mode = GatewayMode::ApproveAll;
                Ok(ChargeOutcome::Declined {
                    reason: "Card declined".to_string(),
                })
            }
        }
    }
}
