//! Collaborator ports
//!
//! This module defines the seams to the two external collaborators the core
//! depends on: the event repository, which owns all durable state, and the
//! payment gateway. HTTP implementations live alongside in-memory ones used
//! for tests and offline wiring.

pub mod events;
pub mod payments;
pub mod in_memory;

pub use events::HttpEventRepository;
pub use payments::HttpPaymentGateway;
pub use in_memory::{InMemoryEventStore, InMemoryPaymentGateway};

use async_trait::async_trait;

use crate::models::{ChargeOutcome, ChargeRequest, Event, EventId, Participation, ParticipationId, ParticipationStatus, UserId};
use crate::utils::errors::Result;

/// Remote event repository owning events and participation records.
///
/// Every durable state change in the participation lifecycle goes through
/// this port; the core holds no storage of its own.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Fetch the event snapshot including its participant list
    async fn get_event(&self, event_id: EventId) -> Result<Event>;

    /// Create a participation record with the given initial status
    async fn create_participation(
        &self,
        event_id: EventId,
        user_id: UserId,
        status: ParticipationStatus,
    ) -> Result<Participation>;

    /// Move an existing participation record to a new status
    async fn update_participation_status(
        &self,
        event_id: EventId,
        participation_id: ParticipationId,
        status: ParticipationStatus,
    ) -> Result<Participation>;
}

/// External payment gateway charging the event price
#[async_trait]
pub trait PaymentCollaborator: Send + Sync {
    /// Submit one charge attempt; a decline is an `Ok` outcome
    async fn submit_payment(&self, charge: ChargeRequest) -> Result<ChargeOutcome>;
}
