//! Services module
//!
//! This module contains the participation lifecycle business logic

pub mod capacity;
pub mod moderation;
pub mod participation;
pub mod payment;
pub mod projection;
pub mod refresh;

// Re-export commonly used services
pub use capacity::can_accept_new_participant;
pub use moderation::ModerationService;
pub use participation::{evaluate_transition, ParticipationService, ParticipationUpdate, Trigger};
pub use payment::PaymentGate;
pub use projection::{allowed_actions, status_label, StatusCategory, UserAction, ViewerRole};
pub use refresh::{RefreshHub, RefreshListener, RefreshSignal, SnapshotPoller, Subscription};

use std::sync::Arc;
use std::time::Duration;

use crate::api::{EventRepository, HttpEventRepository, HttpPaymentGateway, PaymentCollaborator};
use crate::config::Settings;
use crate::models::EventId;
use crate::utils::errors::Result;

/// Service factory wiring collaborators into the lifecycle services
#[derive(Clone)]
pub struct ServiceFactory {
    pub participation_service: Arc<ParticipationService>,
    pub moderation_service: Arc<ModerationService>,
    pub payment_gate: Arc<PaymentGate>,
    pub refresh_hub: Arc<RefreshHub>,
    repository: Arc<dyn EventRepository>,
    settings: Settings,
}

impl ServiceFactory {
    /// Create a factory backed by the HTTP collaborators from configuration
    pub fn new(settings: Settings) -> Result<Self> {
        let repository: Arc<dyn EventRepository> =
            Arc::new(HttpEventRepository::new(&settings.api)?);
        let gateway: Arc<dyn PaymentCollaborator> =
            Arc::new(HttpPaymentGateway::new(&settings.payment)?);

        Ok(Self::with_collaborators(settings, repository, gateway))
    }

    /// Create a factory over explicit collaborator implementations
    pub fn with_collaborators(
        settings: Settings,
        repository: Arc<dyn EventRepository>,
        gateway: Arc<dyn PaymentCollaborator>,
    ) -> Self {
        let refresh_hub = Arc::new(RefreshHub::new());
        let payment_gate = Arc::new(PaymentGate::new(gateway));
        let participation_service = Arc::new(ParticipationService::new(
            Arc::clone(&repository),
            Arc::clone(&payment_gate),
            Arc::clone(&refresh_hub),
        ));
        let moderation_service = Arc::new(ModerationService::new(
            Arc::clone(&repository),
            Arc::clone(&refresh_hub),
        ));

        Self {
            participation_service,
            moderation_service,
            payment_gate,
            refresh_hub,
            repository,
            settings,
        }
    }

    /// Start the read-only snapshot poller for one event
    pub fn start_poller(&self, event_id: EventId) -> SnapshotPoller {
        SnapshotPoller::start(
            Arc::clone(&self.repository),
            Arc::clone(&self.refresh_hub),
            event_id,
            Duration::from_secs(self.settings.polling.interval_seconds),
        )
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
