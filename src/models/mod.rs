//! Data models module
//!
//! This module contains all data structures used throughout the crate

pub mod event;
pub mod participation;
pub mod payment;

// Re-export commonly used models
pub use event::{Event, CreateParticipationRequest};
pub use participation::{Participation, ParticipationStatus};
pub use payment::{PaymentDetails, ChargeRequest, ChargeOutcome};

use uuid::Uuid;

/// Opaque event identifier assigned by the event repository
pub type EventId = Uuid;

/// Opaque user identifier assigned by the platform
pub type UserId = Uuid;

/// Opaque participation identifier assigned by the event repository
pub type ParticipationId = Uuid;
