//! Gatherly participation core
//!
//! The participation lifecycle engine of the Gatherly event discovery
//! platform: joining events, organizer moderation, the payment gate for paid
//! events, and the pure view projection the front end renders from. All
//! durable state lives in the remote event repository; this crate drives the
//! transitions against it.

pub mod api;
pub mod config;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{GatherlyError, Result};

// Re-export main components for easy access
pub use api::{EventRepository, PaymentCollaborator};
pub use models::{Event, Participation, ParticipationStatus, PaymentDetails};
pub use services::{ParticipationService, ServiceFactory};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
