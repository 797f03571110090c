//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the participation core.

use tracing::{info, warn, error, debug};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::models::{EventId, ParticipationId, UserId};
use crate::utils::errors::Result;

/// Initialize logging based on configuration
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "gatherly.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(())
}

/// Log participation lifecycle actions with structured data
pub fn log_participation_action(event_id: EventId, user_id: UserId, action: &str, status: &str) {
    info!(
        event_id = %event_id,
        user_id = %user_id,
        action = action,
        status = status,
        "Participation action performed"
    );
}

/// Log organizer moderation decisions
pub fn log_moderation_action(organizer_id: UserId, participation_id: ParticipationId, action: &str) {
    warn!(
        organizer_id = %organizer_id,
        participation_id = %participation_id,
        action = action,
        "Moderation action performed"
    );
}

/// Log payment attempt outcomes
pub fn log_payment_attempt(participation_id: ParticipationId, amount: u32, approved: bool) {
    if approved {
        info!(
            participation_id = %participation_id,
            amount = amount,
            "Payment attempt approved"
        );
    } else {
        warn!(
            participation_id = %participation_id,
            amount = amount,
            "Payment attempt declined"
        );
    }
}

/// Log API errors with context
pub fn log_api_error(api: &str, error: &str, context: Option<&str>) {
    error!(
        api = api,
        error = error,
        context = context,
        "API error occurred"
    );
}

/// Log read-only snapshot refreshes
pub fn log_snapshot_refresh(event_id: EventId, participant_count: usize) {
    debug!(
        event_id = %event_id,
        participant_count = participant_count,
        "Event snapshot refreshed"
    );
}
