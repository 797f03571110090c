//! Error handling for the Gatherly participation core
//!
//! This module defines the main error types used throughout the crate
//! and provides a unified error handling strategy.

use thiserror::Error;

use crate::models::{EventId, ParticipationId};

/// Main error type for the participation core
#[derive(Error, Debug)]
pub enum GatherlyError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: EventId },

    #[error("Participation not found: {participation_id}")]
    ParticipationNotFound { participation_id: ParticipationId },

    #[error("Another action is already in flight for this participation")]
    OperationInProgress,

    #[error("Payment declined: {reason}")]
    PaymentDeclined { reason: String },

    #[error("Event repository error: {0}")]
    Repository(String),

    #[error("Payment gateway error: {0}")]
    Gateway(String),

    #[error("Request timed out")]
    Timeout,

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for participation core operations
pub type Result<T> = std::result::Result<T, GatherlyError>;

impl GatherlyError {
    /// Check if re-triggering the same action may succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            GatherlyError::Validation(_) => false,
            GatherlyError::PreconditionFailed(_) => false,
            GatherlyError::InvalidStateTransition { .. } => false,
            GatherlyError::PermissionDenied(_) => false,
            GatherlyError::EventNotFound { .. } => false,
            GatherlyError::ParticipationNotFound { .. } => false,
            GatherlyError::OperationInProgress => true,
            GatherlyError::PaymentDeclined { .. } => true,
            GatherlyError::Repository(_) => true,
            GatherlyError::Gateway(_) => true,
            GatherlyError::Timeout => true,
            GatherlyError::Http(_) => true,
            GatherlyError::Serialization(_) => false,
            GatherlyError::UrlParse(_) => false,
            GatherlyError::Config(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            GatherlyError::Config(_) => ErrorSeverity::Critical,
            GatherlyError::Validation(_) => ErrorSeverity::Info,
            GatherlyError::PreconditionFailed(_) => ErrorSeverity::Warning,
            GatherlyError::PermissionDenied(_) => ErrorSeverity::Warning,
            GatherlyError::OperationInProgress => ErrorSeverity::Warning,
            GatherlyError::PaymentDeclined { .. } => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_recoverable_classification() {
        assert!(GatherlyError::Repository("503".to_string()).is_recoverable());
        assert!(GatherlyError::Timeout.is_recoverable());
        assert!(GatherlyError::OperationInProgress.is_recoverable());
        assert!(GatherlyError::PaymentDeclined { reason: "insufficient funds".to_string() }.is_recoverable());

        assert!(!GatherlyError::Validation("bad card".to_string()).is_recoverable());
        assert!(!GatherlyError::PreconditionFailed("full".to_string()).is_recoverable());
        assert!(!GatherlyError::EventNotFound { event_id: Uuid::new_v4() }.is_recoverable());
    }

    #[test]
    fn test_severity_levels() {
        assert_eq!(GatherlyError::Config("missing url".to_string()).severity(), ErrorSeverity::Critical);
        assert_eq!(GatherlyError::Validation("bad input".to_string()).severity(), ErrorSeverity::Info);
        assert_eq!(GatherlyError::PreconditionFailed("full".to_string()).severity(), ErrorSeverity::Warning);
        assert_eq!(GatherlyError::Timeout.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_display_messages() {
        let err = GatherlyError::InvalidStateTransition {
            from: "REJECTED".to_string(),
            to: "APPROVED".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid state transition: REJECTED -> APPROVED");
    }
}
