//! Test data helpers for creating test objects
//!
//! This module provides helper functions for creating events, participations
//! and payment details used across the integration test suites.

use chrono::Utc;
use uuid::Uuid;

use gatherly::models::{Event, EventId, Participation, ParticipationStatus, PaymentDetails, UserId};

/// Create an unpaid test event
pub fn unpaid_event(
    organizer_id: UserId,
    requires_approval: bool,
    max_participants: Option<u32>,
) -> Event {
    Event {
        id: Uuid::new_v4(),
        title: "Tuesday swing social".to_string(),
        description: Some("Weekly social dance, all levels welcome".to_string()),
        starts_at: Utc::now() + chrono::Duration::days(7),
        location: Some("Community hall".to_string()),
        organizer_id,
        is_paid: false,
        price: None,
        max_participants,
        requires_approval,
        participants: vec![],
    }
}

/// Create a paid test event; paid events always gate on payment
pub fn paid_event(organizer_id: UserId, price: u32, max_participants: Option<u32>) -> Event {
    Event {
        id: Uuid::new_v4(),
        title: "Weekend workshop".to_string(),
        description: None,
        starts_at: Utc::now() + chrono::Duration::days(14),
        location: Some("Studio B".to_string()),
        organizer_id,
        is_paid: true,
        price: Some(price),
        max_participants,
        requires_approval: false,
        participants: vec![],
    }
}

/// Create a participation record in the given status
pub fn participation_in(event_id: EventId, user_id: UserId, status: ParticipationStatus) -> Participation {
    Participation {
        id: Uuid::new_v4(),
        event_id,
        user_id,
        status,
        joined_at: Utc::now(),
    }
}

/// Payment details that pass local validation
pub fn valid_payment_details() -> PaymentDetails {
    PaymentDetails {
        card_number: "4242424242424242".to_string(),
        card_holder_name: "Ada Lovelace".to_string(),
        expire_month: "09".to_string(),
        expire_year: "2027".to_string(),
        cvc: "123".to_string(),
        billing_address: "12 Analytical Engine Lane, London".to_string(),
    }
}

/// Payment details with a 15-digit card number, rejected locally
pub fn short_card_details() -> PaymentDetails {
    PaymentDetails {
        card_number: "424242424242424".to_string(),
        ..valid_payment_details()
    }
}
