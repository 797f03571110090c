//! Capacity policy
//!
//! Pure decision on whether an event can accept another participant.
//! Only seated statuses (approved or completed) occupy capacity; pending
//! requests and unfinished payments do not hold a seat.

use crate::models::Event;

/// Decide whether the event can accept a new participant.
///
/// Always returns a verdict; an absent `max_participants` means unlimited.
pub fn can_accept_new_participant(event: &Event) -> bool {
    match event.max_participants {
        Some(max) => (event.confirmed_count() as u32) < max,
        None => true,
    }
}
