//! Payment flow integration tests
//!
//! Covers the paid-event round trip: joining into `PAYMENT_PENDING`,
//! successful and declined charges, retry after failure, capacity exhaustion
//! after completion, and local rejection of malformed card details.

mod helpers;

use std::sync::Arc;

use assert_matches::assert_matches;
use uuid::Uuid;

use gatherly::api::in_memory::GatewayMode;
use gatherly::api::{EventRepository, InMemoryEventStore, InMemoryPaymentGateway};
use gatherly::models::ParticipationStatus;
use gatherly::services::ServiceFactory;
use gatherly::{GatherlyError, Settings};

use helpers::test_data::{paid_event, short_card_details, valid_payment_details};

fn factory(store: &InMemoryEventStore, gateway: &InMemoryPaymentGateway) -> ServiceFactory {
    ServiceFactory::with_collaborators(
        Settings::default(),
        Arc::new(store.clone()),
        Arc::new(gateway.clone()),
    )
}

#[tokio::test]
async fn test_paid_round_trip_exhausts_capacity() {
    let store = InMemoryEventStore::new();
    let gateway = InMemoryPaymentGateway::new();
    let organizer = Uuid::new_v4();
    let event = paid_event(organizer, 2500, Some(1));
    let event_id = event.id;
    store.insert_event(event).await;

    let factory = factory(&store, &gateway);
    let first_user = Uuid::new_v4();

    let joined = factory
        .participation_service
        .join(event_id, first_user)
        .await
        .unwrap();
    assert_eq!(joined.participation.status, ParticipationStatus::PaymentPending);

    let completed = factory
        .participation_service
        .submit_payment(event_id, first_user, &valid_payment_details())
        .await
        .unwrap();
    assert_eq!(completed.participation.status, ParticipationStatus::Completed);

    // The completed seat fills the event
    let second = factory
        .participation_service
        .join(event_id, Uuid::new_v4())
        .await;
    assert_matches!(second, Err(GatherlyError::PreconditionFailed(_)));

    let charges = gateway.recorded_charges().await;
    assert_eq!(charges.len(), 1);
    assert_eq!(charges[0].amount, 2500);
}

#[tokio::test]
async fn test_declined_charge_moves_to_payment_failed() {
    let store = InMemoryEventStore::new();
    let gateway = InMemoryPaymentGateway::new();
    gateway.set_mode(GatewayMode::DeclineAll).await;

    let organizer = Uuid::new_v4();
    let event = paid_event(organizer, 4500, None);
    let event_id = event.id;
    store.insert_event(event).await;

    let factory = factory(&store, &gateway);
    let member = Uuid::new_v4();

    factory.participation_service.join(event_id, member).await.unwrap();
    let result = factory
        .participation_service
        .submit_payment(event_id, member, &valid_payment_details())
        .await;
    assert_matches!(result, Err(GatherlyError::PaymentDeclined { .. }));

    // The failed transition was committed remotely
    let snapshot = store.get_event(event_id).await.unwrap();
    assert_eq!(snapshot.participants[0].status, ParticipationStatus::PaymentFailed);
}

#[tokio::test]
async fn test_retry_after_decline_completes() {
    let store = InMemoryEventStore::new();
    let gateway = InMemoryPaymentGateway::new();
    gateway.set_mode(GatewayMode::DeclineOnce).await;

    let organizer = Uuid::new_v4();
    let event = paid_event(organizer, 3000, None);
    let event_id = event.id;
    store.insert_event(event).await;

    let factory = factory(&store, &gateway);
    let member = Uuid::new_v4();

    factory.participation_service.join(event_id, member).await.unwrap();
    let declined = factory
        .participation_service
        .submit_payment(event_id, member, &valid_payment_details())
        .await;
    assert_matches!(declined, Err(GatherlyError::PaymentDeclined { .. }));

    let completed = factory
        .participation_service
        .retry_payment(event_id, member, &valid_payment_details())
        .await
        .unwrap();
    assert_eq!(completed.participation.status, ParticipationStatus::Completed);

    // One declined and one approved charge reached the gateway
    assert_eq!(gateway.charge_count().await, 2);
}

#[tokio::test]
async fn test_retry_requires_a_failed_payment() {
    let store = InMemoryEventStore::new();
    let gateway = InMemoryPaymentGateway::new();
    let organizer = Uuid::new_v4();
    let event = paid_event(organizer, 3000, None);
    let event_id = event.id;
    store.insert_event(event).await;

    let factory = factory(&store, &gateway);
    let member = Uuid::new_v4();

    factory.participation_service.join(event_id, member).await.unwrap();

    // Still PAYMENT_PENDING, not failed
    let retry = factory
        .participation_service
        .retry_payment(event_id, member, &valid_payment_details())
        .await;
    assert_matches!(retry, Err(GatherlyError::InvalidStateTransition { .. }));
}

#[tokio::test]
async fn test_malformed_card_rejected_before_any_charge() {
    let store = InMemoryEventStore::new();
    let gateway = InMemoryPaymentGateway::new();
    let organizer = Uuid::new_v4();
    let event = paid_event(organizer, 2500, None);
    let event_id = event.id;
    store.insert_event(event).await;

    let factory = factory(&store, &gateway);
    let member = Uuid::new_v4();

    factory.participation_service.join(event_id, member).await.unwrap();
    let result = factory
        .participation_service
        .submit_payment(event_id, member, &short_card_details())
        .await;
    assert_matches!(result, Err(GatherlyError::Validation(_)));

    // No charge request was made and the status is unchanged
    assert_eq!(gateway.charge_count().await, 0);
    let snapshot = store.get_event(event_id).await.unwrap();
    assert_eq!(snapshot.participants[0].status, ParticipationStatus::PaymentPending);
}

#[tokio::test]
async fn test_cancel_from_payment_failed() {
    let store = InMemoryEventStore::new();
    let gateway = InMemoryPaymentGateway::new();
    gateway.set_mode(GatewayMode::DeclineAll).await;

    let organizer = Uuid::new_v4();
    let event = paid_event(organizer, 2000, None);
    let event_id = event.id;
    store.insert_event(event).await;

    let factory = factory(&store, &gateway);
    let member = Uuid::new_v4();

    factory.participation_service.join(event_id, member).await.unwrap();
    let _ = factory
        .participation_service
        .submit_payment(event_id, member, &valid_payment_details())
        .await;

    let cancelled = factory
        .participation_service
        .cancel(event_id, member)
        .await
        .unwrap();
    assert_eq!(cancelled.participation.status, ParticipationStatus::Cancelled);

    // Terminal: retrying payment afterwards is refused
    let retry = factory
        .participation_service
        .retry_payment(event_id, member, &valid_payment_details())
        .await;
    assert_matches!(retry, Err(GatherlyError::InvalidStateTransition { .. }));
}
