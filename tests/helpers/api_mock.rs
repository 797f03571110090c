//! Mock HTTP servers for testing
//!
//! Wiremock-backed stand-ins for the remote event repository and the payment
//! gateway, with configurable responses per endpoint.

use serde_json::json;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use gatherly::config::{ApiConfig, PaymentConfig};
use gatherly::models::{Event, EventId, Participation};

/// Mock event repository server
pub struct EventApiMock {
    pub server: MockServer,
}

impl EventApiMock {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Configuration pointing the HTTP repository at this mock
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.server.uri(),
            timeout_seconds: 10,
        }
    }

    /// Serve an event snapshot for `GET /events/{id}`
    pub async fn mock_get_event(&self, event: &Event) {
        Mock::given(method("GET"))
            .and(path(format!("/events/{}", event.id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(event))
            .mount(&self.server)
            .await;
    }

    /// Serve a created participation for `POST /events/{id}/participants`
    pub async fn mock_create_participation(&self, event_id: EventId, created: &Participation) {
        Mock::given(method("POST"))
            .and(path(format!("/events/{}/participants", event_id)))
            .respond_with(ResponseTemplate::new(201).set_body_json(created))
            .mount(&self.server)
            .await;
    }

    /// Serve an updated participation for the status PATCH endpoint
    pub async fn mock_update_status(&self, event_id: EventId, updated: &Participation) {
        Mock::given(method("PATCH"))
            .and(path(format!(
                "/events/{}/participants/{}/status",
                event_id, updated.id
            )))
            .and(query_param("status", updated.status.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(updated))
            .mount(&self.server)
            .await;
    }

    /// Answer 404 for an unknown event
    pub async fn mock_event_not_found(&self, event_id: EventId) {
        Mock::given(method("GET"))
            .and(path(format!("/events/{}", event_id)))
            .respond_with(ResponseTemplate::new(404))
            .mount(&self.server)
            .await;
    }

    /// Answer 500 for an event fetch
    pub async fn mock_server_error(&self, event_id: EventId) {
        Mock::given(method("GET"))
            .and(path(format!("/events/{}", event_id)))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&self.server)
            .await;
    }
}

/// Mock payment gateway server
pub struct PaymentApiMock {
    pub server: MockServer,
}

impl PaymentApiMock {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Configuration pointing the HTTP gateway at this mock
    pub fn payment_config(&self) -> PaymentConfig {
        PaymentConfig {
            base_url: self.server.uri(),
            timeout_seconds: 10,
        }
    }

    /// Approve every charge
    pub async fn mock_charge_approved(&self, receipt_id: &str) {
        Mock::given(method("POST"))
            .and(path("/payments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "approved": true,
                "receipt_id": receipt_id,
                "reason": null,
            })))
            .mount(&self.server)
            .await;
    }

    /// Decline every charge
    pub async fn mock_charge_declined(&self, reason: &str) {
        Mock::given(method("POST"))
            .and(path("/payments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "approved": false,
                "receipt_id": null,
                "reason": reason,
            })))
            .mount(&self.server)
            .await;
    }

    /// Number of charge requests that reached the gateway
    pub async fn received_charge_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or(0)
    }
}
