//! HTTP event repository client
//!
//! Speaks the event service REST API: event snapshots are read with
//! `GET /events/{id}`, participations are created with
//! `POST /events/{id}/participants`, and moderation or lifecycle status
//! changes go through
//! `PATCH /events/{id}/participants/{participantId}/status?status=...`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::config::ApiConfig;
use crate::models::{CreateParticipationRequest, Event, EventId, Participation, ParticipationId, ParticipationStatus, UserId};
use crate::utils::errors::{GatherlyError, Result};
use super::EventRepository;

#[derive(Debug, Clone)]
pub struct HttpEventRepository {
    client: Client,
    base_url: url::Url,
}

impl HttpEventRepository {
    /// Create a new repository client with the configured timeout
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = url::Url::parse(&config.base_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("Gatherly/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(GatherlyError::Http)?;

        Ok(Self { client, base_url })
    }

    fn event_url(&self, event_id: EventId) -> Result<url::Url> {
        Ok(self.base_url.join(&format!("events/{}", event_id))?)
    }

    fn participants_url(&self, event_id: EventId) -> Result<url::Url> {
        Ok(self.base_url.join(&format!("events/{}/participants", event_id))?)
    }

    fn status_url(&self, event_id: EventId, participation_id: ParticipationId) -> Result<url::Url> {
        Ok(self.base_url.join(&format!(
            "events/{}/participants/{}/status",
            event_id, participation_id
        ))?)
    }

    fn classify_send_error(e: reqwest::Error) -> GatherlyError {
        if e.is_timeout() {
            GatherlyError::Timeout
        } else if e.is_connect() {
            GatherlyError::Repository("Event repository unreachable".to_string())
        } else {
            GatherlyError::Http(e)
        }
    }
}

#[async_trait]
impl EventRepository for HttpEventRepository {
    async fn get_event(&self, event_id: EventId) -> Result<Event> {
        let url = self.event_url(event_id)?;
        debug!(event_id = %event_id, url = %url, "Fetching event snapshot");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(Self::classify_send_error)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(GatherlyError::EventNotFound { event_id });
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GatherlyError::Repository(format!("HTTP {}: {}", status, body)));
        }

        let event = response
            .json::<Event>()
            .await
            .map_err(|e| GatherlyError::Repository(format!("Invalid event payload: {}", e)))?;

        Ok(event)
    }

    async fn create_participation(
        &self,
        event_id: EventId,
        user_id: UserId,
        status: ParticipationStatus,
    ) -> Result<Participation> {
        let url = self.participants_url(event_id)?;
        debug!(event_id = %event_id, user_id = %user_id, status = %status, "Creating participation");

        let body = CreateParticipationRequest { user_id, status };
        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(Self::classify_send_error)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(GatherlyError::EventNotFound { event_id });
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GatherlyError::Repository(format!("HTTP {}: {}", status, body)));
        }

        let participation = response
            .json::<Participation>()
            .await
            .map_err(|e| GatherlyError::Repository(format!("Invalid participation payload: {}", e)))?;

        Ok(participation)
    }

    async fn update_participation_status(
        &self,
        event_id: EventId,
        participation_id: ParticipationId,
        status: ParticipationStatus,
    ) -> Result<Participation> {
        let url = self.status_url(event_id, participation_id)?;
        debug!(
            event_id = %event_id,
            participation_id = %participation_id,
            status = %status,
            "Updating participation status"
        );

        let response = self
            .client
            .patch(url)
            .query(&[("status", status.as_str())])
            .send()
            .await
            .map_err(Self::classify_send_error)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(GatherlyError::ParticipationNotFound { participation_id });
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GatherlyError::Repository(format!("HTTP {}: {}", status, body)));
        }

        let participation = response
            .json::<Participation>()
            .await
            .map_err(|e| GatherlyError::Repository(format!("Invalid participation payload: {}", e)))?;

        Ok(participation)
    }
}
