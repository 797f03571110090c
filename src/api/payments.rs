//! HTTP payment gateway client
//!
//! Submits charge requests to the payment collaborator. The gateway answers
//! with an approval verdict in the body; declines are business outcomes,
//! while transport and server failures surface as retryable errors.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::PaymentConfig;
use crate::models::{ChargeOutcome, ChargeRequest};
use crate::utils::errors::{GatherlyError, Result};
use super::PaymentCollaborator;

/// Gateway response structure
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChargeResponse {
    approved: bool,
    receipt_id: Option<String>,
    reason: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HttpPaymentGateway {
    client: Client,
    base_url: url::Url,
}

impl HttpPaymentGateway {
    /// Create a new gateway client with the configured timeout
    pub fn new(config: &PaymentConfig) -> Result<Self> {
        let base_url = url::Url::parse(&config.base_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("Gatherly/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(GatherlyError::Http)?;

        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl PaymentCollaborator for HttpPaymentGateway {
    async fn submit_payment(&self, charge: ChargeRequest) -> Result<ChargeOutcome> {
        let url = self.base_url.join("payments")?;
        debug!(event_id = %charge.event_id, amount = charge.amount, "Submitting charge request");

        let response = self
            .client
            .post(url)
            .json(&charge)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatherlyError::Timeout
                } else if e.is_connect() {
                    GatherlyError::Gateway("Payment gateway unreachable".to_string())
                } else {
                    GatherlyError::Http(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GatherlyError::Gateway(format!("HTTP {}: {}", status, body)));
        }

        let verdict = response
            .json::<ChargeResponse>()
            .await
            .map_err(|e| GatherlyError::Gateway(format!("Invalid gateway payload: {}", e)))?;

        if verdict.approved {
            let receipt_id = verdict.receipt_id.ok_or_else(|| {
                GatherlyError::Gateway("Approved charge missing receipt id".to_string())
            })?;
            Ok(ChargeOutcome::Approved { receipt_id })
        } else {
            let reason = verdict
                .reason
                .unwrap_or_else(|| "Declined by gateway".to_string());
            warn!(event_id = %charge.event_id, reason = %reason, "Charge declined");
            Ok(ChargeOutcome::Declined { reason })
        }
    }
}
