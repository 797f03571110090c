//! Payment models
//!
//! Card details are validated locally before any request leaves the client;
//! a malformed field never reaches the payment gateway.

use serde::{Deserialize, Serialize};

use crate::utils::errors::{GatherlyError, Result};
use super::EventId;

/// Card and billing fields collected by the payment form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub card_number: String,
    pub card_holder_name: String,
    pub expire_month: String,
    pub expire_year: String,
    pub cvc: String,
    pub billing_address: String,
}

impl PaymentDetails {
    /// Validate field formats without contacting the gateway
    pub fn validate(&self) -> Result<()> {
        let card_number = regex::Regex::new(r"^\d{16}$")
            .map_err(|_| GatherlyError::Config("Invalid card number pattern".to_string()))?;
        if !card_number.is_match(&self.card_number) {
            return Err(GatherlyError::Validation(
                "Card number must be exactly 16 digits".to_string(),
            ));
        }

        let month = regex::Regex::new(r"^(0[1-9]|1[0-2])$")
            .map_err(|_| GatherlyError::Config("Invalid expiry month pattern".to_string()))?;
        if !month.is_match(&self.expire_month) {
            return Err(GatherlyError::Validation(
                "Expiry month must be between 01 and 12".to_string(),
            ));
        }

        let year = regex::Regex::new(r"^20\d{2}$")
            .map_err(|_| GatherlyError::Config("Invalid expiry year pattern".to_string()))?;
        if !year.is_match(&self.expire_year) {
            return Err(GatherlyError::Validation(
                "Expiry year must be a 4-digit year starting with 20".to_string(),
            ));
        }

        let cvc = regex::Regex::new(r"^\d{3}$")
            .map_err(|_| GatherlyError::Config("Invalid CVC pattern".to_string()))?;
        if !cvc.is_match(&self.cvc) {
            return Err(GatherlyError::Validation(
                "CVC must be exactly 3 digits".to_string(),
            ));
        }

        if self.card_holder_name.trim().is_empty() {
            return Err(GatherlyError::Validation(
                "Card holder name is required".to_string(),
            ));
        }

        if self.billing_address.trim().len() < 10 {
            return Err(GatherlyError::Validation(
                "Billing address must be at least 10 characters".to_string(),
            ));
        }

        Ok(())
    }
}

/// Charge request submitted to the payment gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargeRequest {
    pub event_id: EventId,
    pub card_number: String,
    pub card_holder_name: String,
    pub expire_month: String,
    pub expire_year: String,
    pub cvc: String,
    pub billing_address: String,
    /// Amount in minor currency units, equal to the event price
    pub amount: u32,
}

impl ChargeRequest {
    pub fn new(event_id: EventId, details: &PaymentDetails, amount: u32) -> Self {
        Self {
            event_id,
            card_number: details.card_number.clone(),
            card_holder_name: details.card_holder_name.clone(),
            expire_month: details.expire_month.clone(),
            expire_year: details.expire_year.clone(),
            cvc: details.cvc.clone(),
            billing_address: details.billing_address.clone(),
            amount,
        }
    }
}

/// Gateway verdict on one charge attempt.
///
/// A decline is a normal outcome, not a transport failure; transport failures
/// surface as errors from the collaborator instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChargeOutcome {
    Approved { receipt_id: String },
    Declined { reason: String },
}
