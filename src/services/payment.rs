//! Payment gate
//!
//! Sub-workflow collecting and submitting payment details for paid events.
//! Field formats are validated locally before the gateway is contacted, and
//! re-invocation for the same participation is refused while an attempt is
//! in flight. Each accepted invocation is a fresh charge request; the gate
//! keeps no state beyond the in-flight attempt.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use crate::api::PaymentCollaborator;
use crate::models::{ChargeOutcome, ChargeRequest, Event, Participation, ParticipationId, PaymentDetails};
use crate::utils::errors::{GatherlyError, Result};
use crate::utils::logging::log_payment_attempt;

pub struct PaymentGate {
    gateway: Arc<dyn PaymentCollaborator>,
    in_flight: Mutex<HashSet<ParticipationId>>,
}

/// Releases the in-flight marker when the attempt resolves
struct AttemptGuard<'a> {
    registry: &'a Mutex<HashSet<ParticipationId>>,
    id: ParticipationId,
}

impl Drop for AttemptGuard<'_> {
    fn drop(&mut self) {
        lock_attempts(self.registry).remove(&self.id);
    }
}

fn lock_attempts<'a>(
    registry: &'a Mutex<HashSet<ParticipationId>>,
) -> MutexGuard<'a, HashSet<ParticipationId>> {
    match registry.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

impl PaymentGate {
    pub fn new(gateway: Arc<dyn PaymentCollaborator>) -> Self {
        Self {
            gateway,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    fn begin(&self, id: ParticipationId) -> Result<AttemptGuard<'_>> {
        let mut attempts = lock_attempts(&self.in_flight);
        if !attempts.insert(id) {
            return Err(GatherlyError::OperationInProgress);
        }
        Ok(AttemptGuard {
            registry: &self.in_flight,
            id,
        })
    }

    /// Charge the event price for one participation.
    ///
    /// Malformed card fields are rejected here without any gateway call.
    /// A decline is returned as an `Ok` outcome for the state machine to act
    /// on; transport failures propagate as retryable errors.
    pub async fn collect_payment(
        &self,
        event: &Event,
        participation: &Participation,
        details: &PaymentDetails,
    ) -> Result<ChargeOutcome> {
        details.validate()?;

        if !event.is_paid {
            return Err(GatherlyError::PreconditionFailed(
                "The event does not require payment".to_string(),
            ));
        }
        let amount = event.price.ok_or_else(|| {
            GatherlyError::Validation("Paid event is missing a price".to_string())
        })?;

        let _attempt = self.begin(participation.id)?;
        debug!(
            participation_id = %participation.id,
            event_id = %event.id,
            amount = amount,
            "Submitting charge"
        );

        let charge = ChargeRequest::new(event.id, details, amount);
        let outcome = self.gateway.submit_payment(charge).await?;

        log_payment_attempt(
            participation.id,
            amount,
            matches!(outcome, ChargeOutcome::Approved { .. }),
        );
        Ok(outcome)
    }
}
