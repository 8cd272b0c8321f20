//! Caller-side state for a prediction flow: one live outcome slot and a
//! busy gate preventing overlapping requests.

use thiserror::Error;
use tracing::debug;

use crate::api::{ForecastClient, RegressionResponse};
use crate::matrix::normalize;
use crate::utils::PredictConfig;

/// Outcome of the most recent prediction attempt.
///
/// Exactly one outcome is live at a time; starting a new attempt clears
/// the previous one before anything is sent.
#[derive(Debug, Clone)]
pub enum OperationOutcome {
    Success(RegressionResponse),
    Failure(String),
}

/// A prediction is already in flight. There is no cancellation: the
/// pending request runs to completion, so a second one would race it for
/// the outcome slot.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("a prediction is already in flight")]
pub struct SessionBusy;

/// Owns the single live [`OperationOutcome`] for one caller session.
#[derive(Debug, Default)]
pub struct PredictionSession {
    outcome: Option<OperationOutcome>,
    in_flight: bool,
}

impl PredictionSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a request is currently pending.
    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    /// The live outcome, if any attempt has completed.
    pub fn outcome(&self) -> Option<&OperationOutcome> {
        self.outcome.as_ref()
    }

    /// Take the live outcome, leaving the slot empty.
    pub fn take_outcome(&mut self) -> Option<OperationOutcome> {
        self.outcome.take()
    }

    /// Normalize `raw` and request one regression prediction.
    ///
    /// Rejects with [`SessionBusy`] while a request is pending. The
    /// outcome slot is cleared before dispatch and overwritten wholesale
    /// when the attempt resolves; every error kind folds into
    /// [`OperationOutcome::Failure`] here and nothing propagates as a
    /// fault. The busy gate is released on success and failure alike.
    pub async fn run(
        &mut self,
        client: &ForecastClient,
        raw: &str,
        params: &PredictConfig,
    ) -> Result<&OperationOutcome, SessionBusy> {
        if self.in_flight {
            return Err(SessionBusy);
        }
        self.in_flight = true;
        self.outcome = None;

        let result = match normalize(raw, params.mode, params.framework) {
            Ok(matrix) => client
                .predict_regression(params.tag, params.framework, matrix)
                .await
                .map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        let outcome = match result {
            Ok(response) => OperationOutcome::Success(response),
            Err(message) => {
                debug!("prediction attempt failed: {}", message);
                OperationOutcome::Failure(message)
            }
        };

        self.in_flight = false;
        Ok(self.outcome.insert(outcome))
    }
}
