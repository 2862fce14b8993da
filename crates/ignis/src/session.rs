//! The current company, replaced wholesale by each prediction fetch.
//!
//! Every submission gets a generation number. A result that arrives after a newer one has
//! already been applied is discarded, so a slow response can never overwrite a fresh one.

use crate::client::PredictionSource;
use crate::error::{Error, Result};
use ignis_core::cnpj;
use ignis_core::{CompanySnapshot, IgnisConfig, PartnerNetwork, Prediction};
use serde_json::Value;

/// Ticket for one in-flight prediction request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    generation: u64,
    request_id: String,
}

impl Submission {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Identifier to send to the prediction service.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The result replaced the session data.
    Current,
    /// A newer result was already applied; this one was dropped.
    Stale,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    validate_identifier: bool,
    prediction: Prediction,
    issued: u64,
    applied: u64,
}

impl Session {
    pub fn new(validate_identifier: bool) -> Self {
        Self {
            validate_identifier,
            ..Self::default()
        }
    }

    pub fn from_config(config: &IgnisConfig) -> Self {
        Self::new(config.validate_identifier())
    }

    pub fn prediction(&self) -> &Prediction {
        &self.prediction
    }

    pub fn snapshot(&self) -> &CompanySnapshot {
        &self.prediction.snapshot
    }

    pub fn network(&self) -> &PartnerNetwork {
        &self.prediction.network
    }

    /// Generation of the last applied result (0 before any).
    pub fn generation(&self) -> u64 {
        self.applied
    }

    /// Validates `raw` and issues a ticket. Invalid input never reaches the network.
    pub fn begin(&mut self, raw: &str) -> Result<Submission> {
        if self.validate_identifier && !cnpj::validate(raw) {
            tracing::warn!(raw, "rejecting invalid CNPJ");
            return Err(Error::InvalidIdentifier {
                raw: raw.to_string(),
            });
        }
        let request_id = cnpj::request_id(raw);
        if request_id.is_empty() {
            return Err(Error::InvalidIdentifier {
                raw: raw.to_string(),
            });
        }
        self.issued += 1;
        tracing::info!(generation = self.issued, request_id = %request_id, "prediction submitted");
        Ok(Submission {
            generation: self.issued,
            request_id,
        })
    }

    /// Applies the outcome of `ticket`'s fetch.
    ///
    /// Stale outcomes, successful or not, are dropped. A current failure resets the session to
    /// defaults and hands the error back.
    pub fn complete(&mut self, ticket: &Submission, result: Result<Value>) -> Result<Applied> {
        if ticket.generation <= self.applied {
            tracing::debug!(
                generation = ticket.generation,
                applied = self.applied,
                "discarding stale prediction result"
            );
            return Ok(Applied::Stale);
        }
        self.applied = ticket.generation;
        match result {
            Ok(response) => {
                self.prediction = Prediction::from_response(&response);
                Ok(Applied::Current)
            }
            Err(err) => {
                tracing::error!(%err, request_id = %ticket.request_id, "prediction fetch failed");
                self.prediction = Prediction::default();
                Err(err)
            }
        }
    }

    /// `begin`, fetch from `source`, then `complete`.
    pub async fn submit<P: PredictionSource>(&mut self, source: &P, raw: &str) -> Result<Applied> {
        let ticket = self.begin(raw)?;
        let result = source.fetch(ticket.request_id()).await;
        self.complete(&ticket, result)
    }

    pub fn reset(&mut self) {
        self.prediction = Prediction::default();
    }
}
