//! Prediction service client.

use crate::error::{Error, Result};
use ignis_core::IgnisConfig;
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Duration;
use url::Url;

/// Anything that can answer a prediction request with the raw JSON payload.
#[allow(async_fn_in_trait)]
pub trait PredictionSource {
    /// `request_id` is already trimmed and uppercased.
    async fn fetch(&self, request_id: &str) -> Result<Value>;
}

/// HTTP client for `POST {url}` with body `{"id": ...}`. One attempt, no retries.
#[derive(Debug, Clone)]
pub struct PredictionClient {
    http: Client,
    url: Url,
}

impl PredictionClient {
    pub fn new(url: Url, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::transport(&url, &e))?;
        Ok(Self { http, url })
    }

    pub fn from_config(config: &IgnisConfig) -> Result<Self> {
        Self::new(config.prediction_url()?, config.prediction_timeout())
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl PredictionSource for PredictionClient {
    async fn fetch(&self, request_id: &str) -> Result<Value> {
        tracing::info!(url = %self.url, request_id, "requesting prediction");
        let response = self
            .http
            .post(self.url.clone())
            .json(&json!({ "id": request_id }))
            .send()
            .await
            .map_err(|e| Error::transport(&self.url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: self.url.to_string(),
                status: status.as_u16(),
            });
        }
        response
            .json::<Value>()
            .await
            .map_err(|e| Error::decode(&self.url, &e))
    }
}
