//! Authenticated HTTP request handling.
//!
//! This module provides the common request path shared by every API
//! operation: bearer authorization, a JSON content type, status checking,
//! and JSON decoding that keeps transport failures distinguishable from
//! decode failures.

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{error, trace};

use crate::auth::AccessToken;

const REQUEST_TIMEOUT_SECONDS: u64 = 60;

/// Error emitted by API requests.
///
/// Non-2xx responses are mapped to `HttpError` together with transport
/// failures; the contract does not distinguish 4xx from 5xx. Either kind is
/// fatal to the run: there is no retry and no backoff.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// HTTP client wrapper holding the bearer token for the run.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    access_token: AccessToken,
}

impl HttpClient {
    pub fn new(access_token: AccessToken) -> Result<HttpClient, ApiError> {
        let client = Client::builder()
            .user_agent("dcimcli")
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECONDS))
            .build()?;

        Ok(HttpClient {
            client,
            access_token,
        })
    }

    /// Make an authenticated GET request and decode the JSON response.
    ///
    /// A single attempt: transport errors and non-2xx statuses surface as
    /// `HttpError`, an unparseable body as `JsonError`.
    pub async fn get_json<T>(&self, url: &str, query: &[(&str, String)]) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        trace!("GET {}", url);

        let response = self
            .client
            .get(url)
            .query(query)
            .header("Content-Type", "application/json")
            .header(
                "Authorization",
                format!("Bearer {}", self.access_token.as_str()),
            )
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::HttpError(response.error_for_status().unwrap_err()));
        }

        let body = response.text().await?;
        trace!("Raw response text for deserialization: {}", body);

        decode_payload(&body)
    }
}

/// Decode a response body, logging the raw payload on failure.
pub fn decode_payload<T>(body: &str) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    match serde_json::from_str::<T>(body) {
        Ok(value) => Ok(value),
        Err(e) => {
            error!("Failed to decode response: {}. Raw response: {}", e, body);
            Err(ApiError::JsonError(e))
        }
    }
}
