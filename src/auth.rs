//! OAuth2 client-credentials token exchange.
//!
//! One token is acquired per run and reused for every subsequent request.
//! There is no refresh and no caching across runs; an authentication failure
//! of any kind is fatal to the run.

use reqwest;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

use crate::configuration::Credentials;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("authentication failed: {0}")]
    AuthFailed(String),
    #[error("token provider returned an empty access token")]
    EmptyToken,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    // Absent field decodes as empty; AccessToken::new rejects it below.
    #[serde(default)]
    pub access_token: String,
}

/// A non-empty bearer token.
///
/// Construction fails on an empty string, so holding an `AccessToken` is
/// proof that authentication produced a usable credential. Components that
/// need the API take this type, which keeps unauthenticated requests
/// unrepresentable.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: String) -> Result<AccessToken, AuthError> {
        if token.is_empty() {
            return Err(AuthError::EmptyToken);
        }
        Ok(AccessToken(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub struct AuthClient {
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl AuthClient {
    pub fn new(credentials: &Credentials) -> AuthClient {
        AuthClient {
            token_url: format!("{}/connect/token", credentials.base_url()),
            client_id: credentials.client_id().to_string(),
            client_secret: credentials.client_secret().to_string(),
        }
    }

    /// Exchange the client credentials for a bearer token.
    ///
    /// Sends `POST {instance_url}/connect/token` with a form-encoded
    /// client-credentials grant. Transport failures, non-2xx responses, and
    /// unparseable bodies all fail the exchange; so does a response without
    /// a usable `access_token` value.
    pub async fn get_access_token(&self) -> Result<AccessToken, AuthError> {
        let client = reqwest::Client::builder()
            .user_agent("dcimcli")
            .build()?;

        debug!("Requesting access token from: {}", &self.token_url);

        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
        ];

        let response = client.post(&self.token_url).form(&params).send().await?;

        let status = response.status();
        debug!("Token response status: {}", status);

        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error response body".to_string());
            error!(
                "Token request failed with status {}: {}",
                status, &error_body
            );
            return Err(AuthError::AuthFailed(format!("HTTP {} {}", status, error_body)));
        }

        // Decode from text rather than response.json() so that a non-JSON
        // body surfaces as a decode-class error, not a transport error.
        let body = response.text().await?;
        let token_response: TokenResponse = serde_json::from_str(&body)?;

        debug!("Successfully authenticated");
        AccessToken::new(token_response.access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_token_rejects_empty_string() {
        assert!(matches!(
            AccessToken::new(String::new()),
            Err(AuthError::EmptyToken)
        ));
    }

    #[test]
    fn access_token_exposes_value() {
        let token = AccessToken::new("abc123".to_string()).unwrap();
        assert_eq!(token.as_str(), "abc123");
    }

    #[test]
    fn token_response_with_access_token() {
        let response: TokenResponse =
            serde_json::from_str(r#"{"access_token":"tok","token_type":"Bearer","expires_in":3600}"#)
                .unwrap();
        assert_eq!(response.access_token, "tok");
    }

    #[test]
    fn token_response_without_access_token_decodes_as_empty() {
        // The provider answered 200 but omitted the token; the decoded value
        // is empty and must then fail AccessToken construction.
        let response: TokenResponse = serde_json::from_str(r#"{"token_type":"Bearer"}"#).unwrap();
        assert!(response.access_token.is_empty());
        assert!(AccessToken::new(response.access_token).is_err());
    }

    #[test]
    fn non_json_token_body_is_a_decode_error() {
        let result = serde_json::from_str::<TokenResponse>("<html>login</html>");
        assert!(result.is_err());
    }
}
