//! HTTP identity verifier.
//!
//! Implements `IdentityVerifier` from `synthik-core` against an external
//! identity service. The service exposes a verification endpoint that takes
//! the session token as a bearer credential and returns the owning user id.

use reqwest::StatusCode;
use serde::Deserialize;

use synthik_core::identity::IdentityVerifier;
use synthik_types::error::IdentityError;

/// Identity verifier backed by an HTTP verification endpoint.
///
/// Sends `GET {verify_url}` with `Authorization: Bearer <token>`. A 200
/// response carries the owning user id; 401/403 mean the token is invalid.
#[derive(Debug, Clone)]
pub struct HttpIdentityVerifier {
    http: reqwest::Client,
    verify_url: String,
}

impl HttpIdentityVerifier {
    /// Create a verifier for the given verification endpoint URL.
    pub fn new(verify_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            verify_url: verify_url.into(),
        }
    }
}

/// Wire shape of a successful verification response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifyResponse {
    user_id: Option<String>,
}

impl IdentityVerifier for HttpIdentityVerifier {
    async fn verify(&self, token: &str) -> Result<Option<String>, IdentityError> {
        let response = self
            .http
            .get(&self.verify_url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| IdentityError::Unreachable(e.to_string()))?;

        match response.status() {
            StatusCode::OK => {
                let body: VerifyResponse = response
                    .json()
                    .await
                    .map_err(|e| IdentityError::Verification(e.to_string()))?;
                Ok(body.user_id)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(None),
            status => Err(IdentityError::Verification(format!(
                "identity service returned {status}"
            ))),
        }
    }
}
