use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::{trace, warn};

use super::{VerificationOracle, VerificationOutcome, decode_payload};
use crate::errors::{EmailFinderError, Result};

/// Oracle backed by a check-if-email-exists compatible HTTP API.
#[derive(Debug, Clone)]
pub struct HttpOracle {
    client: Client,
    url: String,
    timeout: Duration,
}

impl HttpOracle {
    /// `api_url` is the service base (e.g. `http://localhost:8081`), `endpoint`
    /// the check path (e.g. `/v0/check_email`).
    pub fn new(api_url: &str, endpoint: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("emailfinder/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| EmailFinderError::internal_with("failed to build HTTP client", e))?;

        let url = format!(
            "{}/{}",
            api_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        );

        Ok(Self {
            client,
            url,
            timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl VerificationOracle for HttpOracle {
    fn transport(&self) -> &'static str {
        "http"
    }

    async fn verify(&self, email: &str) -> Result<VerificationOutcome> {
        trace!(email, url = %self.url, "verifying via HTTP");

        let sent = self
            .client
            .post(&self.url)
            .timeout(self.timeout)
            .json(&json!({ "to_email": email }))
            .send()
            .await;

        let response = match sent {
            Ok(r) => r,
            Err(e) if e.is_timeout() => {
                warn!(email, timeout_ms = self.timeout.as_millis() as u64, "verification timed out");
                return Ok(VerificationOutcome::unknown(email));
            }
            Err(e) => return Err(EmailFinderError::oracle_transport(self.transport(), email, e)),
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(b) => b,
            Err(e) => {
                warn!(email, error = %e, "failed to read verification response");
                return Ok(VerificationOutcome::unknown(email));
            }
        };

        if !status.is_success() {
            warn!(
                email,
                status = status.as_u16(),
                response = %String::from_utf8_lossy(&body),
                "verification API returned non-success status"
            );
            return Ok(VerificationOutcome::unknown(email));
        }

        match decode_payload(self.transport(), email, &body) {
            Ok(reply) => Ok(reply.into_outcome(email)),
            Err(e) => {
                warn!(email, error = %e, "undecodable verification response");
                Ok(VerificationOutcome::unknown(email))
            }
        }
    }
}
