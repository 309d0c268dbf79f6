//! HTTP signaling client.
//!
//! The signaling endpoint is a single synchronous HTTP round-trip:
//!
//! ```text
//! POST <signaling_url>
//! Content-Type: application/json
//!
//! {"offer": "<sdp>", "screen": 0}
//!
//! 200 OK
//! {"answer": "<sdp>"}
//! ```
//!
//! Any transport failure or non-2xx status is a [`SignalingError`]; the
//! negotiator turns it into a `NegotiationError`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::negotiate_session::{SignalingClient, SignalingError};
use crate::domain::ScreenSelector;

#[derive(Serialize)]
struct OfferRequest<'a> {
    offer: &'a str,
    screen: ScreenSelector,
}

#[derive(Deserialize)]
struct AnswerResponse {
    answer: String,
}

/// [`SignalingClient`] that POSTs the offer to an HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpSignalingClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpSignalingClient {
    /// Creates a client for `endpoint`.
    ///
    /// No request timeout is set; callers that need one wrap the negotiation.
    ///
    /// # Errors
    ///
    /// Returns [`SignalingError::Request`] if the HTTP client cannot be built
    /// (e.g. the TLS backend fails to initialise).
    pub fn new(endpoint: impl Into<String>) -> Result<Self, SignalingError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| SignalingError::Request(e.to_string()))?;
        Ok(Self::with_client(http, endpoint))
    }

    /// Creates a client reusing an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SignalingClient for HttpSignalingClient {
    async fn exchange(
        &self,
        offer_sdp: String,
        screen: ScreenSelector,
    ) -> Result<String, SignalingError> {
        debug!(
            endpoint = %self.endpoint,
            offer_len = offer_sdp.len(),
            %screen,
            "posting offer to signaling endpoint"
        );

        let resp = self
            .http
            .post(&self.endpoint)
            .json(&OfferRequest {
                offer: &offer_sdp,
                screen,
            })
            .send()
            .await
            .map_err(|e| SignalingError::Request(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SignalingError::Status {
                status: status.as_u16(),
            });
        }

        let body: AnswerResponse = resp
            .json()
            .await
            .map_err(|e| SignalingError::InvalidResponse(e.to_string()))?;
        Ok(body.answer)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offer_request_body_shape() {
        let body = serde_json::to_value(OfferRequest {
            offer: "v=0",
            screen: ScreenSelector(1),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"offer": "v=0", "screen": 1}));
    }

    #[test]
    fn test_answer_response_ignores_extra_fields() {
        let parsed: AnswerResponse =
            serde_json::from_str(r#"{"answer":"v=0","session":"abc"}"#).unwrap();
        assert_eq!(parsed.answer, "v=0");
    }

    #[test]
    fn test_with_client_keeps_endpoint() {
        let client = HttpSignalingClient::with_client(
            reqwest::Client::new(),
            "https://desk.example.com/api/session",
        );
        assert_eq!(client.endpoint(), "https://desk.example.com/api/session");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_request_error() {
        // Arrange: port 1 on loopback refuses connections
        let client = HttpSignalingClient::new("http://127.0.0.1:1/api/session").unwrap();

        // Act
        let result = client.exchange("v=0".to_string(), ScreenSelector(0)).await;

        // Assert
        assert!(matches!(result, Err(SignalingError::Request(_))));
    }
}
