//! HTTP client for the arithmetic service

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::{Arithmetic, CalculateRequest, CalculateResponse, ErrorBody, RemoteError};
use crate::core::{CalcResult, Operation};

/// Delegates arithmetic to `POST {base_url}/api/calculate`.
///
/// Network failures, non-success statuses and undecodable bodies all become
/// [`RemoteError`]s. The client never falls back to an operand as the answer.
#[derive(Debug, Clone)]
pub struct HttpArithmetic {
    base_url: String,
    client: reqwest::Client,
}

impl HttpArithmetic {
    /// Default request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a client for the service at `base_url` (e.g. `http://localhost:5000`)
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Self::DEFAULT_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self::with_client(base_url, client)
    }

    /// Creates a client with a custom reqwest client
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Returns the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!("{}/api/calculate", self.base_url)
    }

    /// Sends one request and decodes the answer
    pub async fn send(&self, request: &CalculateRequest) -> Result<CalculateResponse, RemoteError> {
        let url = self.endpoint();
        debug!(
            %url,
            operation = request.operation.wire_name(),
            a = request.a,
            b = request.b,
            "delegating operation"
        );

        let resp = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let error = match serde_json::from_str::<ErrorBody>(&body) {
                Ok(ErrorBody { error }) => RemoteError::Rejected(error),
                Err(_) => RemoteError::Status {
                    status: status.as_u16(),
                    message: if body.is_empty() {
                        status.canonical_reason().unwrap_or_default().to_string()
                    } else {
                        body
                    },
                },
            };
            warn!(%url, status = status.as_u16(), %error, "arithmetic service failed");
            return Err(error);
        }

        resp.json::<CalculateResponse>()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))
    }
}

#[async_trait]
impl Arithmetic for HttpArithmetic {
    async fn calculate(&self, op: Operation, a: f64, b: f64) -> CalcResult<f64> {
        let request = CalculateRequest {
            operation: op,
            a,
            b,
        };
        let response = self.send(&request).await?;
        Ok(response.result)
    }
}
