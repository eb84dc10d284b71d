//! HTTP transport seam.
//!
//! The client only needs "POST these form parameters, give me back a JSON
//! document". [`Transport`] is that seam; [`HttpTransport`] implements it
//! with reqwest.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{header, Client};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::TransportError;
use crate::params::Params;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `params` as a form body to `url` and return the parsed JSON document.
    async fn post_form(&self, url: &str, params: &Params) -> Result<Value, TransportError>;
}

/// reqwest-backed [`Transport`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;

        Ok(Self { client })
    }

    /// Wrap an existing reqwest client (shared connection pool, custom TLS, etc.).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_form(&self, url: &str, params: &Params) -> Result<Value, TransportError> {
        let start = Instant::now();

        let response = self
            .client
            .post(url)
            .header(header::ACCEPT, "application/json")
            .form(params)
            .send()
            .await
            .map_err(|e| {
                warn!(url, error = %e, "RealTalk request failed");
                TransportError::Network(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        debug!(
            url,
            status = %status,
            duration_ms = start.elapsed().as_millis(),
            "RealTalk response"
        );

        let parsed = serde_json::from_str::<Value>(&body);

        // The service reports failures in-band, so an error status with a
        // JSON object body is still a document.
        if !status.is_success() {
            return match parsed {
                Ok(doc) if doc.is_object() => Ok(doc),
                _ => {
                    warn!(url, status = %status, "RealTalk returned an error status");
                    Err(TransportError::Status {
                        status: status.as_u16(),
                        body,
                    })
                }
            };
        }

        parsed.map_err(|e| TransportError::InvalidJson(e.to_string()))
    }
}
