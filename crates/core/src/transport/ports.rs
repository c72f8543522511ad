//! Port interface for the raw HTTP exchange

use std::time::Duration;

use async_trait::async_trait;
use responsys_domain::{HttpMethod, RequestHeaders};
use thiserror::Error;

/// Fully prepared request handed to the exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: RequestHeaders,
    /// Serialized JSON body; `None` for body-less methods
    pub body: Option<String>,
}

/// Raw response as received on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Status line followed by `Name: value` lines
    pub headers: String,
    pub body: String,
    pub elapsed: Duration,
}

/// Low-level failure reported by the exchange (connect, TLS, timeout, ...).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ExchangeFailure {
    pub message: String,
    pub elapsed: Duration,
}

impl ExchangeFailure {
    pub fn new(message: impl Into<String>, elapsed: Duration) -> Self {
        Self { message: message.into(), elapsed }
    }
}

/// Performs exactly one HTTP round-trip.
///
/// Implementations own the timeout and TLS policy. They must not retry.
#[async_trait]
pub trait HttpExchange: Send + Sync {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ExchangeFailure>;
}
