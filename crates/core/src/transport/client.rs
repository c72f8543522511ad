//! Validating transport client
//!
//! Wraps an [`HttpExchange`] with the request/response contract the Responsys
//! API needs:
//!
//! - default `Content-Type` and `User-Agent` headers, caller headers win
//! - JSON body for POST/PUT
//! - one audit record per call, written before the outcome is returned
//! - classification of failures into transport, protocol and remote errors
//!
//! Authentication is the caller's business; this client never adds an
//! `Authorization` header on its own.

use std::sync::Arc;

use responsys_domain::constants::{
    CONTENT_TYPE_JSON, ERROR_CODE_FIELD, ERROR_DETAIL_FIELD, HEADER_CONTENT_TYPE,
    HEADER_USER_AGENT, INVALID_RESPONSE_MESSAGE,
};
use responsys_domain::{HttpMethod, RequestHeaders, ResponsysError, Result, TransactionRecord};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::ports::{HttpExchange, HttpRequest};
use crate::audit::TransactionRecorder;
use crate::endpoints;

/// A request before default headers and body encoding are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub url: String,
    pub method: HttpMethod,
    pub payload: Value,
    pub headers: RequestHeaders,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>, payload: Value) -> Self {
        Self { url: url.into(), method, payload, headers: RequestHeaders::new() }
    }

    pub fn post(url: impl Into<String>, payload: Value) -> Self {
        Self::new(HttpMethod::Post, url, payload)
    }

    pub fn put(url: impl Into<String>, payload: Value) -> Self {
        Self::new(HttpMethod::Put, url, payload)
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url, Value::Null)
    }

    /// Add or replace a caller header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Sends requests, records them, and turns responses into JSON or errors.
pub struct TransportClient {
    exchange: Arc<dyn HttpExchange>,
    recorder: Arc<dyn TransactionRecorder>,
    user_agent: String,
}

impl TransportClient {
    pub fn new(
        exchange: Arc<dyn HttpExchange>,
        recorder: Arc<dyn TransactionRecorder>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self { exchange, recorder, user_agent: user_agent.into() }
    }

    /// Headers attached to every request before caller headers are merged.
    pub fn default_headers(&self) -> RequestHeaders {
        RequestHeaders::new()
            .with(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON)
            .with(HEADER_USER_AGENT, self.user_agent.as_str())
    }

    /// Send `request` and return the parsed JSON body.
    ///
    /// # Errors
    /// - `Transport` when the exchange itself fails
    /// - `Protocol` when the body is not JSON (or is JSON `null`)
    /// - `Remote` when the body carries an `errorCode`
    #[instrument(skip_all, fields(method = %request.method, url = %endpoints::redact_url(&request.url)))]
    pub async fn send(&self, request: ApiRequest) -> Result<Value> {
        let headers = self.default_headers().merged_with(&request.headers);
        let body = if request.method.sends_body() {
            Some(serde_json::to_string(&request.payload).map_err(|e| {
                ResponsysError::InvalidInput(format!("request payload is not serializable: {e}"))
            })?)
        } else {
            None
        };

        let mut record = TransactionRecord::for_request(
            request.url.as_str(),
            serde_json::to_string_pretty(&request.payload).unwrap_or_default(),
            headers.render(),
        );

        let http_request = HttpRequest { method: request.method, url: request.url, headers, body };

        debug!("sending request");
        let outcome = match self.exchange.execute(&http_request).await {
            Ok(response) => {
                debug!(status = response.status, elapsed_ms = response.elapsed.as_millis() as u64, "received response");
                record.response_status = response.status;
                record.response_headers = response.headers;
                record.response_time = response.elapsed.as_secs_f64();
                record.response = response.body.trim().to_string();
                interpret_body(&record.response)
            }
            Err(failure) => {
                record.response_time = failure.elapsed.as_secs_f64();
                record.note_error(failure.message.as_str());
                Err(ResponsysError::Transport(failure.message))
            }
        };

        match &outcome {
            Err(ResponsysError::Protocol(message)) => record.note_error(message.as_str()),
            Err(ResponsysError::Remote { detail, .. }) => record.note_error(detail.as_str()),
            _ => {}
        }

        self.persist(&record).await;

        if let Err(err) = &outcome {
            debug!(error = %err, "request failed");
        }
        outcome
    }

    async fn persist(&self, record: &TransactionRecord) {
        if let Err(err) = self.recorder.record(record).await {
            warn!(
                record_id = %record.id,
                request_uri = %endpoints::redact_url(&record.request_uri),
                error = %err,
                "failed to persist transaction record"
            );
        }
    }
}

/// Classify a response body.
fn interpret_body(body: &str) -> Result<Value> {
    let parsed: Value = serde_json::from_str(body)
        .map_err(|_| ResponsysError::Protocol(INVALID_RESPONSE_MESSAGE.to_string()))?;

    if parsed.is_null() {
        return Err(ResponsysError::Protocol(INVALID_RESPONSE_MESSAGE.to_string()));
    }

    if let Some(code) = parsed.get(ERROR_CODE_FIELD).filter(|code| !code.is_null()) {
        let code = value_text(code);
        let detail = parsed
            .get(ERROR_DETAIL_FIELD)
            .filter(|detail| !detail.is_null())
            .map_or_else(|| code.clone(), value_text);
        return Err(ResponsysError::Remote { code, detail });
    }

    Ok(parsed)
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
