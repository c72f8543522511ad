//! Audit record for a single outbound HTTP call

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Full before/after state of one request, written once to the audit sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: Uuid,
    pub recorded_at: DateTime<Utc>,
    pub request_uri: String,
    /// Request payload as pretty-printed JSON
    pub request: String,
    /// `Name: value` lines
    pub request_headers: String,
    /// `0` when no response was received
    pub response_status: u16,
    /// Status line followed by `Name: value` lines
    pub response_headers: String,
    /// Seconds from send to full body
    pub response_time: f64,
    pub response: String,
    pub response_error: Option<String>,
}

impl TransactionRecord {
    /// Record for a request about to be sent; response fields start empty.
    pub fn for_request(
        request_uri: impl Into<String>,
        request: impl Into<String>,
        request_headers: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            recorded_at: Utc::now(),
            request_uri: request_uri.into(),
            request: request.into(),
            request_headers: request_headers.into(),
            response_status: 0,
            response_headers: String::new(),
            response_time: 0.0,
            response: String::new(),
            response_error: None,
        }
    }

    /// Set `response_error` unless one is already recorded.
    pub fn note_error(&mut self, error: impl Into<String>) {
        if self.response_error.as_deref().map_or(true, str::is_empty) {
            self.response_error = Some(error.into());
        }
    }

    pub fn is_error(&self) -> bool {
        self.response_error.is_some()
    }
}
