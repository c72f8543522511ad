//! Test doubles for the core ports

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use responsys_domain::{AuthToken, ResponsysError, Result, TransactionRecord};
use serde_json::Value;
use tracing_subscriber::fmt::MakeWriter;

use crate::audit::{RecorderError, TransactionRecorder};
use crate::session::AccessTokenProvider;
use crate::transport::{ExchangeFailure, HttpExchange, HttpRequest, HttpResponse};

const SCRIPTED_ELAPSED: Duration = Duration::from_millis(5);

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Exchange that replays queued outcomes in order and keeps every request.
///
/// Running out of scripted outcomes yields an `ExchangeFailure`.
#[derive(Debug, Default)]
pub struct ScriptedExchange {
    outcomes: Mutex<VecDeque<std::result::Result<HttpResponse, ExchangeFailure>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedExchange {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with a raw body.
    pub fn push_body(&self, status: u16, body: impl Into<String>) {
        lock(&self.outcomes).push_back(Ok(HttpResponse {
            status,
            headers: format!("HTTP/1.1 {status}\ncontent-type: application/json"),
            body: body.into(),
            elapsed: SCRIPTED_ELAPSED,
        }));
    }

    /// Queue a response whose body is `body` serialized as JSON.
    pub fn push_json(&self, status: u16, body: Value) {
        self.push_body(status, body.to_string());
    }

    /// Queue a transport-level failure.
    pub fn push_failure(&self, message: impl Into<String>) {
        lock(&self.outcomes).push_back(Err(ExchangeFailure::new(message, SCRIPTED_ELAPSED)));
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        lock(&self.requests).clone()
    }

    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Outcomes queued but not yet consumed.
    pub fn pending(&self) -> usize {
        lock(&self.outcomes).len()
    }
}

#[async_trait]
impl HttpExchange for ScriptedExchange {
    async fn execute(
        &self,
        request: &HttpRequest,
    ) -> std::result::Result<HttpResponse, ExchangeFailure> {
        lock(&self.requests).push(request.clone());
        lock(&self.outcomes).pop_front().unwrap_or_else(|| {
            Err(ExchangeFailure::new("no scripted response left", Duration::ZERO))
        })
    }
}

/// Recorder that always fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingRecorder;

#[async_trait]
impl TransactionRecorder for FailingRecorder {
    async fn record(&self, _record: &TransactionRecord) -> std::result::Result<(), RecorderError> {
        Err(RecorderError::Unavailable("recorder is offline".into()))
    }
}

/// Token provider that hands out a fixed token without any network calls.
#[derive(Debug, Clone)]
pub struct StaticToken {
    token: Option<AuthToken>,
}

impl StaticToken {
    pub fn new(token: &str) -> Self {
        Self { token: AuthToken::parse(token) }
    }
}

#[async_trait]
impl AccessTokenProvider for StaticToken {
    async fn access_token(&self) -> Result<AuthToken> {
        self.token.clone().ok_or_else(|| {
            ResponsysError::initialization(
                responsys_domain::constants::MISSING_TOKEN_MESSAGE,
                None,
            )
        })
    }

    async fn refresh_token(&self) -> Result<AuthToken> {
        self.access_token().await
    }
}

/// In-memory log sink for a `tracing_subscriber::fmt` subscriber.
#[derive(Debug, Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&lock(&self.0)).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        lock(&self.0).extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
