//! Shared test helpers for `responsys-core` integration tests.
//!
//! Provides a mock exchange that answers by URL path and a recorder that
//! always fails, so flow tests can focus on behaviour instead of wiring.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use responsys_core::{
    ApiSettings, ExchangeFailure, HttpExchange, HttpRequest, HttpResponse, MemoryTransactionLog,
    RecorderError, ResponsysApi, Session, TransactionRecorder, TransportClient,
};
use responsys_domain::{Credentials, TransactionRecord};
use serde_json::Value;

pub const LOGIN_URL: &str = "https://login.example.com/";
pub const SERVER_URL: &str = "https://api.example.com/";

/// Canned reply for requests whose path ends with a given suffix.
#[derive(Clone)]
enum Reply {
    Body(u16, String),
    Failure(String),
}

/// Mock exchange routing on the URL path.
///
/// Routes registered later for the same suffix take precedence, so a test
/// can change an answer midway.
#[derive(Default)]
pub struct MockExchange {
    routes: Mutex<Vec<(String, Reply)>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockExchange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_json(&self, path_suffix: &str, status: u16, body: Value) {
        self.respond_body(path_suffix, status, &body.to_string());
    }

    pub fn respond_body(&self, path_suffix: &str, status: u16, body: &str) {
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((path_suffix.to_string(), Reply::Body(status, body.to_string())));
    }

    pub fn fail(&self, path_suffix: &str, message: &str) {
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((path_suffix.to_string(), Reply::Failure(message.to_string())));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Requests whose path ends with `path_suffix`.
    pub fn requests_to(&self, path_suffix: &str) -> Vec<HttpRequest> {
        self.requests().into_iter().filter(|r| path_of(&r.url).ends_with(path_suffix)).collect()
    }
}

fn path_of(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

#[async_trait]
impl HttpExchange for MockExchange {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ExchangeFailure> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).push(request.clone());

        let reply = self
            .routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .rev()
            .find(|(suffix, _)| path_of(&request.url).ends_with(suffix.as_str()))
            .map(|(_, reply)| reply.clone());

        match reply {
            Some(Reply::Body(status, body)) => Ok(HttpResponse {
                status,
                headers: format!("HTTP/1.1 {status}"),
                body,
                elapsed: Duration::from_millis(3),
            }),
            Some(Reply::Failure(message)) => Err(ExchangeFailure::new(message, Duration::ZERO)),
            None => Err(ExchangeFailure::new(
                format!("no route for {}", request.url),
                Duration::ZERO,
            )),
        }
    }
}

/// Recorder that rejects every record.
pub struct BrokenRecorder;

#[async_trait]
impl TransactionRecorder for BrokenRecorder {
    async fn record(&self, _record: &TransactionRecord) -> Result<(), RecorderError> {
        Err(RecorderError::Io("permission denied".into()))
    }
}

/// Fully wired facade over `exchange`.
pub struct Harness {
    pub exchange: Arc<MockExchange>,
    pub log: Arc<MemoryTransactionLog>,
    pub session: Arc<Session>,
    pub api: ResponsysApi,
}

impl Harness {
    pub fn new(exchange: MockExchange) -> Self {
        let log = Arc::new(MemoryTransactionLog::new());
        Self::with_recorder(exchange, log.clone(), log)
    }

    pub fn with_recorder(
        exchange: MockExchange,
        log: Arc<MemoryTransactionLog>,
        recorder: Arc<dyn TransactionRecorder>,
    ) -> Self {
        let exchange = Arc::new(exchange);
        let transport =
            Arc::new(TransportClient::new(exchange.clone(), recorder, "responsys-tests/1.0"));
        let session = Arc::new(Session::new(
            Arc::clone(&transport),
            Credentials::new(LOGIN_URL, "api-user", "s3cret"),
        ));
        let api = ResponsysApi::new(
            transport,
            session.clone(),
            ApiSettings {
                server_url: SERVER_URL.into(),
                database_id: "DB1".into(),
                list_folder: "MasterData".into(),
            },
        );
        Self { exchange, log, session, api }
    }
}

/// Exchange that authenticates with `tok-1`.
pub fn authenticated_exchange() -> MockExchange {
    let exchange = MockExchange::new();
    exchange.respond_json("/auth/token", 200, serde_json::json!({ "authToken": "tok-1" }));
    exchange
}
