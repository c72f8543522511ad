//! `HttpExchange` adapter over a reqwest client

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, Method, Response};
use responsys_core::endpoints::redact_url;
use responsys_core::{ExchangeFailure, HttpExchange, HttpRequest, HttpResponse};
use responsys_domain::{HttpMethod, ResponsysConfig, ResponsysError};
use tracing::{debug, warn};

/// `HttpExchange` backed by reqwest.
///
/// Performs a single attempt per request; the configured timeout covers the
/// whole exchange including the body.
#[derive(Clone, Debug)]
pub struct ReqwestExchange {
    client: ReqwestClient,
}

impl ReqwestExchange {
    /// Start building a new exchange.
    pub fn builder() -> ReqwestExchangeBuilder {
        ReqwestExchangeBuilder::default()
    }

    /// Exchange configured with the timeout, TLS policy and user agent of
    /// `config`.
    pub fn from_config(config: &ResponsysConfig) -> Result<Self, ResponsysError> {
        Self::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .verify_tls(config.verify_tls)
            .build()
    }

    async fn read_response(response: Response, started: Instant) -> Result<HttpResponse, ExchangeFailure> {
        let status = response.status().as_u16();
        let headers = render_response_headers(&response);
        let body = response
            .text()
            .await
            .map_err(|err| ExchangeFailure::new(describe(err), started.elapsed()))?;

        Ok(HttpResponse { status, headers, body, elapsed: started.elapsed() })
    }
}

#[async_trait]
impl HttpExchange for ReqwestExchange {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ExchangeFailure> {
        let mut builder = self.client.request(to_reqwest_method(request.method), &request.url);
        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let started = Instant::now();
        debug!(method = %request.method, url = %redact_url(&request.url), "sending HTTP request");

        match builder.send().await {
            Ok(response) => {
                debug!(status = %response.status(), "received HTTP response");
                Self::read_response(response, started).await
            }
            Err(err) => {
                let message = describe(err);
                debug!(error = %message, "HTTP request failed");
                Err(ExchangeFailure::new(message, started.elapsed()))
            }
        }
    }
}

/// Builder for [`ReqwestExchange`].
#[derive(Debug)]
pub struct ReqwestExchangeBuilder {
    timeout: Duration,
    user_agent: Option<String>,
    verify_tls: bool,
}

impl Default for ReqwestExchangeBuilder {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(30), user_agent: None, verify_tls: true }
    }
}

impl ReqwestExchangeBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Disabling verification skips both certificate and hostname checks.
    pub fn verify_tls(mut self, enabled: bool) -> Self {
        self.verify_tls = enabled;
        self
    }

    pub fn build(self) -> Result<ReqwestExchange, ResponsysError> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        if !self.verify_tls {
            warn!("TLS certificate and hostname verification is disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder
            .build()
            .map_err(|err| ResponsysError::Config(format!("failed to build HTTP client: {err}")))?;

        Ok(ReqwestExchange { client })
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
    }
}

/// Status line followed by `name: value` lines.
fn render_response_headers(response: &Response) -> String {
    let status = response.status();
    let mut lines = vec![format!(
        "{:?} {} {}",
        response.version(),
        status.as_u16(),
        status.canonical_reason().unwrap_or_default()
    )
    .trim_end()
    .to_string()];

    for (name, value) in response.headers() {
        lines.push(format!("{}: {}", name, String::from_utf8_lossy(value.as_bytes())));
    }
    lines.join("\n")
}

/// Failure text without the request URL, which may carry credentials.
fn describe(err: reqwest::Error) -> String {
    let err = err.without_url();
    if err.is_timeout() {
        format!("request timed out: {err}")
    } else if err.is_connect() {
        format!("connection failed: {err}")
    } else {
        format!("HTTP request failed: {err}")
    }
}
