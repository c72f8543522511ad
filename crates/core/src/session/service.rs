//! Session service - obtains the auth token once and reuses it

use std::sync::Arc;

use async_trait::async_trait;
use responsys_domain::constants::{AUTH_TOKEN_FIELD, MISSING_TOKEN_MESSAGE};
use responsys_domain::{AuthToken, Credentials, ResponsysError, Result};
use serde_json::json;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use super::ports::AccessTokenProvider;
use crate::endpoints;
use crate::transport::{ApiRequest, TransportClient};

/// Holds the credentials and the cached token.
///
/// The token slot is guarded by an async mutex held across acquisition, so
/// concurrent first callers share a single auth round-trip.
pub struct Session {
    transport: Arc<TransportClient>,
    credentials: Credentials,
    token: Mutex<Option<AuthToken>>,
}

impl Session {
    /// Create a session without contacting the server.
    pub fn new(transport: Arc<TransportClient>, credentials: Credentials) -> Self {
        Self { transport, credentials, token: Mutex::new(None) }
    }

    /// Create a session and authenticate immediately.
    ///
    /// # Errors
    /// Any failure is returned as `ResponsysError::Initialization`, with the
    /// underlying transport/protocol/remote error as its source.
    pub async fn connect(transport: Arc<TransportClient>, credentials: Credentials) -> Result<Self> {
        let session = Self::new(transport, credentials);
        session.ensure_authenticated().await.map_err(|err| match err {
            ResponsysError::Initialization { .. } => err,
            cause => ResponsysError::initialization(MISSING_TOKEN_MESSAGE, Some(cause)),
        })?;
        Ok(session)
    }

    /// Cached token, or a freshly acquired one if none is held yet.
    ///
    /// # Errors
    /// - `Initialization` when the response has no usable `authToken`
    /// - `Transport`, `Protocol` or `Remote` from the auth request, unchanged
    pub async fn ensure_authenticated(&self) -> Result<AuthToken> {
        let mut slot = self.token.lock().await;
        if let Some(token) = slot.as_ref() {
            return Ok(token.clone());
        }

        let token = self.authenticate().await?;
        *slot = Some(token.clone());
        Ok(token)
    }

    /// Discard the cached token and fetch a new one.
    ///
    /// On failure the session is left without a token.
    ///
    /// # Errors
    /// Same as [`ensure_authenticated`](Self::ensure_authenticated).
    pub async fn reauthenticate(&self) -> Result<AuthToken> {
        let mut slot = self.token.lock().await;
        *slot = None;

        let token = self.authenticate().await?;
        *slot = Some(token.clone());
        Ok(token)
    }

    pub async fn current_token(&self) -> Option<AuthToken> {
        self.token.lock().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.token.lock().await.is_some()
    }

    /// Forget the cached token; the next call authenticates again.
    pub async fn invalidate(&self) {
        self.token.lock().await.take();
    }

    pub fn username(&self) -> &str {
        &self.credentials.username
    }

    #[instrument(skip(self), fields(username = %self.credentials.username))]
    async fn authenticate(&self) -> Result<AuthToken> {
        let url = endpoints::auth_token_url(&self.credentials)?;
        debug!("requesting auth token");

        let response = self.transport.send(ApiRequest::post(url, json!([]))).await?;

        let token = response
            .get(AUTH_TOKEN_FIELD)
            .and_then(serde_json::Value::as_str)
            .and_then(AuthToken::parse)
            .ok_or_else(|| ResponsysError::initialization(MISSING_TOKEN_MESSAGE, None))?;

        info!("authenticated with Responsys");
        Ok(token)
    }
}

#[async_trait]
impl AccessTokenProvider for Session {
    async fn access_token(&self) -> Result<AuthToken> {
        self.ensure_authenticated().await
    }

    async fn refresh_token(&self) -> Result<AuthToken> {
        self.reauthenticate().await
    }
}
