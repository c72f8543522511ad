//! Ready-to-use client wired from configuration

use std::sync::Arc;

use responsys_core::{
    ApiSettings, HttpExchange, ResponsysApi, Session, TransactionRecorder, TransportClient,
};
use responsys_domain::{AuthToken, Credentials, OptionalData, ResponsysConfig, Result};
use serde_json::Value;
use tracing::info;

use crate::http::ReqwestExchange;

fn transport(
    config: &ResponsysConfig,
    exchange: Arc<dyn HttpExchange>,
    recorder: Arc<dyn TransactionRecorder>,
) -> Arc<TransportClient> {
    Arc::new(TransportClient::new(exchange, recorder, config.user_agent.as_str()))
}

fn credentials(config: &ResponsysConfig) -> Credentials {
    Credentials::new(config.login_url.as_str(), config.username.as_str(), config.password.as_str())
}

/// Facade, session and transport assembled over a reqwest exchange.
pub struct ResponsysClient {
    api: ResponsysApi,
    session: Arc<Session>,
}

impl ResponsysClient {
    /// Build the client and authenticate immediately.
    ///
    /// # Errors
    /// - `Config` for an invalid configuration
    /// - `Initialization` when no token can be obtained
    pub async fn connect(
        config: &ResponsysConfig,
        recorder: Arc<dyn TransactionRecorder>,
    ) -> Result<Self> {
        config.validate()?;
        let exchange = Arc::new(ReqwestExchange::from_config(config)?);
        let transport = transport(config, exchange, recorder);
        let session = Session::connect(Arc::clone(&transport), credentials(config)).await?;

        info!(username = %session.username(), "Responsys client connected");
        Ok(Self::from_parts(config, transport, Arc::new(session)))
    }

    /// Build the client without contacting the server.
    ///
    /// # Errors
    /// Returns `Config` for an invalid configuration or if the HTTP client
    /// cannot be built.
    pub fn new(config: &ResponsysConfig, recorder: Arc<dyn TransactionRecorder>) -> Result<Self> {
        config.validate()?;
        let exchange = Arc::new(ReqwestExchange::from_config(config)?);
        Ok(Self::assemble(config, exchange, recorder))
    }

    /// Build the client over a caller-supplied exchange, without contacting
    /// the server.
    ///
    /// # Errors
    /// Returns `Config` for an invalid configuration.
    pub fn with_exchange(
        config: &ResponsysConfig,
        exchange: Arc<dyn HttpExchange>,
        recorder: Arc<dyn TransactionRecorder>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(config, exchange, recorder))
    }

    fn assemble(
        config: &ResponsysConfig,
        exchange: Arc<dyn HttpExchange>,
        recorder: Arc<dyn TransactionRecorder>,
    ) -> Self {
        let transport = transport(config, exchange, recorder);
        let session = Arc::new(Session::new(Arc::clone(&transport), credentials(config)));
        Self::from_parts(config, transport, session)
    }

    fn from_parts(
        config: &ResponsysConfig,
        transport: Arc<TransportClient>,
        session: Arc<Session>,
    ) -> Self {
        let api = ResponsysApi::new(transport, session.clone(), ApiSettings::from_config(config));
        Self { api, session }
    }

    /// See [`ResponsysApi::merge_contact`].
    pub async fn merge_contact(&self, email: &str, customer_id: &str) -> Result<Value> {
        self.api.merge_contact(email, customer_id).await
    }

    /// See [`ResponsysApi::trigger_custom_event`].
    pub async fn trigger_custom_event(
        &self,
        event: &str,
        email: &str,
        customer_id: &str,
        optional_data: OptionalData,
    ) -> Result<Value> {
        self.api.trigger_custom_event(event, email, customer_id, optional_data).await
    }

    /// Discard the cached token and fetch a new one.
    pub async fn reauthenticate(&self) -> Result<AuthToken> {
        self.session.reauthenticate().await
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn api(&self) -> &ResponsysApi {
        &self.api
    }
}
