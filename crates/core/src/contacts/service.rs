//! Contacts facade - the two business operations exposed to callers

use std::sync::Arc;

use responsys_domain::constants::HEADER_AUTHORIZATION;
use responsys_domain::{
    ContactRecord, CustomEventRequest, EventName, Operation, OptionalData, ResponsysConfig,
    ResponsysError, Result,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::endpoints;
use crate::session::AccessTokenProvider;
use crate::transport::{ApiRequest, TransportClient};

/// Per-deployment values the facade needs beyond the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    pub server_url: String,
    pub database_id: String,
    pub list_folder: String,
}

impl ApiSettings {
    pub fn from_config(config: &ResponsysConfig) -> Self {
        Self {
            server_url: config.server_url.clone(),
            database_id: config.contact_list_database.clone(),
            list_folder: config.list_folder.clone(),
        }
    }
}

/// Contact merge and custom event triggering over an authenticated session.
pub struct ResponsysApi {
    transport: Arc<TransportClient>,
    auth: Arc<dyn AccessTokenProvider>,
    settings: ApiSettings,
}

impl ResponsysApi {
    pub fn new(
        transport: Arc<TransportClient>,
        auth: Arc<dyn AccessTokenProvider>,
        settings: ApiSettings,
    ) -> Self {
        Self { transport, auth, settings }
    }

    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    /// Insert or update a contact in the contacts list.
    ///
    /// # Errors
    /// `ResponsysError::Operation` scoped to [`Operation::MergeContact`],
    /// with the underlying failure as its source.
    #[instrument(skip_all, fields(customer_id = %customer_id))]
    pub async fn merge_contact(&self, email: &str, customer_id: &str) -> Result<Value> {
        let contact = ContactRecord::new(email, customer_id, self.settings.database_id.as_str());
        let payload = contact.merge_request(&self.settings.list_folder);

        let response = self
            .authorized_post(endpoints::contacts_list_url(&self.settings.server_url), &payload)
            .await
            .map_err(|err| err.within(Operation::MergeContact))?;

        info!("contact merged");
        Ok(response)
    }

    /// Merge the contact, then trigger `event` for it.
    ///
    /// The event name is checked before anything is sent. If the merge fails
    /// the event is not sent and the merge error is returned as is.
    ///
    /// # Errors
    /// - merge failures scoped to [`Operation::MergeContact`]
    /// - invalid event names and event failures scoped to
    ///   [`Operation::TriggerCustomEvent`]
    #[instrument(skip_all, fields(event = %event, customer_id = %customer_id))]
    pub async fn trigger_custom_event(
        &self,
        event: &str,
        email: &str,
        customer_id: &str,
        optional_data: OptionalData,
    ) -> Result<Value> {
        let event_name =
            EventName::parse(event).map_err(|err| err.within(Operation::TriggerCustomEvent))?;

        self.merge_contact(email, customer_id).await?;

        let payload = CustomEventRequest::for_recipient(
            email,
            customer_id,
            &self.settings.list_folder,
            optional_data,
        );

        let response = self
            .authorized_post(endpoints::event_url(&self.settings.server_url, &event_name), &payload)
            .await
            .map_err(|err| err.within(Operation::TriggerCustomEvent))?;

        info!("custom event triggered");
        Ok(response)
    }

    async fn authorized_post<T: Serialize + Sync>(
        &self,
        url: Result<String>,
        payload: &T,
    ) -> Result<Value> {
        let url = url?;
        let payload = serde_json::to_value(payload).map_err(|e| {
            ResponsysError::InvalidInput(format!("request payload is not serializable: {e}"))
        })?;
        let token = self.auth.access_token().await?;

        let request =
            ApiRequest::post(url, payload).header(HEADER_AUTHORIZATION, token.expose());
        self.transport.send(request).await
    }
}
