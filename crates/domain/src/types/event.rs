//! Custom event trigger payload

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{CONTACTS_LIST, EMAIL_FORMAT_HTML, EVENT_PATH_PREFIX, MAX_EVENT_NAME_LENGTH};
use crate::errors::{ResponsysError, Result};

static EVENT_NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("event name pattern is a valid regex"));

/// Free-form attributes forwarded with an event.
pub type OptionalData = Map<String, Value>;

/// Name of a custom event, safe to place in a URL path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventName(String);

impl EventName {
    /// Accepts ASCII letters, digits, `_` and `-`.
    ///
    /// # Errors
    /// Returns `ResponsysError::InvalidInput` for empty, overlong or
    /// otherwise unsafe names.
    pub fn parse(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(ResponsysError::InvalidInput("event name must not be empty".into()));
        }
        if name.len() > MAX_EVENT_NAME_LENGTH {
            return Err(ResponsysError::InvalidInput(format!(
                "event name exceeds {MAX_EVENT_NAME_LENGTH} characters"
            )));
        }
        if !EVENT_NAME_PATTERN.is_match(&name) {
            return Err(ResponsysError::InvalidInput(format!(
                "event name {name:?} may only contain letters, digits, '_' and '-'"
            )));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Final path segment of the event endpoint, e.g. `API_SIGNUP`.
    pub fn path_segment(&self) -> String {
        format!("{EVENT_PATH_PREFIX}{}", self.0)
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body for `POST events/API_{event}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomEventRequest {
    pub custom_event: CustomEvent,
    pub recipient_data: Vec<RecipientData>,
}

impl CustomEventRequest {
    /// Single-recipient trigger for a contact in `folder`'s contacts list.
    pub fn for_recipient(
        email: impl Into<String>,
        customer_id: impl Into<String>,
        folder: &str,
        optional_data: OptionalData,
    ) -> Self {
        Self {
            custom_event: CustomEvent::default(),
            recipient_data: vec![RecipientData {
                recipient: Recipient {
                    customer_id: customer_id.into(),
                    email_address: email.into(),
                    list_name: ListName {
                        folder_name: folder.to_string(),
                        object_name: CONTACTS_LIST.to_string(),
                    },
                    recipient_id: None,
                    mobile_number: None,
                    email_format: EMAIL_FORMAT_HTML.to_string(),
                },
                optional_data,
            }],
        }
    }
}

/// Event data mappings; all left unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomEvent {
    pub event_number_data_mapping: Option<Value>,
    pub event_date_data_mapping: Option<Value>,
    pub event_string_data_mapping: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientData {
    pub recipient: Recipient,
    pub optional_data: OptionalData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    pub customer_id: String,
    pub email_address: String,
    pub list_name: ListName,
    pub recipient_id: Option<String>,
    pub mobile_number: Option<String>,
    pub email_format: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListName {
    pub folder_name: String,
    pub object_name: String,
}
