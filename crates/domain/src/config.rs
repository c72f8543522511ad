//! Client configuration structures

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::{DEFAULT_LIST_FOLDER, DEFAULT_USER_AGENT};
use crate::errors::{ResponsysError, Result};

/// Everything the client needs to reach and authenticate against Responsys.
///
/// The six connection fields are required; the remaining fields carry
/// defaults so existing deployments keep working when they are absent.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponsysConfig {
    /// Base URL for API calls (e.g. `https://api2-015.responsys.net/`)
    pub server_url: String,
    /// Base URL for the token endpoint (e.g. `https://login2.responsys.net/`)
    pub login_url: String,
    /// Timeout applied to each whole request/response exchange
    pub timeout_secs: u64,
    /// Value written to the `DATABASE_ID` column on every merge
    pub contact_list_database: String,
    pub username: String,
    pub password: String,
    /// Verify TLS certificates and hostnames
    #[serde(default = "default_verify_tls")]
    pub verify_tls: bool,
    /// Folder holding the contacts list
    #[serde(default = "default_list_folder")]
    pub list_folder: String,
    /// Client identifier sent as `User-Agent`
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_verify_tls() -> bool {
    true
}

fn default_list_folder() -> String {
    DEFAULT_LIST_FOLDER.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl ResponsysConfig {
    /// Build a config from the required fields, using defaults for the rest.
    pub fn new(
        server_url: impl Into<String>,
        login_url: impl Into<String>,
        timeout_secs: u64,
        contact_list_database: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            server_url: server_url.into(),
            login_url: login_url.into(),
            timeout_secs,
            contact_list_database: contact_list_database.into(),
            username: username.into(),
            password: password.into(),
            verify_tls: default_verify_tls(),
            list_folder: default_list_folder(),
            user_agent: default_user_agent(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check required values are present and well formed.
    ///
    /// # Errors
    /// Returns `ResponsysError::Config` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        require_url("server_url", &self.server_url)?;
        require_url("login_url", &self.login_url)?;
        require_non_empty("contact_list_database", &self.contact_list_database)?;
        require_non_empty("username", &self.username)?;
        require_non_empty("password", &self.password)?;
        require_non_empty("list_folder", &self.list_folder)?;
        require_non_empty("user_agent", &self.user_agent)?;

        if self.timeout_secs == 0 {
            return Err(ResponsysError::Config("timeout_secs must be greater than zero".into()));
        }

        Ok(())
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ResponsysError::Config(format!("{field} must not be empty")));
    }
    Ok(())
}

fn require_url(field: &str, value: &str) -> Result<()> {
    require_non_empty(field, value)?;
    let url = Url::parse(value)
        .map_err(|e| ResponsysError::Config(format!("{field} is not a valid URL: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(ResponsysError::Config(format!("{field} cannot be used as a base URL")));
    }
    Ok(())
}

impl fmt::Debug for ResponsysConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponsysConfig")
            .field("server_url", &self.server_url)
            .field("login_url", &self.login_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("contact_list_database", &self.contact_list_database)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("verify_tls", &self.verify_tls)
            .field("list_folder", &self.list_folder)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
