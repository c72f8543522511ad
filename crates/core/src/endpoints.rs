//! URL construction for the Responsys REST endpoints

use responsys_domain::constants::{
    AUTH_TOKEN_PATH, AUTH_TYPE_PASSWORD, CONTACTS_LIST, EVENTS_PATH, LISTS_PATH,
};
use responsys_domain::{Credentials, EventName, ResponsysError, Result};
use url::Url;

const PASSWORD_PARAM: &str = "password";
const REDACTED: &str = "<redacted>";

/// Parse `base` and make sure it ends with a slash so joins append to it.
fn base_url(base: &str) -> Result<Url> {
    let normalized = format!("{}/", base.trim().trim_end_matches('/'));
    let url = Url::parse(&normalized)
        .map_err(|e| ResponsysError::Config(format!("invalid base URL '{base}': {e}")))?;
    if url.cannot_be_a_base() {
        return Err(ResponsysError::Config(format!("'{base}' cannot be used as a base URL")));
    }
    Ok(url)
}

fn join(base: &str, path: &str) -> Result<Url> {
    base_url(base)?
        .join(path)
        .map_err(|e| ResponsysError::Config(format!("cannot join '{path}' onto '{base}': {e}")))
}

/// Token endpoint with the credentials as query parameters.
///
/// # Errors
/// Returns `ResponsysError::Config` if the login URL is not a usable base.
pub fn auth_token_url(credentials: &Credentials) -> Result<String> {
    let mut url = join(&credentials.login_url, AUTH_TOKEN_PATH)?;
    url.query_pairs_mut()
        .append_pair("user_name", &credentials.username)
        .append_pair(PASSWORD_PARAM, &credentials.password)
        .append_pair("auth_type", AUTH_TYPE_PASSWORD);
    Ok(url.into())
}

/// Merge endpoint of the contacts list.
///
/// # Errors
/// Returns `ResponsysError::Config` if the server URL is not a usable base.
pub fn contacts_list_url(server_url: &str) -> Result<String> {
    join(server_url, &format!("{LISTS_PATH}/{CONTACTS_LIST}")).map(Into::into)
}

/// Endpoint for triggering the custom event `event`.
///
/// # Errors
/// Returns `ResponsysError::Config` if the server URL is not a usable base.
pub fn event_url(server_url: &str, event: &EventName) -> Result<String> {
    let mut url = join(server_url, EVENTS_PATH)?;
    url.path_segments_mut()
        .map_err(|()| ResponsysError::Config(format!("'{server_url}' cannot be used as a base URL")))?
        .push(&event.path_segment());
    Ok(url.into())
}

/// `url` with the value of any `password` query parameter masked, for logs.
///
/// Unparseable input has its whole query dropped.
pub fn redact_url(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return url.split('?').next().unwrap_or_default().to_string();
    };
    if !parsed.query_pairs().any(|(name, _)| name == PASSWORD_PARAM) {
        return url.to_string();
    }

    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(name, value)| {
            let value = if name == PASSWORD_PARAM { REDACTED.into() } else { value.into_owned() };
            (name.into_owned(), value)
        })
        .collect();
    parsed.query_pairs_mut().clear().extend_pairs(pairs);
    parsed.into()
}
