//! Authentication values held by a session

use std::fmt;

/// Opaque token returned by the auth endpoint.
///
/// Never empty. `Debug` does not print the value.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AuthToken(String);

impl AuthToken {
    /// Returns `None` for empty or whitespace-only input.
    pub fn parse(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    /// Raw token, as sent in the `Authorization` header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

/// Login endpoint plus the API user's credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub login_url: String,
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(
        login_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self { login_url: login_url.into(), username: username.into(), password: password.into() }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("login_url", &self.login_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_blank_tokens() {
        assert!(AuthToken::parse("").is_none());
        assert!(AuthToken::parse("   ").is_none());
        assert_eq!(AuthToken::parse("abc").map(|t| t.expose().to_string()), Some("abc".into()));
    }

    #[test]
    fn debug_never_prints_secrets() {
        let token = AuthToken::parse("tok-123").unwrap();
        assert!(!format!("{token:?}").contains("tok-123"));

        let creds = Credentials::new("https://login.example.com", "user", "hunter2");
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("user"));
        assert!(!rendered.contains("hunter2"));
    }
}
