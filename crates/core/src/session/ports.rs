//! Port interface for whatever supplies access tokens to the facade

use async_trait::async_trait;
use responsys_domain::{AuthToken, Result};

/// Source of the token sent in the `Authorization` header.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Cached token, acquiring one first if none is held.
    async fn access_token(&self) -> Result<AuthToken>;

    /// Drop any cached token and acquire a fresh one.
    async fn refresh_token(&self) -> Result<AuthToken>;
}
