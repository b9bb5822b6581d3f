//! Bearer-credential supply for authenticated requests

use async_trait::async_trait;

/// Supplies the bearer credential for authenticated requests.
///
/// Implemented by the session subsystem; the client never attempts an
/// unauthenticated call, so `None` makes the calling operation fail fast
/// into its defined `Missing`/`Failed` outcome.
#[async_trait]
pub trait AuthTokenProvider: Send + Sync {
    async fn bearer_token(&self) -> Option<String>;
}

/// Fixed-token provider, for configuration-supplied credentials and tests.
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: Option<String>,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// A provider with no credential at all.
    pub fn empty() -> Self {
        Self { token: None }
    }
}

#[async_trait]
impl AuthTokenProvider for StaticTokenProvider {
    async fn bearer_token(&self) -> Option<String> {
        self.token.clone()
    }
}
