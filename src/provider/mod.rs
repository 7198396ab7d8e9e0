pub(crate) mod animeunity;
mod http;
mod session;
mod traits;

pub use animeunity::AnimeUnityProvider;
pub use http::HttpClient;
pub use session::SessionState;
pub use traits::CatalogProvider;

/// Browser-like agent expected by the upstream anti-bot layer
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Provider base configuration
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Base URL
    pub base_url: String,
    /// User-Agent header sent on every request
    pub user_agent: String,
}

impl ProviderConfig {
    /// Create new configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Set a custom user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
