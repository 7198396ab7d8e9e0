mod parser;
mod provider;
mod types;


pub use parser::{FilenamePatterns, extract_episode_name};
pub use provider::{
    AnimeUnityProvider, CatalogProvider, HttpClient, ProviderConfig, SessionState,
};
pub use types::{
    CatalogItem, Category, Episode, Genre, Movie, Season, SearchResults, TvShow, VideoServer,
    VideoUnit,
};

/// Adapter result type
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Adapter error types
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Create the provider with its stock configuration
#[must_use]
pub fn create_default_provider() -> AnimeUnityProvider {
    AnimeUnityProvider::new()
}
