use crate::types::{
    Category, Episode, Genre, Movie, SearchResults, TvShow, VideoServer, VideoUnit,
};
use async_trait::async_trait;

/// Core trait for catalog adapters
///
/// Operations return plain values rather than `Result`: a transport or
/// parse failure at any stage is flattened into an empty list or a
/// placeholder entity inside the adapter, so the host app treats emptiness
/// as "unavailable" without ever distinguishing the cause.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Adapter identifier (e.g., "animeunity")
    fn id(&self) -> &'static str;

    /// Human-readable adapter name
    fn name(&self) -> &'static str;

    /// Upstream site base URL
    fn base_url(&self) -> &str;

    /// Logo image URL for display
    fn logo(&self) -> String;

    /// Content language (ISO 639-1)
    fn language(&self) -> &'static str;

    /// Home feed as named categories; empty categories are omitted
    async fn get_home(&self) -> Vec<Category>;

    /// Search the catalog
    ///
    /// An empty (or whitespace-only) query returns the genre list instead
    /// of items; the returned genre ids are the ones `get_genre` accepts.
    async fn search(&self, query: &str, page: i32) -> SearchResults;

    /// Browse movies, paged at 30
    async fn get_movies(&self, page: i32) -> Vec<Movie>;

    /// Browse shows, paged at 30
    async fn get_tv_shows(&self, page: i32) -> Vec<TvShow>;

    /// Movie detail; placeholder with empty title on failure
    async fn get_movie(&self, id: &str) -> Movie;

    /// Show detail, including the computed season list
    async fn get_tv_show(&self, id: &str) -> TvShow;

    /// Episodes of one season (a season id round-trips from the detail call)
    async fn get_episodes(&self, season_id: &str) -> Vec<Episode>;

    /// One genre with a page of its catalog
    async fn get_genre(&self, id: &str, page: i32) -> Genre;

    /// Playable servers for a movie or an episode of a show
    async fn get_servers(&self, id: &str, unit: VideoUnit) -> Vec<VideoServer>;
}
