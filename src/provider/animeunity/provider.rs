use super::api_types::{ArchiveResponse, RangeResponse, archive_query};
use super::catalog::{
    DetailPage, PlayerElement, parse_archive_items, parse_archive_movies,
    parse_archive_page_genres, parse_archive_shows, parse_detail, parse_featured,
    parse_latest_additions, parse_latest_episodes, parse_player,
};
use super::episodes::{
    SINGLE_PAGE_LIMIT, build_seasons, compute_ranges, find_episode_record, map_inline_episodes,
    map_range_episodes, split_season_id,
};
use crate::provider::{CatalogProvider, HttpClient, ProviderConfig};
use crate::types::{
    CatalogItem, Category, Episode, Genre, Movie, SearchResults, TvShow, VideoServer, VideoUnit,
};
use crate::{ProviderError, Result};
use async_trait::async_trait;
use scraper::Html;
use serde_json::Value;
use tracing::{debug, warn};

const BASE_URL: &str = "https://www.animeunity.so";
const ARCHIVE_PATH: &str = "archivio";
const SEARCH_PATH: &str = "archivio/get-animes";
const SERVER_NAME: &str = "Vixcloud";
const PAGE_SIZE: i32 = 30;

/// Catalog adapter for the AnimeUnity site.
///
/// Every public operation degrades to an empty or placeholder result on
/// failure; see `CatalogProvider`.
pub struct AnimeUnityProvider {
    client: HttpClient,
}

impl Default for AnimeUnityProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimeUnityProvider {
    pub fn new() -> Self {
        Self::with_config(ProviderConfig::new(BASE_URL))
    }

    pub fn with_config(config: ProviderConfig) -> Self {
        Self {
            client: HttpClient::new(config.base_url, &config.user_agent),
        }
    }

    fn offset(page: i32) -> i32 {
        (page - 1) * PAGE_SIZE
    }

    async fn fetch_home(&self) -> Result<Vec<Category>> {
        let html = self.client.get_text("").await?;
        let doc = Html::parse_document(&html);
        let base_url = self.client.base_url();

        let latest_episodes = parse_latest_episodes(&doc, base_url);
        let latest_additions = parse_latest_additions(&doc, base_url);
        let featured = parse_featured(&doc, base_url);

        let mut categories = Vec::new();

        if !latest_episodes.is_empty() {
            categories.push(Category::new("Ultimi Episodi", latest_episodes));
        }
        if !latest_additions.is_empty() {
            categories.push(Category::new("Ultime Aggiunte", latest_additions));
        }
        if !featured.is_empty() {
            categories.push(Category::new("Featured", featured));
        }

        Ok(categories)
    }

    async fn fetch_genres(&self) -> Result<Vec<Genre>> {
        let html = self.client.bootstrap(ARCHIVE_PATH).await?;
        let doc = Html::parse_document(&html);

        Ok(parse_archive_page_genres(&doc))
    }

    async fn fetch_search(&self, query: &str, page: i32) -> Result<Vec<CatalogItem>> {
        self.client.bootstrap(ARCHIVE_PATH).await?;

        let mut payload = archive_query(Self::offset(page));
        payload["title"] = serde_json::json!(query);

        let response: ArchiveResponse = self.client.post_json(SEARCH_PATH, &payload).await?;

        Ok(parse_archive_items(&response.records, self.client.base_url()))
    }

    async fn fetch_movies(&self, page: i32) -> Result<Vec<Movie>> {
        self.client.bootstrap(ARCHIVE_PATH).await?;

        let mut payload = archive_query(Self::offset(page));
        payload["type"] = serde_json::json!("Movie");

        let response: ArchiveResponse = self.client.post_json(SEARCH_PATH, &payload).await?;

        Ok(parse_archive_movies(&response.records, self.client.base_url()))
    }

    async fn fetch_tv_shows(&self, page: i32) -> Result<Vec<TvShow>> {
        self.client.bootstrap(ARCHIVE_PATH).await?;

        let mut payload = archive_query(Self::offset(page));
        payload["type"] = serde_json::json!("TV");

        let response: ArchiveResponse = self.client.post_json(SEARCH_PATH, &payload).await?;

        Ok(parse_archive_shows(&response.records, self.client.base_url()))
    }

    async fn fetch_detail(&self, id: &str) -> Result<DetailPage> {
        let html = self.client.get_text(&format!("anime/{id}")).await?;
        let doc = Html::parse_document(&html);

        Ok(parse_detail(&doc, self.client.base_url()))
    }

    async fn fetch_movie(&self, id: &str) -> Result<Movie> {
        let detail = self.fetch_detail(id).await?;

        Ok(Movie {
            id: id.to_string(),
            title: detail.title,
            poster: detail.poster,
            banner: String::new(),
            overview: detail.overview,
            rating: detail.rating,
            released: detail.released,
            runtime: detail.runtime,
            genres: detail.genres,
            recommendations: detail.recommendations,
        })
    }

    async fn fetch_tv_show(&self, id: &str) -> Result<TvShow> {
        let detail = self.fetch_detail(id).await?;

        let episodes_count = detail
            .player
            .as_ref()
            .map(|player| player.episodes_count)
            .unwrap_or(0);

        let seasons = build_seasons(id, episodes_count);

        Ok(TvShow {
            id: id.to_string(),
            title: detail.title,
            poster: detail.poster,
            banner: String::new(),
            overview: detail.overview,
            rating: detail.rating,
            released: detail.released,
            runtime: detail.runtime,
            genres: detail.genres,
            recommendations: detail.recommendations,
            seasons,
        })
    }

    async fn fetch_episodes(&self, season_id: &str) -> Result<Vec<Episode>> {
        let (show_id, range) = split_season_id(season_id);
        let clean_id = show_id.split('-').next().unwrap_or(&show_id).to_string();

        let html = self.client.get_text(&format!("anime/{show_id}")).await?;
        let player = {
            let doc = Html::parse_document(&html);
            parse_player(&doc)
        };

        let Some(player) = player else {
            return Ok(Vec::new());
        };

        if let Some((start, end)) = range {
            let response = self.fetch_range(&clean_id, start, end).await?;
            return Ok(map_range_episodes(&response.episodes, &show_id));
        }

        if player.episodes_count <= SINGLE_PAGE_LIMIT {
            let values = Self::decode_inline_episodes(&player)?;
            return Ok(map_inline_episodes(&values, &show_id));
        }

        Ok(Vec::new())
    }

    async fn fetch_genre(&self, id: &str, page: i32) -> Result<Genre> {
        let html = self.client.bootstrap(ARCHIVE_PATH).await?;
        let genre_name = {
            let doc = Html::parse_document(&html);
            parse_archive_page_genres(&doc)
                .into_iter()
                .find(|genre| genre.id == id)
                .map(|genre| genre.name)
                .unwrap_or_else(|| format!("Genre {id}"))
        };

        let genre_id: i64 = id.parse().unwrap_or(0);

        let mut payload = archive_query(Self::offset(page));
        payload["genres"] = serde_json::json!([{ "id": genre_id, "name": genre_name.clone() }]);

        let response: ArchiveResponse = self.client.post_json(SEARCH_PATH, &payload).await?;
        let shows = parse_archive_items(&response.records, self.client.base_url());

        Ok(Genre::new(id, genre_name).with_shows(shows))
    }

    async fn fetch_servers(&self, id: &str, unit: VideoUnit) -> Result<Vec<VideoServer>> {
        let episode_number = unit.episode_number();

        // Episode ids are "{showId}/{episodeId}"; either shape is accepted
        let full_id = id.split('/').next().unwrap_or(id);
        let clean_id = full_id.split('-').next().unwrap_or(full_id).to_string();

        let html = self.client.get_text(&format!("anime/{full_id}")).await?;
        let player = {
            let doc = Html::parse_document(&html);
            parse_player(&doc)
        };

        let Some(player) = player else {
            return Ok(Vec::new());
        };

        let embed_url = if matches!(unit, VideoUnit::Movie) || episode_number == 1 {
            player.embed_url.clone()
        } else {
            let episode_id = if player.episodes_count <= SINGLE_PAGE_LIMIT {
                if player.episodes_raw.is_empty() {
                    return Ok(Vec::new());
                }
                let values = Self::decode_inline_episodes(&player)?;
                find_episode_record(&values, episode_number).map(|record| record.id)
            } else {
                self.find_episode_in_ranges(&clean_id, episode_number, player.episodes_count)
                    .await?
            };

            let Some(episode_id) = episode_id else {
                return Err(ProviderError::NotFound(format!(
                    "episode {episode_number} of {full_id}"
                )));
            };
            if episode_id.is_empty() {
                return Ok(Vec::new());
            }

            let body = self.client.get_text(&format!("embed-url/{episode_id}")).await?;
            body.trim().to_string()
        };

        if embed_url.is_empty() {
            return Ok(Vec::new());
        }

        Ok(vec![VideoServer {
            id: id.to_string(),
            name: SERVER_NAME.to_string(),
            src: embed_url,
        }])
    }

    async fn fetch_range(&self, clean_id: &str, start: i32, end: i32) -> Result<RangeResponse> {
        let start = start.to_string();
        let end = end.to_string();

        self.client
            .get_json(
                &format!("info_api/{clean_id}/1"),
                &[
                    ("start_range", start.as_str()),
                    ("end_range", end.as_str()),
                ],
            )
            .await
    }

    /// Point lookup across chunks: fetch only the range containing the
    /// requested number and scan its records.
    async fn find_episode_in_ranges(
        &self,
        clean_id: &str,
        episode_number: i32,
        episodes_count: i32,
    ) -> Result<Option<String>> {
        for (start, end) in compute_ranges(episodes_count) {
            if !(start..=end).contains(&episode_number) {
                continue;
            }

            let response = self.fetch_range(clean_id, start, end).await?;
            if let Some(record) = find_episode_record(&response.episodes, episode_number) {
                return Ok(Some(record.id));
            }
        }

        Ok(None)
    }

    fn decode_inline_episodes(player: &PlayerElement) -> Result<Vec<Value>> {
        if player.episodes_raw.is_empty() {
            return Ok(Vec::new());
        }

        let decoded = urlencoding::decode(&player.episodes_raw)
            .map_err(|e| ProviderError::Parse(format!("episodes attribute: {e}")))?;

        serde_json::from_str(&decoded)
            .map_err(|e| ProviderError::Parse(format!("episodes payload: {e}")))
    }
}

#[async_trait]
impl CatalogProvider for AnimeUnityProvider {
    fn id(&self) -> &'static str {
        "animeunity"
    }

    fn name(&self) -> &'static str {
        "AnimeUnity"
    }

    fn base_url(&self) -> &str {
        self.client.base_url()
    }

    fn logo(&self) -> String {
        format!("{}/images/scritta2.png", self.client.base_url())
    }

    fn language(&self) -> &'static str {
        "it"
    }

    async fn get_home(&self) -> Vec<Category> {
        match self.fetch_home().await {
            Ok(categories) => categories,
            Err(e) => {
                debug!("home fetch failed: {e}");
                Vec::new()
            }
        }
    }

    async fn search(&self, query: &str, page: i32) -> SearchResults {
        if query.trim().is_empty() {
            if page > 1 {
                return SearchResults::Genres(Vec::new());
            }

            return match self.fetch_genres().await {
                Ok(genres) => SearchResults::Genres(genres),
                Err(e) => {
                    debug!("genre list fetch failed: {e}");
                    SearchResults::Genres(Vec::new())
                }
            };
        }

        match self.fetch_search(query, page).await {
            Ok(items) => SearchResults::Items(items),
            Err(e) => {
                debug!("search '{query}' failed: {e}");
                SearchResults::Items(Vec::new())
            }
        }
    }

    async fn get_movies(&self, page: i32) -> Vec<Movie> {
        match self.fetch_movies(page).await {
            Ok(movies) => movies,
            Err(e) => {
                debug!("movies page {page} failed: {e}");
                Vec::new()
            }
        }
    }

    async fn get_tv_shows(&self, page: i32) -> Vec<TvShow> {
        match self.fetch_tv_shows(page).await {
            Ok(shows) => shows,
            Err(e) => {
                debug!("shows page {page} failed: {e}");
                Vec::new()
            }
        }
    }

    async fn get_movie(&self, id: &str) -> Movie {
        match self.fetch_movie(id).await {
            Ok(movie) => movie,
            Err(e) => {
                warn!("movie detail {id} failed: {e}");
                Movie::new(id, "")
            }
        }
    }

    async fn get_tv_show(&self, id: &str) -> TvShow {
        match self.fetch_tv_show(id).await {
            Ok(show) => show,
            Err(e) => {
                warn!("show detail {id} failed: {e}");
                TvShow::new(id, "")
            }
        }
    }

    async fn get_episodes(&self, season_id: &str) -> Vec<Episode> {
        match self.fetch_episodes(season_id).await {
            Ok(episodes) => episodes,
            Err(e) => {
                debug!("episode list {season_id} failed: {e}");
                Vec::new()
            }
        }
    }

    async fn get_genre(&self, id: &str, page: i32) -> Genre {
        match self.fetch_genre(id, page).await {
            Ok(genre) => genre,
            Err(e) => {
                debug!("genre {id} page {page} failed: {e}");
                Genre::new(id, "")
            }
        }
    }

    async fn get_servers(&self, id: &str, unit: VideoUnit) -> Vec<VideoServer> {
        match self.fetch_servers(id, unit).await {
            Ok(servers) => servers,
            Err(e) => {
                debug!("server lookup {id} failed: {e}");
                Vec::new()
            }
        }
    }
}
