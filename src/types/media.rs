use serde::{Deserialize, Serialize};

/// One named shelf of the home feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub list: Vec<CatalogItem>,
}

impl Category {
    pub fn new(name: impl Into<String>, list: Vec<CatalogItem>) -> Self {
        Self {
            name: name.into(),
            list,
        }
    }
}

/// A catalog entry as the host app consumes it
///
/// Ids come in two shapes depending on where the entry was scraped from:
/// `"{numericId}-{slug}"` for feed/carousel/archive records and the bare
/// last path segment for sidebar and related-item links. Both shapes are
/// accepted by the detail, episode and server operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CatalogItem {
    Movie(Movie),
    Show(TvShow),
}

impl CatalogItem {
    pub fn id(&self) -> &str {
        match self {
            Self::Movie(m) => &m.id,
            Self::Show(s) => &s.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Movie(m) => &m.title,
            Self::Show(s) => &s.title,
        }
    }

    pub fn is_movie(&self) -> bool {
        matches!(self, Self::Movie(_))
    }
}

/// Movie entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub poster: String,
    pub banner: String,
    pub overview: String,
    /// Rating on the upstream 0-10 scale
    pub rating: Option<f64>,
    /// Free-text year or date as the site prints it
    pub released: String,
    /// Runtime in minutes
    pub runtime: Option<i32>,
    pub genres: Vec<Genre>,
    pub recommendations: Vec<CatalogItem>,
}

impl Movie {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Builder pattern: set poster URL
    pub fn with_poster(mut self, poster: impl Into<String>) -> Self {
        self.poster = poster.into();
        self
    }

    /// Builder pattern: set banner URL
    pub fn with_banner(mut self, banner: impl Into<String>) -> Self {
        self.banner = banner.into();
        self
    }

    /// Builder pattern: set overview
    pub fn with_overview(mut self, overview: impl Into<String>) -> Self {
        self.overview = overview.into();
        self
    }

    /// Builder pattern: set rating
    pub fn with_rating(mut self, rating: Option<f64>) -> Self {
        self.rating = rating;
        self
    }

    /// Builder pattern: set release text
    pub fn with_released(mut self, released: impl Into<String>) -> Self {
        self.released = released.into();
        self
    }
}

/// Show entry
///
/// The upstream site has no season concept, only fetchable episode ranges,
/// so `seasons` is the computed range list (one entry per chunk).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TvShow {
    pub id: String,
    pub title: String,
    pub poster: String,
    pub banner: String,
    pub overview: String,
    pub rating: Option<f64>,
    pub released: String,
    pub runtime: Option<i32>,
    pub genres: Vec<Genre>,
    pub recommendations: Vec<CatalogItem>,
    pub seasons: Vec<Season>,
}

impl TvShow {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Builder pattern: set poster URL
    pub fn with_poster(mut self, poster: impl Into<String>) -> Self {
        self.poster = poster.into();
        self
    }

    /// Builder pattern: set banner URL
    pub fn with_banner(mut self, banner: impl Into<String>) -> Self {
        self.banner = banner.into();
        self
    }

    /// Builder pattern: set overview
    pub fn with_overview(mut self, overview: impl Into<String>) -> Self {
        self.overview = overview.into();
        self
    }

    /// Builder pattern: set rating
    pub fn with_rating(mut self, rating: Option<f64>) -> Self {
        self.rating = rating;
        self
    }

    /// Builder pattern: set release text
    pub fn with_released(mut self, released: impl Into<String>) -> Self {
        self.released = released.into();
        self
    }

    /// Builder pattern: set season list
    pub fn with_seasons(mut self, seasons: Vec<Season>) -> Self {
        self.seasons = seasons;
        self
    }
}

/// Genre
///
/// `id` is the upstream numeric id rendered as a string when sourced from
/// the archive page, or a slugified name when sourced from a detail page.
/// The two namespaces are never mixed within one call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genre {
    pub id: String,
    pub name: String,
    pub shows: Vec<CatalogItem>,
}

impl Genre {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            shows: Vec::new(),
        }
    }

    pub fn with_shows(mut self, shows: Vec<CatalogItem>) -> Self {
        self.shows = shows;
        self
    }
}

/// One fetchable episode range of a show
///
/// `id` is the bare show id when the whole list fits in a single page, or
/// `"{showId}-{start}-{end}"` for a chunk. `number` is always 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    pub id: String,
    pub number: i32,
    pub title: String,
}

/// Episode, id shaped `"{seasonId}/{upstreamEpisodeId}"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub id: String,
    pub number: i32,
    pub title: String,
}

/// Playable server descriptor handed to the embed extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoServer {
    pub id: String,
    pub name: String,
    pub src: String,
}

/// The unit a server lookup targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoUnit {
    Movie,
    Episode { number: i32 },
}

impl VideoUnit {
    pub fn episode_number(&self) -> i32 {
        match self {
            Self::Movie => 1,
            Self::Episode { number } => *number,
        }
    }
}

/// Search output: an empty query returns the genre list instead of items
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchResults {
    Items(Vec<CatalogItem>),
    Genres(Vec<Genre>),
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Items(items) => items.is_empty(),
            Self::Genres(genres) => genres.is_empty(),
        }
    }
}
