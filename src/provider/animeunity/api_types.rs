use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accept a string or a bare number for fields the upstream emits
/// inconsistently (episode numbers, record ids, scores).
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// Wrapper object carried by the home feed's `items-json` attribute
#[derive(Debug, Deserialize)]
pub struct FeedPayload {
    pub data: Vec<Value>,
}

/// One home-feed record; only the embedded `anime` object matters
#[derive(Debug, Deserialize)]
pub struct FeedItem {
    pub anime: FeedAnime,
}

#[derive(Debug, Deserialize)]
pub struct FeedAnime {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    pub slug: String,
    /// Preferred over `title` when present
    pub title_eng: Option<String>,
    pub title: Option<String>,
    pub imageurl: String,
}

/// Carousel record from the HTML-entity-encoded `animes` attribute
///
/// Unlike the other payloads its `type` field is a clean enum, so movie
/// classification is an exact match downstream.
#[derive(Debug, Deserialize)]
pub struct CarouselRecord {
    pub id: i64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub slug: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title_eng: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub imageurl: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub plot: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(default, rename = "type", deserialize_with = "lenient_string")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub score: String,
}

/// Search/browse API record
#[derive(Debug, Deserialize)]
pub struct ArchiveRecord {
    #[serde(default)]
    pub id: i64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub slug: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title_eng: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub imageurl: String,
    #[serde(default, rename = "type", deserialize_with = "lenient_string")]
    pub kind: String,
}

impl ArchiveRecord {
    /// English title when non-empty, the native one otherwise
    pub fn resolved_title(&self) -> &str {
        if self.title_eng.is_empty() {
            &self.title
        } else {
            &self.title_eng
        }
    }
}

/// Genre entry from the archive page's `all_genres` attribute
#[derive(Debug, Deserialize)]
pub struct GenreRecord {
    pub id: i64,
    pub name: String,
}

/// Envelope of the search/browse POST response
#[derive(Debug, Deserialize)]
pub struct ArchiveResponse {
    #[serde(default)]
    pub records: Vec<Value>,
}

/// Envelope of the episode range-query response
#[derive(Debug, Deserialize)]
pub struct RangeResponse {
    #[serde(default)]
    pub episodes: Vec<Value>,
}

/// One upstream episode record, either from the detail page's inline
/// `episodes` attribute or a range-query response
///
/// `number` stays a string because the upstream merges simulcast episodes
/// into ranges like `"235-236"`.
#[derive(Debug, Default, Deserialize)]
pub struct EpisodeRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub number: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub file_name: String,
}

/// Base body of the archive search/browse POST
///
/// Every filter the caller does not use stays the JSON literal `false`;
/// call sites overwrite `title`, `type` or `genres` as needed.
pub fn archive_query(offset: i32) -> Value {
    serde_json::json!({
        "title": false,
        "type": false,
        "year": false,
        "order": false,
        "status": false,
        "genres": false,
        "offset": offset,
        "dubbed": false,
        "season": false,
    })
}
