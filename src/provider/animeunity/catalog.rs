use super::api_types::{
    ArchiveRecord, CarouselRecord, FeedItem, FeedPayload, GenreRecord,
};
use crate::types::{CatalogItem, Genre, Movie, TvShow};
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Pre-compiled selectors for the site's document shapes
struct Selectors {
    // Home page anchors
    feed: Selector,
    sidebar: Selector,
    sidebar_entry: Selector,
    sidebar_title: Selector,
    sidebar_type: Selector,
    carousel: Selector,
    archive: Selector,

    // Detail page anchors
    title: Selector,
    description: Selector,
    cover: Selector,
    info_item: Selector,
    info_wrapper: Selector,
    strong: Selector,
    small: Selector,
    genre_link: Selector,
    related_wrapper: Selector,
    related_item: Selector,
    related_title: Selector,
    related_info: Selector,
    video_player: Selector,

    // Shared
    unstyled_link: Selector,
    img: Selector,
}

impl Selectors {
    fn new() -> Self {
        let parse = |css: &str| Selector::parse(css).expect("Invalid selector");

        Self {
            feed: parse("layout-items[items-json]"),
            sidebar: parse("div.home-sidebar"),
            sidebar_entry: parse("div.latest-anime-container"),
            sidebar_title: parse("strong.latest-anime-title"),
            sidebar_type: parse("div.latest-anime-info.mt-2.mb-2"),
            carousel: parse("the-carousel[animes]"),
            archive: parse("archivio"),

            title: parse("h1.title"),
            description: parse("div.description"),
            cover: parse("img.cover"),
            info_item: parse("div.info-item"),
            info_wrapper: parse("div.info-wrapper"),
            strong: parse("strong"),
            small: parse("small"),
            genre_link: parse("a.genre-link"),
            related_wrapper: parse("div.related-wrapper"),
            related_item: parse("div.related-item"),
            related_title: parse("strong.related-anime-title"),
            related_info: parse("div.related-info"),
            video_player: parse("video-player"),

            unstyled_link: parse("a.unstile-a"),
            img: parse("img"),
        }
    }
}

/// Global singleton for selectors
static SELECTORS: LazyLock<Selectors> = LazyLock::new(Selectors::new);

fn collect_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn is_movie_label(text: &str) -> bool {
    text.to_lowercase().contains("movie")
}

/// Poster/banner URL from a raw upstream image path.
///
/// Empty input stays empty; anything else keeps only the last path segment
/// and is re-rooted on the `img.` subdomain of the site.
pub fn resolve_image_url(raw: &str, base_url: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let filename = raw.rsplit(['/', '\\']).next().unwrap_or("");
    let domain = base_url.replace("https://", "").replace("www.", "");

    format!("https://img.{domain}/anime/{filename}")
}

/// Home-feed strategy: the `items-json` attribute of the feed element
/// carries `{"data": [...]}` where each record embeds an `anime` object.
/// De-duplicated by anime id, first occurrence wins.
pub fn parse_latest_episodes(doc: &Html, base_url: &str) -> Vec<CatalogItem> {
    let Some(feed) = doc.select(&SELECTORS.feed).next() else {
        return Vec::new();
    };

    let raw = feed.value().attr("items-json").unwrap_or_default();
    if raw.is_empty() {
        return Vec::new();
    }

    let Ok(payload) = serde_json::from_str::<FeedPayload>(raw) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut items = Vec::new();

    for value in payload.data {
        let Ok(item) = serde_json::from_value::<FeedItem>(value) else {
            continue;
        };
        let anime = item.anime;

        if !seen.insert(anime.id.clone()) {
            continue;
        }

        let Some(title) = anime.title_eng.or(anime.title) else {
            continue;
        };

        let show = TvShow::new(format!("{}-{}", anime.id, anime.slug), title)
            .with_poster(resolve_image_url(&anime.imageurl, base_url));
        items.push(CatalogItem::Show(show));
    }

    items
}

/// Sidebar-fragment strategy: plain hypertext entries under the latest
/// additions container. Entries without a title are skipped.
pub fn parse_latest_additions(doc: &Html, base_url: &str) -> Vec<CatalogItem> {
    let Some(sidebar) = doc.select(&SELECTORS.sidebar).next() else {
        return Vec::new();
    };

    let mut items = Vec::new();

    for container in sidebar.select(&SELECTORS.sidebar_entry) {
        let Some(link) = container.select(&SELECTORS.unstyled_link).next() else {
            continue;
        };
        let href = link.value().attr("href").unwrap_or_default();
        if href.is_empty() {
            continue;
        }
        let id = href.rsplit('/').next().unwrap_or(href);

        let title = container
            .select(&SELECTORS.sidebar_title)
            .next()
            .map(collect_text)
            .unwrap_or_default();
        if title.is_empty() {
            continue;
        }

        let poster = container
            .select(&SELECTORS.img)
            .next()
            .and_then(|img| img.value().attr("src"))
            .unwrap_or_default();
        let poster = resolve_image_url(poster, base_url);

        let type_label = container
            .select(&SELECTORS.sidebar_type)
            .next()
            .map(collect_text)
            .unwrap_or_default();

        if is_movie_label(&type_label) {
            items.push(CatalogItem::Movie(Movie::new(id, title).with_poster(poster)));
        } else {
            items.push(CatalogItem::Show(TvShow::new(id, title).with_poster(poster)));
        }
    }

    items
}

/// Carousel strategy: an HTML-entity-encoded JSON array in the `animes`
/// attribute. Records need a positive id, a slug and a title; `type` is a
/// clean enum here so movie classification is an exact match, stricter
/// than the substring test used on the free-text payloads.
pub fn parse_featured(doc: &Html, base_url: &str) -> Vec<CatalogItem> {
    let Some(carousel) = doc.select(&SELECTORS.carousel).next() else {
        return Vec::new();
    };

    let raw = carousel.value().attr("animes").unwrap_or_default();
    if raw.is_empty() {
        return Vec::new();
    }

    let decoded = raw.replace("&quot;", "\"");
    let Ok(values) = serde_json::from_str::<Vec<Value>>(&decoded) else {
        return Vec::new();
    };

    let mut items = Vec::new();

    for value in values {
        let Ok(record) = serde_json::from_value::<CarouselRecord>(value) else {
            continue;
        };

        let title = if record.title_eng.is_empty() {
            record.title.clone()
        } else {
            record.title_eng.clone()
        };

        if record.id <= 0 || record.slug.is_empty() || title.is_empty() {
            continue;
        }

        let id = format!("{}-{}", record.id, record.slug);
        let banner = resolve_image_url(&record.imageurl, base_url);
        let rating = record.score.parse::<f64>().ok();

        let item = if record.kind == "Movie" {
            CatalogItem::Movie(
                Movie::new(id, title)
                    .with_banner(banner)
                    .with_overview(record.plot)
                    .with_rating(rating)
                    .with_released(record.date),
            )
        } else {
            CatalogItem::Show(
                TvShow::new(id, title)
                    .with_banner(banner)
                    .with_overview(record.plot)
                    .with_rating(rating)
                    .with_released(record.date),
            )
        };

        items.push(item);
    }

    items
}

fn valid_archive_records(values: &[Value]) -> impl Iterator<Item = ArchiveRecord> + '_ {
    values
        .iter()
        .filter_map(|value| serde_json::from_value::<ArchiveRecord>(value.clone()).ok())
        .filter(|record| {
            record.id > 0 && !record.slug.is_empty() && !record.resolved_title().is_empty()
        })
}

/// Archive/search-records strategy: JSON records from the browse API,
/// classified Movie by substring match on the free-text `type`.
pub fn parse_archive_items(values: &[Value], base_url: &str) -> Vec<CatalogItem> {
    valid_archive_records(values)
        .map(|record| {
            let id = format!("{}-{}", record.id, record.slug);
            let title = record.resolved_title().to_string();
            let poster = resolve_image_url(&record.imageurl, base_url);

            if is_movie_label(&record.kind) {
                CatalogItem::Movie(Movie::new(id, title).with_poster(poster))
            } else {
                CatalogItem::Show(TvShow::new(id, title).with_poster(poster))
            }
        })
        .collect()
}

/// Movies browse mapping; the request already filtered by type
pub fn parse_archive_movies(values: &[Value], base_url: &str) -> Vec<Movie> {
    valid_archive_records(values)
        .map(|record| {
            Movie::new(
                format!("{}-{}", record.id, record.slug),
                record.resolved_title(),
            )
            .with_poster(resolve_image_url(&record.imageurl, base_url))
        })
        .collect()
}

/// Shows browse mapping; the request already filtered by type
pub fn parse_archive_shows(values: &[Value], base_url: &str) -> Vec<TvShow> {
    valid_archive_records(values)
        .map(|record| {
            TvShow::new(
                format!("{}-{}", record.id, record.slug),
                record.resolved_title(),
            )
            .with_poster(resolve_image_url(&record.imageurl, base_url))
        })
        .collect()
}

/// Genre list from an HTML-entity-encoded `{id, name}` array; malformed
/// entries are skipped individually.
pub fn parse_genres_attr(raw: &str) -> Vec<Genre> {
    if raw.is_empty() {
        return Vec::new();
    }

    let decoded = raw.replace("&quot;", "\"");
    let Ok(values) = serde_json::from_str::<Vec<Value>>(&decoded) else {
        return Vec::new();
    };

    values
        .into_iter()
        .filter_map(|value| serde_json::from_value::<GenreRecord>(value).ok())
        .map(|record| Genre::new(record.id.to_string(), record.name))
        .collect()
}

/// Genre list straight off the archive page document
pub fn parse_archive_page_genres(doc: &Html) -> Vec<Genre> {
    let raw = doc
        .select(&SELECTORS.archive)
        .next()
        .and_then(|el| el.value().attr("all_genres"))
        .unwrap_or_default();

    parse_genres_attr(raw)
}

/// The `video-player` element of a detail page
#[derive(Debug, Clone, Default)]
pub struct PlayerElement {
    pub episodes_count: i32,
    /// URL-encoded JSON array, present for single-page episode lists
    pub episodes_raw: String,
    pub embed_url: String,
}

/// Everything a detail document yields in one pass
#[derive(Debug, Clone, Default)]
pub struct DetailPage {
    pub title: String,
    pub overview: String,
    pub poster: String,
    pub rating: Option<f64>,
    pub released: String,
    pub runtime: Option<i32>,
    pub genres: Vec<Genre>,
    pub recommendations: Vec<CatalogItem>,
    pub player: Option<PlayerElement>,
}

/// Value of the `small` element inside the info item labeled `label`
fn info_item_value(doc: &Html, label: &str) -> Option<String> {
    for item in doc.select(&SELECTORS.info_item) {
        let labeled = item
            .select(&SELECTORS.strong)
            .any(|strong| strong.text().collect::<String>().contains(label));

        if labeled && let Some(small) = item.select(&SELECTORS.small).next() {
            return Some(collect_text(small));
        }
    }

    None
}

/// Genre links of the info wrapper labeled "Generi": display text trimmed
/// of its trailing comma, id slugified from the name.
fn genre_links(doc: &Html) -> Vec<Genre> {
    for wrapper in doc.select(&SELECTORS.info_wrapper) {
        let labeled = wrapper
            .select(&SELECTORS.strong)
            .any(|strong| strong.text().collect::<String>().contains("Generi"));
        if !labeled {
            continue;
        }

        return wrapper
            .select(&SELECTORS.genre_link)
            .filter_map(|link| {
                let name = collect_text(link).trim_end_matches(',').to_string();
                if name.is_empty() {
                    return None;
                }
                let id = name.to_lowercase().replace(' ', "-");
                Some(Genre::new(id, name))
            })
            .collect();
    }

    Vec::new()
}

/// Related-items block, re-ordered movies first then shows
fn related_items(doc: &Html, base_url: &str) -> Vec<CatalogItem> {
    let Some(wrapper) = doc.select(&SELECTORS.related_wrapper).next() else {
        return Vec::new();
    };

    let mut movies = Vec::new();
    let mut shows = Vec::new();

    for item in wrapper.select(&SELECTORS.related_item) {
        let Some(link) = item.select(&SELECTORS.unstyled_link).next() else {
            continue;
        };
        let href = link.value().attr("href").unwrap_or_default();
        if href.is_empty() {
            continue;
        }
        let id = href.rsplit('/').next().unwrap_or(href);

        let title = item
            .select(&SELECTORS.related_title)
            .next()
            .map(collect_text)
            .unwrap_or_default();
        if title.is_empty() {
            continue;
        }

        let poster = item
            .select(&SELECTORS.img)
            .next()
            .and_then(|img| img.value().attr("src"))
            .unwrap_or_default();
        let poster = resolve_image_url(poster, base_url);

        let type_label = item
            .select(&SELECTORS.related_info)
            .next()
            .map(collect_text)
            .unwrap_or_default();

        if is_movie_label(&type_label) {
            movies.push(CatalogItem::Movie(Movie::new(id, title).with_poster(poster)));
        } else {
            shows.push(CatalogItem::Show(TvShow::new(id, title).with_poster(poster)));
        }
    }

    movies.extend(shows);
    movies
}

/// The `video-player` element, absent on malformed pages
pub fn parse_player(doc: &Html) -> Option<PlayerElement> {
    doc.select(&SELECTORS.video_player).next().map(|el| {
        let attrs = el.value();
        PlayerElement {
            episodes_count: attrs
                .attr("episodes_count")
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
            episodes_raw: attrs.attr("episodes").unwrap_or_default().to_string(),
            embed_url: attrs.attr("embed_url").unwrap_or_default().to_string(),
        }
    })
}

/// Extract a title/movie/show detail document in one pass
pub fn parse_detail(doc: &Html, base_url: &str) -> DetailPage {
    let title = doc
        .select(&SELECTORS.title)
        .next()
        .map(collect_text)
        .unwrap_or_default();

    let overview = doc
        .select(&SELECTORS.description)
        .next()
        .map(collect_text)
        .unwrap_or_default();

    let poster = doc
        .select(&SELECTORS.cover)
        .next()
        .and_then(|img| img.value().attr("src"))
        .unwrap_or_default();
    let poster = resolve_image_url(poster, base_url);

    let rating = info_item_value(doc, "Valutazione").and_then(|text| text.parse::<f64>().ok());

    let released = info_item_value(doc, "Anno").unwrap_or_default();

    let runtime = info_item_value(doc, "Durata")
        .and_then(|text| text.split_whitespace().next()?.parse::<i32>().ok());

    DetailPage {
        title,
        overview,
        poster,
        rating,
        released,
        runtime,
        genres: genre_links(doc),
        recommendations: related_items(doc, base_url),
        player: parse_player(doc),
    }
}
