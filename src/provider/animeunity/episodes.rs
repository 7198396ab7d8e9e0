use super::api_types::EpisodeRecord;
use crate::parser::extract_episode_name;
use crate::types::{Episode, Season};
use serde_json::Value;

/// Largest episode list the detail page embeds inline; anything bigger is
/// served in fixed-size chunks through the range-query endpoint.
pub const SINGLE_PAGE_LIMIT: i32 = 120;

/// Deterministic chunk boundaries for a catalog of `episodes_count`
/// episodes: contiguous, non-overlapping, covering exactly [1, N].
/// The first chunk is always [1, 120] when N > 120.
pub fn compute_ranges(episodes_count: i32) -> Vec<(i32, i32)> {
    if episodes_count <= SINGLE_PAGE_LIMIT {
        return vec![(1, episodes_count)];
    }

    let mut ranges = vec![(1, SINGLE_PAGE_LIMIT)];

    let remaining = episodes_count - SINGLE_PAGE_LIMIT;
    let full_chunks = remaining / SINGLE_PAGE_LIMIT;
    let partial_chunk = if remaining % SINGLE_PAGE_LIMIT > 0 { 1 } else { 0 };

    for i in 0..full_chunks + partial_chunk {
        let start = SINGLE_PAGE_LIMIT + 1 + i * SINGLE_PAGE_LIMIT;
        let end = (start + SINGLE_PAGE_LIMIT - 1).min(episodes_count);
        ranges.push((start, end));
    }

    ranges
}

/// Season list for a show: one season spanning everything when the list
/// fits a single page, one per chunk otherwise. The upstream site has no
/// season concept, so `number` stays 0 and chunk titles are the bare range.
pub fn build_seasons(show_id: &str, episodes_count: i32) -> Vec<Season> {
    if episodes_count > SINGLE_PAGE_LIMIT {
        compute_ranges(episodes_count)
            .into_iter()
            .map(|(start, end)| Season {
                id: format!("{show_id}-{start}-{end}"),
                number: 0,
                title: format!("{start}-{end}"),
            })
            .collect()
    } else {
        vec![Season {
            id: show_id.to_string(),
            number: 0,
            title: "Episodi".to_string(),
        }]
    }
}

/// Split a season id into the show id and an explicit chunk range.
///
/// A chunked id is `"{showId}-{start}-{end}"`; since slugs themselves
/// contain hyphens the range is only recognized when the id has at least
/// four segments and the last two parse as integers.
pub fn split_season_id(season_id: &str) -> (String, Option<(i32, i32)>) {
    let parts: Vec<&str> = season_id.split('-').collect();

    if parts.len() >= 4
        && let Ok(start) = parts[parts.len() - 2].parse::<i32>()
        && let Ok(end) = parts[parts.len() - 1].parse::<i32>()
    {
        let show_id = parts[..parts.len() - 2].join("-");
        return (show_id, Some((start, end)));
    }

    (season_id.to_string(), None)
}

/// First value of a possibly merged number field ("235-236" → 235)
pub fn parse_episode_number(raw: &str) -> i32 {
    raw.split('-').next().unwrap_or("").parse().unwrap_or(0)
}

/// Map the detail page's inline episode list (already URL-decoded and
/// JSON-parsed). The number falls back to the positional index.
pub fn map_inline_episodes(values: &[Value], show_id: &str) -> Vec<Episode> {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let record: EpisodeRecord =
                serde_json::from_value(value.clone()).unwrap_or_default();

            let number = record.number.parse::<i32>().unwrap_or(i as i32 + 1);

            let name = extract_episode_name(&record.file_name);
            let title = if name.is_empty() {
                format!("Episodio {number}")
            } else {
                name
            };

            Episode {
                id: format!("{show_id}/{}", record.id),
                number,
                title,
            }
        })
        .collect()
}

/// Map one chunk of a range-query response.
///
/// A merged upstream number like "235-236" yields the first value as the
/// numeric episode number and keeps the full range text in the title.
pub fn map_range_episodes(values: &[Value], show_id: &str) -> Vec<Episode> {
    values
        .iter()
        .map(|value| {
            let record: EpisodeRecord =
                serde_json::from_value(value.clone()).unwrap_or_default();

            let number_text = if record.number.is_empty() {
                "0".to_string()
            } else {
                record.number.clone()
            };
            let merged = number_text.contains('-');
            let number = parse_episode_number(&number_text);

            let name = extract_episode_name(&record.file_name);
            let title = match (name.is_empty(), merged) {
                (false, true) => format!("{name} ({number_text})"),
                (false, false) => name,
                (true, true) => format!("Episodio {number_text}"),
                (true, false) => format!("Episodio {number}"),
            };

            Episode {
                id: format!("{show_id}/{}", record.id),
                number,
                title,
            }
        })
        .collect()
}

/// Scan episode records for a requested number, merged-range aware;
/// first match wins.
pub fn find_episode_record(values: &[Value], episode_number: i32) -> Option<EpisodeRecord> {
    values
        .iter()
        .filter_map(|value| serde_json::from_value::<EpisodeRecord>(value.clone()).ok())
        .find(|record| parse_episode_number(&record.number) == episode_number)
}
