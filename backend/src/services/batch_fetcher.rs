//! Chunked detail lookups and cursor-paginated listings.
//!
//! Every loop here awaits one request before issuing the next, so there is
//! never more than a single call in flight. The first failure aborts the
//! whole operation and drops whatever was already collected.

use crate::errors::FetchError;
use crate::models::RawCatalogRecord;
use crate::services::youtube_client::{CatalogApi, Params};
use crate::utils::parse_iso8601_timestamp;
use log::info;
use serde_json::Value;

/// Largest id list / page size the API accepts per call.
pub const MAX_PAGE_SIZE: usize = 50;
/// Ceiling for search collection, regardless of what the caller asks for.
pub const MAX_SEARCH_RESULTS: usize = 50;

const UNTITLED: &str = "(no title)";

pub async fn fetch_details(
    api: &dyn CatalogApi,
    ids: &[String],
) -> Result<Vec<RawCatalogRecord>, FetchError> {
    let mut records = Vec::with_capacity(ids.len());

    for (index, chunk) in ids.chunks(MAX_PAGE_SIZE).enumerate() {
        info!("Fetching details chunk {} ({} ids)", index + 1, chunk.len());
        // Documentation: https://developers.google.com/youtube/v3/docs/videos/list
        let response = api
            .get_json(
                "videos",
                vec![
                    ("part", "snippet,statistics".to_string()),
                    ("id", chunk.join(",")),
                    ("maxResults", MAX_PAGE_SIZE.to_string()),
                ],
            )
            .await?;

        if let Some(items) = response["items"].as_array() {
            records.extend(items.iter().filter_map(record_from_item));
        }
    }

    info!("Fetched details for {} of {} ids", records.len(), ids.len());
    Ok(records)
}

fn record_from_item(item: &Value) -> Option<RawCatalogRecord> {
    let id = item["id"].as_str().filter(|id| !id.is_empty())?;

    Some(RawCatalogRecord {
        id: id.to_string(),
        title: item["snippet"]["title"]
            .as_str()
            .filter(|title| !title.is_empty())
            .unwrap_or(UNTITLED)
            .to_string(),
        channel_title: item["snippet"]["channelTitle"]
            .as_str()
            .unwrap_or("")
            .to_string(),
        published_at: item["snippet"]["publishedAt"]
            .as_str()
            .and_then(parse_iso8601_timestamp),
        view_count: item["statistics"]["viewCount"]
            .as_str()
            .unwrap_or("0")
            .parse()
            .unwrap_or(0),
    })
}

pub async fn collect_playlist_ids(
    api: &dyn CatalogApi,
    playlist_id: &str,
    limit: usize,
) -> Result<Vec<String>, FetchError> {
    // https://developers.google.com/youtube/v3/docs/playlistItems
    let base = vec![
        ("part", "contentDetails".to_string()),
        ("playlistId", playlist_id.to_string()),
    ];
    let ids = paginate(api, "playlistItems", base, limit, |item| {
        item["contentDetails"]["videoId"].as_str()
    })
    .await?;

    info!("Collected {} video ids from playlist {playlist_id}", ids.len());
    Ok(ids)
}

/// Newest first, as ordered by the API. Capped at [`MAX_SEARCH_RESULTS`].
pub async fn collect_search_ids(
    api: &dyn CatalogApi,
    query: &str,
    limit: usize,
) -> Result<Vec<String>, FetchError> {
    let limit = limit.min(MAX_SEARCH_RESULTS);
    let base = vec![
        ("part", "id".to_string()),
        ("type", "video".to_string()),
        ("order", "date".to_string()),
        ("q", query.to_string()),
    ];
    let ids = paginate(api, "search", base, limit, |item| {
        item["id"]["videoId"].as_str()
    })
    .await?;

    info!("Collected {} video ids for search {query:?}", ids.len());
    Ok(ids)
}

async fn paginate<F>(
    api: &dyn CatalogApi,
    resource: &str,
    base: Params,
    limit: usize,
    extract_id: F,
) -> Result<Vec<String>, FetchError>
where
    F: Fn(&Value) -> Option<&str>,
{
    let mut ids: Vec<String> = Vec::new();
    let mut next_page_token: Option<String> = None;
    let max_pages = limit.div_ceil(MAX_PAGE_SIZE);
    let mut page = 0;

    while ids.len() < limit && page < max_pages {
        page += 1;
        let mut params = base.clone();
        params.push(("maxResults", MAX_PAGE_SIZE.min(limit - ids.len()).to_string()));
        if let Some(token) = &next_page_token {
            params.push(("pageToken", token.clone()));
        }

        info!("Requesting {resource} page {page}");
        let response = api.get_json(resource, params).await?;

        if let Some(items) = response["items"].as_array() {
            for item in items {
                if let Some(video_id) = extract_id(item).filter(|id| !id.is_empty()) {
                    ids.push(video_id.to_string());
                }
            }
        }

        // Check for next page
        match response["nextPageToken"].as_str().filter(|t| !t.is_empty()) {
            Some(token) => next_page_token = Some(token.to_string()),
            None => break,
        }
    }

    ids.truncate(limit);
    Ok(ids)
}
