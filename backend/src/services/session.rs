//! Runs the four discovery modes end to end and owns the current result set.
//!
//! A fetch overwrites the stored rows only once it has fully succeeded, so a
//! failed run leaves the previous table in place.

use crate::errors::FetchError;
use crate::models::RankedRow;
use crate::services::batch_fetcher::{
    collect_playlist_ids, collect_search_ids, fetch_details, MAX_SEARCH_RESULTS,
};
use crate::services::channel_resolver::{resolve_channel_id, resolve_uploads_playlist};
use crate::services::exporter::to_csv;
use crate::services::input_resolver::{
    parse_channel_reference, parse_playlist_reference, parse_video_reference, ChannelReference,
};
use crate::services::metrics::compute_rows;
use crate::services::ranker::{rank, SortKey, SortOrder, SortState};
use crate::services::youtube_client::CatalogApi;
use chrono::Utc;
use log::info;

pub const DEFAULT_LISTING_LIMIT: usize = 50;
pub const MAX_LISTING_LIMIT: usize = 200;
pub const DEFAULT_SEARCH_LIMIT: usize = 25;

/// Clamps a user-supplied limit to `1..=max`, falling back to `default`.
pub fn clamp_limit(requested: Option<i64>, default: usize, max: usize) -> usize {
    match requested {
        Some(value) => value.clamp(1, max as i64) as usize,
        None => default,
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultStore {
    pub rows: Vec<RankedRow>,
    pub sort: SortState,
}

impl ResultStore {
    pub fn from_rows(rows: Vec<RankedRow>) -> Self {
        ResultStore {
            rows,
            sort: SortState::default(),
        }
    }

    pub fn sorted(&self, key: SortKey, requested: Option<SortOrder>) -> ResultStore {
        let sort = self.sort.next(key, requested);
        ResultStore {
            rows: rank(self.rows.clone(), sort.key, sort.order),
            sort,
        }
    }

    pub fn to_csv(&self) -> Result<String, FetchError> {
        if self.rows.is_empty() {
            return Err(FetchError::Input("nothing to export".to_string()));
        }
        to_csv(&self.rows)
    }
}

#[derive(Debug, Default)]
pub struct Session {
    store: ResultStore,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> &ResultStore {
        &self.store
    }

    /// One video reference per line; lines that do not parse are skipped.
    pub async fn fetch_from_urls(
        &mut self,
        api: &dyn CatalogApi,
        text: &str,
    ) -> Result<&ResultStore, FetchError> {
        let ids: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter_map(parse_video_reference)
            .collect();
        if ids.is_empty() {
            return Err(FetchError::Input(
                "no valid video URL or id found".to_string(),
            ));
        }

        info!("Fetching {} videos from pasted references", ids.len());
        self.fetch_and_store(api, ids).await
    }

    pub async fn fetch_from_channel(
        &mut self,
        api: &dyn CatalogApi,
        input: &str,
        limit: usize,
    ) -> Result<&ResultStore, FetchError> {
        let reference = parse_channel_reference(input);
        if reference == ChannelReference::None {
            return Err(FetchError::Input(
                "enter a channel id, channel URL, @handle or username".to_string(),
            ));
        }

        let channel_id = resolve_channel_id(api, &reference)
            .await?
            .ok_or_else(|| {
                FetchError::LookupMiss(format!("no channel found for {:?}", input.trim()))
            })?;

        let uploads = resolve_uploads_playlist(api, &channel_id)
            .await?
            .ok_or_else(|| {
                FetchError::LookupMiss(format!("channel {channel_id} has no uploads playlist"))
            })?;

        let ids = collect_playlist_ids(api, &uploads, limit).await?;
        self.fetch_and_store(api, ids).await
    }

    pub async fn fetch_from_playlist(
        &mut self,
        api: &dyn CatalogApi,
        input: &str,
        limit: usize,
    ) -> Result<&ResultStore, FetchError> {
        let playlist_id = parse_playlist_reference(input).ok_or_else(|| {
            FetchError::Input("enter a playlist id or playlist URL".to_string())
        })?;

        let ids = collect_playlist_ids(api, &playlist_id, limit).await?;
        self.fetch_and_store(api, ids).await
    }

    pub async fn fetch_from_search(
        &mut self,
        api: &dyn CatalogApi,
        query: &str,
        limit: usize,
    ) -> Result<&ResultStore, FetchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(FetchError::Input("search query is empty".to_string()));
        }

        let ids = collect_search_ids(api, query, limit.min(MAX_SEARCH_RESULTS)).await?;
        self.fetch_and_store(api, ids).await
    }

    pub fn sort(&mut self, key: SortKey, requested: Option<SortOrder>) -> &ResultStore {
        self.store = self.store.sorted(key, requested);
        info!(
            "Re-sorted {} rows by {:?} {:?}",
            self.store.rows.len(),
            self.store.sort.key,
            self.store.sort.order
        );
        &self.store
    }

    pub fn export_csv(&self) -> Result<String, FetchError> {
        self.store.to_csv()
    }

    async fn fetch_and_store(
        &mut self,
        api: &dyn CatalogApi,
        ids: Vec<String>,
    ) -> Result<&ResultStore, FetchError> {
        let records = fetch_details(api, &ids).await?;
        let fetched = records.len();
        let rows = compute_rows(records, Utc::now());

        info!(
            "Ranked {} rows ({} fetched, {} excluded)",
            rows.len(),
            fetched,
            fetched - rows.len()
        );
        self.store = ResultStore::from_rows(rows);
        Ok(&self.store)
    }
}
