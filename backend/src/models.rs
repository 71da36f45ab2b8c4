use crate::errors::FetchError;
use crate::services::ranker::{SortKey, SortOrder};
use chrono::{DateTime, Utc};
use rocket::http::{ContentType, Status};
use rocket::request::Request;
use rocket::response::Responder;
use rocket::serde::{Deserialize, Serialize};
use rocket::{response, Response};
use std::io::Cursor;

/// One video as returned by the detail lookup, with absent fields defaulted.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCatalogRecord {
    pub id: String,
    pub title: String,
    pub channel_title: String,
    pub published_at: Option<DateTime<Utc>>, // None when missing or unparseable
    pub view_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRow {
    pub rank: usize,
    pub id: String,
    pub title: String,
    pub channel_title: String,
    pub published_at: DateTime<Utc>,
    pub view_count: u64,
    pub age_hours: f64,
    pub vph: f64,
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UrlsFetchRequest {
    pub api_key: Option<String>,
    pub urls: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChannelFetchRequest {
    pub api_key: Option<String>,
    pub input: String,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlaylistFetchRequest {
    pub api_key: Option<String>,
    pub input: String,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchFetchRequest {
    pub api_key: Option<String>,
    pub query: String,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SortRequest {
    pub key: SortKey,
    pub direction: Option<SortOrder>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResultsResponse {
    pub rows: Vec<RankedRow>,
    pub sort_key: SortKey,
    pub direction: SortOrder,
    pub total: usize,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip)]
    pub status: Status,
}

impl From<FetchError> for ErrorResponse {
    fn from(e: FetchError) -> Self {
        ErrorResponse {
            error: e.kind().to_string(),
            message: e.to_string(),
            status: e.status(),
        }
    }
}

impl<'r> Responder<'r, 'static> for ErrorResponse {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let json = serde_json::to_string(&self).map_err(|_| Status::InternalServerError)?;
        Response::build()
            .status(self.status)
            .header(ContentType::JSON)
            .sized_body(json.len(), Cursor::new(json))
            .ok()
    }
}
