use crate::api::{client_for, respond};
use crate::models::{
    ChannelFetchRequest, ErrorResponse, PlaylistFetchRequest, ResultsResponse,
    SearchFetchRequest, UrlsFetchRequest,
};
use crate::services::batch_fetcher::MAX_SEARCH_RESULTS;
use crate::services::session::{
    clamp_limit, DEFAULT_LISTING_LIMIT, DEFAULT_SEARCH_LIMIT, MAX_LISTING_LIMIT,
};
use crate::AppState;
use log::info;
use rocket::serde::json::Json;
use rocket::{post, State};

// The session lock is held for the whole pipeline, so only one fetch runs at a time.

#[post("/urls", data = "<request>")]
pub async fn fetch_from_urls(
    request: Json<UrlsFetchRequest>,
    state: &State<AppState>,
) -> Result<Json<ResultsResponse>, ErrorResponse> {
    let api = client_for(state, request.api_key.as_deref())?;
    let mut session = state.session.lock().await;
    let result = session.fetch_from_urls(&api, &request.urls).await;
    respond(result, "Fetch from URLs")
}

#[post("/channel", data = "<request>")]
pub async fn fetch_from_channel(
    request: Json<ChannelFetchRequest>,
    state: &State<AppState>,
) -> Result<Json<ResultsResponse>, ErrorResponse> {
    let api = client_for(state, request.api_key.as_deref())?;
    let limit = clamp_limit(request.limit, DEFAULT_LISTING_LIMIT, MAX_LISTING_LIMIT);
    info!("Collecting up to {limit} uploads for channel {}", request.input.trim());

    let mut session = state.session.lock().await;
    let result = session.fetch_from_channel(&api, &request.input, limit).await;
    respond(result, "Fetch from channel")
}

#[post("/playlist", data = "<request>")]
pub async fn fetch_from_playlist(
    request: Json<PlaylistFetchRequest>,
    state: &State<AppState>,
) -> Result<Json<ResultsResponse>, ErrorResponse> {
    let api = client_for(state, request.api_key.as_deref())?;
    let limit = clamp_limit(request.limit, DEFAULT_LISTING_LIMIT, MAX_LISTING_LIMIT);
    info!("Collecting up to {limit} videos from playlist {}", request.input.trim());

    let mut session = state.session.lock().await;
    let result = session.fetch_from_playlist(&api, &request.input, limit).await;
    respond(result, "Fetch from playlist")
}

#[post("/search", data = "<request>")]
pub async fn fetch_from_search(
    request: Json<SearchFetchRequest>,
    state: &State<AppState>,
) -> Result<Json<ResultsResponse>, ErrorResponse> {
    let api = client_for(state, request.api_key.as_deref())?;
    let limit = clamp_limit(request.limit, DEFAULT_SEARCH_LIMIT, MAX_SEARCH_RESULTS);
    info!("Searching {:?} for up to {limit} videos", request.query.trim());

    let mut session = state.session.lock().await;
    let result = session.fetch_from_search(&api, &request.query, limit).await;
    respond(result, "Fetch from search")
}
