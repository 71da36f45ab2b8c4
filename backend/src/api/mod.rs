pub mod fetch;
pub mod results;

pub use fetch::*;
pub use results::*;

use crate::config::{resolve_api_key, YOUTUBE_API_BASE};
use crate::errors::FetchError;
use crate::models::{ErrorResponse, ResultsResponse};
use crate::services::session::ResultStore;
use crate::services::youtube_client::YouTubeClient;
use crate::AppState;
use log::{error, warn};
use rocket::serde::json::Json;

pub(crate) fn client_for(
    state: &AppState,
    api_key: Option<&str>,
) -> Result<YouTubeClient, FetchError> {
    let key = resolve_api_key(api_key)?;
    Ok(YouTubeClient::new(state.http.clone(), &YOUTUBE_API_BASE, &key))
}

pub(crate) fn results_response(store: &ResultStore) -> ResultsResponse {
    ResultsResponse {
        rows: store.rows.clone(),
        sort_key: store.sort.key,
        direction: store.sort.order,
        total: store.rows.len(),
    }
}

pub(crate) fn respond(
    result: Result<&ResultStore, FetchError>,
    action: &str,
) -> Result<Json<ResultsResponse>, ErrorResponse> {
    match result {
        Ok(store) => Ok(Json(results_response(store))),
        Err(e @ FetchError::LookupMiss(_)) | Err(e @ FetchError::Input(_)) => {
            warn!("{action}: {e}");
            Err(e.into())
        }
        Err(e) => {
            error!("{action} failed: {e:?}");
            Err(e.into())
        }
    }
}
