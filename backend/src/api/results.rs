use crate::api::results_response;
use crate::models::{ErrorResponse, ResultsResponse, SortRequest};
use crate::AppState;
use log::{info, warn};
use rocket::http::ContentType;
use rocket::serde::json::Json;
use rocket::{get, post, State};

#[get("/")]
pub async fn get_results(state: &State<AppState>) -> Json<ResultsResponse> {
    let session = state.session.lock().await;
    Json(results_response(session.results()))
}

#[post("/sort", data = "<request>")]
pub async fn sort_results(
    request: Json<SortRequest>,
    state: &State<AppState>,
) -> Json<ResultsResponse> {
    let mut session = state.session.lock().await;
    let store = session.sort(request.key, request.direction);
    Json(results_response(store))
}

#[get("/export")]
pub async fn export_results(
    state: &State<AppState>,
) -> Result<(ContentType, String), ErrorResponse> {
    let session = state.session.lock().await;
    match session.export_csv() {
        Ok(csv) => {
            info!("Exported {} rows as CSV", session.results().rows.len());
            Ok((ContentType::CSV, csv))
        }
        Err(e) => {
            warn!("CSV export refused: {e}");
            Err(e.into())
        }
    }
}
