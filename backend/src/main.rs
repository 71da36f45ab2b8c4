#[macro_use]
extern crate rocket;

mod api;
mod config;
mod errors;
mod models;
mod services;
mod utils;

use crate::services::session::Session;
use rocket::{Build, Rocket};
use tokio::sync::Mutex;

pub struct AppState {
    pub session: Mutex<Session>,
    pub http: reqwest::Client,
}

pub fn build_rocket(state: AppState, cors: rocket_cors::Cors) -> Rocket<Build> {
    rocket::build()
        .manage(state)
        .attach(cors)
        .mount(
            "/api/fetch",
            routes![
                api::fetch_from_urls,
                api::fetch_from_channel,
                api::fetch_from_playlist,
                api::fetch_from_search,
            ],
        )
        .mount(
            "/api/results",
            routes![api::get_results, api::sort_results, api::export_results],
        )
}

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    config::load_environment();
    config::init_logger();

    let state = config::create_app_state()?;
    let cors = config::create_cors()?;

    build_rocket(state, cors)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Rocket failed: {e}"))?;
    Ok(())
}

#[cfg(test)]
mod test_support {
    use super::*;
    use rocket::local::asynchronous::Client;

    pub async fn local_client() -> Client {
        let state = config::create_app_state().expect("app state");
        let cors = config::create_cors().expect("cors");
        Client::tracked(build_rocket(state, cors))
            .await
            .expect("valid rocket instance")
    }
}
