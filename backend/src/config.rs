use crate::errors::FetchError;
use crate::services::session::Session;
use crate::AppState;
use anyhow::Result;
use env_logger::Builder;
use lazy_static::lazy_static;
use log::{info, LevelFilter};
use reqwest::Client;
use rocket::http::Method;
use rocket_cors::{AllowedHeaders, AllowedOrigins, CorsOptions};
use std::env;
use tokio::sync::Mutex;

pub const DEFAULT_YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

lazy_static! {
    pub static ref YOUTUBE_API_KEY: Option<String> = env::var("YOUTUBE_API_KEY")
        .ok()
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty());
    pub static ref YOUTUBE_API_BASE: String =
        env::var("YOUTUBE_API_BASE").unwrap_or_else(|_| DEFAULT_YOUTUBE_API_BASE.to_string());
    pub static ref CORS_ALLOWED_ORIGIN: String =
        env::var("CORS_ALLOWED_ORIGIN").unwrap_or_else(|_| "http://localhost:8080".to_string());
}

pub fn init_logger() {
    Builder::new().filter_level(LevelFilter::Info).init();
    info!("Starting VPH backend...");
}

pub fn load_environment() {
    dotenv::dotenv().ok();
}

/// A key sent with the request wins over the configured default.
pub fn resolve_api_key(explicit: Option<&str>) -> Result<String, FetchError> {
    pick_api_key(explicit, YOUTUBE_API_KEY.as_deref())
}

fn pick_api_key(explicit: Option<&str>, configured: Option<&str>) -> Result<String, FetchError> {
    explicit
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .or(configured)
        .map(String::from)
        .ok_or_else(|| {
            FetchError::Input("no YouTube API key provided or configured".to_string())
        })
}

pub fn create_http_client() -> Result<Client> {
    let client = Client::builder()
        .user_agent(concat!("vph-backend/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

pub fn create_app_state() -> Result<AppState> {
    info!("Using YouTube API at: {}", &*YOUTUBE_API_BASE);
    if YOUTUBE_API_KEY.is_none() {
        info!("No default YOUTUBE_API_KEY set; requests must carry their own key.");
    }

    Ok(AppState {
        session: Mutex::new(Session::new()),
        http: create_http_client()?,
    })
}

pub fn create_cors() -> Result<rocket_cors::Cors> {
    let cors = CorsOptions::default()
        .allowed_origins(AllowedOrigins::some_exact(&[CORS_ALLOWED_ORIGIN.as_str()]))
        .allowed_methods(
            vec![Method::Get, Method::Post, Method::Options]
                .into_iter()
                .map(From::from)
                .collect(),
        )
        .allowed_headers(AllowedHeaders::some(&["Accept", "Content-Type"]))
        .to_cors()
        .map_err(|e| anyhow::anyhow!("Failed to create CORS options: {}", e))?;

    Ok(cors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_key_wins() {
        assert_eq!(
            pick_api_key(Some(" mine "), Some("configured")).unwrap(),
            "mine"
        );
    }

    #[test]
    fn blank_explicit_key_falls_back_to_configured() {
        assert_eq!(
            pick_api_key(Some("   "), Some("configured")).unwrap(),
            "configured"
        );
        assert_eq!(pick_api_key(None, Some("configured")).unwrap(), "configured");
    }

    #[test]
    fn missing_key_is_input_error() {
        assert!(matches!(
            pick_api_key(None, None),
            Err(FetchError::Input(_))
        ));
        assert!(matches!(
            pick_api_key(Some(""), None),
            Err(FetchError::Input(_))
        ));
    }

    #[test]
    fn cors_builds_from_defaults() {
        assert!(create_cors().is_ok());
    }
}
