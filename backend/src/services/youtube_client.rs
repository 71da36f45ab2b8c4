use crate::errors::FetchError;
use log::info;
use reqwest::Client;
use serde_json::Value;

/// Query parameters for one API call. Empty values are never sent.
pub type Params = Vec<(&'static str, String)>;

/// The one seam between the pipeline and the YouTube Data API.
#[rocket::async_trait]
pub trait CatalogApi: Send + Sync {
    async fn get_json(&self, resource: &str, params: Params) -> Result<Value, FetchError>;
}

pub struct YouTubeClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl YouTubeClient {
    pub fn new(http: Client, base_url: &str, api_key: &str) -> Self {
        YouTubeClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }
}

/// Drops parameters the API would reject when present but empty (`pageToken`).
pub fn prepare_query(params: Params) -> Params {
    params
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .collect()
}

#[rocket::async_trait]
impl CatalogApi for YouTubeClient {
    async fn get_json(&self, resource: &str, params: Params) -> Result<Value, FetchError> {
        // Documentation: https://developers.google.com/youtube/v3/docs
        let url = format!("{}/{}", self.base_url, resource);
        let query = prepare_query(params);
        info!("GET {url} {:?}", query);

        let response = self
            .http
            .get(&url)
            .query(&query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(FetchError::network)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Transport {
                status: status.as_u16(),
                body,
            });
        }

        response.json::<Value>().await.map_err(|e| {
            if e.is_decode() {
                FetchError::Decode(e.without_url().to_string())
            } else {
                FetchError::network(e)
            }
        })
    }
}
