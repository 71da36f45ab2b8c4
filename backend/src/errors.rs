use rocket::http::Status;
use thiserror::Error;

/// Everything that can stop a fetch pipeline.
///
/// `Input` and `LookupMiss` are user-facing outcomes. The remaining variants
/// abort the whole in-progress operation; nothing fetched before them is kept.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid input: {0}")]
    Input(String),

    #[error("YouTube API returned {status}: {body}")]
    Transport { status: u16, body: String },

    #[error("request to YouTube API failed: {0}")]
    Network(reqwest::Error),

    #[error("unexpected response from YouTube API: {0}")]
    Decode(String),

    #[error("no result: {0}")]
    LookupMiss(String),

    #[error("failed to build CSV export: {0}")]
    Export(String),
}

impl FetchError {
    /// Wraps a transport-level reqwest failure with the request URL stripped,
    /// since the query string carries the API key.
    pub fn network(err: reqwest::Error) -> Self {
        FetchError::Network(err.without_url())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Input(_) => "input_error",
            FetchError::Transport { .. } => "transport_error",
            FetchError::Network(_) => "network_error",
            FetchError::Decode(_) => "decode_error",
            FetchError::LookupMiss(_) => "no_result",
            FetchError::Export(_) => "export_error",
        }
    }

    pub fn status(&self) -> Status {
        match self {
            FetchError::Input(_) => Status::BadRequest,
            FetchError::LookupMiss(_) => Status::NotFound,
            FetchError::Transport { .. } | FetchError::Network(_) | FetchError::Decode(_) => {
                Status::BadGateway
            }
            FetchError::Export(_) => Status::InternalServerError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_carries_status_and_body() {
        let err = FetchError::Transport {
            status: 403,
            body: "{\"error\":\"quotaExceeded\"}".to_string(),
        };
        assert_eq!(err.status(), Status::BadGateway);
        assert!(err.to_string().contains("403"));
        assert!(err.to_string().contains("quotaExceeded"));
    }

    #[test]
    fn lookup_miss_is_not_found() {
        let err = FetchError::LookupMiss("channel".into());
        assert_eq!(err.status(), Status::NotFound);
        assert_eq!(err.kind(), "no_result");
    }
}
