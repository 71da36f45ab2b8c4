use crate::errors::FetchError;
use crate::services::input_resolver::ChannelReference;
use crate::services::youtube_client::CatalogApi;
use log::{info, warn};

/// Resolves any channel reference to a concrete channel id.
///
/// `Ok(None)` means the API answered but had no match. Transport failures are
/// returned as errors.
pub async fn resolve_channel_id(
    api: &dyn CatalogApi,
    reference: &ChannelReference,
) -> Result<Option<String>, FetchError> {
    let channel_id = match reference {
        ChannelReference::ChannelId(id) => Some(id.clone()),
        ChannelReference::Handle(handle) => channel_id_from_handle(api, handle).await?,
        ChannelReference::Username(username) => channel_id_from_username(api, username).await?,
        ChannelReference::None => None,
    };

    if channel_id.is_none() {
        warn!("Could not resolve channel reference {reference:?}");
    }
    Ok(channel_id)
}

// Search-based: returns the first channel hit, which is not guaranteed to own the handle.
async fn channel_id_from_handle(
    api: &dyn CatalogApi,
    handle: &str,
) -> Result<Option<String>, FetchError> {
    let response = api
        .get_json(
            "search",
            vec![
                ("part", "id".to_string()),
                ("type", "channel".to_string()),
                ("q", format!("@{}", handle.trim_start_matches('@'))),
                ("maxResults", "1".to_string()),
            ],
        )
        .await?;

    Ok(response["items"][0]["id"]["channelId"]
        .as_str()
        .map(String::from))
}

async fn channel_id_from_username(
    api: &dyn CatalogApi,
    username: &str,
) -> Result<Option<String>, FetchError> {
    let response = api
        .get_json(
            "channels",
            vec![
                ("part", "id".to_string()),
                ("forUsername", username.to_string()),
            ],
        )
        .await?;

    Ok(response["items"][0]["id"].as_str().map(String::from))
}

// returns the complete video-library-playlist (as list-id) of a channel with the given channel-id
pub async fn resolve_uploads_playlist(
    api: &dyn CatalogApi,
    channel_id: &str,
) -> Result<Option<String>, FetchError> {
    let response = api
        .get_json(
            "channels",
            vec![
                ("part", "contentDetails".to_string()),
                ("id", channel_id.to_string()),
            ],
        )
        .await?;

    let uploads = response["items"][0]["contentDetails"]["relatedPlaylists"]["uploads"]
        .as_str()
        .filter(|id| !id.is_empty())
        .map(String::from);

    match &uploads {
        Some(playlist_id) => info!("Channel {channel_id} uploads playlist: {playlist_id}"),
        None => warn!("No uploads playlist found for channel {channel_id}"),
    }
    Ok(uploads)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::youtube_client::testing::ScriptedApi;
    use serde_json::json;

    #[tokio::test]
    async fn channel_id_passes_through_without_a_call() {
        let api = ScriptedApi::new();
        let id = resolve_channel_id(&api, &ChannelReference::ChannelId("UCabc".into()))
            .await
            .unwrap();
        assert_eq!(id.as_deref(), Some("UCabc"));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn handle_uses_channel_search_and_takes_first_hit() {
        let api = ScriptedApi::new().respond(json!({
            "items": [
                { "id": { "kind": "youtube#channel", "channelId": "UCfirst" } },
                { "id": { "kind": "youtube#channel", "channelId": "UCsecond" } }
            ]
        }));
        let id = resolve_channel_id(&api, &ChannelReference::Handle("creator".into()))
            .await
            .unwrap();
        assert_eq!(id.as_deref(), Some("UCfirst"));

        let calls = api.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].resource, "search");
        assert_eq!(calls[0].param("q"), Some("@creator"));
        assert_eq!(calls[0].param("type"), Some("channel"));
    }

    #[tokio::test]
    async fn username_without_match_is_none_not_error() {
        let api = ScriptedApi::new().respond(json!({ "pageInfo": { "totalResults": 0 } }));
        let id = resolve_channel_id(&api, &ChannelReference::Username("nobody".into()))
            .await
            .unwrap();
        assert!(id.is_none());
        assert_eq!(api.calls()[0].param("forUsername"), Some("nobody"));
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let api = ScriptedApi::new().fail(403, "quotaExceeded");
        let err = resolve_channel_id(&api, &ChannelReference::Username("x".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport { status: 403, .. }));
    }

    #[tokio::test]
    async fn uploads_playlist_from_related_playlists() {
        let api = ScriptedApi::new().respond(json!({
            "items": [{
                "id": "UCabc",
                "contentDetails": { "relatedPlaylists": { "likes": "", "uploads": "UUabc" } }
            }]
        }));
        let uploads = resolve_uploads_playlist(&api, "UCabc").await.unwrap();
        assert_eq!(uploads.as_deref(), Some("UUabc"));
        assert_eq!(api.calls()[0].param("id"), Some("UCabc"));
    }

    #[tokio::test]
    async fn uploads_playlist_missing_is_none() {
        let api = ScriptedApi::new().respond(json!({ "items": [] }));
        assert!(resolve_uploads_playlist(&api, "UCgone").await.unwrap().is_none());
    }
}
