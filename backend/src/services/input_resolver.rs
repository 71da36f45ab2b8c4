//! Turns whatever the user pasted (watch links, short links, bare ids, channel
//! URLs, handles) into canonical YouTube identifiers.
//!
//! Every parser returns an explicit `Option`/variant. Nothing here touches the
//! network and nothing here fails on malformed input.

use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

lazy_static! {
    static ref BARE_VIDEO_ID: Regex = Regex::new(r"^[A-Za-z0-9_-]{10,}$").unwrap();
    static ref PLAYLIST_ID_PREFIX: Regex = Regex::new(r"(?i)^(PL|UU|LL|FL)").unwrap();
}

const CHANNEL_ID_PREFIX: &str = "UC";
const CHANNEL_ID_MIN_LEN: usize = 20;

/// The three ways a channel can be addressed, plus "nothing usable".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelReference {
    ChannelId(String),
    Handle(String), // stored without the leading '@'
    Username(String),
    None,
}

pub fn parse_video_reference(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    Url::parse(text)
        .ok()
        .and_then(|url| video_id_from_url(&url))
        .or_else(|| BARE_VIDEO_ID.is_match(text).then(|| text.to_string()))
}

fn video_id_from_url(url: &Url) -> Option<String> {
    let host = url.host_str()?;

    let id = if host.contains("youtube.com") {
        // https://www.youtube.com/watch?v=VIDEO_ID
        if url.path() == "/watch" {
            url.query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned())
        } else if url.path().starts_with("/shorts/") || url.path().starts_with("/live/") {
            url.path_segments()
                .and_then(|mut segments| segments.nth(1))
                .map(str::to_string)
        } else {
            None
        }
    } else if host == "youtu.be" {
        // https://youtu.be/VIDEO_ID
        url.path_segments()
            .and_then(|mut segments| segments.next())
            .map(str::to_string)
    } else {
        None
    };

    id.filter(|id| !id.is_empty())
}

pub fn parse_playlist_reference(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    Url::parse(text)
        .ok()
        .and_then(|url| {
            url.query_pairs()
                .find(|(key, value)| key == "list" && !value.is_empty())
                .map(|(_, value)| value.into_owned())
        })
        .or_else(|| PLAYLIST_ID_PREFIX.is_match(text).then(|| text.to_string()))
}

/// Best-effort classification. Plain text that is neither an id nor a handle
/// is assumed to be a legacy username, which may well be wrong.
pub fn parse_channel_reference(text: &str) -> ChannelReference {
    let s = text.trim();
    if s.is_empty() {
        return ChannelReference::None;
    }
    if s.starts_with(CHANNEL_ID_PREFIX) && s.chars().count() >= CHANNEL_ID_MIN_LEN {
        return ChannelReference::ChannelId(s.to_string());
    }

    match Url::parse(s) {
        Ok(url) => channel_reference_from_url(&url),
        Err(_) => match s.strip_prefix('@') {
            Some("") => ChannelReference::None,
            Some(handle) => ChannelReference::Handle(handle.to_string()),
            None => ChannelReference::Username(s.to_string()),
        },
    }
}

fn channel_reference_from_url(url: &Url) -> ChannelReference {
    let path = url.path();
    let mut segments = path.split('/').skip(1);
    let first = segments.next().unwrap_or("");
    let second = segments.next().unwrap_or("");

    let reference = if path.starts_with("/channel/") {
        ChannelReference::ChannelId(second.to_string())
    } else if path.starts_with("/@") {
        ChannelReference::Handle(first.trim_start_matches('@').to_string())
    } else if path.starts_with("/c/") || path.starts_with("/user/") {
        ChannelReference::Username(second.to_string())
    } else {
        ChannelReference::None
    };

    match reference {
        ChannelReference::ChannelId(ref v)
        | ChannelReference::Handle(ref v)
        | ChannelReference::Username(ref v)
            if v.is_empty() =>
        {
            ChannelReference::None
        }
        other => other,
    }
}
