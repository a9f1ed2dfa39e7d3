//! Turning whatever the user pasted into a [`ContentId`].

use url::Url;

use crate::{
    error::{KonspektError, Result},
    types::ContentId,
};

const BARE_ID_LEN: usize = 11;

fn is_youtube_host(host: &str) -> bool {
    let h = host.to_ascii_lowercase();
    h == "youtube.com" || h == "youtu.be" || h.ends_with(".youtube.com")
}

fn looks_like_bare_id(s: &str) -> bool {
    s.len() == BARE_ID_LEN
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Extract the video id from a YouTube link or a bare id.
///
/// Accepts `watch?v=`, `youtu.be/`, `/shorts/`, `/embed/` and `/live/` links,
/// with or without a scheme.
pub fn parse_video_link(input: &str) -> Result<ContentId> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(KonspektError::invalid_input(input, "no video link given"));
    }

    if looks_like_bare_id(trimmed) {
        return ContentId::new(trimmed);
    }

    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let url = Url::parse(&with_scheme)
        .map_err(|e| KonspektError::invalid_input(input, format!("not a URL: {e}")))?;

    let host = url
        .host_str()
        .ok_or_else(|| KonspektError::invalid_input(input, "URL has no host"))?;
    if !is_youtube_host(host) {
        return Err(KonspektError::invalid_input(
            input,
            format!("{host} is not a YouTube host"),
        ));
    }

    let id = video_id_from_url(&url)
        .ok_or_else(|| KonspektError::invalid_input(input, "no video id in link"))?;
    ContentId::new(id)
}

fn video_id_from_url(url: &Url) -> Option<String> {
    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());
    let first = segments.next();

    // youtu.be/<id>
    if url
        .host_str()
        .is_some_and(|h| h.eq_ignore_ascii_case("youtu.be"))
    {
        return first.map(str::to_string);
    }

    match first {
        Some("watch") => url
            .query_pairs()
            .find(|(k, _)| k == "v")
            .map(|(_, v)| v.trim().to_string())
            .filter(|v| !v.is_empty()),
        Some("shorts" | "embed" | "live" | "v") => segments.next().map(str::to_string),
        _ => None,
    }
}
