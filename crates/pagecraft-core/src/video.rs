//! Video share-link normalization.

use url::Url;

const YOUTUBE_EMBED: &str = "https://www.youtube.com/embed/";
const VIMEO_PLAYER: &str = "https://player.vimeo.com/video/";

/// Rewrite a YouTube or Vimeo share link into its embeddable player URL.
///
/// Anything that is not a recognizable YouTube or Vimeo link, including text
/// that does not parse as an absolute URL, is returned unchanged.
pub fn normalize_video_url(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }
    let Ok(url) = Url::parse(input) else {
        return input.to_string();
    };
    let host = url.host_str().unwrap_or_default();

    if host.contains("youtube.com") || host == "youtu.be" {
        if let Some(id) = youtube_id(&url, host) {
            return format!("{YOUTUBE_EMBED}{id}");
        }
    }

    if host.contains("vimeo.com") {
        let numeric = url
            .path_segments()
            .into_iter()
            .flatten()
            .find(|segment| !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()));
        if let Some(id) = numeric {
            return format!("{VIMEO_PLAYER}{id}");
        }
    }

    input.to_string()
}

fn youtube_id(url: &Url, host: &str) -> Option<String> {
    let id = if host == "youtu.be" {
        url.path().trim_start_matches('/').to_string()
    } else if let Some((_, v)) = url.query_pairs().find(|(key, v)| key == "v" && !v.is_empty()) {
        v.into_owned()
    } else if let Some(rest) = url.path().strip_prefix("/embed/") {
        rest.split('/').next().unwrap_or_default().to_string()
    } else {
        String::new()
    };
    (!id.is_empty()).then_some(id)
}
