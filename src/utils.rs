use reqwest::Url;

use crate::{config::DEFAULT_EXPIRES_IN, types::Track};

/// Parses the provider's `expires_in` value.
///
/// Falls back to one hour when the value is absent, empty or not a
/// non-negative integer.
pub fn parse_expires_in(raw: Option<&str>) -> u64 {
    raw.map(str::trim)
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(DEFAULT_EXPIRES_IN)
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Builds the implicit-grant authorization URL.
///
/// Parameters are form-encoded, so the space separated scope list ends up as
/// `playlist-read-private+user-library-read`.
pub fn build_authorize_url(
    auth_url: &str,
    client_id: &str,
    scope: &str,
    redirect_uri: &str,
) -> Result<String, String> {
    let url = Url::parse_with_params(
        auth_url,
        &[
            ("response_type", "token"),
            ("client_id", client_id),
            ("scope", scope),
            ("redirect_uri", redirect_uri),
        ],
    )
    .map_err(|e| format!("invalid authorization url {}: {}", auth_url, e))?;

    Ok(url.to_string())
}

/// Formats a track the way progress lines show it: `artist - title (album)`.
pub fn describe_track(track: &Track) -> String {
    format!(
        "{} - {} ({})",
        track.first_artist(),
        track.name,
        track.album.name
    )
}
