use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tabled::Tabled;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub expires_at: DateTime<Utc>,
}

impl Token {
    /// Builds a token captured right now, deriving its expiry instant.
    pub fn issued_now(access_token: String, token_type: String, expires_in: u64) -> Self {
        let expires_at = Duration::try_seconds(expires_in.min(i64::MAX as u64) as i64)
            .and_then(|d| Utc::now().checked_add_signed(d))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            access_token,
            token_type,
            expires_in,
            expires_at,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Query parameters delivered to `/capture`, exactly as the provider sent
/// them in the redirect fragment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CaptureParams {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    pub expires_in: Option<String>,
    pub error: Option<String>,
}

/// One page of a paginated Spotify listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub items: Option<Vec<Value>>,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Items<T> {
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArtistRef {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AlbumRef {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub album: AlbumRef,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
}

impl Track {
    pub fn first_artist(&self) -> &str {
        self.artists
            .first()
            .map(|a| a.name.as_str())
            .unwrap_or("Unknown Artist")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
}

/// Item of `/me/tracks`.
#[derive(Debug, Clone, Deserialize)]
pub struct SavedTrack {
    pub track: Track,
}

/// Item of `/playlists/{id}/tracks`. The track is null for unavailable or
/// local entries.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    #[serde(default)]
    pub track: Option<Track>,
}

/// Item of `/me/albums`.
#[derive(Debug, Clone, Deserialize)]
pub struct SavedAlbum {
    pub album: Album,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistExport {
    pub id: String,
    pub name: String,
    pub tracks: Vec<Track>,
}

#[derive(Tabled)]
pub struct ExportSummaryRow {
    pub section: String,
    pub items: usize,
    pub status: String,
}
