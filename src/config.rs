//! Configuration management for the Spotify library exporter.
//!
//! Configuration values come from environment variables, optionally loaded
//! from a `.env` file in the local data directory. Unlike a confidential
//! client, the implicit-grant flow needs no secret, so every value has a
//! working built-in default and the `.env` file is optional.
//!
//! Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Built-in defaults

use std::{env, path::PathBuf, time::Duration};

/// How long the authentication flow waits for the browser redirect.
pub const AUTH_TIMEOUT: Duration = Duration::from_secs(120);

/// Lifetime assumed for a captured token when the provider omits `expires_in`.
pub const DEFAULT_EXPIRES_IN: u64 = 3600;

const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:43019";
const DEFAULT_CLIENT_ID: &str = "5c098bcc800e45d49e476265bc9b6934";
const DEFAULT_SCOPE: &str =
    "playlist-read-private playlist-read-collaborative user-library-read user-follow-read";
const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the `spotify-export` data directory if it doesn't exist and loads
/// `spotify-export/.env` from it when present:
/// - Linux: `~/.local/share/spotify-export/.env`
/// - macOS: `~/Library/Application Support/spotify-export/.env`
/// - Windows: `%LOCALAPPDATA%/spotify-export/.env`
///
/// A missing file is not an error. Variables already set in the process
/// environment are not overridden.
///
/// # Errors
///
/// Returns an error string if the directory cannot be created or the file
/// exists but cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotify-export/.env");
    path
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Returns the address the local OAuth callback server binds to.
///
/// Reads `SERVER_ADDRESS`, defaulting to `127.0.0.1:43019`. The redirect URI
/// registered with Spotify must point at `http://<this address>/redirect`.
pub fn server_addr() -> String {
    var_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Returns the Spotify application client ID (`SPOTIFY_API_AUTH_CLIENT_ID`).
pub fn spotify_client_id() -> String {
    var_or("SPOTIFY_API_AUTH_CLIENT_ID", DEFAULT_CLIENT_ID)
}

/// Returns the space separated scopes requested during authorization.
///
/// Reads `SPOTIFY_API_AUTH_SCOPE`. The default covers private and
/// collaborative playlists, the saved library and followed artists.
pub fn spotify_scope() -> String {
    var_or("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE)
}

/// Returns the Spotify OAuth authorization URL (`SPOTIFY_API_AUTH_URL`).
pub fn spotify_apiauth_url() -> String {
    var_or("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL)
}

/// Returns the Spotify Web API base URL (`SPOTIFY_API_URL`).
///
/// Resource paths such as `/me/tracks` are appended to this value verbatim.
pub fn spotify_apiurl() -> String {
    var_or("SPOTIFY_API_URL", DEFAULT_API_URL)
}

/// Default destination of the full library export: `~/Desktop/spotify_library.json`.
pub fn default_library_export_path() -> PathBuf {
    let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("Desktop");
    path.push("spotify_library.json");
    path
}

/// Default destination of the playlist track map: `data/spotify/spotify_library.json`.
pub fn default_playlists_export_path() -> PathBuf {
    PathBuf::from("data/spotify/spotify_library.json")
}
