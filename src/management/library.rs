use std::{collections::BTreeMap, path::Path, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::{
    info,
    spotify::{SpotifyClient, library},
    types::{Album, Artist, ExportSummaryRow, PlaylistExport, Token, Track},
    utils, warning,
};

pub const SECTION_LIKED_SONGS: &str = "liked_songs";
pub const SECTION_PLAYLISTS: &str = "playlists";
pub const SECTION_FOLLOWED_ARTISTS: &str = "followed_artists";
pub const SECTION_SAVED_ALBUMS: &str = "saved_albums";

/// The exported library.
///
/// `incomplete` names every section (or `playlists/<id>` entry) whose fetch
/// failed; those are present in the document but empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LibraryExport {
    pub liked_songs: Vec<Track>,
    pub playlists: Vec<PlaylistExport>,
    pub followed_artists: Vec<Artist>,
    pub saved_albums: Vec<Album>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub incomplete: Vec<String>,
}

impl LibraryExport {
    pub fn is_complete(&self) -> bool {
        self.incomplete.is_empty()
    }

    pub fn summary(&self) -> Vec<ExportSummaryRow> {
        let status = |section: &str| {
            if self
                .incomplete
                .iter()
                .any(|s| s == section || s.starts_with(&format!("{}/", section)))
            {
                "incomplete".to_string()
            } else {
                "ok".to_string()
            }
        };

        vec![
            ExportSummaryRow {
                section: SECTION_LIKED_SONGS.to_string(),
                items: self.liked_songs.len(),
                status: status(SECTION_LIKED_SONGS),
            },
            ExportSummaryRow {
                section: SECTION_PLAYLISTS.to_string(),
                items: self.playlists.len(),
                status: status(SECTION_PLAYLISTS),
            },
            ExportSummaryRow {
                section: SECTION_FOLLOWED_ARTISTS.to_string(),
                items: self.followed_artists.len(),
                status: status(SECTION_FOLLOWED_ARTISTS),
            },
            ExportSummaryRow {
                section: SECTION_SAVED_ALBUMS.to_string(),
                items: self.saved_albums.len(),
                status: status(SECTION_SAVED_ALBUMS),
            },
        ]
    }

    pub async fn persist(&self, path: &Path) -> Result<(), String> {
        write_json(path, self).await
    }
}

/// Playlist id to track list, the output of the playlists-only mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PlaylistTracksExport {
    pub playlists: BTreeMap<String, Vec<Track>>,
}

impl PlaylistTracksExport {
    pub async fn persist(&self, path: &Path) -> Result<(), String> {
        write_json(path, self).await
    }
}

/// Fetches the four library sections one after another.
///
/// A failing section is logged and recorded in
/// [`LibraryExport::incomplete`] instead of aborting the export.
pub async fn assemble_library(client: &SpotifyClient, token: &Token) -> LibraryExport {
    let mut export = LibraryExport::default();
    let pb = spinner();

    warn_if_expired(token);
    pb.set_message("Fetching liked songs...");
    match library::liked_songs(client, token).await {
        Ok(tracks) => export.liked_songs = tracks,
        Err(e) => {
            pb.suspend(|| warning!("Failed to fetch liked songs: {}", e));
            export.incomplete.push(SECTION_LIKED_SONGS.to_string());
        }
    }

    warn_if_expired(token);
    pb.set_message("Fetching playlists...");
    match library::playlists(client, token).await {
        Ok(playlists) => {
            let total = playlists.len();
            for (idx, playlist) in playlists.into_iter().enumerate() {
                pb.set_message(format!(
                    "Fetching tracks of playlist {}/{}: {}",
                    idx + 1,
                    total,
                    playlist.name
                ));
                let tracks = match library::playlist_tracks(client, token, &playlist.id).await {
                    Ok(tracks) => tracks,
                    Err(e) => {
                        pb.suspend(|| {
                            warning!("Failed to fetch tracks of {}: {}", playlist.name, e)
                        });
                        export
                            .incomplete
                            .push(format!("{}/{}", SECTION_PLAYLISTS, playlist.id));
                        Vec::new()
                    }
                };
                export.playlists.push(PlaylistExport {
                    id: playlist.id,
                    name: playlist.name,
                    tracks,
                });
            }
        }
        Err(e) => {
            pb.suspend(|| warning!("Failed to fetch playlists: {}", e));
            export.incomplete.push(SECTION_PLAYLISTS.to_string());
        }
    }

    warn_if_expired(token);
    pb.set_message("Fetching followed artists...");
    match library::followed_artists(client, token).await {
        Ok(artists) => export.followed_artists = artists,
        Err(e) => {
            pb.suspend(|| warning!("Failed to fetch followed artists: {}", e));
            export.incomplete.push(SECTION_FOLLOWED_ARTISTS.to_string());
        }
    }

    warn_if_expired(token);
    pb.set_message("Fetching saved albums...");
    match library::saved_albums(client, token).await {
        Ok(albums) => export.saved_albums = albums,
        Err(e) => {
            pb.suspend(|| warning!("Failed to fetch saved albums: {}", e));
            export.incomplete.push(SECTION_SAVED_ALBUMS.to_string());
        }
    }

    pb.finish_and_clear();
    export
}

/// Fetches every playlist with its tracks, printing each one as it goes.
///
/// A playlist whose tracks cannot be fetched maps to an empty list. Returns
/// `None` only when the playlist listing itself fails.
pub async fn collect_playlist_tracks(
    client: &SpotifyClient,
    token: &Token,
) -> Option<PlaylistTracksExport> {
    let playlists = match library::playlists(client, token).await {
        Ok(playlists) => playlists,
        Err(e) => {
            warning!("Failed to fetch playlists: {}", e);
            return None;
        }
    };

    let mut export = PlaylistTracksExport::default();
    for playlist in playlists {
        info!("🎧 Playlist: {}", playlist.name);
        let tracks = match library::playlist_tracks(client, token, &playlist.id).await {
            Ok(tracks) => tracks,
            Err(e) => {
                warning!("Failed to fetch tracks of {}: {}", playlist.name, e);
                Vec::new()
            }
        };
        for track in &tracks {
            info!("🎶 Track: {}", utils::describe_track(track));
        }
        export.playlists.insert(playlist.id, tracks);
    }

    Some(export)
}

fn warn_if_expired(token: &Token) {
    if token.is_expired() {
        warning!(
            "Access token expired at {}; remaining requests will likely be rejected.",
            token.expires_at.format("%H:%M:%S UTC")
        );
    }
}

fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    let json = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    async_fs::write(path, json)
        .await
        .map_err(|e| format!("{}: {}", path.display(), e))
}
