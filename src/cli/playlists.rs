use std::path::PathBuf;

use crate::{config, error, management, success};

pub async fn playlists(output: Option<PathBuf>) {
    let (client, token) = super::auth::login().await;
    let path = output.unwrap_or_else(config::default_playlists_export_path);

    let Some(export) = management::collect_playlist_tracks(&client, &token).await else {
        error!("Nothing exported.");
    };

    if let Err(e) = export.persist(&path).await {
        error!("Failed to write Spotify playlists: {}", e);
    }

    success!(
        "{} playlists exported to {}",
        export.playlists.len(),
        path.display()
    );
}
