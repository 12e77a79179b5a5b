use crate::{
    spotify::client::{FetchError, SpotifyClient},
    types::{Album, Artist, Playlist, PlaylistItem, SavedAlbum, SavedTrack, Token, Track},
};

const PAGE_LIMIT: &str = "50";
const PLAYLIST_TRACKS_LIMIT: &str = "100";

/// Tracks saved in the user's "Liked Songs".
pub async fn liked_songs(client: &SpotifyClient, token: &Token) -> Result<Vec<Track>, FetchError> {
    let saved: Vec<SavedTrack> = client
        .fetch_items("/me/tracks", token, &[("limit", PAGE_LIMIT)])
        .await?;
    Ok(saved.into_iter().map(|s| s.track).collect())
}

/// Playlists owned or followed by the user.
pub async fn playlists(client: &SpotifyClient, token: &Token) -> Result<Vec<Playlist>, FetchError> {
    client
        .fetch_items("/me/playlists", token, &[("limit", PAGE_LIMIT)])
        .await
}

/// Tracks of one playlist. Entries without a track (removed or local
/// content) are skipped.
pub async fn playlist_tracks(
    client: &SpotifyClient,
    token: &Token,
    playlist_id: &str,
) -> Result<Vec<Track>, FetchError> {
    let path = format!("/playlists/{}/tracks", playlist_id);
    let items: Vec<PlaylistItem> = client
        .fetch_items(&path, token, &[("limit", PLAYLIST_TRACKS_LIMIT)])
        .await?;
    Ok(items.into_iter().filter_map(|i| i.track).collect())
}

/// Artists followed by the user. The listing is wrapped in an `artists`
/// object and paginated with `after` cursors encoded into `next`.
pub async fn followed_artists(
    client: &SpotifyClient,
    token: &Token,
) -> Result<Vec<Artist>, FetchError> {
    client
        .fetch_items_in(
            "/me/following",
            token,
            &[("type", "artist"), ("limit", PAGE_LIMIT)],
            Some("artists"),
        )
        .await
}

/// Albums saved in the user's library.
pub async fn saved_albums(client: &SpotifyClient, token: &Token) -> Result<Vec<Album>, FetchError> {
    let saved: Vec<SavedAlbum> = client
        .fetch_items("/me/albums", token, &[("limit", PAGE_LIMIT)])
        .await?;
    Ok(saved.into_iter().map(|s| s.album).collect())
}
