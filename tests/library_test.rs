mod common;

use serde_json::{Value, json};
use spotify_export::{
    management::{
        LibraryExport, SECTION_SAVED_ALBUMS, assemble_library, collect_playlist_tracks,
    },
    spotify::SpotifyClient,
};

use common::{Fixture, ok, serve, status, token, track};

fn temp_path(name: &str) -> std::path::PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("spotify-export-test-{}-{}", std::process::id(), name));
    path.push("export.json");
    path
}

async fn library_fixture(albums_ok: bool) -> Fixture {
    serve(move |base| {
        let mut routes = vec![
            ok(
                "/v1/me/tracks",
                json!({
                    "items": [ { "added_at": "2024-01-01T00:00:00Z", "track": track("Liked", "A", "X") } ],
                    "next": null,
                }),
            ),
            ok(
                "/v1/me/playlists",
                json!({
                    "items": [ {"id": "p1", "name": "Road"}, {"id": "p2", "name": "Broken"} ],
                    "next": null,
                }),
            ),
            ok(
                "/v1/playlists/p1/tracks",
                json!({
                    "items": [
                        { "track": track("One", "B", "Y") },
                        { "track": null },
                    ],
                    "next": format!("{}/v1/playlists/p1/tracks/2", base),
                }),
            ),
            ok(
                "/v1/playlists/p1/tracks/2",
                json!({ "items": [ { "track": track("Two", "C", "Z") } ], "next": null }),
            ),
            status("/v1/playlists/p2/tracks", 500),
            ok(
                "/v1/me/following",
                json!({
                    "artists": {
                        "items": [ {"id": "ar1", "name": "Artist", "genres": ["rock"]} ],
                        "next": null,
                        "cursors": { "after": null },
                    }
                }),
            ),
        ];
        if albums_ok {
            routes.push(ok(
                "/v1/me/albums",
                json!({
                    "items": [ { "album": { "name": "Album", "artists": [ {"name": "D"} ] } } ],
                }),
            ));
        } else {
            routes.push(status("/v1/me/albums", 404));
        }
        routes
    })
    .await
}

#[tokio::test]
async fn test_assemble_library_collects_all_sections() {
    let fixture = library_fixture(true).await;
    let client = SpotifyClient::new(fixture.api_url());

    let export = assemble_library(&client, &token()).await;

    assert_eq!(export.liked_songs.len(), 1);
    assert_eq!(export.liked_songs[0].name, "Liked");

    assert_eq!(export.playlists.len(), 2);
    assert_eq!(export.playlists[0].id, "p1");
    let names: Vec<&str> = export.playlists[0]
        .tracks
        .iter()
        .map(|t| t.name.as_str())
        .collect();
    assert_eq!(names, vec!["One", "Two"]);

    assert_eq!(export.followed_artists.len(), 1);
    assert_eq!(export.followed_artists[0].genres, vec!["rock".to_string()]);
    assert_eq!(export.saved_albums.len(), 1);
    assert_eq!(export.saved_albums[0].name, "Album");

    assert_eq!(export.incomplete, vec!["playlists/p2".to_string()]);
}

#[tokio::test]
async fn test_failed_playlist_keeps_empty_entry() {
    let fixture = library_fixture(true).await;
    let client = SpotifyClient::new(fixture.api_url());

    let export = assemble_library(&client, &token()).await;

    let broken = export.playlists.iter().find(|p| p.id == "p2").unwrap();
    assert_eq!(broken.name, "Broken");
    assert!(broken.tracks.is_empty());
}

#[tokio::test]
async fn test_failed_section_is_reported_not_fatal() {
    let fixture = library_fixture(false).await;
    let client = SpotifyClient::new(fixture.api_url());

    let export = assemble_library(&client, &token()).await;

    assert!(export.saved_albums.is_empty());
    assert!(!export.is_complete());
    assert!(export.incomplete.contains(&SECTION_SAVED_ALBUMS.to_string()));
    assert_eq!(export.followed_artists.len(), 1);

    let summary = export.summary();
    let albums = summary.iter().find(|r| r.section == "saved_albums").unwrap();
    assert_eq!(albums.status, "incomplete");
    let playlists = summary.iter().find(|r| r.section == "playlists").unwrap();
    assert_eq!(playlists.status, "incomplete");
    let liked = summary.iter().find(|r| r.section == "liked_songs").unwrap();
    assert_eq!(liked.status, "ok");
    assert_eq!(liked.items, 1);
}

#[tokio::test]
async fn test_unreachable_api_yields_empty_export() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = SpotifyClient::new(format!("http://{}/v1", addr));

    let export = assemble_library(&client, &token()).await;

    assert!(export.liked_songs.is_empty());
    assert!(export.playlists.is_empty());
    assert_eq!(
        export.incomplete,
        vec![
            "liked_songs".to_string(),
            "playlists".to_string(),
            "followed_artists".to_string(),
            "saved_albums".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_persist_writes_indented_document() {
    let fixture = library_fixture(false).await;
    let client = SpotifyClient::new(fixture.api_url());
    let export = assemble_library(&client, &token()).await;
    let path = temp_path("library");

    export.persist(&path).await.unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("\n  \"liked_songs\""));
    let value: Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["liked_songs"][0]["name"], "Liked");
    assert_eq!(value["liked_songs"][0]["artists"][0]["name"], "A");
    assert_eq!(value["playlists"][0]["tracks"][1]["name"], "Two");
    assert_eq!(value["incomplete"], json!(["playlists/p2", "saved_albums"]));

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_complete_export_has_no_incomplete_key() {
    let value = serde_json::to_value(LibraryExport::default()).unwrap();

    assert_eq!(
        value,
        json!({
            "liked_songs": [],
            "playlists": [],
            "followed_artists": [],
            "saved_albums": [],
        })
    );
}

#[tokio::test]
async fn test_collect_playlist_tracks_maps_ids_to_tracks() {
    let fixture = library_fixture(true).await;
    let client = SpotifyClient::new(fixture.api_url());

    let export = collect_playlist_tracks(&client, &token()).await.unwrap();

    assert_eq!(export.playlists.len(), 2);
    assert_eq!(export.playlists["p1"].len(), 2);
    assert!(export.playlists["p2"].is_empty());

    let path = temp_path("playlists");
    export.persist(&path).await.unwrap();
    let value: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["p1"][0]["name"], "One");
    assert_eq!(value["p2"], json!([]));
    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[tokio::test]
async fn test_collect_playlist_tracks_fails_without_listing() {
    let fixture = serve(|_| vec![status("/v1/me/playlists", 401)]).await;
    let client = SpotifyClient::new(fixture.api_url());

    assert!(collect_playlist_tracks(&client, &token()).await.is_none());
}
