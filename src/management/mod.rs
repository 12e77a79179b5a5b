mod library;

pub use library::LibraryExport;
pub use library::PlaylistTracksExport;
pub use library::SECTION_FOLLOWED_ARTISTS;
pub use library::SECTION_LIKED_SONGS;
pub use library::SECTION_PLAYLISTS;
pub use library::SECTION_SAVED_ALBUMS;
pub use library::assemble_library;
pub use library::collect_playlist_tracks;
