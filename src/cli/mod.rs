//! # CLI Module
//!
//! User-facing commands. Each command first runs the implicit-grant
//! authorization (the token lives only for the current run), then drives the
//! [`crate::management`] layer and reports progress on the console.
//!
//! ## Commands
//!
//! - [`auth`] - Authorize and show who is logged in
//! - [`export`] - Export liked songs, playlists with tracks, followed artists
//!   and saved albums into one JSON document
//! - [`playlists`] - Export a playlist-id to track-list map
//!
//! ## Usage Patterns
//!
//! ```bash
//! spotify-export auth
//! spotify-export export
//! spotify-export export --output ~/backup/library.json
//! spotify-export playlists --output data/spotify/spotify_library.json
//! ```
//!
//! Fatal problems (no token, output not writable) end the process with exit
//! code 1. A section that cannot be fetched is reported and left empty.

mod auth;
mod export;
mod playlists;

pub use auth::auth;
pub use export::export;
pub use playlists::playlists;
