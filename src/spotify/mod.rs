//! # Spotify Integration Module
//!
//! Everything that talks to Spotify: the implicit-grant authentication flow,
//! the paginated Web API client and typed accessors for the library
//! resources that get exported.
//!
//! ## Modules
//!
//! - [`auth`] - Implicit-grant flow: starts the callback server, opens the
//!   browser on the authorize endpoint and waits on the token gate
//! - [`client`] - [`SpotifyClient`], a bearer-authenticated client that
//!   follows `next` links until a listing is exhausted
//! - [`library`] - Liked songs, playlists and their tracks, followed artists,
//!   saved albums
//! - [`user`] - Current user profile
//!
//! ## API Coverage
//!
//! - `GET /me`
//! - `GET /me/tracks`
//! - `GET /me/playlists`
//! - `GET /playlists/{playlist_id}/tracks`
//! - `GET /me/following?type=artist`
//! - `GET /me/albums`
//!
//! ## Error Types
//!
//! - [`FetchError`] - transport, status, body and decoding failures of a request
//! - [`auth::AuthError`] - failures of the authentication flow
//!
//! Requests are never retried; a failed request fails the whole listing it
//! belongs to.

pub mod auth;
pub mod client;
pub mod library;
pub mod user;

pub use client::{FetchError, SpotifyClient};
