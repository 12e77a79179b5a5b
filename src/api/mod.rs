//! # API Module
//!
//! Route handlers of the local callback server used during the OAuth
//! implicit-grant flow.
//!
//! ## Endpoints
//!
//! - [`redirect`] - Serves a page whose script moves the `access_token`,
//!   `token_type` and `expires_in` values from the URL fragment into the query
//!   string and navigates to `/capture`. Fragments never reach the server, so
//!   this indirection is the only way to read them.
//! - [`capture`] - Reads the relocated parameters, builds the token and
//!   releases the [`crate::gate`] exactly once. Provider errors render a
//!   failure page and leave the gate closed.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Extension, Router, routing::get};
//! use spotify_export::api::{capture, redirect};
//!
//! let app = Router::new()
//!     .route("/redirect", get(redirect))
//!     .route("/capture", get(capture).layer(Extension(signal)));
//! ```

mod capture;
mod redirect;

pub use capture::capture;
pub use redirect::redirect;
