use std::{fmt, io, net::SocketAddr, sync::Arc, time::Duration};

use crate::{
    config,
    gate::{self, GateError},
    info,
    server::start_callback_server,
    types::Token,
    utils, warning,
};

#[derive(Debug)]
pub enum AuthError {
    /// `SERVER_ADDRESS` is not a socket address.
    InvalidAddress(String),
    /// The callback server could not bind its address.
    Bind(io::Error),
    /// The authorization URL could not be built.
    AuthorizeUrl(String),
    /// No token was delivered.
    Gate(GateError),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidAddress(e) => write!(f, "invalid server address: {}", e),
            AuthError::Bind(e) => write!(f, "failed to start callback server: {}", e),
            AuthError::AuthorizeUrl(e) => write!(f, "{}", e),
            AuthError::Gate(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<GateError> for AuthError {
    fn from(err: GateError) -> Self {
        AuthError::Gate(err)
    }
}

/// Runs the implicit-grant flow with the configured settings.
///
/// Waits at most [`config::AUTH_TIMEOUT`] for the browser to come back.
pub async fn authenticate() -> Result<Token, AuthError> {
    let addr: SocketAddr = config::server_addr()
        .parse()
        .map_err(|e: std::net::AddrParseError| AuthError::InvalidAddress(e.to_string()))?;

    authenticate_with(addr, config::AUTH_TIMEOUT, open_browser).await
}

/// Implicit-grant flow against an explicit address and timeout.
///
/// `launch` receives the authorization URL once the callback server is
/// listening. The server is shut down before returning, whether or not a
/// token arrived.
pub async fn authenticate_with<F>(
    addr: SocketAddr,
    timeout: Duration,
    launch: F,
) -> Result<Token, AuthError>
where
    F: FnOnce(&str),
{
    let (signal, waiter) = gate::token_gate();
    let server = start_callback_server(addr, Arc::new(signal))
        .await
        .map_err(AuthError::Bind)?;

    let auth_url = match utils::build_authorize_url(
        &config::spotify_apiauth_url(),
        &config::spotify_client_id(),
        &config::spotify_scope(),
        &server.redirect_uri(),
    ) {
        Ok(url) => url,
        Err(e) => {
            server.shutdown().await;
            return Err(AuthError::AuthorizeUrl(e));
        }
    };

    launch(&auth_url);
    info!(
        "Waiting up to {} seconds for Spotify authorization...",
        timeout.as_secs()
    );

    let result = waiter.await_token(timeout).await;
    server.shutdown().await;

    Ok(result?)
}

/// Opens `url` in the system default browser.
///
/// Failure is not fatal: the URL is printed so the user can open it manually.
pub fn open_browser(url: &str) {
    if let Err(e) = webbrowser::open(url) {
        warning!(
            "Failed to open browser ({}). Please navigate to the following URL manually:\n{}",
            e,
            url
        );
    }
}
