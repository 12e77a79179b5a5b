use crate::{
    error, info,
    spotify::{self, SpotifyClient},
    success,
    types::Token,
    warning,
};

pub async fn auth() {
    let (_client, token) = login().await;
    success!(
        "Token of type {} valid until {}.",
        token.token_type,
        token.expires_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
}

/// Obtains a token and greets the user. Exits when no token is obtained.
pub(crate) async fn login() -> (SpotifyClient, Token) {
    info!("Starting Spotify authorization...");
    let token = match spotify::auth::authenticate().await {
        Ok(token) => token,
        Err(e) => error!("Authentication failed: {}", e),
    };

    let client = SpotifyClient::from_config();
    match spotify::user::current_user(&client, &token).await {
        Ok(user) => success!(
            "Logged in as {}",
            user.display_name.unwrap_or(user.id)
        ),
        Err(e) => warning!("Failed to load user profile: {}", e),
    }

    (client, token)
}
