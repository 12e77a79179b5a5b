use crate::{
    spotify::client::{FetchError, SpotifyClient},
    types::{Token, User},
};

/// Profile of the user the token was issued for.
pub async fn current_user(client: &SpotifyClient, token: &Token) -> Result<User, FetchError> {
    client.get_json("/me", token).await
}
