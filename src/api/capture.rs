use std::sync::Arc;

use axum::{Extension, extract::Query, response::Html};

use crate::{
    gate::{GateError, TokenSignal},
    info, success,
    types::{CaptureParams, Token},
    utils, warning,
};

pub async fn capture(
    Query(params): Query<CaptureParams>,
    Extension(signal): Extension<Arc<TokenSignal>>,
) -> Html<String> {
    if let Some(error) = params.error.as_deref().filter(|e| !e.is_empty()) {
        warning!("Spotify rejected the authorization: {}", error);
        return Html(format!(
            "<html><body><h4>Authorization failed: {}.</h4></body></html>",
            utils::escape_html(error)
        ));
    }

    let Some(access_token) = params.access_token.filter(|t| !t.is_empty()) else {
        warning!("Authorization redirect did not carry an access token.");
        return Html("<html><body><h4>Missing access token.</h4></body></html>".to_string());
    };

    let token_type = params.token_type.unwrap_or_default();
    let expires_in = utils::parse_expires_in(params.expires_in.as_deref());

    match signal
        .send_with(|| Token::issued_now(access_token, token_type, expires_in))
        .await
    {
        Ok(token) => {
            success!(
                "Access token received (expires at {}).",
                token.expires_at.format("%H:%M:%S UTC")
            );
            Html(
                "<html><body><h2>Authorization complete.</h2><p>You may close this tab.</p></body></html>"
                    .to_string(),
            )
        }
        Err(GateError::AlreadyResolved) => {
            info!("Ignoring repeated authorization redirect.");
            Html(
                "<html><body><h4>Authorization was already completed.</h4></body></html>"
                    .to_string(),
            )
        }
        Err(e) => {
            warning!("Could not deliver access token: {}", e);
            Html("<html><body><h4>Authorization expired, please retry.</h4></body></html>".to_string())
        }
    }
}
