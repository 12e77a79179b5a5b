#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use spotify_export::types::Token;

pub struct Route {
    pub path: String,
    pub status: u16,
    pub body: String,
}

pub fn ok(path: &str, body: Value) -> Route {
    Route {
        path: path.to_string(),
        status: 200,
        body: body.to_string(),
    }
}

pub fn status(path: &str, status: u16) -> Route {
    Route {
        path: path.to_string(),
        status,
        body: format!(r#"{{"error":{{"status":{},"message":"fixture"}}}}"#, status),
    }
}

pub fn raw(path: &str, body: &str) -> Route {
    Route {
        path: path.to_string(),
        status: 200,
        body: body.to_string(),
    }
}

#[derive(Default)]
struct FixtureState {
    routes: HashMap<String, (u16, String)>,
    requests: Mutex<Vec<String>>,
    auth_headers: Mutex<Vec<String>>,
}

/// A fake Web API bound to a random local port.
pub struct Fixture {
    pub base: String,
    state: Arc<FixtureState>,
}

impl Fixture {
    /// `/v1`-prefixed base URL to hand to `SpotifyClient::new`.
    pub fn api_url(&self) -> String {
        format!("{}/v1", self.base)
    }

    /// Path and query of every request received, in order.
    pub fn requests(&self) -> Vec<String> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn auth_headers(&self) -> Vec<String> {
        self.state.auth_headers.lock().unwrap().clone()
    }
}

/// Starts a fixture server. `build` receives the server base URL
/// (`http://127.0.0.1:PORT`) so pages can link to each other.
pub async fn serve<F>(build: F) -> Fixture
where
    F: FnOnce(&str) -> Vec<Route>,
{
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let routes = build(&base)
        .into_iter()
        .map(|r| (r.path, (r.status, r.body)))
        .collect();
    let state = Arc::new(FixtureState {
        routes,
        ..Default::default()
    });

    let app = Router::new().fallback(handle).with_state(Arc::clone(&state));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Fixture { base, state }
}

async fn handle(State(state): State<Arc<FixtureState>>, uri: Uri, headers: HeaderMap) -> Response {
    let recorded = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());
    state.requests.lock().unwrap().push(recorded);
    if let Some(auth) = headers.get(header::AUTHORIZATION) {
        state
            .auth_headers
            .lock()
            .unwrap()
            .push(auth.to_str().unwrap_or_default().to_string());
    }

    match state.routes.get(uri.path()) {
        Some((code, body)) => (
            StatusCode::from_u16(*code).unwrap(),
            [(header::CONTENT_TYPE, "application/json")],
            body.clone(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

pub fn token() -> Token {
    Token::issued_now("abc".to_string(), "Bearer".to_string(), 3600)
}

pub fn track(name: &str, artist: &str, album: &str) -> Value {
    serde_json::json!({
        "name": name,
        "album": { "name": album },
        "artists": [ { "name": artist } ],
    })
}
