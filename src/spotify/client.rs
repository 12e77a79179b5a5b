use std::fmt;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};

use crate::{
    config,
    types::{Items, Page, Token},
};

#[derive(Debug)]
pub enum FetchError {
    /// The request could not be built or sent.
    Transport(reqwest::Error),
    /// The API answered with a non-success status.
    Status { status: StatusCode, url: String },
    /// The response body could not be read.
    Body(reqwest::Error),
    /// The response body is not the expected JSON.
    Decode(serde_json::Error),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Transport(e) => write!(f, "request failed: {}", e),
            FetchError::Status { status, url } => write!(f, "{} returned {}", url, status),
            FetchError::Body(e) => write!(f, "failed to read response body: {}", e),
            FetchError::Decode(e) => write!(f, "failed to decode response: {}", e),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Transport(e) | FetchError::Body(e) => Some(e),
            FetchError::Decode(e) => Some(e),
            FetchError::Status { .. } => None,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err)
    }
}

/// Authenticated client for the Spotify Web API.
///
/// Listing endpoints are walked page by page through the `next` URL the API
/// returns, strictly sequentially and with a single attempt per request.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    base_url: String,
}

impl SpotifyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config() -> Self {
        Self::new(config::spotify_apiurl())
    }

    /// Fetches every page of `path` and returns `{"items": [...]}` as JSON bytes.
    ///
    /// `query` is only sent with the first request; later pages use the
    /// provider's `next` URL untouched. Any failure discards the pages
    /// gathered so far.
    pub async fn fetch_all(
        &self,
        path: &str,
        token: &Token,
        query: &[(&str, &str)],
    ) -> Result<Vec<u8>, FetchError> {
        self.fetch_all_in(path, token, query, None).await
    }

    /// Like [`SpotifyClient::fetch_all`], for listings wrapped in a named
    /// object, e.g. `{"artists": {"items": [...], "next": ...}}`.
    pub async fn fetch_all_in(
        &self,
        path: &str,
        token: &Token,
        query: &[(&str, &str)],
        envelope: Option<&str>,
    ) -> Result<Vec<u8>, FetchError> {
        let mut items: Vec<Value> = Vec::new();
        let mut url = format!("{}{}", self.base_url, path);
        let mut query = query;

        loop {
            let body = self.send(&url, token, query).await?;
            // Later pages carry their parameters inside `next`.
            query = &[];

            let page = decode_page(&body, envelope)?;
            if let Some(page_items) = page.items {
                items.extend(page_items);
            }

            match page.next.filter(|n| !n.is_empty()) {
                Some(next) => url = next,
                None => break,
            }
        }

        Ok(serde_json::to_vec(&json!({ "items": items }))?)
    }

    /// Fetches every page of `path` and decodes the items as `T`.
    pub async fn fetch_items<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &Token,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, FetchError> {
        self.fetch_items_in(path, token, query, None).await
    }

    pub async fn fetch_items_in<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &Token,
        query: &[(&str, &str)],
        envelope: Option<&str>,
    ) -> Result<Vec<T>, FetchError> {
        let bytes = self.fetch_all_in(path, token, query, envelope).await?;
        let decoded: Items<T> = serde_json::from_slice(&bytes)?;
        Ok(decoded.items)
    }

    /// Single authenticated GET for non-listing resources such as `/me`.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &Token,
    ) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        let body = self.send(&url, token, &[]).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn send(
        &self,
        url: &str,
        token: &Token,
        query: &[(&str, &str)],
    ) -> Result<Vec<u8>, FetchError> {
        let mut request = self.http.get(url).bearer_auth(&token.access_token);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await.map_err(FetchError::Transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                url: response.url().to_string(),
            });
        }

        let body = response.bytes().await.map_err(FetchError::Body)?;
        Ok(body.to_vec())
    }
}

fn decode_page(body: &[u8], envelope: Option<&str>) -> Result<Page, FetchError> {
    let mut object: Map<String, Value> = serde_json::from_slice(body)?;
    let page = match envelope {
        Some(key) => match object.remove(key) {
            Some(inner) => serde_json::from_value(inner)?,
            None => Page::default(),
        },
        None => serde_json::from_value(Value::Object(object))?,
    };
    Ok(page)
}
