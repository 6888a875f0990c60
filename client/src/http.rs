//! Shared blocking HTTP+JSON transport.
//!
//! Uses the `reqwest` blocking client, so collaborator calls run to
//! completion on the caller's thread and the session stays single-threaded.
//! Every endpoint answers with a JSON body carrying a `status` field, also on
//! HTTP errors, so bodies are decoded before the status code is looked at.

use crate::config::ClientConfig;
use anagram_core::{CollaboratorError, Result};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

const CSRF_HEADER: &str = "X-CSRFToken";

fn transport(e: reqwest::Error) -> CollaboratorError {
    CollaboratorError::Transport(e.to_string())
}

#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    csrf_token: Option<String>,
    client: Client,
}

impl HttpClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(transport)?;
        Ok(Self {
            base_url: config.base_url.clone(),
            csrf_token: config.csrf_token.clone(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join `path` onto the base URL with exactly one slash between them.
    pub fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    pub fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!(%url, "GET");
        self.send(self.client.get(&url))
    }

    pub fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.url(path);
        debug!(%url, "POST");
        self.send(self.client.post(&url).json(body))
    }

    fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let request = match &self.csrf_token {
            Some(token) => request.header(CSRF_HEADER, token),
            None => request,
        };
        let response = request.send().map_err(transport)?;
        let status = response.status();
        let body = response.text().map_err(transport)?;
        decode(status, &body)
    }
}

pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Decode a JSON body; an undecodable body on a failed request is reported
/// as a transport failure carrying the HTTP status.
pub fn decode<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T> {
    match serde_json::from_str(body) {
        Ok(v) => Ok(v),
        Err(_) if !status.is_success() => Err(CollaboratorError::Transport(format!(
            "HTTP {}",
            status.as_u16()
        ))),
        Err(e) => Err(CollaboratorError::Malformed(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anagram_core::{Status, StatusResponse};

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("http://h/", "/save-anagrams/"), "http://h/save-anagrams/");
        assert_eq!(join_url("http://h", "save-anagrams/"), "http://h/save-anagrams/");
    }

    #[test]
    fn test_decode_error_body_on_bad_request() {
        let resp: StatusResponse = decode(
            StatusCode::BAD_REQUEST,
            r#"{"status":"error","message":"not found"}"#,
        )
        .unwrap();
        assert_eq!(resp.status, Status::Error);
    }

    #[test]
    fn test_decode_html_on_server_error() {
        let err = decode::<StatusResponse>(StatusCode::INTERNAL_SERVER_ERROR, "<html>")
            .unwrap_err();
        assert_eq!(err.to_string(), "transport error: HTTP 500");
    }

    #[test]
    fn test_decode_unexpected_shape() {
        let err = decode::<StatusResponse>(StatusCode::OK, r#"{"ok":true}"#).unwrap_err();
        assert!(matches!(err, CollaboratorError::Malformed(_)));
    }

    #[test]
    fn test_client_url() {
        let cfg = ClientConfig {
            base_url: "https://example.org/app/".into(),
            ..ClientConfig::default()
        };
        let http = HttpClient::new(&cfg).unwrap();
        assert_eq!(http.url("save-anagrams/"), "https://example.org/app/save-anagrams/");
    }
}
